//! Basic usage example

use envstruct::EnvStruct;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, EnvStruct)]
struct Config {
    // Required field: loaded from DATABASE_URL or database_url
    pub database_url: String,

    // With default value
    #[envstruct(default = "127.0.0.1:8080")]
    pub server_addr: String,

    // Numeric type
    #[envstruct(default = 10)]
    pub max_connections: u32,

    // Duration, written as 30s, 1m30s, 2h ...
    #[envstruct(default = "30s")]
    pub request_timeout: Duration,

    // Boolean type, missing means false
    #[envstruct(optional)]
    pub debug_mode: bool,
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG=envstruct=trace shows which keys were resolved
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");

    // Load configuration
    let mut config = Config::default();
    envstruct::init(&mut config)?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Request Timeout: {:?}", config.request_timeout);
    println!("  Debug Mode: {}", config.debug_mode);

    Ok(())
}
