//! Example demonstrating key prefixes

use envstruct::{EnvStruct, Record};

#[derive(Debug, Default, EnvStruct)]
#[envstruct(prefix = "MYAPP")]
struct Config {
    // Environment variables will be prefixed: MYAPP_DATABASE_URL, MYAPP_API_KEY, etc.
    pub database_url: String,
    pub api_key: String,

    #[envstruct(default = 8080)]
    pub port: u16,

    #[envstruct(optional)]
    pub debug: bool,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables with prefix
    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/db");
    std::env::set_var("MYAPP_API_KEY", "secret-key-123");
    std::env::set_var("MYAPP_PORT", "3000");

    let config = Config::from_env()?;

    println!("Configuration with prefix 'MYAPP':");
    println!("  Database URL: {}", config.database_url);
    println!("  API Key: {}", config.api_key);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);

    // A prefix can also be chosen at bind time
    std::env::set_var("STAGING_DATABASE_URL", "postgres://staging/db");
    std::env::set_var("STAGING_API_KEY", "staging-key");
    let mut staging = Config::default();
    envstruct::init_with_prefix(&mut staging, "STAGING")?;
    println!("  Staging database URL: {}", staging.database_url);

    Ok(())
}
