//! Example demonstrating custom environment variable names

use envstruct::{EnvStruct, Record};

#[derive(Debug, Default, EnvStruct)]
struct Config {
    // Load from DB_CONNECTION_STRING instead of DATABASE_URL
    #[envstruct(name = "DB_CONNECTION_STRING")]
    pub database_url: String,

    // Raw tag form: custom name plus default
    #[envstruct("REDIS_URL,default=redis://localhost")]
    pub cache_url: String,

    // Exactly logRotate, no case variants
    #[envstruct(name = "logRotate", optional)]
    pub rotate: bool,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("DB_CONNECTION_STRING", "postgres://localhost/mydb");
    std::env::set_var("logRotate", "true");

    let config = Config::from_env()?;

    println!("Configuration with custom names:");
    println!("  Database URL: {}", config.database_url);
    println!("  Cache URL: {}", config.cache_url);
    println!("  Rotate: {}", config.rotate);

    Ok(())
}
