//! Example demonstrating optional fields

use envstruct::{EnvStruct, Options, Record};

#[derive(Debug, Default, EnvStruct)]
struct Smtp {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Default, EnvStruct)]
struct Config {
    // Required field
    pub database_url: String,

    // Missing means the zero value
    #[envstruct(optional)]
    pub api_key: String,

    // Missing means None
    #[envstruct(optional)]
    pub max_retries: Option<u32>,

    // Every field below is optional too
    #[envstruct(optional)]
    pub smtp: Option<Smtp>,

    // Never read from the environment
    #[envstruct(skip)]
    pub computed: u64,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("DATABASE_URL", "postgres://localhost/db");
    std::env::remove_var("API_KEY");
    std::env::remove_var("MAX_RETRIES");
    std::env::set_var("SMTP_HOST", "mail.example.com");

    let config = Config::from_env_with_options(Options::new().with_leave_nil(true))?;

    println!("Configuration with optional fields:");
    println!("  Database URL: {}", config.database_url);
    println!("  API Key: {:?}", config.api_key);
    println!("  Max Retries: {:?}", config.max_retries);
    println!("  SMTP: {:?}", config.smtp);
    println!("  Computed: {}", config.computed);

    Ok(())
}
