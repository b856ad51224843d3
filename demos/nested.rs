//! Example demonstrating nested structs and pointer fields

use envstruct::{EnvStruct, Options, Record};
use std::time::Duration;

#[derive(Debug, Default, EnvStruct)]
struct Database {
    pub user: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Default, EnvStruct)]
struct MySql {
    pub host: String,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Default, EnvStruct)]
struct Tls {
    pub cert_file: String,
    pub key_file: String,
}

#[derive(Debug, Default, EnvStruct)]
struct Config {
    // MYSQL_HOST, MYSQL_PORT, MYSQL_DATABASE_USER, ...
    pub mysql: MySql,

    // Only kept when one of TLS_CERT_FILE / TLS_KEY_FILE is set
    #[envstruct(optional)]
    pub tls: Option<Tls>,

    pub nb_workers: u32,
    pub timeout: Duration,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYSQL_HOST", "localhost");
    std::env::set_var("MYSQL_PORT", "3306");
    std::env::set_var("MYSQL_DATABASE_USER", "root");
    std::env::set_var("MYSQL_DATABASE_PASSWORD", "foobar");
    std::env::set_var("MYSQL_DATABASE_NAME", "default");
    std::env::set_var("NB_WORKERS", "10");
    std::env::set_var("TIMEOUT", "2m0s");

    let config = Config::from_env_with_options(Options::new().with_leave_nil(true))?;

    println!("Nested configuration:");
    println!("  MySQL: {}:{}", config.mysql.host, config.mysql.port);
    println!("  Database user: {}", config.mysql.database.user);
    println!("  TLS: {:?}", config.tls);
    println!("  Workers: {}", config.nb_workers);
    println!("  Timeout: {:?}", config.timeout);

    Ok(())
}
