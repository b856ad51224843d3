//! Example demonstrating JSON-encoded values

use envstruct::{EnvStruct, Json, Record};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize)]
struct Endpoint {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Default, EnvStruct)]
struct Config {
    // Plain text
    pub app_name: String,

    // Maps do not fit the comma format, JSON does
    pub labels: Json<HashMap<String, String>>,

    // Nested lists of structs
    pub endpoints: Json<Vec<Endpoint>>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_NAME", "my-application");
    std::env::set_var("LABELS", r#"{"tier":"web","region":"eu"}"#);
    std::env::set_var(
        "ENDPOINTS",
        r#"[{"host":"a.local","port":80},{"host":"b.local","port":81}]"#,
    );

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  App Name: {}", config.app_name);
    println!("  Labels: {:?}", *config.labels);
    for endpoint in config.endpoints.iter() {
        println!("  Endpoint: {}:{}", endpoint.host, endpoint.port);
    }

    Ok(())
}
