//! Example demonstrating slices, structs in slices and byte sequences

use envstruct::{EnvStruct, Record};
use std::time::Duration;

#[derive(Debug, Default, EnvStruct)]
struct Shard {
    pub name: String,
    pub id: u32,
    pub timeout: Duration,
}

#[derive(Debug, Default, EnvStruct)]
struct Config {
    // Comma separated: 1,2,3
    pub partitions: Vec<u32>,

    // One {...} token per element, values in field order
    pub shards: Vec<Shard>,

    // Defaults separate elements with ';'
    #[envstruct(default = "{primary;1;30s};{replica;2;1m}")]
    pub fallback_shards: Vec<Shard>,

    // Base64: Rk9PQkFS is FOOBAR
    pub secret: Vec<u8>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("PARTITIONS", "1,2,3");
    std::env::set_var("SHARDS", "{foobar,10,120s},{barbaz,20,50s}");
    std::env::set_var("SECRET", "Rk9PQkFS");

    let config = Config::from_env()?;

    println!("Collections:");
    println!("  Partitions: {:?}", config.partitions);
    for shard in &config.shards {
        println!("  Shard {} #{} ({:?})", shard.name, shard.id, shard.timeout);
    }
    println!("  Fallback shards: {:?}", config.fallback_shards);
    println!("  Secret: {}", String::from_utf8_lossy(&config.secret));

    Ok(())
}
