//! Example demonstrating custom parsing with `Unmarshal`

use envstruct::{BoxError, EnvStruct, Record, Unmarshal};

#[derive(Debug, Default, EnvStruct)]
#[envstruct(unmarshal)]
enum ConnectionType {
    #[default]
    Tls,
    Insecure,
}

impl Unmarshal for ConnectionType {
    fn unmarshal(&mut self, raw: &str) -> Result<(), BoxError> {
        *self = match raw {
            "tls" => ConnectionType::Tls,
            "insecure" => ConnectionType::Insecure,
            other => return Err(format!("unable to unmarshal {other} to a connection type").into()),
        };
        Ok(())
    }
}

// Parsed as a whole, "8080-8090", even though it is a struct
#[derive(Debug, Default, EnvStruct)]
#[envstruct(unmarshal)]
struct PortRange {
    start: u16,
    end: u16,
}

impl Unmarshal for PortRange {
    fn unmarshal(&mut self, raw: &str) -> Result<(), BoxError> {
        let (start, end) = raw.split_once('-').ok_or("expected START-END")?;
        self.start = start.parse()?;
        self.end = end.parse()?;
        Ok(())
    }
}

#[derive(Debug, Default, EnvStruct)]
struct Config {
    pub connection: ConnectionType,
    pub ports: PortRange,
    pub fallbacks: Vec<ConnectionType>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("CONNECTION", "insecure");
    std::env::set_var("PORTS", "8080-8090");
    std::env::set_var("FALLBACKS", "tls,insecure");

    let config = Config::from_env()?;

    println!("Custom types:");
    println!("  Connection: {:?}", config.connection);
    println!("  Ports: {}..={}", config.ports.start, config.ports.end);
    println!("  Fallbacks: {:?}", config.fallbacks);

    std::env::set_var("CONNECTION", "plain");
    if let Err(e) = Config::from_env() {
        println!("  Rejected: {e}");
    }

    Ok(())
}
