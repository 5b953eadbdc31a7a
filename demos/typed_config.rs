//! Reading a configuration struct with Serde.
//!
//! Run with: cargo run --example typed_config

use mini_ini::{from_str, ini, to_string};
use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
    tls: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    retries: Option<u8>,
    server: Server,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let text = "name=gateway\n[server]\nhost=example.org\nport=443\ntls=1\n";
    let config: Config = from_str(text)?;
    println!("Parsed: {:#?}\n", config);

    let written = to_string(&config)?;
    println!("Serialized:\n{}", written);

    let back: Config = from_str(&written)?;
    assert_eq!(back, config);

    // The same document built by hand
    let built = ini! {
        [""] { "name" => "gateway" },
        ["server"] {
            "host" => "example.org",
            "port" => 443,
            "tls" => true,
        },
    };
    assert_eq!(mini_ini::from_ini::<Config>(&built)?, config);
    println!("✓ Typed round-trip successful");

    Ok(())
}
