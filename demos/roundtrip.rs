//! Loading, editing and saving an INI file.
//!
//! Run with: RUST_LOG=debug cargo run --example roundtrip

use mini_ini::{DumpOptions, Ini, KeyOrder, LineEnding};
use std::error::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SOURCE: &str = "\
; service settings
name = billing

[net]
host = 0.0.0.0
port = 8080

[log]
level = info
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::temp_dir().join("mini_ini_roundtrip.ini");
    std::fs::write(&path, SOURCE)?;

    // Keep the file's own layout instead of sorting keys
    let mut ini = Ini::with_order(KeyOrder::Insertion);
    ini.load(&path)?;
    info!(entries = ini.len(), "loaded {}", path.display());

    for (key, value) in &ini {
        println!("{key} = {value}");
    }

    let port = ini.get("net.port").map(|v| v.get::<u16>()).unwrap_or_default();
    ini.set("net", "port", port + 1);
    ini.set("log", "file", "/var/log/billing.log");
    ini.remove("log.level");

    ini.save(&path)?;
    println!("\nSaved with the default banner:\n{}", std::fs::read_to_string(&path)?);

    let options = DumpOptions::bare().with_line_ending(LineEnding::Lf);
    println!("Bare dump:\n{}", ini.dump_with(&options));

    let reloaded = Ini::from_path(&path)?;
    assert_eq!(reloaded, ini);
    println!("✓ Round-trip successful");

    std::fs::remove_file(&path)?;
    Ok(())
}
