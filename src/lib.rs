//! # mini_ini
//!
//! A small INI reader and writer built around one flat, ordered map.
//!
//! ## The model
//!
//! An INI file is read into an [`Ini`], which maps composite keys of the form
//! `section.property` to text-backed [`Value`]s:
//!
//! ```text
//! ; settings                 =>  ".name"     => "demo"
//! name=demo                      "net.host"  => "localhost"
//! [net]                          "net.port"  => "8080"
//! host=localhost
//! port=8080
//! ```
//!
//! Parsing never fails. Comment lines (`;` or `#`) and blank lines are skipped, a
//! property without `=` gets an empty value and a later duplicate key overwrites
//! an earlier one. Values convert on demand: [`Value::get`] parses into any
//! `FromStr` type and falls back to its default.
//!
//! ## Quick Start
//!
//! ```rust
//! use mini_ini::{Ini, DumpOptions, LineEnding};
//!
//! let mut ini = Ini::new();
//! ini.parse("; settings\r\nname=demo\r\n[net]\r\nhost=localhost\r\nport=8080");
//!
//! assert_eq!(ini.get("net.port").unwrap().get::<u16>(), 8080);
//! assert_eq!(ini.get(".name").unwrap(), "demo");
//!
//! ini.set("net", "port", 9090);
//!
//! let options = DumpOptions::bare().with_line_ending(LineEnding::Lf);
//! assert_eq!(
//!     ini.dump_with(&options),
//!     "name=demo\n\n[net]\nhost=localhost\nport=9090\n\n"
//! );
//! ```
//!
//! ## Files
//!
//! [`Ini::load`] merges a file into the store and [`Ini::save`] writes it back
//! with the default banner. Both report unreadable or unwritable files as
//! [`Error::SourceUnavailable`] and [`Error::SinkUnavailable`].
//!
//! ## Typed access with Serde
//!
//! Structs whose fields are scalars or one level of nested structs map onto
//! sections directly:
//!
//! ```rust
//! use mini_ini::{from_str, to_string_with_options, DumpOptions};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Net { host: String, port: u16 }
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Config { name: String, net: Net }
//!
//! let config: Config = from_str("name=demo\n[net]\nhost=localhost\nport=8080").unwrap();
//! assert_eq!(config.net.port, 8080);
//!
//! let text = to_string_with_options(&config, &DumpOptions::bare()).unwrap();
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(back, config);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `debug` for file loads and saves, `trace`
//! for skipped comments and section changes, and `warn` when a source is not
//! valid UTF-8. Install a subscriber to see them.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`roundtrip.rs`** - Loading, editing and saving a file
//! - **`typed_config.rs`** - Reading a configuration struct with Serde
//!
//! Run either with: `cargo run --example <name>`

pub mod de;
mod dump;
pub mod error;
mod io;
pub mod line;
pub mod macros;
pub mod map;
pub mod options;
pub mod parse;
pub mod section;
pub mod ser;
pub mod tokenize;
pub mod value;

pub use de::{from_ini, from_reader, from_str};
pub use error::{Error, Result};
pub use io::default_path;
pub use map::{composite_key, split_key, Ini, SEPARATOR};
pub use options::{
    DumpOptions, KeyOrder, LineEnding, ParseMode, DEFAULT_FOOTER, DEFAULT_HEADER,
};
pub use parse::Parser;
pub use section::Section;
pub use ser::{to_ini, to_string, to_string_with_options, to_writer};
pub use tokenize::tokenize;
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Window {
        width: u32,
        height: u32,
        title: String,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Settings {
        version: u8,
        window: Window,
    }

    fn settings() -> Settings {
        Settings {
            version: 2,
            window: Window {
                width: 800,
                height: 600,
                title: "Main Window".to_string(),
            },
        }
    }

    #[test]
    fn test_serialize_deserialize_settings() {
        let text = to_string(&settings()).unwrap();
        let back: Settings = from_str(&text).unwrap();
        assert_eq!(back, settings());
    }

    #[test]
    fn test_to_ini_then_from_ini() {
        let ini = to_ini(&settings()).unwrap();
        assert_eq!(ini.get_in("window", "title").unwrap(), "Main Window");
        assert_eq!(ini.get(".version").unwrap(), "2");

        let back: Settings = from_ini(&ini).unwrap();
        assert_eq!(back, settings());
    }

    #[test]
    fn test_parse_edit_dump() {
        let mut ini: Ini = "[a]\r\nx=1\r\n; gone\r\n[b]\r\ny=2".parse().unwrap();
        *ini.get_mut("a.x").unwrap() = Value::from(10);
        ini.remove("b.y");
        assert_eq!(ini.dump("", ""), "\r\n[a]\r\nx=10\r\n\r\n");
    }

    #[test]
    fn test_key_helpers_agree_with_parser() {
        let ini: Ini = "[ s ]\n k = v ".parse().unwrap();
        let key = composite_key("s", "k");
        assert!(ini.contains_key(&key));
        assert_eq!(split_key(&key), ("s", "k"));
    }
}
