use mini_ini::{
    from_ini, from_reader, from_str, to_ini, to_string, to_string_with_options, to_writer,
    DumpOptions, Error, Ini, LineEnding,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum Level {
    Error,
    Warn,
    Info,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Database {
    url: String,
    pool_size: u32,
    timeout_secs: f64,
    read_only: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Logging {
    level: Level,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    file: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct AppConfig {
    name: String,
    version: u16,
    database: Database,
    logging: Logging,
}

fn sample() -> AppConfig {
    AppConfig {
        name: "inventory".to_string(),
        version: 3,
        database: Database {
            url: "postgres://localhost/inv".to_string(),
            pool_size: 16,
            timeout_secs: 2.5,
            read_only: false,
        },
        logging: Logging {
            level: Level::Warn,
            file: None,
        },
    }
}

#[test]
fn test_struct_layout() {
    let options = DumpOptions::bare().with_line_ending(LineEnding::Lf);
    let text = to_string_with_options(&sample(), &options).unwrap();
    assert_eq!(
        text,
        "name=inventory\n\
         version=3\n\
         \n\
         [database]\n\
         pool_size=16\n\
         read_only=false\n\
         timeout_secs=2.5\n\
         url=postgres://localhost/inv\n\
         \n\
         [logging]\n\
         level=warn\n\
         \n"
    );
}

#[test]
fn test_struct_round_trip() {
    let text = to_string(&sample()).unwrap();
    let back: AppConfig = from_str(&text).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn test_hand_written_file() {
    let text = "\
; production settings
name = inventory
version = 3

[database]
url = postgres://localhost/inv
pool_size = 16
timeout_secs = 2.5
read_only = 0

[logging]
level = error
file = /var/log/inv.log
";
    let config: AppConfig = from_str(text).unwrap();
    assert_eq!(config.logging.level, Level::Error);
    assert_eq!(config.logging.file.as_deref(), Some("/var/log/inv.log"));
    assert!(!config.database.read_only);
}

#[test]
fn test_typed_view_of_parsed_store() {
    let mut ini: Ini = to_ini(&sample()).unwrap();
    ini.set("database", "pool_size", 32);

    let config: AppConfig = from_ini(&ini).unwrap();
    assert_eq!(config.database.pool_size, 32);
}

#[test]
fn test_invalid_value_reports_text_and_type() {
    let err = from_str::<AppConfig>(
        "name=x\nversion=three\n[database]\nurl=u\npool_size=1\ntimeout_secs=1\nread_only=true\n[logging]\nlevel=info",
    )
    .unwrap_err();
    assert_eq!(err, Error::invalid_value("three", "u16"));
}

#[test]
fn test_unknown_enum_variant() {
    let result = from_str::<BTreeMap<String, Level>>("level=verbose");
    assert!(result.is_err());
}

#[test]
fn test_maps_as_documents() {
    let mut section = HashMap::new();
    section.insert("b".to_string(), 2);
    section.insert("a".to_string(), 1);
    let mut doc = BTreeMap::new();
    doc.insert("numbers".to_string(), section);

    let ini = to_ini(&doc).unwrap();
    let keys: Vec<_> = ini.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["numbers.a", "numbers.b"]);

    let back: BTreeMap<String, HashMap<String, i32>> = from_ini(&ini).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_writer_and_reader() {
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &sample()).unwrap();
    let back: AppConfig = from_reader(buffer.as_slice()).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn test_unsupported_shapes() {
    #[derive(Serialize)]
    struct WithList {
        hosts: Vec<String>,
    }

    let result = to_ini(&WithList {
        hosts: vec!["a".to_string()],
    });
    assert!(matches!(result, Err(Error::UnsupportedType(_))));
    assert!(matches!(to_ini(&"text"), Err(Error::UnsupportedType(_))));
}

#[test]
fn test_ini_as_json() {
    let ini: Ini = "[net]\nport=8080".parse().unwrap();
    let json = serde_json::to_value(&ini).unwrap();
    assert_eq!(json, serde_json::json!({ "net.port": "8080" }));

    let back: Ini = serde_json::from_value(json).unwrap();
    assert_eq!(back, ini);
}
