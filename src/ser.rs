//! Serde serialization into INI documents.
//!
//! An INI document has exactly two levels, and the serializer maps Rust data onto
//! them:
//!
//! - **Scalar fields** of the top-level struct (or map) become properties of the
//!   empty section, written before any header
//! - **Struct or map fields** become `[sections]`; their scalar fields become
//!   properties
//! - **`None`** fields are omitted
//!
//! Anything deeper (a struct inside a section, a `Vec`, bytes) has no INI form and
//! is rejected with [`Error::UnsupportedType`].
//!
//! ## Usage
//!
//! ```rust
//! use mini_ini::{to_ini, DumpOptions, LineEnding};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Net { host: String, port: u16 }
//!
//! #[derive(Serialize)]
//! struct Config { name: String, net: Net }
//!
//! let config = Config {
//!     name: "demo".to_string(),
//!     net: Net { host: "localhost".to_string(), port: 8080 },
//! };
//!
//! let ini = to_ini(&config).unwrap();
//! assert_eq!(ini.get("net.port").unwrap(), "8080");
//!
//! let options = DumpOptions::bare().with_line_ending(LineEnding::Lf);
//! assert_eq!(
//!     ini.dump_with(&options),
//!     "name=demo\n\n[net]\nhost=localhost\nport=8080\n\n"
//! );
//! ```

use crate::options::DumpOptions;
use crate::{Error, Ini, Result};
use serde::ser::{self, Impossible, Serialize, Serializer};
use std::io::Write;

/// Serializes `value` into a new key-sorted [`Ini`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if `value` is not a struct or map, or if it
/// nests deeper than sections of scalar properties.
pub fn to_ini<T>(value: &T) -> Result<Ini>
where
    T: ?Sized + Serialize,
{
    let mut ini = Ini::new();
    value.serialize(DocumentSerializer { ini: &mut ini })?;
    Ok(ini)
}

/// Serializes `value` to INI text with the default banner and CRLF line endings.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if `value` has no INI shape.
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &DumpOptions::default())
}

/// Serializes `value` to INI text laid out by `options`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if `value` has no INI shape.
pub fn to_string_with_options<T>(value: &T, options: &DumpOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_ini(value)?.dump_with(options))
}

/// Serializes `value` and writes the text, with the default banner, to `writer`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if `value` has no INI shape, or
/// [`Error::SinkUnavailable`] if writing fails.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: Write,
    T: ?Sized + Serialize,
{
    to_ini(value)?.write_to(writer, &DumpOptions::default())
}

/// The serialized form of one top-level field.
enum Field {
    Scalar(Option<String>),
    Section(Vec<(String, String)>),
}

/// Serializes a single property value to its text, `None` meaning "omit".
struct ScalarSerializer;

macro_rules! serialize_display {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, value: $ty) -> Result<Self::Ok> {
                Ok(Some(value.to_string()))
            }
        )*
    };
}

impl Serializer for ScalarSerializer {
    type Ok = Option<String>;
    type Error = Error;
    type SerializeSeq = Impossible<Option<String>, Error>;
    type SerializeTuple = Impossible<Option<String>, Error>;
    type SerializeTupleStruct = Impossible<Option<String>, Error>;
    type SerializeTupleVariant = Impossible<Option<String>, Error>;
    type SerializeMap = Impossible<Option<String>, Error>;
    type SerializeStruct = Impossible<Option<String>, Error>;
    type SerializeStructVariant = Impossible<Option<String>, Error>;

    serialize_display!(
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_i128(i128),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_u128(u128),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
    );

    fn serialize_str(self, value: &str) -> Result<Self::Ok> {
        Ok(Some(value.to_string()))
    }

    fn serialize_bytes(self, _value: &[u8]) -> Result<Self::Ok> {
        Err(Error::unsupported_type("bytes"))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Some(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type(&format!("{name}::{variant} as a property")))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::unsupported_type("sequence as a property"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::unsupported_type("tuple as a property"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_type(&format!("{name} as a property")))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type(&format!("{name}::{variant} as a property")))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::unsupported_type("map nested inside a section"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::unsupported_type(&format!("{name} nested inside a section")))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type(&format!("{name}::{variant} as a property")))
    }
}

fn property_name<T>(key: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    key.serialize(ScalarSerializer)?
        .ok_or_else(|| Error::unsupported_type("empty map key"))
}

/// Serializes a top-level field: scalars pass through, structs and maps become
/// sections.
struct FieldSerializer;

macro_rules! forward_scalar {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, value: $ty) -> Result<Self::Ok> {
                ScalarSerializer.$method(value).map(Field::Scalar)
            }
        )*
    };
}

impl Serializer for FieldSerializer {
    type Ok = Field;
    type Error = Error;
    type SerializeSeq = Impossible<Field, Error>;
    type SerializeTuple = Impossible<Field, Error>;
    type SerializeTupleStruct = Impossible<Field, Error>;
    type SerializeTupleVariant = Impossible<Field, Error>;
    type SerializeMap = SectionSerializer;
    type SerializeStruct = SectionSerializer;
    type SerializeStructVariant = Impossible<Field, Error>;

    forward_scalar!(
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_i128(i128),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_u128(u128),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
    );

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(Field::Scalar(None))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(Field::Scalar(None))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(Field::Scalar(None))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        ScalarSerializer
            .serialize_unit_variant(name, variant_index, variant)
            .map(Field::Scalar)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type(&format!("{name}::{variant}")))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::unsupported_type("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::unsupported_type("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_type(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type(&format!("{name}::{variant}")))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SectionSerializer::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(SectionSerializer::new(len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type(&format!("{name}::{variant}")))
    }
}

/// Collects the properties of one section.
struct SectionSerializer {
    entries: Vec<(String, String)>,
    key: Option<String>,
}

impl SectionSerializer {
    fn new(len: usize) -> Self {
        SectionSerializer {
            entries: Vec::with_capacity(len),
            key: None,
        }
    }

    fn push<T>(&mut self, property: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(text) = value.serialize(ScalarSerializer)? {
            self.entries.push((property, text));
        }
        Ok(())
    }
}

impl ser::SerializeStruct for SectionSerializer {
    type Ok = Field;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key.to_string(), value)
    }

    fn end(self) -> Result<Field> {
        Ok(Field::Section(self.entries))
    }
}

impl ser::SerializeMap for SectionSerializer {
    type Ok = Field;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(property_name(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.push(key, value)
    }

    fn end(self) -> Result<Field> {
        Ok(Field::Section(self.entries))
    }
}

/// Serializes the top-level value, which must be a struct or a map.
struct DocumentSerializer<'a> {
    ini: &'a mut Ini,
}

fn not_a_document(kind: &str) -> Error {
    Error::unsupported_type(&format!("{kind} at the top level; expected a struct or map"))
}

macro_rules! reject_scalar {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, _value: $ty) -> Result<Self::Ok> {
                Err(not_a_document(stringify!($ty)))
            }
        )*
    };
}

impl<'a> Serializer for DocumentSerializer<'a> {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = DocumentFields<'a>;
    type SerializeStruct = DocumentFields<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    reject_scalar!(
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_i128(i128),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_u128(u128),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
    );

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Err(not_a_document(&format!("{name}::{variant}")))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(not_a_document(&format!("{name}::{variant}")))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(not_a_document("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(not_a_document("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(not_a_document(name))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(not_a_document(&format!("{name}::{variant}")))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(DocumentFields {
            ini: self.ini,
            key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(DocumentFields {
            ini: self.ini,
            key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(not_a_document(&format!("{name}::{variant}")))
    }
}

/// Writes top-level fields into the store as they arrive.
struct DocumentFields<'a> {
    ini: &'a mut Ini,
    key: Option<String>,
}

impl DocumentFields<'_> {
    fn put<T>(&mut self, name: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(FieldSerializer)? {
            Field::Scalar(Some(text)) => {
                self.ini.set("", name, text);
            }
            Field::Scalar(None) => {}
            Field::Section(entries) => {
                for (property, text) in entries {
                    self.ini.set(name, &property, text);
                }
            }
        }
        Ok(())
    }
}

impl ser::SerializeStruct for DocumentFields<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.put(key, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeMap for DocumentFields<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(property_name(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.put(&key, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    enum Level {
        Debug,
    }

    #[derive(Serialize)]
    struct Logging {
        level: Level,
        file: Option<String>,
    }

    #[derive(Serialize)]
    struct App {
        name: &'static str,
        retries: Option<u8>,
        logging: Logging,
    }

    #[test]
    fn test_struct_to_sections() {
        let app = App {
            name: "demo",
            retries: None,
            logging: Logging {
                level: Level::Debug,
                file: None,
            },
        };

        let ini = to_ini(&app).unwrap();
        let entries: Vec<_> = ini.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(entries, vec![(".name", "demo"), ("logging.level", "Debug")]);
    }

    #[test]
    fn test_map_of_maps() {
        let mut net = BTreeMap::new();
        net.insert("port", 8080);
        let mut doc = BTreeMap::new();
        doc.insert("net", net);

        let ini = to_ini(&doc).unwrap();
        assert_eq!(ini.get("net.port").unwrap(), "8080");
    }

    #[test]
    fn test_rejects_non_documents() {
        assert!(matches!(to_ini(&42), Err(Error::UnsupportedType(_))));
        assert!(matches!(to_ini(&vec![1, 2]), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_rejects_deep_nesting() {
        #[derive(Serialize)]
        struct Inner {
            x: u8,
        }
        #[derive(Serialize)]
        struct Middle {
            inner: Inner,
        }
        #[derive(Serialize)]
        struct Outer {
            middle: Middle,
        }

        let err = to_ini(&Outer {
            middle: Middle {
                inner: Inner { x: 1 },
            },
        })
        .unwrap_err();
        assert!(err.to_string().contains("nested inside a section"));
    }

    #[test]
    fn test_rejects_sequences_in_sections() {
        #[derive(Serialize)]
        struct Hosts {
            list: Vec<String>,
        }
        #[derive(Serialize)]
        struct Doc {
            hosts: Hosts,
        }

        let result = to_ini(&Doc {
            hosts: Hosts {
                list: vec!["a".to_string()],
            },
        });
        assert!(matches!(result, Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_to_string_uses_banner() {
        let mut doc = BTreeMap::new();
        doc.insert("name", "demo");
        let text = to_string(&doc).unwrap();
        assert!(text.starts_with(crate::DEFAULT_HEADER));
        assert!(text.contains("\r\nname=demo\r\n"));
    }

    #[test]
    fn test_to_writer() {
        let mut doc = BTreeMap::new();
        doc.insert("k", 1);
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &doc).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), to_string(&doc).unwrap());
    }
}
