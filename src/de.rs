//! Serde deserialization from INI documents.
//!
//! The document is presented to Serde as a map: properties of the empty section
//! are top-level scalar fields, and every named section is a nested map of its
//! properties. Scalars are parsed from text on demand, so a `u16` field reads
//! `port=8080` and a `String` field reads it as `"8080"`.
//!
//! ## Usage
//!
//! ```rust
//! use mini_ini::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Net { host: String, port: u16 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { name: String, debug: Option<bool>, net: Net }
//!
//! let config: Config = from_str("name=demo\n[net]\nhost=localhost\nport=8080").unwrap();
//! assert_eq!(config.net.port, 8080);
//! assert_eq!(config.debug, None);
//! ```
//!
//! An empty property reads as `None` when the field is an `Option`.

use crate::value::parse_bool;
use crate::{Error, Ini, Result};
use serde::de::value::StrDeserializer;
use serde::de::{self, DeserializeOwned, Deserializer, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::io::Read;

/// Deserializes a `T` from the entries of `ini`.
///
/// # Errors
///
/// Returns [`Error::InvalidValue`] if a property does not parse as its field type,
/// or [`Error::Custom`] for shape mismatches such as a missing field.
pub fn from_ini<T>(ini: &Ini) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(document(ini))
}

/// Parses INI text and deserializes a `T` from it.
///
/// # Errors
///
/// See [`from_ini`].
pub fn from_str<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut ini = Ini::new();
    ini.parse(text);
    from_ini(&ini)
}

/// Reads INI text from `reader` and deserializes a `T` from it.
///
/// # Errors
///
/// Returns [`Error::SourceUnavailable`] if reading fails, otherwise see
/// [`from_ini`].
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut ini = Ini::new();
    ini.read_from(reader)?;
    from_ini(&ini)
}

/// The document tree: at most two levels deep.
enum Node<'a> {
    Scalar(&'a str),
    Map(Vec<(&'a str, Node<'a>)>),
}

fn document(ini: &Ini) -> Node<'_> {
    let mut fields = Vec::new();
    for section in ini.sections() {
        let properties = section
            .iter()
            .map(|(property, value)| (property, Node::Scalar(value.as_str())));
        if section.name().is_empty() {
            fields.extend(properties);
        } else {
            let properties = properties.collect();
            fields.push((section.name(), Node::Map(properties)));
        }
    }
    Node::Map(fields)
}

macro_rules! dispatch {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self {
                    Node::Scalar(text) => ScalarDeserializer(text).$method(visitor),
                    Node::Map(fields) => visitor.visit_map(FieldAccess::new(fields)),
                }
            }
        )*
    };
}

impl<'de> Deserializer<'de> for Node<'_> {
    type Error = Error;

    dispatch! {
        deserialize_any deserialize_bool
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64 deserialize_i128
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64 deserialize_u128
        deserialize_f32 deserialize_f64 deserialize_char deserialize_str deserialize_string
        deserialize_bytes deserialize_byte_buf deserialize_unit deserialize_seq
        deserialize_map deserialize_identifier deserialize_ignored_any
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Node::Scalar(text) => ScalarDeserializer(text).deserialize_option(visitor),
            map => visitor.visit_some(map),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Node::Scalar(text) => {
                ScalarDeserializer(text).deserialize_enum(name, variants, visitor)
            }
            Node::Map(_) => Err(Error::unsupported_type(&format!(
                "section read as enum {name}"
            ))),
        }
    }
}

/// Hands out the fields of a document or section one at a time.
struct FieldAccess<'a> {
    fields: std::vec::IntoIter<(&'a str, Node<'a>)>,
    pending: Option<Node<'a>>,
}

impl<'a> FieldAccess<'a> {
    fn new(fields: Vec<(&'a str, Node<'a>)>) -> Self {
        FieldAccess {
            fields: fields.into_iter(),
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for FieldAccess<'_> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.fields.next() {
            Some((name, node)) => {
                self.pending = Some(node);
                let key: StrDeserializer<'_, Error> = name.into_deserializer();
                seed.deserialize(key).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some(node) => seed.deserialize(node),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

/// Reads one property's text as whatever type the visitor asks for.
struct ScalarDeserializer<'a>(&'a str);

impl ScalarDeserializer<'_> {
    fn parse<T: std::str::FromStr>(&self, expected: &str) -> Result<T> {
        self.0
            .parse()
            .map_err(|_| Error::invalid_value(self.0, expected))
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let value: $ty = self.parse(stringify!($ty))?;
                visitor.$visit(value)
            }
        )*
    };
}

impl<'de> Deserializer<'de> for ScalarDeserializer<'_> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_str(self.0)
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match parse_bool(self.0) {
            Some(value) => visitor.visit_bool(value),
            None => Err(Error::invalid_value(self.0, "bool")),
        }
    }

    deserialize_parsed! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
        deserialize_char => visit_char(char),
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_str(self.0)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.0.to_string())
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.0.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let variant: StrDeserializer<'_, Error> = self.0.into_deserializer();
        visitor.visit_enum(variant)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bytes byte_buf seq tuple tuple_struct map struct identifier
    }
}
