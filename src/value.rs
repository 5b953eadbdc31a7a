//! Text-backed scalar values.
//!
//! Every INI value is text. [`Value`] keeps that text and offers conversions in both
//! directions:
//!
//! - **In**: `From` for the primitive scalars and strings, [`Value::new`] for anything
//!   that implements [`Display`](fmt::Display)
//! - **Out**: [`Value::get`] parses into any `FromStr + Default` type and falls back to
//!   the default when the text does not parse; [`Value::try_get`] keeps the failure
//!
//! ## Examples
//!
//! ```rust
//! use mini_ini::Value;
//!
//! let port = Value::from(8080);
//! assert_eq!(port.as_str(), "8080");
//! assert_eq!(port.get::<u16>(), 8080);
//!
//! let junk = Value::from("not_a_number");
//! assert_eq!(junk.as_i64(), 0);
//! assert_eq!(junk.try_get::<i64>(), None);
//!
//! // Comparisons are textual
//! assert_eq!(port, 8080);
//! assert_eq!(port, "8080");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An opaque, text-backed INI value.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value(String);

impl Value {
    /// Builds a value from the `Display` text of `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Value;
    /// use std::net::Ipv4Addr;
    ///
    /// let addr = Value::new(&Ipv4Addr::LOCALHOST);
    /// assert_eq!(addr.as_str(), "127.0.0.1");
    /// assert_eq!(addr.try_get::<Ipv4Addr>(), Some(Ipv4Addr::LOCALHOST));
    /// ```
    #[must_use]
    pub fn new<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Value(value.to_string())
    }

    /// Returns the underlying text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value, returning the underlying text.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` if the text is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses the text as `T`, or returns `T::default()` if it does not parse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Value;
    ///
    /// assert_eq!(Value::from("2.5").get::<f32>(), 2.5);
    /// assert_eq!(Value::from("2.5").get::<u8>(), 0);
    /// ```
    #[must_use]
    pub fn get<T: FromStr + Default>(&self) -> T {
        self.try_get().unwrap_or_default()
    }

    /// Parses the text as `T`, returning `None` if it does not parse.
    #[must_use]
    pub fn try_get<T: FromStr>(&self) -> Option<T> {
        self.0.parse().ok()
    }

    /// The text as an `i64`, or `0`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.get()
    }

    /// The text as a `u64`, or `0`.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.get()
    }

    /// The text as an `f64`, or `0.0`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.get()
    }

    /// The text as a `bool`, or `false`.
    ///
    /// Accepts `true`/`false` as well as `1`/`0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mini_ini::Value;
    ///
    /// assert!(Value::from("true").as_bool());
    /// assert!(Value::from("1").as_bool());
    /// assert!(!Value::from("yes").as_bool());
    /// ```
    #[must_use]
    pub fn as_bool(&self) -> bool {
        parse_bool(&self.0).unwrap_or_default()
    }
}

/// `true`/`false` or `1`/`0`.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" => Some(true),
        "0" => Some(false),
        other => other.parse().ok(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Value {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value(value.clone())
    }
}

impl From<Value> for String {
    fn from(value: Value) -> Self {
        value.0
    }
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value(value.to_string())
                }
            }

            impl PartialEq<$ty> for Value {
                fn eq(&self, other: &$ty) -> bool {
                    self.0 == other.to_string()
                }
            }
        )*
    };
}

impl_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char);

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}

impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        self == other.0
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        *self == other.0
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number or boolean")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_char<E>(self, value: char) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::default())
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(42i32).as_str(), "42");
        assert_eq!(Value::from(-7i64).as_str(), "-7");
        assert_eq!(Value::from(3.5f64).as_str(), "3.5");
        assert_eq!(Value::from(true).as_str(), "true");
        assert_eq!(Value::from('x').as_str(), "x");
        assert_eq!(Value::from("text").as_str(), "text");
        assert_eq!(Value::from(String::from("owned")).as_str(), "owned");
    }

    #[test]
    fn test_get_falls_back_to_default() {
        let value = Value::from("not_a_number");
        assert_eq!(value.get::<i32>(), 0);
        assert_eq!(value.get::<u64>(), 0);
        assert_eq!(value.get::<f64>(), 0.0);
        assert!(!value.get::<bool>());
        assert_eq!(value.get::<String>(), "not_a_number");
    }

    #[test]
    fn test_get_parses() {
        assert_eq!(Value::from("8080").get::<u16>(), 8080);
        assert_eq!(Value::from("-1").as_i64(), -1);
        assert_eq!(Value::from("18446744073709551615").as_u64(), u64::MAX);
        assert_eq!(Value::from("0.25").as_f64(), 0.25);
    }

    #[test]
    fn test_out_of_range_is_default() {
        assert_eq!(Value::from("300").get::<u8>(), 0);
        assert_eq!(Value::from("-1").as_u64(), 0);
    }

    #[test]
    fn test_try_get() {
        assert_eq!(Value::from("12").try_get::<i8>(), Some(12));
        assert_eq!(Value::from("12 ").try_get::<i8>(), None);
        assert_eq!(Value::default().try_get::<i8>(), None);
    }

    #[test]
    fn test_as_bool() {
        assert!(Value::from("true").as_bool());
        assert!(Value::from("1").as_bool());
        assert!(!Value::from("0").as_bool());
        assert!(!Value::from("false").as_bool());
        assert!(!Value::from("TRUE").as_bool());
    }

    #[test]
    fn test_textual_equality() {
        let value = Value::from("42");
        assert_eq!(value, 42);
        assert_eq!(value, 42u8);
        assert_eq!(value, "42");
        assert_eq!(value, String::from("42"));
        assert_eq!("42", value);
        assert_ne!(value, 42.0f64 + 0.5);
        // "42.0" is not the text of the float 42.0 ("42")
        assert_ne!(Value::from("42.0"), 42.0f64);
    }

    #[test]
    fn test_display_and_into_string() {
        let value = Value::new(&1.5f32);
        assert_eq!(value.to_string(), "1.5");
        assert_eq!(value.into_string(), "1.5");
    }

    #[test]
    fn test_serde_json() {
        let value: Value = serde_json::from_str("8080").unwrap();
        assert_eq!(value, "8080");
        let value: Value = serde_json::from_str("true").unwrap();
        assert_eq!(value, "true");
        let value: Value = serde_json::from_str("\"host\"").unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"host\"");
    }
}
