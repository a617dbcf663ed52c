//! The ROD value tree.
//!
//! [`RodValue`] is a closed enum over the nine ROD kinds. Decoding produces
//! one, encoding consumes one, and everything in between is ordinary Rust.
//!
//! ## Core Types
//!
//! - [`RodValue`]: any ROD value (also exported as [`Value`](crate::Value))
//! - [`RodMap`]: keys and values, keys primitive
//! - [`RodStruct`]: named fields
//!
//! ## Creating Values
//!
//! ```rust
//! use rod::{RodStruct, RodValue};
//!
//! let null = RodValue::Null;
//! let int = RodValue::from(42);
//! let float = RodValue::from(42.0);
//! let blob = RodValue::from(&b"\x00\xff"[..]);
//! let list = RodValue::from(vec![int.clone(), float.clone()]);
//!
//! // Int and Float never compare equal, even with the same numeric value.
//! assert_ne!(int, float);
//!
//! let mut fields = RodStruct::new();
//! fields.insert("Items", list);
//! let value = RodValue::from(fields);
//! assert_eq!(value.kind(), "struct");
//! ```
//!
//! ## Equality and Ordering
//!
//! Floats compare by bit pattern, except that every NaN equals every other
//! NaN. This makes `RodValue` a lawful `Eq + Hash + Ord` type, so floats
//! (NaN included) can be map keys:
//!
//! ```rust
//! use rod::RodValue;
//!
//! assert_eq!(RodValue::Float(f64::NAN), RodValue::Float(f64::NAN));
//! assert_ne!(RodValue::Float(0.0), RodValue::Float(-0.0));
//! assert!(RodValue::Float(-0.0) < RodValue::Float(0.0));
//! assert!(RodValue::Float(f64::INFINITY) < RodValue::Float(f64::NAN));
//!
//! // Kinds order before contents: every int is below every float.
//! assert!(RodValue::Int(i64::MAX) < RodValue::Float(f64::NEG_INFINITY));
//! ```
//!
//! ## Extracting Values
//!
//! ```rust
//! use rod::{Error, RodValue};
//!
//! let n = i64::try_from(RodValue::from(7)).unwrap();
//! assert_eq!(n, 7);
//!
//! let err = String::try_from(RodValue::from(7)).unwrap_err();
//! assert_eq!(err, Error::type_mismatch("string", "int"));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;
use crate::lexer::{is_ident_char, is_ident_start};
use crate::ser::{escape_str, format_float};
use crate::{Error, RodMap, RodStruct};

/// Any ROD value.
///
/// # Examples
///
/// ```rust
/// use rod::RodValue;
///
/// let value: RodValue = "[1, 2.5, \"three\"]".parse().unwrap();
/// let items = value.as_array().unwrap();
/// assert_eq!(items[0], RodValue::Int(1));
/// assert_eq!(items[1], RodValue::Float(2.5));
/// assert_eq!(items[2].as_str(), Some("three"));
/// ```
#[derive(Clone, Debug, Default)]
pub enum RodValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Blob(Vec<u8>),
    Array(Vec<RodValue>),
    Map(RodMap),
    Struct(RodStruct),
}

impl RodValue {
    /// Position of the kind in the total order, starting at 1 for null.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            RodValue::Null => 1,
            RodValue::Bool(_) => 2,
            RodValue::Int(_) => 3,
            RodValue::Float(_) => 4,
            RodValue::String(_) => 5,
            RodValue::Blob(_) => 6,
            RodValue::Array(_) => 7,
            RodValue::Map(_) => 8,
            RodValue::Struct(_) => 9,
        }
    }

    /// The lowercase name of the value's kind, as used in error messages.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rod::RodValue;
    ///
    /// assert_eq!(RodValue::Null.kind(), "null");
    /// assert_eq!(RodValue::from(vec![1u8]).kind(), "blob");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            RodValue::Null => "null",
            RodValue::Bool(_) => "bool",
            RodValue::Int(_) => "int",
            RodValue::Float(_) => "float",
            RodValue::String(_) => "string",
            RodValue::Blob(_) => "blob",
            RodValue::Array(_) => "array",
            RodValue::Map(_) => "map",
            RodValue::Struct(_) => "struct",
        }
    }

    /// Returns `true` for every kind except array, map and struct. Only
    /// primitives can be map keys.
    #[inline]
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        !matches!(
            self,
            RodValue::Array(_) | RodValue::Map(_) | RodValue::Struct(_)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, RodValue::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, RodValue::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, RodValue::Int(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, RodValue::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, RodValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_blob(&self) -> bool {
        matches!(self, RodValue::Blob(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, RodValue::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, RodValue::Map(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self, RodValue::Struct(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RodValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RodValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float, or `None` for any other kind. Ints are not
    /// converted.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RodValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RodValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RodValue::Blob(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<RodValue>> {
        match self {
            RodValue::Array(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&RodMap> {
        match self {
            RodValue::Map(m) => Some(m),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_struct(&self) -> Option<&RodStruct> {
        match self {
            RodValue::Struct(s) => Some(s),
            _ => None,
        }
    }
}

/// NaN-aware float comparison: all NaNs are equal and greater than any
/// number; everything else follows the IEEE total order, so `-0.0 < 0.0`.
fn cmp_float(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

impl PartialEq for RodValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RodValue::Null, RodValue::Null) => true,
            (RodValue::Bool(a), RodValue::Bool(b)) => a == b,
            (RodValue::Int(a), RodValue::Int(b)) => a == b,
            (RodValue::Float(a), RodValue::Float(b)) => cmp_float(*a, *b) == Ordering::Equal,
            (RodValue::String(a), RodValue::String(b)) => a == b,
            (RodValue::Blob(a), RodValue::Blob(b)) => a == b,
            (RodValue::Array(a), RodValue::Array(b)) => a == b,
            (RodValue::Map(a), RodValue::Map(b)) => a == b,
            (RodValue::Struct(a), RodValue::Struct(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for RodValue {}

impl Hash for RodValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            RodValue::Null => {}
            RodValue::Bool(b) => b.hash(state),
            RodValue::Int(i) => i.hash(state),
            RodValue::Float(f) => {
                let bits = if f.is_nan() { f64::NAN.to_bits() } else { f.to_bits() };
                bits.hash(state);
            }
            RodValue::String(s) => s.hash(state),
            RodValue::Blob(b) => b.hash(state),
            RodValue::Array(a) => a.len().hash(state),
            RodValue::Map(m) => m.hash(state),
            RodValue::Struct(s) => s.hash(state),
        }
    }
}

impl PartialOrd for RodValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RodValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RodValue::Null, RodValue::Null) => Ordering::Equal,
            (RodValue::Bool(a), RodValue::Bool(b)) => a.cmp(b),
            (RodValue::Int(a), RodValue::Int(b)) => a.cmp(b),
            (RodValue::Float(a), RodValue::Float(b)) => cmp_float(*a, *b),
            (RodValue::String(a), RodValue::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            (RodValue::Blob(a), RodValue::Blob(b)) => a.cmp(b),
            (RodValue::Array(a), RodValue::Array(b)) => a.cmp(b),
            (RodValue::Map(a), RodValue::Map(b)) => a.cmp(b),
            (RodValue::Struct(a), RodValue::Struct(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Single-line rendering for logs and diagnostics.
///
/// The output is valid ROD and decodes to an equal value when every struct
/// field name is an identifier, but it is not the canonical encoding; use
/// [`to_string`](crate::to_string) for that.
///
/// Formatting recurses once per nesting level with no depth limit. Values
/// built by the decoder are bounded by [`DecodeOptions::max_depth`]; for
/// trees built by hand, prefer the encoder, which enforces
/// [`EncodeOptions::max_depth`].
///
/// [`DecodeOptions::max_depth`]: crate::DecodeOptions::max_depth
/// [`EncodeOptions::max_depth`]: crate::EncodeOptions::max_depth
///
/// ```rust
/// use rod::from_str;
///
/// let value = from_str("{B: |00 41|, A: [1, -2.0, nan]}").unwrap();
/// assert_eq!(value.to_string(), "{A: [1, -2.0, nan], B: |00 41|}");
/// ```
impl fmt::Display for RodValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RodValue::Null => f.write_str("null"),
            RodValue::Bool(b) => write!(f, "{b}"),
            RodValue::Int(i) => write!(f, "{i}"),
            RodValue::Float(x) => f.write_str(&format_float(*x)),
            RodValue::String(s) => write!(f, "\"{}\"", escape_str(s)),
            RodValue::Blob(bytes) => {
                f.write_str("|")?;
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{byte:02x}")?;
                }
                f.write_str("|")
            }
            RodValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            RodValue::Map(map) => {
                f.write_str("(")?;
                for (i, (key, value)) in map.sorted().into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str(")")
            }
            RodValue::Struct(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.sorted().into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl FromStr for RodValue {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::from_str(s)
    }
}

impl Serialize for RodValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RodValue::Null => serializer.serialize_unit(),
            RodValue::Bool(b) => serializer.serialize_bool(*b),
            RodValue::Int(i) => serializer.serialize_i64(*i),
            RodValue::Float(f) => serializer.serialize_f64(*f),
            RodValue::String(s) => serializer.serialize_str(s),
            RodValue::Blob(b) => serializer.serialize_bytes(b),
            RodValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            RodValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            RodValue::Struct(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

/// Deserializes from any self-describing serde format.
///
/// A serde map whose keys are all identifier strings becomes a
/// [`RodValue::Struct`]; any other map becomes a [`RodValue::Map`]. Unsigned
/// integers above `i64::MAX` become floats.
///
/// ```rust
/// use rod::RodValue;
///
/// let value: RodValue = serde_json::from_str(r#"{"Name": "x", "Tags": [1, 2]}"#).unwrap();
/// assert!(value.is_struct());
///
/// let value: RodValue = serde_json::from_str(r#"{"not an ident": 1}"#).unwrap();
/// assert!(value.is_map());
/// ```
impl<'de> Deserialize<'de> for RodValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RodValueVisitor;

        impl<'de> Visitor<'de> for RodValueVisitor {
            type Value = RodValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any ROD value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(RodValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(RodValue::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(RodValue::Int(i)),
                    Err(_) => Ok(RodValue::Float(value as f64)),
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(RodValue::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(RodValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(RodValue::String(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(RodValue::Blob(value.to_vec()))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E> {
                Ok(RodValue::Blob(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(RodValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(RodValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(RodValue::Array(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut entries = RodMap::new();
                while let Some((key, value)) = map.next_entry::<RodValue, RodValue>()? {
                    entries.insert(key, value);
                }
                let all_idents = entries
                    .keys()
                    .all(|key| key.as_str().is_some_and(is_identifier));
                if !all_idents {
                    return Ok(RodValue::Map(entries));
                }
                let fields = entries
                    .into_iter()
                    .filter_map(|(key, value)| match key {
                        RodValue::String(name) => Some((name, value)),
                        _ => None,
                    })
                    .collect();
                Ok(RodValue::Struct(fields))
            }
        }

        deserializer.deserialize_any(RodValueVisitor)
    }
}

/// Returns `true` if `name` can be written as a struct field name.
///
/// # Examples
///
/// ```rust
/// use rod::value::is_identifier;
///
/// assert!(is_identifier("_private2"));
/// assert!(!is_identifier("1abc"));
/// assert!(!is_identifier("a b"));
/// assert!(!is_identifier(""));
/// ```
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(is_ident_char)
}

impl TryFrom<RodValue> for i64 {
    type Error = Error;

    fn try_from(value: RodValue) -> crate::Result<Self> {
        match value {
            RodValue::Int(i) => Ok(i),
            other => Err(Error::type_mismatch("int", other.kind())),
        }
    }
}

/// Accepts floats and ints; ints convert with `as`.
impl TryFrom<RodValue> for f64 {
    type Error = Error;

    fn try_from(value: RodValue) -> crate::Result<Self> {
        match value {
            RodValue::Float(f) => Ok(f),
            RodValue::Int(i) => Ok(i as f64),
            other => Err(Error::type_mismatch("float", other.kind())),
        }
    }
}

impl TryFrom<RodValue> for bool {
    type Error = Error;

    fn try_from(value: RodValue) -> crate::Result<Self> {
        match value {
            RodValue::Bool(b) => Ok(b),
            other => Err(Error::type_mismatch("bool", other.kind())),
        }
    }
}

impl TryFrom<RodValue> for String {
    type Error = Error;

    fn try_from(value: RodValue) -> crate::Result<Self> {
        match value {
            RodValue::String(s) => Ok(s),
            other => Err(Error::type_mismatch("string", other.kind())),
        }
    }
}

impl TryFrom<RodValue> for Vec<u8> {
    type Error = Error;

    fn try_from(value: RodValue) -> crate::Result<Self> {
        match value {
            RodValue::Blob(b) => Ok(b),
            other => Err(Error::type_mismatch("blob", other.kind())),
        }
    }
}

impl From<bool> for RodValue {
    fn from(value: bool) -> Self {
        RodValue::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RodValue {
                fn from(value: $ty) -> Self {
                    RodValue::Int(i64::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for RodValue {
    fn from(value: f32) -> Self {
        RodValue::Float(f64::from(value))
    }
}

impl From<f64> for RodValue {
    fn from(value: f64) -> Self {
        RodValue::Float(value)
    }
}

impl From<String> for RodValue {
    fn from(value: String) -> Self {
        RodValue::String(value)
    }
}

impl From<&str> for RodValue {
    fn from(value: &str) -> Self {
        RodValue::String(value.to_string())
    }
}

impl From<Vec<u8>> for RodValue {
    fn from(value: Vec<u8>) -> Self {
        RodValue::Blob(value)
    }
}

impl From<&[u8]> for RodValue {
    fn from(value: &[u8]) -> Self {
        RodValue::Blob(value.to_vec())
    }
}

impl From<Vec<RodValue>> for RodValue {
    fn from(value: Vec<RodValue>) -> Self {
        RodValue::Array(value)
    }
}

impl From<RodMap> for RodValue {
    fn from(value: RodMap) -> Self {
        RodValue::Map(value)
    }
}

impl From<RodStruct> for RodValue {
    fn from(value: RodStruct) -> Self {
        RodValue::Struct(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(value: &RodValue) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_kind_order() {
        let ascending = vec![
            RodValue::Null,
            RodValue::Bool(true),
            RodValue::Int(i64::MAX),
            RodValue::Float(f64::NEG_INFINITY),
            RodValue::from(""),
            RodValue::Blob(vec![]),
            RodValue::Array(vec![]),
            RodValue::Map(RodMap::new()),
            RodValue::Struct(RodStruct::new()),
        ];
        for pair in ascending.windows(2) {
            assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_float_order() {
        let mut floats = vec![
            RodValue::Float(f64::NAN),
            RodValue::Float(1.0),
            RodValue::Float(0.0),
            RodValue::Float(-0.0),
            RodValue::Float(f64::NEG_INFINITY),
            RodValue::Float(f64::INFINITY),
        ];
        floats.sort();
        let rendered: Vec<String> = floats.iter().map(|f| f.to_string()).collect();
        assert_eq!(rendered, vec!["-inf", "-0.0", "0.0", "1.0", "inf", "nan"]);
    }

    #[test]
    fn test_nan_hash_is_canonical() {
        let a = RodValue::Float(f64::NAN);
        let b = RodValue::Float(-f64::NAN);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_int_and_float_differ() {
        assert_ne!(RodValue::Int(1), RodValue::Float(1.0));
        assert_ne!(hash_of(&RodValue::Int(0)), hash_of(&RodValue::Float(0.0)));
    }

    #[test]
    fn test_strings_compare_by_bytes() {
        assert!(RodValue::from("Z") < RodValue::from("a"));
        assert!(RodValue::from("ab") < RodValue::from("b"));
        assert!(RodValue::Blob(vec![1]) < RodValue::Blob(vec![1, 0]));
    }

    #[test]
    fn test_try_from() {
        assert_eq!(bool::try_from(RodValue::Bool(true)).unwrap(), true);
        assert_eq!(f64::try_from(RodValue::Int(3)).unwrap(), 3.0);
        assert_eq!(
            Vec::<u8>::try_from(RodValue::from(&b"ab"[..])).unwrap(),
            b"ab".to_vec()
        );
        assert_eq!(
            i64::try_from(RodValue::Float(1.0)).unwrap_err(),
            Error::type_mismatch("int", "float")
        );
    }

    #[test]
    fn test_display_is_single_line() {
        let mut map = RodMap::new();
        map.insert("b", RodValue::Blob(vec![]));
        map.insert(false, "q\"uote");
        let value = RodValue::from(vec![RodValue::Map(map), RodValue::from(-3)]);
        assert_eq!(value.to_string(), "[(false: \"q\\\"uote\", \"b\": ||), -3]");
    }

    #[test]
    fn test_serde_json_interop() {
        let mut fields = RodStruct::new();
        fields.insert("Id", 7);
        fields.insert("Tags", vec![RodValue::from("a"), RodValue::Null]);
        let value = RodValue::Struct(fields);

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"Id":7,"Tags":["a",null]}"#);

        let back: RodValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let value: RodValue = serde_json::from_str("18446744073709551615").unwrap();
        assert!(value.is_float());
        let value: RodValue = serde_json::from_str("9223372036854775807").unwrap();
        assert_eq!(value, RodValue::Int(i64::MAX));
    }
}
