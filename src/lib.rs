//! # rod
//!
//! A codec for ROD, a human-readable, strongly-typed data interchange format.
//!
//! ## What is ROD?
//!
//! ROD is a text format with nine value kinds: null, booleans, 64-bit
//! integers, floats, strings, blobs (byte strings), arrays, maps with
//! primitive keys, and structs with identifier field names. Integers and
//! floats are distinct kinds, blobs are first-class, and comments and
//! annotations may appear between any two tokens.
//!
//! ```text
//! # A comment runs to the end of the line.
//! {
//!     Name: "rod",
//!     Version: 1,
//!     Ratio: 0.5,
//!     Limits: (
//!         "max": +inf,
//!         0: false,
//!     ),
//!     Magic: | 89 50 4e 47 |,
//!     Tags: [<primary> "a", #<inline> "b",],
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Canonical output**: encoding is deterministic, so equal values always
//!   produce identical bytes
//! - **Exact round trip**: `decode(encode(v)) == v`, including NaN, `-0.0` and
//!   the int/float distinction
//! - **Precise diagnostics**: every decode error carries a line and column
//! - **Bounded decoding**: nesting depth is limited, and the tokenizer keeps
//!   its continuation stack on the heap
//! - **Serde interop**: [`RodValue`] implements `Serialize` and
//!   `Deserialize`, so trees move to and from formats like JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use rod::{from_str, to_string, RodValue};
//!
//! let value = from_str("[1, 2, 3]").unwrap();
//! assert_eq!(value.as_array().map(Vec::len), Some(3));
//!
//! let text = to_string(&value).unwrap();
//! assert_eq!(text, "[\n\t1,\n\t2,\n\t3,\n]");
//!
//! assert_eq!(from_str(&text).unwrap(), value);
//! ```
//!
//! ### Building Values
//!
//! ```rust
//! use rod::{to_string, RodMap, RodStruct, RodValue};
//!
//! let mut limits = RodMap::new();
//! limits.insert("max", f64::INFINITY);
//! limits.insert(0, false);
//!
//! let mut config = RodStruct::new();
//! config.insert("Name", "rod");
//! config.insert("Limits", limits);
//!
//! let text = to_string(&RodValue::Struct(config)).unwrap();
//! assert_eq!(
//!     text,
//!     "{\n\tLimits: (\n\t\t0: false,\n\t\t\"max\": inf,\n\t),\n\tName: \"rod\",\n}"
//! );
//! ```
//!
//! ### Canonicalizing Text
//!
//! ```rust
//! use rod::canonicalize;
//!
//! let text = canonicalize("{ B: 2, A: 1 } # trailing comment").unwrap();
//! assert_eq!(text, "{\n\tA: 1,\n\tB: 2,\n}");
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `debug` when a decode or encode
//! starts and when it fails, `trace` for every token and nesting level. No
//! subscriber is installed; applications opt in.
//!
//! ## Format Reference
//!
//! The full grammar, the canonical layout and the error descriptions are
//! documented in the [`grammar`] module.

pub mod de;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod map;
pub mod options;
pub mod position;
pub mod ser;
pub mod value;

pub use de::Decoder;
pub use error::{DecodeError, EncodeError, Error, Result};
pub use map::{RodMap, RodStruct};
pub use options::{DecodeOptions, DuplicatePolicy, EncodeOptions, FieldOrder, Indent};
pub use ser::Encoder;
pub use value::RodValue;
pub use value::RodValue as Value;

use std::io;

/// Decodes a ROD document from a string with the default options.
///
/// # Examples
///
/// ```rust
/// use rod::{from_str, RodValue};
///
/// let value = from_str("( \"k\": -1.5 )").unwrap();
/// let map = value.as_map().unwrap();
/// assert_eq!(map.get(&RodValue::from("k")), Some(&RodValue::Float(-1.5)));
/// ```
///
/// # Errors
///
/// Returns a [`DecodeError`] carrying the line and column of the first
/// problem in the input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(input: &str) -> Result<RodValue, DecodeError> {
    Decoder::new(input).decode()
}

/// Decodes a ROD document from a string with custom options.
///
/// # Errors
///
/// Returns a [`DecodeError`] for the first problem in the input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(input: &str, options: DecodeOptions) -> Result<RodValue, DecodeError> {
    Decoder::with_options(input, options).decode()
}

/// Decodes a ROD document from UTF-8 bytes.
///
/// # Examples
///
/// ```rust
/// use rod::{from_slice, DecodeError};
///
/// assert!(from_slice(b"true").unwrap().as_bool().unwrap());
///
/// let err = from_slice(b"\"\xff\"").unwrap_err();
/// assert_eq!(err, DecodeError::InvalidUtf8 { offset: 1 });
/// ```
///
/// # Errors
///
/// Returns [`DecodeError::InvalidUtf8`] if the bytes are not UTF-8, otherwise
/// any error [`from_str`] returns.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(bytes: &[u8]) -> Result<RodValue, DecodeError> {
    from_slice_with_options(bytes, DecodeOptions::default())
}

fn from_slice_with_options(bytes: &[u8], options: DecodeOptions) -> Result<RodValue, DecodeError> {
    let input = std::str::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8 {
        offset: e.valid_up_to(),
    })?;
    from_str_with_options(input, options)
}

/// Reads a whole ROD document from an I/O stream and decodes it.
///
/// # Examples
///
/// ```rust
/// use rod::{decode, RodValue};
/// use std::io::Cursor;
///
/// let value = decode(Cursor::new(b"|ca fe|")).unwrap();
/// assert_eq!(value, RodValue::Blob(vec![0xca, 0xfe]));
/// ```
///
/// # Errors
///
/// Returns [`DecodeError::Io`] if reading fails, otherwise any error
/// [`from_slice`] returns.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode<R>(reader: R) -> Result<RodValue, DecodeError>
where
    R: io::Read,
{
    decode_with_options(reader, DecodeOptions::default())
}

/// Reads a whole ROD document from an I/O stream and decodes it with custom
/// options.
///
/// # Errors
///
/// Returns [`DecodeError::Io`] if reading fails, otherwise any error
/// [`from_slice`] returns.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options<R>(mut reader: R, options: DecodeOptions) -> Result<RodValue, DecodeError>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| DecodeError::io(&e.to_string()))?;
    from_slice_with_options(&bytes, options)
}

/// Encodes a value canonically into an I/O sink.
///
/// # Examples
///
/// ```rust
/// use rod::{encode, RodValue};
///
/// let mut out = Vec::new();
/// encode(&RodValue::from(-0.0), &mut out).unwrap();
/// assert_eq!(out, b"-0.0");
/// ```
///
/// # Errors
///
/// Returns an [`EncodeError`] if the value has no ROD representation or the
/// sink fails. Output written before the error stays in the sink.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode<W>(value: &RodValue, sink: W) -> Result<(), EncodeError>
where
    W: io::Write,
{
    encode_with_options(value, sink, EncodeOptions::default())
}

/// Encodes a value into an I/O sink with custom options.
///
/// # Errors
///
/// Returns an [`EncodeError`] if the value has no ROD representation or the
/// sink fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options<W>(value: &RodValue, sink: W, options: EncodeOptions) -> Result<(), EncodeError>
where
    W: io::Write,
{
    Encoder::with_options(sink, options).encode(value)
}

/// Encodes a value canonically into a string.
///
/// # Examples
///
/// ```rust
/// use rod::{to_string, RodValue};
///
/// assert_eq!(to_string(&RodValue::from(2.0)).unwrap(), "2.0");
/// assert_eq!(to_string(&RodValue::Blob(vec![])).unwrap(), "||");
/// ```
///
/// # Errors
///
/// Returns an [`EncodeError`] if the value has no ROD representation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &RodValue) -> Result<String, EncodeError> {
    to_string_with_options(value, EncodeOptions::default())
}

/// Encodes a value into a string with custom options.
///
/// # Errors
///
/// Returns an [`EncodeError`] if the value has no ROD representation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(value: &RodValue, options: EncodeOptions) -> Result<String, EncodeError> {
    let mut encoder = Encoder::with_options(Vec::with_capacity(128), options);
    encoder.encode(value)?;
    String::from_utf8(encoder.into_inner()).map_err(|e| EncodeError::io(&e.to_string()))
}

/// Encodes a value canonically into a byte vector.
///
/// # Errors
///
/// Returns an [`EncodeError`] if the value has no ROD representation.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec(value: &RodValue) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder::new(Vec::with_capacity(128));
    encoder.encode(value)?;
    Ok(encoder.into_inner())
}

/// Decodes a document and re-encodes it in canonical form.
///
/// Comments, annotations and layout are dropped; the result is a pure
/// function of the decoded value.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the input is not a valid document, or
/// [`Error::Encode`] if it cannot be written back.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn canonicalize(input: &str) -> Result<String> {
    let value = from_str(input)?;
    Ok(to_string(&value)?)
}
