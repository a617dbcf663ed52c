//! Canonical ROD encoding.
//!
//! This module provides the [`Encoder`], which writes a [`RodValue`] as ROD
//! text to any [`io::Write`] sink.
//!
//! ## Canonical Form
//!
//! With the default [`EncodeOptions`] the output is a pure function of the
//! value: equal values produce identical bytes.
//!
//! - One tab per nesting level; every child on its own line, followed by `,`
//! - Empty arrays, maps and structs collapse to `[]`, `()` and `{}`
//! - Map entries sorted by key, struct fields sorted by name
//! - Floats always carry a `.` and never an exponent: `2.0`, `-0.0`, `inf`, `nan`
//! - Strings escape only `"` and `\`
//! - Blobs are written as a hex dump, 16 bytes per row, with an ASCII sidebar
//!   in a trailing comment
//! - No newline after the top-level value
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use rod::{to_string, RodStruct, RodValue};
//!
//! let mut fields = RodStruct::new();
//! fields.insert("Name", "rod");
//! fields.insert("Data", RodValue::from(&b"Hello, world!"[..]));
//! fields.insert("Empty", RodValue::Array(vec![]));
//!
//! let text = to_string(&RodValue::Struct(fields)).unwrap();
//! assert_eq!(
//!     text,
//!     "{\n\
//!      \tData: |\n\
//!      \t\t48 65 6c 6c 6f 2c 20 77  6f 72 6c 64 21          #Hello, world!...#\n\
//!      \t|,\n\
//!      \tEmpty: [],\n\
//!      \tName: \"rod\",\n\
//!      }"
//! );
//! ```
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use rod::{Encoder, EncodeOptions, Indent, RodValue};
//!
//! let options = EncodeOptions::new().with_indent(Indent::Spaces(2));
//! let mut encoder = Encoder::with_options(Vec::new(), options);
//! encoder.encode(&RodValue::from(vec![RodValue::from(1)])).unwrap();
//!
//! assert_eq!(encoder.into_inner(), b"[\n  1,\n]");
//! ```

use std::borrow::Cow;
use std::io;

use tracing::{debug, trace};

use crate::error::EncodeError;
use crate::options::{EncodeOptions, FieldOrder};
use crate::value::is_identifier;
use crate::{RodMap, RodStruct, RodValue};

/// Bytes per hex dump row.
const BLOB_ROW: usize = 16;
/// Index of the byte preceded by an extra space.
const BLOB_HALF: usize = 8;

/// Writes ROD values to an [`io::Write`] sink.
///
/// The encoder does not buffer; wrap the sink in an [`io::BufWriter`] when
/// writing to a file or socket.
pub struct Encoder<W> {
    writer: W,
    options: EncodeOptions,
    unit: String,
    lead: String,
    depth: usize,
}

impl<W: io::Write> Encoder<W> {
    /// Creates a canonical encoder.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, EncodeOptions::default())
    }

    pub fn with_options(writer: W, options: EncodeOptions) -> Self {
        let unit = options.indent.unit();
        Encoder {
            writer,
            options,
            unit,
            lead: String::new(),
            depth: 0,
        }
    }

    /// Encodes one value and flushes the sink.
    ///
    /// On error, output written before the failing value remains in the sink.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::InvalidIdentifier`] for a struct field name that is
    ///   not an identifier
    /// - [`EncodeError::InvalidMapKey`] for an array, map or struct used as a
    ///   map key
    /// - [`EncodeError::DepthLimit`] if composites nest deeper than
    ///   [`EncodeOptions::max_depth`]
    /// - [`EncodeError::Io`] if the sink fails
    pub fn encode(&mut self, value: &RodValue) -> Result<(), EncodeError> {
        debug!(kind = value.kind(), "encoding value");
        self.lead.clear();
        self.depth = 0;
        let result = self
            .encode_value(value)
            .and_then(|()| self.writer.flush().map_err(io_error));
        if let Err(err) = &result {
            debug!(error = %err, "encoding failed");
        }
        result
    }

    /// Returns a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the encoder, returning the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write(&mut self, text: &str) -> Result<(), EncodeError> {
        self.writer.write_all(text.as_bytes()).map_err(io_error)
    }

    fn newline(&mut self) -> Result<(), EncodeError> {
        self.writer.write_all(b"\n").map_err(io_error)?;
        self.writer
            .write_all(self.lead.as_bytes())
            .map_err(io_error)
    }

    fn push(&mut self) {
        self.lead.push_str(&self.unit);
        trace!(depth = self.lead.len() / self.unit.len().max(1), "indent");
    }

    fn pop(&mut self) {
        let len = self.lead.len().saturating_sub(self.unit.len());
        self.lead.truncate(len);
    }

    fn encode_value(&mut self, value: &RodValue) -> Result<(), EncodeError> {
        if value.is_primitive() {
            return self.encode_primitive(value);
        }
        if self.depth >= self.options.max_depth {
            return Err(EncodeError::DepthLimit {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        let result = match value {
            RodValue::Array(items) => self.encode_array(items),
            RodValue::Map(map) => self.encode_map(map),
            RodValue::Struct(fields) => self.encode_struct(fields),
            primitive => self.encode_primitive(primitive),
        };
        self.depth -= 1;
        result
    }

    fn encode_primitive(&mut self, value: &RodValue) -> Result<(), EncodeError> {
        match value {
            RodValue::Null => self.write("null"),
            RodValue::Bool(true) => self.write("true"),
            RodValue::Bool(false) => self.write("false"),
            RodValue::Int(i) => self.write(&i.to_string()),
            RodValue::Float(f) => self.write(&format_float(*f)),
            RodValue::String(s) => {
                self.write("\"")?;
                self.write(&escape_str(s))?;
                self.write("\"")
            }
            RodValue::Blob(bytes) => self.encode_blob(bytes),
            composite => Err(EncodeError::InvalidMapKey {
                kind: composite.kind(),
            }),
        }
    }

    fn encode_blob(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        if bytes.is_empty() {
            return self.write("||");
        }
        self.write("|")?;
        self.push();
        for row in bytes.chunks(BLOB_ROW) {
            self.newline()?;
            self.write(&blob_row(row))?;
        }
        self.pop();
        self.newline()?;
        self.write("|")
    }

    fn encode_array(&mut self, items: &[RodValue]) -> Result<(), EncodeError> {
        if items.is_empty() {
            return self.write("[]");
        }
        self.write("[")?;
        self.push();
        for item in items {
            self.newline()?;
            self.encode_value(item)?;
            self.write(",")?;
        }
        self.pop();
        self.newline()?;
        self.write("]")
    }

    fn encode_map(&mut self, map: &RodMap) -> Result<(), EncodeError> {
        if map.is_empty() {
            return self.write("()");
        }
        self.write("(")?;
        self.push();
        for (key, value) in map.sorted() {
            self.newline()?;
            self.encode_primitive(key)?;
            self.write(": ")?;
            self.encode_value(value)?;
            self.write(",")?;
        }
        self.pop();
        self.newline()?;
        self.write(")")
    }

    fn encode_struct(&mut self, fields: &RodStruct) -> Result<(), EncodeError> {
        if fields.is_empty() {
            return self.write("{}");
        }
        let fields: Vec<(&str, &RodValue)> = match self.options.field_order {
            FieldOrder::Sorted => fields.sorted(),
            FieldOrder::Insertion => fields.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        };
        self.write("{")?;
        self.push();
        for (name, value) in fields {
            if !is_identifier(name) {
                return Err(EncodeError::InvalidIdentifier(name.to_string()));
            }
            self.newline()?;
            self.write(name)?;
            self.write(": ")?;
            self.encode_value(value)?;
            self.write(",")?;
        }
        self.pop();
        self.newline()?;
        self.write("}")
    }
}

fn io_error(err: io::Error) -> EncodeError {
    EncodeError::io(&err.to_string())
}

/// Formats a float the way the encoder writes it.
///
/// Finite values use the shortest decimal that parses back to the same
/// bits, with `.0` appended when there is no fractional part.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        return text.to_string();
    }
    let mut text = value.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Escapes `"` and `\` with a backslash.
pub(crate) fn escape_str(text: &str) -> Cow<'_, str> {
    if !text.contains(|ch| matches!(ch, '"' | '\\')) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        if matches!(ch, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

/// Renders one hex dump row of up to [`BLOB_ROW`] bytes.
///
/// Short rows are padded so the sidebar lines up with full rows.
fn blob_row(row: &[u8]) -> String {
    let digits = hex::encode(row);
    let mut line = String::with_capacity(BLOB_ROW * 4 + 4);
    for i in 0..row.len() {
        if i > 0 {
            line.push(' ');
        }
        if i == BLOB_HALF {
            line.push(' ');
        }
        line.push_str(&digits[i * 2..i * 2 + 2]);
    }
    for _ in row.len()..BLOB_ROW {
        line.push_str("   ");
    }
    if row.len() <= BLOB_HALF {
        line.push(' ');
    }
    line.push_str(" #");
    for slot in 0..BLOB_ROW {
        let ch = match row.get(slot) {
            // "#<" would open a block comment.
            Some(b'<') if slot == 0 => '.',
            Some(&byte) if (0x20..=0x7e).contains(&byte) => char::from(byte),
            _ => '.',
        };
        line.push(ch);
    }
    line.push('#');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Indent, DEFAULT_MAX_DEPTH};

    fn encode(value: &RodValue) -> String {
        let mut encoder = Encoder::new(Vec::new());
        encoder.encode(value).unwrap();
        String::from_utf8(encoder.into_inner()).unwrap()
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(2.0), "2.0");
        assert_eq!(format_float(-0.0), "-0.0");
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(1e21), "1000000000000000000000.0");
        assert!(!format_float(1e-7).contains('e'));
        assert_eq!(format_float(1e-7), "0.0000001");
    }

    #[test]
    fn test_escape_str() {
        assert!(matches!(escape_str("plain\n"), Cow::Borrowed(_)));
        assert_eq!(escape_str(r#"a"b\c"#), r#"a\"b\\c"#);
    }

    #[test]
    fn test_blob_row_layout() {
        assert_eq!(
            blob_row(b"Hello, world!"),
            "48 65 6c 6c 6f 2c 20 77  6f 72 6c 64 21          #Hello, world!...#"
        );
        assert_eq!(
            blob_row(&[0u8; 16]),
            "00 00 00 00 00 00 00 00  00 00 00 00 00 00 00 00 #................#"
        );
        assert_eq!(
            blob_row(&[0xff]),
            "ff                                               #................#"
        );
    }

    #[test]
    fn test_blob_rows_align() {
        for len in 1..=16 {
            let row: Vec<u8> = (0..len as u8).collect();
            assert_eq!(blob_row(&row).len(), 67, "row of {len} bytes");
        }
    }

    #[test]
    fn test_blob_sidebar_never_opens_block_comment() {
        let row = blob_row(b"<tag>");
        assert!(row.ends_with(" #.tag>...........#"));
        assert!(!row.contains("#<"));
    }

    #[test]
    fn test_multi_row_blob() {
        let bytes: Vec<u8> = (0x41..0x41 + 17).collect();
        let text = encode(&RodValue::Blob(bytes));
        assert_eq!(
            text,
            "|\n\
             \t41 42 43 44 45 46 47 48  49 4a 4b 4c 4d 4e 4f 50 #ABCDEFGHIJKLMNOP#\n\
             \t51                                               #Q...............#\n\
             |"
        );
    }

    #[test]
    fn test_nested_indent() {
        let inner = RodValue::from(vec![RodValue::from(1)]);
        let outer = RodValue::from(vec![inner, RodValue::Array(vec![])]);
        assert_eq!(encode(&outer), "[\n\t[\n\t\t1,\n\t],\n\t[],\n]");
    }

    #[test]
    fn test_map_key_order() {
        let mut map = RodMap::new();
        map.insert(RodValue::Blob(vec![1]), 0);
        map.insert("s", 0);
        map.insert(1.5, 0);
        map.insert(-3, 0);
        map.insert(true, 0);
        map.insert(RodValue::Null, 0);
        assert_eq!(
            encode(&RodValue::Map(map)),
            "(\n\tnull: 0,\n\ttrue: 0,\n\t-3: 0,\n\t1.5: 0,\n\t\"s\": 0,\n\t|\n\t\t01                                               #................#\n\t|: 0,\n)"
        );
    }

    #[test]
    fn test_field_order_options() {
        let mut fields = RodStruct::new();
        fields.insert("b", 1);
        fields.insert("a", 2);
        let value = RodValue::Struct(fields);
        assert_eq!(encode(&value), "{\n\ta: 2,\n\tb: 1,\n}");

        let options = EncodeOptions::new()
            .with_field_order(FieldOrder::Insertion)
            .with_indent(Indent::Spaces(1));
        let mut encoder = Encoder::with_options(Vec::new(), options);
        encoder.encode(&value).unwrap();
        assert_eq!(encoder.into_inner(), b"{\n b: 1,\n a: 2,\n}");
    }

    #[test]
    fn test_invalid_identifier() {
        for name in ["1abc", "a b", "", "é"] {
            let mut fields = RodStruct::new();
            fields.insert(name, RodValue::Null);
            let mut encoder = Encoder::new(Vec::new());
            let err = encoder.encode(&RodValue::Struct(fields)).unwrap_err();
            assert_eq!(err, EncodeError::InvalidIdentifier(name.to_string()));
        }
    }

    #[test]
    fn test_composite_key_leaves_prefix() {
        let mut map = RodMap::new();
        map.insert(RodValue::Array(vec![]), 1);
        let mut encoder = Encoder::new(Vec::new());
        let err = encoder.encode(&RodValue::Map(map)).unwrap_err();
        assert_eq!(err, EncodeError::InvalidMapKey { kind: "array" });
        assert_eq!(encoder.get_ref(), b"(\n\t");
    }

    struct FailingSink;

    impl io::Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure() {
        let mut encoder = Encoder::new(FailingSink);
        let err = encoder.encode(&RodValue::Null).unwrap_err();
        assert_eq!(err, EncodeError::Io("sink closed".to_string()));
    }

    fn nested(depth: usize) -> RodValue {
        let mut value = RodValue::Int(1);
        for _ in 0..depth {
            value = RodValue::Array(vec![value]);
        }
        value
    }

    #[test]
    fn test_depth_limit() {
        let options = EncodeOptions::new().with_max_depth(3);
        let mut encoder = Encoder::with_options(Vec::new(), options.clone());
        assert!(encoder.encode(&nested(3)).is_ok());

        let mut encoder = Encoder::with_options(Vec::new(), options);
        let err = encoder.encode(&nested(4)).unwrap_err();
        assert_eq!(err, EncodeError::DepthLimit { limit: 3 });
        assert_eq!(err.to_string(), "nesting exceeds the maximum depth of 3");

        // The counter resets between values.
        assert!(encoder.encode(&nested(2)).is_ok());
    }

    #[test]
    fn test_default_depth_matches_decoder() {
        let text = crate::to_string(&nested(DEFAULT_MAX_DEPTH)).unwrap();
        assert!(crate::from_str(&text).is_ok());
        assert!(matches!(
            crate::to_string(&nested(DEFAULT_MAX_DEPTH + 1)),
            Err(EncodeError::DepthLimit { limit: DEFAULT_MAX_DEPTH })
        ));
    }
}
