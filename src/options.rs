//! Configuration options for ROD decoding and encoding.
//!
//! - [`DecodeOptions`]: duplicate-key policy, blob concatenation, nesting limit
//! - [`EncodeOptions`]: indentation unit, struct field order and nesting depth
//!
//! The defaults are the canonical behavior: duplicates are rejected, a blob is
//! a single `|...|` group, output is tab-indented with fields sorted by name.
//!
//! ## Examples
//!
//! ```rust
//! use rod::{from_str_with_options, to_string_with_options};
//! use rod::{DecodeOptions, DuplicatePolicy, EncodeOptions, Indent};
//!
//! let options = DecodeOptions::new().with_duplicates(DuplicatePolicy::LastWins);
//! let value = from_str_with_options("{A: 1, A: 2}", options).unwrap();
//!
//! let options = EncodeOptions::new().with_indent(Indent::Spaces(2));
//! let text = to_string_with_options(&value, options).unwrap();
//! assert_eq!(text, "{\n  A: 2,\n}");
//! ```

/// What the decoder does when a map key or struct field appears twice.
///
/// # Examples
///
/// ```rust
/// use rod::{from_str, from_str_with_options, DecodeError, DecodeOptions, DuplicatePolicy};
///
/// let err = from_str("{A: 1, A: 2}").unwrap_err();
/// assert!(matches!(err, DecodeError::DuplicateField { .. }));
///
/// let options = DecodeOptions::new().with_duplicates(DuplicatePolicy::LastWins);
/// assert!(from_str_with_options("{A: 1, A: 2}", options).is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateKey` / `DuplicateField`.
    #[default]
    Reject,
    /// Keep the later value. The entry keeps the position of the first one.
    LastWins,
}

/// Default limit on nested arrays, maps and structs.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options controlling how text is decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    pub duplicates: DuplicatePolicy,
    /// Whether consecutive `|...|` groups join into one blob.
    pub concat_blobs: bool,
    /// Deepest allowed nesting of composite values.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            duplicates: DuplicatePolicy::default(),
            concat_blobs: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Creates the default options (reject duplicates, single blob groups).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rod::{DecodeOptions, DuplicatePolicy};
    ///
    /// let options = DecodeOptions::new();
    /// assert_eq!(options.duplicates, DuplicatePolicy::Reject);
    /// assert!(!options.concat_blobs);
    /// assert_eq!(options.max_depth, 128);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duplicate key policy.
    #[must_use]
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Allows `| 01 | | 02 |` to decode as one two-byte blob.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rod::{from_str_with_options, DecodeOptions, RodValue};
    ///
    /// let options = DecodeOptions::new().with_blob_concatenation(true);
    /// let value = from_str_with_options("| 01 | | 02 |", options).unwrap();
    /// assert_eq!(value, RodValue::Blob(vec![1, 2]));
    /// ```
    #[must_use]
    pub fn with_blob_concatenation(mut self, enabled: bool) -> Self {
        self.concat_blobs = enabled;
        self
    }

    /// Sets the maximum nesting depth of composite values.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// The unit of indentation written once per nesting level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tab,
    Spaces(usize),
}

impl Indent {
    /// Returns the text of one indentation level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rod::Indent;
    ///
    /// assert_eq!(Indent::Tab.unit(), "\t");
    /// assert_eq!(Indent::Spaces(4).unit(), "    ");
    /// ```
    #[must_use]
    pub fn unit(&self) -> String {
        match self {
            Indent::Tab => "\t".to_string(),
            Indent::Spaces(n) => " ".repeat(*n),
        }
    }
}

/// The order in which struct fields are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FieldOrder {
    /// Ascending by field name. Canonical.
    #[default]
    Sorted,
    /// The order fields were inserted into the [`RodStruct`](crate::RodStruct).
    Insertion,
}

/// Options controlling how values are encoded.
///
/// Only the default indent and field order produce canonical output; other
/// settings still decode back to the same tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    pub indent: Indent,
    pub field_order: FieldOrder,
    /// Deepest composite nesting the encoder will write. Matches the
    /// decoder's default so that encoded output always decodes.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: Indent::default(),
            field_order: FieldOrder::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    /// Creates the canonical options (tab indent, sorted fields).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the struct field order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rod::{EncodeOptions, FieldOrder};
    ///
    /// let options = EncodeOptions::new().with_field_order(FieldOrder::Insertion);
    /// assert_eq!(options.field_order, FieldOrder::Insertion);
    /// ```
    #[must_use]
    pub fn with_field_order(mut self, order: FieldOrder) -> Self {
        self.field_order = order;
        self
    }

    /// Sets the maximum nesting depth of composite values.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
