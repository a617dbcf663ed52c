//! ROD Format Reference
//!
//! This module documents the ROD format as implemented by this library.
//!
//! # Overview
//!
//! A ROD document is exactly one value. Whitespace, comments and annotations
//! may appear before and after every token and carry no data.
//!
//! # Grammar
//!
//! ```text
//! document   = _ value _ EOF
//! value      = [ annotation _ ] ( primitive | composite )
//! primitive  = null | bool | int | float | string | blob
//! composite  = array | map | struct
//! annotation = '<' { any-except-'>' } '>'
//! null       = 'null'
//! bool       = 'true' | 'false'
//! int        = [ '+' | '-' ] digit { digit }
//! float      = [ '+' | '-' ] ( digit { digit } '.' digit { digit } | 'inf' ) | 'nan'
//! string     = '"' { '\' any | any-except-'"' } '"'
//! blob       = '|' _ [ byte { _ byte } ] _ '|'
//! byte       = hex hex
//! array      = '[' _ [ value _ { ',' _ value _ } [ ',' _ ] ] ']'
//! map        = '(' _ [ entry _ { ',' _ entry _ } [ ',' _ ] ] ')'
//! entry      = [ annotation _ ] primitive _ ':' _ value
//! struct     = '{' _ [ field _ { ',' _ field _ } [ ',' _ ] ] '}'
//! field      = ident _ ':' _ value
//! ident      = ( letter | '_' ) { letter | digit | '_' }
//! _          = { whitespace | '#' { any-except-newline } | '#<' { any-except-'>' } '>' }
//! ```
//!
//! `letter` and `digit` are ASCII. Keywords are matched as prefixes, so
//! `truely` reads `true` and then fails on the `l`.
//!
//! # Values
//!
//! | Kind | Example | Notes |
//! |------|---------|-------|
//! | Null | `null` | |
//! | Bool | `true`, `false` | |
//! | Int | `42`, `-7`, `+0` | 64-bit signed; out of range is an error |
//! | Float | `2.0`, `-0.5`, `inf`, `-inf`, `nan` | `nan` takes no sign |
//! | String | `"say \"hi\""` | escapes: `\\`, `\"`, `\n`, `\r` |
//! | Blob | `\| de ad be ef \|` | pairs of hex digits, either case |
//! | Array | `[1, "two", [3]]` | trailing comma allowed |
//! | Map | `(1: "one", "k": null)` | keys must be primitive and distinct |
//! | Struct | `{Name: "x", Size: 3}` | field names must be distinct |
//!
//! Integers and floats are never equal to each other: `1` and `1.0` are
//! different map keys. Floats compare bit for bit, except that all NaNs are
//! one key; `0.0` and `-0.0` are different keys.
//!
//! ## Strings
//!
//! A `\r` escape decodes to nothing. Raw CRs directly before a line feed,
//! raw or `\n`, are dropped, so a decoded string never holds CR LF. Any
//! escape other than the four listed above is an error.
//!
//! ## Comments and Annotations
//!
//! ```text
//! # Inline comments run to the end of the line.
//! #< Block comments run to the next '>' and do not nest. >
//! <Annotations> precede a value and are ignored by the decoder.
//! ```
//!
//! An annotation may precede any value, including a map key, but not a
//! struct field name.
//!
//! # Canonical Layout
//!
//! The encoder writes:
//!
//! ```text
//! {
//! 	Blob: |
//! 		48 65 6c 6c 6f 2c 20 77  6f 72 6c 64 21          #Hello, world!...#
//! 	|,
//! 	Empty: (),
//! 	Float: 2.0,
//! 	List: [
//! 		null,
//! 		true,
//! 	],
//! }
//! ```
//!
//! - One indent unit (a tab by default) per level
//! - Each element, entry or field on its own line, followed by `,`
//! - The closer on its own line at the parent's indent
//! - Empty composites as `[]`, `()`, `{}`
//! - Map keys in ascending order: null, then bools, ints, floats, strings and
//!   blobs, each group sorted by value
//! - Struct fields sorted by name
//! - Floats as the shortest decimal that reads back exactly, never with an
//!   exponent, always with a `.`
//! - No newline at the end
//!
//! ## Blob Dump
//!
//! Each row holds up to 16 bytes as lowercase hex pairs, with one extra
//! space before the ninth. Short rows are padded so the sidebar lines up. The
//! sidebar is an inline comment showing printable ASCII bytes and `.` for
//! everything else, including empty slots. A `<` in the first slot is shown
//! as `.` so the sidebar cannot start a block comment.
//!
//! # Errors
//!
//! Decode errors render as `<line>:<column>: expected <what>, got <what>`.
//! Lines and columns start at 1; columns count characters. The found input
//! is described as `end of file`, a quoted character such as `'x'`, or
//! back-quoted text such as `` `0X` ``.
//!
//! | Input | Message |
//! |-------|---------|
//! | (empty) | `1:1: expected value, got end of file` |
//! | `foo` | `1:1: expected value, got 'f'` |
//! | `1e3` | `1:2: expected end of file, got 'e'` |
//! | `[` | `1:2: expected element or ']', got end of file` |
//! | `( "K" )` | `1:7: expected ':', got ')'` |
//! | `{1abc: 1}` | `1:2: expected identifier, got '1'` |
//! | `\|0X\|` | ``1:2: expected hexadecimal digit, got `0X` `` |
//! | `([]: 1)` | `1:2: expected primitive value, got '['` |

// This module contains only documentation; no implementation code
