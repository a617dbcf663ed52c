//! Decoder and encoder options.
//!
//! Run with: cargo run --example custom_options

use rod::{
    from_str, from_str_with_options, to_string_with_options, DecodeOptions, DuplicatePolicy,
    EncodeOptions, FieldOrder, Indent,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let input = "{Name: \"first\", Size: 3, Name: \"second\"}";

    // Duplicates are rejected by default.
    match from_str(input) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Default decode: {}", e),
    }

    let options = DecodeOptions::new().with_duplicates(DuplicatePolicy::LastWins);
    let value = from_str_with_options(input, options)?;
    println!("Last wins: {}\n", value);

    let options = DecodeOptions::new().with_blob_concatenation(true);
    let blob = from_str_with_options("| 00 01 | | 02 03 |", options)?;
    println!("Concatenated blob: {}\n", blob);

    let options = EncodeOptions::new()
        .with_indent(Indent::Spaces(2))
        .with_field_order(FieldOrder::Insertion);
    println!("Two spaces, insertion order:\n{}", to_string_with_options(&value, options)?);

    Ok(())
}
