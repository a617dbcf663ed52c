//! Basic ROD decoding and canonical encoding.
//!
//! Run with: cargo run --example simple

use rod::{from_str, to_string};
use std::error::Error;

const DOCUMENT: &str = r#"
# Connection settings.
{
    Host: "localhost",
    Port: 8080,
    Timeout: 2.5,
    Retry: <seconds> [1, 2, 4,],
    Fingerprint: | 9f 86 d0 81 88 4c 7d 65 |,
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let value = from_str(DOCUMENT)?;

    let fields = value.as_struct().ok_or("expected a struct")?;
    if let Some(port) = fields.get("Port").and_then(|v| v.as_i64()) {
        println!("Port: {}", port);
    }

    // Comments and annotations are gone; fields come back sorted.
    let canonical = to_string(&value)?;
    println!("Canonical ROD:\n{}\n", canonical);

    assert_eq!(from_str(&canonical)?, value);
    println!("✓ Round-trip successful");

    Ok(())
}
