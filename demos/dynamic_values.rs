//! Building values in code and moving them through JSON.
//!
//! Run with: cargo run --example dynamic_values

use rod::{to_string, RodMap, RodStruct, RodValue};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut limits = RodMap::new();
    limits.insert(0, "none");
    limits.insert(1.5, "soft");
    limits.insert("max", f64::INFINITY);

    let mut config = RodStruct::new();
    config.insert("Features", vec![RodValue::from("auth"), RodValue::from("logging")]);
    config.insert("Limits", limits);
    config.insert("Key", RodValue::from(&b"\x00secret\xff"[..]));
    let config = RodValue::Struct(config);

    println!("Config as ROD:\n{}\n", to_string(&config)?);

    let json: RodValue = serde_json::from_str(r#"{"id": 7, "roles": ["admin"], "active": true}"#)?;
    println!("From JSON:\n{}", to_string(&json)?);

    Ok(())
}
