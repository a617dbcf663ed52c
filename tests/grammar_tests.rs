//! Grammar conformance tests.
//!
//! Each table pairs an input document with either the value it decodes to or
//! the exact diagnostic it produces. Composite cases are also checked with
//! extra whitespace and comments spliced between every token.

use rod::{from_str, DecodeError, RodMap, RodStruct, RodValue};

fn array(items: Vec<RodValue>) -> RodValue {
    RodValue::Array(items)
}

fn map(entries: &[(&str, &str)]) -> RodValue {
    let mut map = RodMap::new();
    for (key, value) in entries {
        map.insert(*key, *value);
    }
    RodValue::Map(map)
}

fn structure(fields: &[(&str, &str)]) -> RodValue {
    let mut fields_out = RodStruct::new();
    for (name, value) in fields {
        fields_out.insert(*name, *value);
    }
    RodValue::Struct(fields_out)
}

fn assert_decodes(input: &str, expected: &RodValue) {
    match from_str(input) {
        Ok(value) => assert_eq!(&value, expected, "input: {input:?}"),
        Err(err) => panic!("input {input:?} failed: {err}"),
    }
}

fn assert_fails(input: &str, message: &str) {
    match from_str(input) {
        Ok(value) => panic!("input {input:?} decoded to {value:?}, expected error {message:?}"),
        Err(err) => assert_eq!(err.to_string(), message, "input: {input:?}"),
    }
}

#[test]
fn test_valid_primitives() {
    let cases: Vec<(&str, RodValue)> = vec![
        ("\"new\nline\"", RodValue::from("new\nline")),
        (r#"" ""#, RodValue::from(" ")),
        (r#""back\\slash""#, RodValue::from("back\\slash")),
        (r#""Hello, \"world\"!""#, RodValue::from("Hello, \"world\"!")),
        ("+0.0", RodValue::Float(0.0)),
        ("+0", RodValue::Int(0)),
        ("+1234.5678", RodValue::Float(1234.5678)),
        ("+12345678", RodValue::Int(12345678)),
        ("+inf", RodValue::Float(f64::INFINITY)),
        ("-0.0", RodValue::Float(-0.0)),
        ("-0", RodValue::Int(0)),
        ("-1234.5678", RodValue::Float(-1234.5678)),
        ("-12345678", RodValue::Int(-12345678)),
        ("-inf", RodValue::Float(f64::NEG_INFINITY)),
        ("0.0", RodValue::Float(0.0)),
        ("1234.5678", RodValue::Float(1234.5678)),
        ("<anno> \"tation\"", RodValue::from("tation")),
        ("false", RodValue::Bool(false)),
        ("inf", RodValue::Float(f64::INFINITY)),
        ("nan", RodValue::Float(f64::NAN)),
        ("null", RodValue::Null),
        ("true", RodValue::Bool(true)),
        ("| 7F |", RodValue::Blob(vec![0x7f])),
        ("| 12 34 |", RodValue::Blob(vec![0x12, 0x34])),
        ("| |", RodValue::Blob(vec![])),
    ];
    for (input, expected) in &cases {
        assert_decodes(input, expected);
    }
}

#[test]
fn test_negative_zero_keeps_its_sign() {
    let value = from_str("-0.0").unwrap();
    assert!(value.as_f64().unwrap().is_sign_negative());
    assert_ne!(value, RodValue::Float(0.0));
}

#[test]
fn test_invalid_primitives() {
    let cases = [
        ("", "1:1: expected value, got end of file"),
        ("   ", "1:4: expected value, got end of file"),
        ("# only a comment", "1:17: expected value, got end of file"),
        ("foo", "1:1: expected value, got 'f'"),
        ("1e3", "1:2: expected end of file, got 'e'"),
        ("+1e3", "1:3: expected end of file, got 'e'"),
        ("-1e3", "1:3: expected end of file, got 'e'"),
        ("+e3", "1:2: expected digit, got 'e'"),
        ("+nan", "1:2: expected digit, got 'n'"),
        ("-nan", "1:2: expected digit, got 'n'"),
        ("truely", "1:5: expected end of file, got 'l'"),
        ("| | | |", "1:5: expected end of file, got '|'"),
        ("| 80 | | FF |", "1:8: expected end of file, got '|'"),
        ("|X0|", "1:2: expected byte or '|', got 'X'"),
        ("|0X|", "1:2: expected hexadecimal digit, got `0X`"),
        ("\"héllo\" x", "1:9: expected end of file, got 'x'"),
    ];
    for (input, message) in cases {
        assert_fails(input, message);
    }
}

#[test]
fn test_valid_composites() {
    let v = RodValue::from("V");
    let x = RodValue::from("X");
    let cases: Vec<(&str, RodValue)> = vec![
        ("[ ]", array(vec![])),
        ("[ \"V\" ]", array(vec![v.clone()])),
        ("[ \"V\" , ]", array(vec![v.clone()])),
        ("[ \"V\" , \"X\"]", array(vec![v.clone(), x.clone()])),
        ("[ \"V\" , \"X\",]", array(vec![v, x])),
        ("( )", map(&[])),
        ("( \"K\" : \"V\" )", map(&[("K", "V")])),
        ("( \"K\" : \"V\" , )", map(&[("K", "V")])),
        ("( \"K\" : \"V\" ,\"X\":\"X\")", map(&[("K", "V"), ("X", "X")])),
        ("( \"K\" : \"V\" ,\"X\":\"X\",)", map(&[("K", "V"), ("X", "X")])),
        ("{ }", structure(&[])),
        ("{ I : \"V\" }", structure(&[("I", "V")])),
        ("{ I : \"V\" , }", structure(&[("I", "V")])),
        ("{ I : \"V\" ,X:\"X\"}", structure(&[("I", "V"), ("X", "X")])),
        ("{ I : \"V\" ,X:\"X\",}", structure(&[("I", "V"), ("X", "X")])),
        ("{ id0 : \"V\" , _ : \"X\" }", structure(&[("id0", "V"), ("_", "X")])),
    ];
    for (input, expected) in &cases {
        assert_decodes(input, expected);
    }
}

#[test]
fn test_composites_accept_trivia_between_tokens() {
    let fillers = ["", " ", "\n", "#inline\n", "#<block>"];
    let bases = [
        ("[ \"V\" , \"X\" , ]", array(vec![RodValue::from("V"), RodValue::from("X")])),
        ("( \"K\" : \"V\" , )", map(&[("K", "V")])),
        ("{ I : \"V\" , }", structure(&[("I", "V")])),
    ];
    for (base, expected) in &bases {
        let parts: Vec<&str> = base.split(' ').collect();
        for split in 0..=parts.len() {
            for filler in fillers {
                let input = format!(
                    "{}{}{}",
                    parts[..split].join(""),
                    filler,
                    parts[split..].join("")
                );
                assert_decodes(&input, expected);
            }
        }
    }
}

#[test]
fn test_invalid_composites() {
    let cases = [
        ("[", "1:2: expected element or ']', got end of file"),
        ("[ \"V\"", "1:6: expected ',' or ']', got end of file"),
        ("[ \"V\" ,", "1:8: expected element or ']', got end of file"),
        ("[1 2]", "1:4: expected ',' or ']', got '2'"),
        ("[,]", "1:2: expected value, got ','"),
        ("(", "1:2: expected entry or ')', got end of file"),
        ("( \"K\"", "1:6: expected ':', got end of file"),
        ("( \"K\" )", "1:7: expected ':', got ')'"),
        ("( \"K\" :", "1:8: expected value, got end of file"),
        ("( \"K\" : )", "1:9: expected value, got ')'"),
        ("( \"K\" : \"V\"", "1:12: expected ',' or ')', got end of file"),
        ("( \"K\" : \"V\" ,", "1:14: expected entry or ')', got end of file"),
        ("( \"K\" : \"V\" ,\"X\")", "1:17: expected ':', got ')'"),
        ("( \"K\" : \"V\" ,\"X\":\"X\",", "1:22: expected entry or ')', got end of file"),
        ("([1]: 2)", "1:2: expected primitive value, got '['"),
        ("({}: 2)", "1:2: expected primitive value, got '{'"),
        ("{", "1:2: expected field or '}', got end of file"),
        ("{ I", "1:4: expected ':', got end of file"),
        ("{ I }", "1:5: expected ':', got '}'"),
        ("{ I :", "1:6: expected value, got end of file"),
        ("{ I : }", "1:7: expected value, got '}'"),
        ("{ I : \"V\"", "1:10: expected ',' or '}', got end of file"),
        ("{ I : \"V\" ,", "1:12: expected field or '}', got end of file"),
        ("{ I : \"V\" ,\"X\"", "1:12: expected identifier, got '\"'"),
        ("{ I : \"V\" ,X}", "1:13: expected ':', got '}'"),
        ("{ I : \"V\" ,X:", "1:14: expected value, got end of file"),
        ("{1abc: 1}", "1:2: expected identifier, got '1'"),
    ];
    for (input, message) in cases {
        assert_fails(input, message);
    }
}

#[test]
fn test_positions_across_lines() {
    assert_fails("[\n\t1,\n\t?\n]", "3:2: expected value, got '?'");
    assert_fails("{\n\tA: 1\n\tB: 2\n}", "3:2: expected ',' or '}', got 'B'");
    assert_fails("#< a\nblock >\n  oops", "3:3: expected value, got 'o'");
}

#[test]
fn test_unterminated_trivia() {
    assert_fails("#<", "1:3: expected '>', got end of file");
    assert_fails("<note", "1:6: expected '>', got end of file");
    assert_fails("\"open", "1:6: expected '\"', got end of file");
}

#[test]
fn test_model_violations() {
    let err = from_str("(\"K\": 1, \"K\": 2)").unwrap_err();
    assert_eq!(err.to_string(), "1:10: duplicate map key \"K\"");

    let err = from_str("{A: 1, A: 2}").unwrap_err();
    assert_eq!(err.to_string(), "1:8: duplicate struct field A");
    assert_eq!(err.position(), Some((1, 8)));

    let err = from_str("9223372036854775808").unwrap_err();
    assert!(matches!(err, DecodeError::Syntax { .. }));
}
