use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use xclass_types::{FormValue, Value, ValueKind};

fn date(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

// ── Kinds ────────────────────────────────────────────────────────

#[test]
fn kind_matches_variant() {
    assert_eq!(Value::from("a").kind(), ValueKind::String);
    assert_eq!(Value::LargeString("a".into()).kind(), ValueKind::LargeString);
    assert_eq!(Value::Integer(1).kind(), ValueKind::Integer);
    assert_eq!(Value::Long(1).kind(), ValueKind::Long);
    assert_eq!(Value::Float(1.0).kind(), ValueKind::Float);
    assert_eq!(Value::Double(1.0).kind(), ValueKind::Double);
    assert_eq!(Value::Date(date(2024, 1, 1, 0, 0, 0)).kind(), ValueKind::Date);
    assert_eq!(Value::StringList(vec![]).kind(), ValueKind::StringList);
    assert_eq!(Value::DbStringList(vec![]).kind(), ValueKind::DbStringList);
}

#[test]
fn only_list_kinds_are_lists() {
    assert!(ValueKind::StringList.is_list());
    assert!(ValueKind::DbStringList.is_list());
    assert!(!ValueKind::String.is_list());
    assert!(!ValueKind::Long.is_list());
}

// ── Textual form ─────────────────────────────────────────────────

#[test]
fn lists_join_with_pipe() {
    let v = Value::StringList(vec!["a".into(), "b".into(), "c".into()]);
    assert_eq!(v.to_text(), "a|b|c");
}

#[test]
fn dates_use_canonical_format() {
    let v = Value::Date(date(2023, 7, 14, 9, 5, 0));
    assert_eq!(v.to_text(), "2023-07-14 09:05:00");
}

#[test]
fn parse_as_reads_canonical_text() {
    assert_eq!(Value::parse_as(ValueKind::Integer, " 42 ").unwrap(), Value::Integer(42));
    assert_eq!(Value::parse_as(ValueKind::Long, "-7").unwrap(), Value::Long(-7));
    assert_eq!(Value::parse_as(ValueKind::Double, "2.5").unwrap(), Value::Double(2.5));
    assert_eq!(
        Value::parse_as(ValueKind::Date, "2023-07-14 09:05:00").unwrap(),
        Value::Date(date(2023, 7, 14, 9, 5, 0))
    );
    assert_eq!(
        Value::parse_as(ValueKind::DbStringList, "x|y").unwrap(),
        Value::DbStringList(vec!["x".into(), "y".into()])
    );
}

#[test]
fn parse_as_keeps_text_verbatim() {
    assert_eq!(
        Value::parse_as(ValueKind::String, "  padded  ").unwrap(),
        Value::String("  padded  ".into())
    );
}

#[test]
fn parse_as_rejects_bad_numbers_and_dates() {
    assert!(Value::parse_as(ValueKind::Integer, "abc").is_err());
    assert!(Value::parse_as(ValueKind::Integer, "99999999999").is_err());
    assert!(Value::parse_as(ValueKind::Date, "14/07/2023").is_err());
}

#[test]
fn empty_list_text_is_empty_list() {
    assert_eq!(
        Value::parse_as(ValueKind::StringList, "").unwrap(),
        Value::StringList(vec![])
    );
}

// ── Accessors ────────────────────────────────────────────────────

#[test]
fn numeric_accessors_widen() {
    assert_eq!(Value::Integer(3).as_i64(), Some(3));
    assert_eq!(Value::Long(3).as_f64(), Some(3.0));
    assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
    assert_eq!(Value::from("3").as_i64(), None);
}

#[test]
fn items_wraps_scalars() {
    assert_eq!(Value::Integer(5).items(), vec!["5".to_string()]);
    assert_eq!(
        Value::StringList(vec!["a".into(), "b".into()]).items(),
        vec!["a".to_string(), "b".to_string()]
    );
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn value_serializes_adjacently_tagged() {
    let json = serde_json::to_string(&Value::Integer(7)).unwrap();
    assert_eq!(json, r#"{"kind":"integer","value":7}"#);
}

#[test]
fn form_value_is_untagged() {
    let single: FormValue = serde_json::from_str(r#""x""#).unwrap();
    assert_eq!(single, FormValue::Single("x".into()));
    let many: FormValue = serde_json::from_str(r#"["a","b"]"#).unwrap();
    assert_eq!(many, FormValue::from(vec!["a", "b"]));
    assert_eq!(many.as_slice().len(), 2);
    assert_eq!(single.as_slice(), &["x".to_string()]);
}
