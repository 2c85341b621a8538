use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use xclass_model::property::{
    BooleanType, DateType, FreeText, LevelsType, ListSettings, NumberKind, NumberType,
    PasswordType, StaticListType, StringType, TextAreaType,
};
use xclass_model::{ModelError, PropertyKind, PropertyType, Registry, ValidationStatus};
use xclass_types::{Value, ValueKind};

fn property(kind: PropertyKind) -> PropertyType {
    PropertyType::new("field", "Field", kind)
}

fn multi_list() -> ListSettings {
    ListSettings::default().multi(5)
}

// ── Discriminators ───────────────────────────────────────────────

#[test]
fn class_types_match_registry_names() {
    let registry = Registry::new();
    for class_type in [
        "String", "Password", "TextArea", "Boolean", "Number", "Date", "Users", "Groups",
        "Levels", "StaticList", "DBList", "DBTreeList",
    ] {
        let p = registry.new_property(class_type, "f").unwrap();
        assert_eq!(p.class_type(), class_type);
    }
}

#[test]
fn legacy_class_type_is_fully_qualified() {
    let p = property(PropertyKind::StaticList(StaticListType::default()));
    assert_eq!(
        p.kind.legacy_class_type(),
        "com.xpn.xwiki.objects.classes.StaticListClass"
    );
}

#[test]
fn registry_resolves_legacy_aliases() {
    let registry = Registry::new();
    let p = registry
        .new_property("com.xpn.xwiki.objects.classes.NumberClass", "age")
        .unwrap();
    assert_eq!(p.class_type(), "Number");
    assert_eq!(p.name(), "age");
}

#[test]
fn unknown_class_type_is_instantiation_error() {
    let err = Registry::new().new_property("Spreadsheet", "f").unwrap_err();
    assert!(matches!(err, ModelError::Instantiation { name, .. } if name == "Spreadsheet"));
}

// ── Text coercion ────────────────────────────────────────────────

#[test]
fn string_wraps_and_uses_first_array_element() {
    let p = property(PropertyKind::String(StringType::default()));
    assert_eq!(p.from_string("hello"), Some(Value::String("hello".into())));
    assert_eq!(
        p.from_string_array(&["a".into(), "b".into()]),
        Some(Value::String("a".into()))
    );
    assert_eq!(p.from_string_array(&[]), None);
}

#[test]
fn text_area_produces_large_string() {
    let p = property(PropertyKind::TextArea(TextAreaType::default()));
    assert_eq!(p.value_kind(), ValueKind::LargeString);
    assert_eq!(p.from_string("body"), Some(Value::LargeString("body".into())));
}

#[test]
fn password_is_hashed() {
    let p = property(PropertyKind::Password(PasswordType::default()));
    let Some(Value::String(stored)) = p.from_string("secret") else {
        panic!("expected string");
    };
    assert_ne!(stored, "secret");
    assert!(PasswordType::matches(&stored, "secret"));
}

// ── Boolean & number coercion ────────────────────────────────────

#[test]
fn boolean_accepts_common_spellings() {
    let p = property(PropertyKind::Boolean(BooleanType::default()));
    for yes in ["1", "true", "YES", "on"] {
        assert_eq!(p.from_string(yes), Some(Value::Integer(1)), "{yes}");
    }
    for no in ["0", "False", "no", "off"] {
        assert_eq!(p.from_string(no), Some(Value::Integer(0)), "{no}");
    }
    assert_eq!(p.from_string("maybe"), None);
    assert_eq!(p.from_value(&Value::Long(5)), Some(Value::Integer(1)));
}

#[test]
fn number_parses_per_number_type() {
    let int = property(PropertyKind::Number(NumberType::new(10, NumberKind::Integer)));
    let long = property(PropertyKind::Number(NumberType::default()));
    let double = property(PropertyKind::Number(NumberType::new(10, NumberKind::Double)));

    assert_eq!(int.from_string("42"), Some(Value::Integer(42)));
    assert_eq!(long.from_string(" 42 "), Some(Value::Long(42)));
    assert_eq!(double.from_string("1.5"), Some(Value::Double(1.5)));
    assert_eq!(int.from_string(""), None);
    assert_eq!(int.from_string("forty"), None);
}

#[test]
fn number_converts_typed_values_between_widths() {
    let int = property(PropertyKind::Number(NumberType::new(10, NumberKind::Integer)));
    let double = property(PropertyKind::Number(NumberType::new(10, NumberKind::Double)));
    assert_eq!(int.from_value(&Value::Long(7)), Some(Value::Integer(7)));
    assert_eq!(int.from_value(&Value::Long(i64::MAX)), None);
    assert_eq!(double.from_value(&Value::Integer(3)), Some(Value::Double(3.0)));
}

// ── Date coercion ────────────────────────────────────────────────

#[test]
fn date_parses_with_property_pattern() {
    let p = property(PropertyKind::Date(DateType::with_format("yyyy-MM-dd")));
    let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    assert_eq!(p.from_string("2024-03-01"), Some(Value::Date(expected)));
}

#[test]
fn date_accepts_canonical_form() {
    let p = property(PropertyKind::Date(DateType::default()));
    let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(8, 30, 0).unwrap();
    assert_eq!(p.from_string("2024-03-01 08:30:00"), Some(Value::Date(expected)));
}

#[test]
fn blank_date_depends_on_empty_is_today() {
    let today = property(PropertyKind::Date(DateType::default()));
    match today.from_string("") {
        Some(Value::Date(now)) => assert_eq!(now.and_utc().timestamp_subsec_nanos(), 0),
        other => panic!("expected a date, got {other:?}"),
    }

    let mut never = DateType::default();
    never.empty_is_today = 0;
    assert_eq!(property(PropertyKind::Date(never)).from_string(""), None);
}

#[test]
fn unparseable_date_is_none() {
    let p = property(PropertyKind::Date(DateType::default()));
    assert_eq!(p.from_string("next tuesday"), None);
}

// ── List coercion ────────────────────────────────────────────────

#[test]
fn single_select_list_keeps_string() {
    let p = property(PropertyKind::StaticList(StaticListType::default()));
    assert_eq!(p.value_kind(), ValueKind::String);
    assert_eq!(p.from_string("a,b"), Some(Value::String("a,b".into())));
}

#[test]
fn multi_select_list_splits_on_any_separator() {
    let p = property(PropertyKind::StaticList(StaticListType {
        list: multi_list(),
        ..StaticListType::default()
    }));
    assert_eq!(p.value_kind(), ValueKind::StringList);
    assert_eq!(
        p.from_string("a,b|c d"),
        Some(Value::StringList(vec!["a".into(), "b".into(), "c".into(), "d".into()]))
    );
}

#[test]
fn multi_select_array_keeps_each_element() {
    let p = property(PropertyKind::StaticList(StaticListType {
        list: multi_list(),
        ..StaticListType::default()
    }));
    assert_eq!(
        p.from_string_array(&["a b".into(), "c".into()]),
        Some(Value::StringList(vec!["a b".into(), "c".into()]))
    );
}

#[test]
fn relational_list_produces_db_string_list() {
    let mut list = multi_list();
    list.relational_storage = true;
    let p = property(PropertyKind::StaticList(StaticListType {
        list,
        ..StaticListType::default()
    }));
    assert_eq!(p.value_kind(), ValueKind::DbStringList);
    assert_eq!(
        p.from_value(&Value::StringList(vec!["x".into()])),
        Some(Value::DbStringList(vec!["x".into()]))
    );
}

// ── Parameters ───────────────────────────────────────────────────

#[test]
fn parameters_start_with_common_metadata() {
    let p = property(PropertyKind::String(StringType::default()));
    let tags: Vec<&str> = p.parameters().iter().map(|(t, _)| *t).collect();
    assert_eq!(
        tags,
        vec![
            "name",
            "prettyName",
            "unmodifiable",
            "disabled",
            "number",
            "customDisplay",
            "validationRegExp",
            "validationMessage",
            "tooltip",
            "size",
            "picker",
        ]
    );
}

#[test]
fn set_parameter_inverts_parameters() {
    let registry = Registry::new();
    let mut source = registry.new_property("DBTreeList", "tree").unwrap();
    source.set_parameter("sql", "select id from t").unwrap();
    source.set_parameter("parentField", "parent").unwrap();
    source.set_parameter("multiSelect", "1").unwrap();
    source.set_parameter("number", "4").unwrap();

    let mut copy = registry.new_property("DBTreeList", "").unwrap();
    for (tag, text) in source.parameters() {
        assert!(copy.set_parameter(tag, &text).unwrap(), "{tag}");
    }
    assert_eq!(copy, source);
}

#[test]
fn unknown_parameter_is_ignored() {
    let mut p = property(PropertyKind::Boolean(BooleanType::default()));
    assert!(!p.set_parameter("colour", "blue").unwrap());
}

#[test]
fn malformed_parameter_is_rejected() {
    let mut p = property(PropertyKind::Number(NumberType::default()));
    let err = p.set_parameter("size", "wide").unwrap_err();
    assert!(matches!(
        err,
        ModelError::InvalidParameter { parameter, value, .. } if parameter == "size" && value == "wide"
    ));
    assert!(p.set_parameter("numberType", "complex").is_err());
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn regexp_failure_records_message() {
    let mut p = property(PropertyKind::String(StringType::default()));
    p.meta.validation_regexp = "/^[a-z]+$/".into();
    p.meta.validation_message = "lowercase only".into();

    let mut status = ValidationStatus::new();
    assert!(p.validate("C", Some(&Value::String("abc".into())), &mut status));
    assert!(!p.validate("C", Some(&Value::String("ABC".into())), &mut status));

    assert_eq!(status.errors().len(), 1);
    assert_eq!(status.errors()[0].message, "lowercase only");
    assert_eq!(status.errors()[0].property_name, "field");
}

#[test]
fn regexp_flags_are_honoured() {
    let mut p = property(PropertyKind::String(StringType::default()));
    p.meta.validation_regexp = "/^[a-z]+$/i".into();
    let mut status = ValidationStatus::new();
    assert!(p.validate("C", Some(&Value::String("ABC".into())), &mut status));
}

#[test]
fn absent_value_is_checked_as_empty_text() {
    let mut p = property(PropertyKind::String(StringType::default()));
    p.meta.validation_regexp = ".+".into();
    let mut status = ValidationStatus::new();
    assert!(!p.validate("C", None, &mut status));
    assert_eq!(status.errors()[0].message, "Field has an invalid value");
}

#[test]
fn invalid_regexp_fails_validation() {
    let mut p = property(PropertyKind::String(StringType::default()));
    p.meta.validation_regexp = "([".into();
    let mut status = ValidationStatus::new();
    assert!(!p.validate("C", Some(&Value::String("x".into())), &mut status));
    assert!(status.errors()[0].message.contains("invalid validation expression"));
}

#[test]
fn forbidden_free_text_rejects_unknown_values() {
    let p = property(PropertyKind::StaticList(StaticListType {
        list: multi_list(),
        values: "red|green=Green".into(),
        free_text: FreeText::Forbidden,
    }));
    let mut status = ValidationStatus::new();
    assert!(p.validate("C", Some(&Value::StringList(vec!["green".into()])), &mut status));
    assert!(!p.validate(
        "C",
        Some(&Value::StringList(vec!["red".into(), "blue".into()])),
        &mut status
    ));
    assert!(status.errors()[0].message.contains("blue"));
}

#[test]
fn levels_reject_unknown_rights() {
    let p = property(PropertyKind::Levels(LevelsType { list: multi_list() }));
    let mut status = ValidationStatus::new();
    assert!(p.validate(
        "C",
        Some(&Value::StringList(vec!["view".into(), "edit".into()])),
        &mut status
    ));
    assert!(!p.validate("C", Some(&Value::StringList(vec!["fly".into()])), &mut status));
}
