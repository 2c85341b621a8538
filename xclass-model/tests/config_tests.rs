use pretty_assertions::assert_eq;
use xclass_model::property::DateType;
use xclass_model::{
    ClassTypeStyle, EngineConfig, PasswordStorage, PropertyKind, Registry,
};

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn empty_file_is_all_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.defaults.date_format, "dd/MM/yyyy HH:mm:ss");
    assert_eq!(config.defaults.list_separators, " ,|");
    assert_eq!(config.defaults.password_storage, PasswordStorage::Hash);
    assert_eq!(config.codec.indent, 0);
    assert_eq!(config.codec.class_type_style, ClassTypeStyle::Short);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = EngineConfig::from_toml_str(
        r#"
        [defaults]
        password_storage = "clear"

        [codec]
        indent = 2
        class_type_style = "legacy"
        "#,
    )
    .unwrap();
    assert_eq!(config.defaults.password_storage, PasswordStorage::Clear);
    assert_eq!(config.defaults.list_separators, " ,|");
    assert_eq!(config.codec.indent, 2);
    assert_eq!(config.codec.class_type_style, ClassTypeStyle::Legacy);
}

#[test]
fn malformed_toml_is_an_error() {
    assert!(EngineConfig::from_toml_str("[codec\nindent = ").is_err());
}

// ── Loading from disk ────────────────────────────────────────────

#[test]
fn load_from_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xclass.toml");
    std::fs::write(&path, "[defaults]\ndate_format = \"yyyy-MM-dd\"\n").unwrap();

    let config = EngineConfig::load_from(&path).unwrap();
    assert_eq!(config.defaults.date_format, "yyyy-MM-dd");
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(EngineConfig::load_from(&dir.path().join("absent.toml")).is_err());
}

#[test]
fn load_or_default_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        EngineConfig::load_or_default(&dir.path().join("absent.toml")),
        EngineConfig::default()
    );

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "not = [valid").unwrap();
    assert_eq!(EngineConfig::load_or_default(&broken), EngineConfig::default());
}

// ── Applying defaults ────────────────────────────────────────────

#[test]
fn registry_applies_property_defaults() {
    let config = EngineConfig::from_toml_str(
        "[defaults]\ndate_format = \"yyyy-MM-dd\"\nlist_separators = \";\"\npassword_storage = \"clear\"\n",
    )
    .unwrap();
    let registry = Registry::from_config(&config);

    let date = registry.new_property("Date", "d").unwrap();
    assert_eq!(date.kind, PropertyKind::Date(DateType::with_format("yyyy-MM-dd")));

    let list = registry.new_property("StaticList", "l").unwrap();
    assert_eq!(list.kind.list_settings().unwrap().separators, ";");

    match registry.new_property("Password", "p").unwrap().kind {
        PropertyKind::Password(p) => assert_eq!(p.storage, PasswordStorage::Clear),
        other => panic!("unexpected kind {other:?}"),
    }
}
