use xclass_model::{MappingStore, ModelError, ModelResult, PREFERENCES_CLASS, Schema};

/// Accepts a fixed set of mapping ids and maps every field.
struct FixedStore {
    known: Vec<&'static str>,
}

impl MappingStore for FixedStore {
    fn is_custom_mapping_valid(&self, _schema: &Schema, mapping: &str) -> ModelResult<bool> {
        Ok(self.known.contains(&mapping))
    }

    fn custom_mapping_fields(&self, schema: &Schema) -> ModelResult<Vec<String>> {
        Ok(schema.property_names().into_iter().map(str::to_string).collect())
    }
}

fn class_with_mapping(mapping: &str) -> Schema {
    let mut s = Schema::new("Space.MappedClass");
    s.set_custom_mapping(mapping);
    s.add_text_field("title", "Title", 30);
    s
}

// ── Mapping kinds ────────────────────────────────────────────────

#[test]
fn preferences_class_is_always_internal() {
    let mut s = Schema::new(PREFERENCES_CLASS);
    assert_eq!(s.custom_mapping(), "internal");
    s.set_custom_mapping("internal");
    assert!(s.has_internal_custom_mapping());
    assert!(!s.has_external_custom_mapping());
}

#[test]
fn preferences_internal_flag_reads_stored_mapping() {
    let mut s = Schema::new(PREFERENCES_CLASS);
    s.set_custom_mapping("hibernate-ext");
    assert_eq!(s.custom_mapping(), "internal");
    assert!(s.has_custom_mapping());
    assert!(!s.has_internal_custom_mapping());
    assert!(!s.has_external_custom_mapping());
}

#[test]
fn external_mapping_flags() {
    assert!(!class_with_mapping("").has_custom_mapping());
    assert!(!class_with_mapping("").has_external_custom_mapping());
    assert!(!class_with_mapping("internal").has_external_custom_mapping());
    assert!(class_with_mapping("internal").has_internal_custom_mapping());
    assert!(class_with_mapping("Space.Mapping").has_external_custom_mapping());
    assert!(!class_with_mapping("Space.Mapping").has_internal_custom_mapping());

    let blank = class_with_mapping("  ");
    assert!(blank.has_custom_mapping());
    assert!(blank.has_external_custom_mapping());
    assert!(!blank.has_internal_custom_mapping());
}

#[test]
fn whitespace_mapping_is_trimmed_for_store_calls() {
    let store = FixedStore { known: vec![] };
    let blank = class_with_mapping("  ");
    assert!(blank.custom_mapping_property_list(&store).unwrap().is_empty());
    assert!(blank.check_custom_mapping(&store).is_ok());
}

// ── Store delegation ─────────────────────────────────────────────

#[test]
fn blank_mapping_is_valid_without_asking() {
    let store = FixedStore { known: vec![] };
    assert!(class_with_mapping("").is_custom_mapping_valid(&store, "  ").unwrap());
}

#[test]
fn validity_is_delegated() {
    let store = FixedStore { known: vec!["good"] };
    let s = class_with_mapping("good");
    assert!(s.is_custom_mapping_valid(&store, "good").unwrap());
    assert!(!s.is_custom_mapping_valid(&store, "bad").unwrap());
}

#[test]
fn rejected_mapping_is_mapping_error() {
    let store = FixedStore { known: vec!["good"] };
    assert!(class_with_mapping("good").check_custom_mapping(&store).is_ok());
    let err = class_with_mapping("bad").check_custom_mapping(&store).unwrap_err();
    assert!(matches!(err, ModelError::Mapping { mapping, .. } if mapping == "bad"));
}

#[test]
fn property_list_is_empty_without_mapping() {
    let store = FixedStore { known: vec![] };
    assert!(class_with_mapping("").custom_mapping_property_list(&store).unwrap().is_empty());
    assert_eq!(
        class_with_mapping("m").custom_mapping_property_list(&store).unwrap(),
        vec!["title".to_string()]
    );
}
