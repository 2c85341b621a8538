use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use xclass_model::property::NumberKind;
use xclass_model::{Instance, Registry, Schema, StaticListOptions};
use xclass_types::{FormMap, FormValue, Value};
use xclass_xml::{CodecOptions, XmlError, decode_instance, encode_instance};

fn task_class() -> Schema {
    let mut s = Schema::new("Tasks.TaskClass");
    s.add_text_field("title", "Title", 60);
    s.add_template_field("notes", "Notes");
    s.add_number_field("estimate", "Estimate", 5, NumberKind::Float);
    s.add_boolean_field("done", "Done", "yesno");
    s.add_date_field_with("due", "Due", Some("yyyy-MM-dd HH:mm"), 0);
    s.add_static_list_field_with(
        "labels",
        "Labels",
        "bug|feature",
        &StaticListOptions {
            multi_select: true,
            ..StaticListOptions::default()
        },
    );
    s.add_db_list_field_with("watchers", "Watchers", 5, true, "select name from User");
    s
}

fn sample_task() -> Instance {
    let form: FormMap = [
        ("title", FormValue::from("Fix <the> \"parser\"")),
        ("notes", FormValue::from("line one\nline two")),
        ("estimate", FormValue::from("2.5")),
        ("done", FormValue::from("no")),
        ("due", FormValue::from("2024-05-06 17:45")),
        ("labels", FormValue::from(vec!["bug", "feature"])),
        ("watchers", FormValue::from("alice,bob")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    let mut task = task_class()
        .new_instance_from_form_map(&Registry::new(), &form)
        .unwrap();
    task.owner = "Tasks.Board".into();
    task.number = 3;
    task
}

// ── Round trip ───────────────────────────────────────────────────

#[test]
fn object_round_trips() {
    let task = sample_task();
    let xml = encode_instance(&task, &CodecOptions::pretty()).unwrap();
    let decoded = decode_instance(&xml, &task_class()).unwrap().unwrap();

    assert_eq!(decoded, task);
    assert_eq!(decoded.guid, task.guid);
    assert_eq!(
        decoded.value("due"),
        Some(&Value::Date(
            NaiveDate::from_ymd_opt(2024, 5, 6).unwrap().and_hms_opt(17, 45, 0).unwrap()
        ))
    );
    assert_eq!(
        decoded.value("watchers"),
        Some(&Value::DbStringList(vec!["alice".into(), "bob".into()]))
    );
}

#[test]
fn blank_date_defaulting_to_now_round_trips() {
    let mut class = Schema::new("Tasks.Reminder");
    class.add_date_field("due", "Due");
    let form: FormMap = [("due".to_string(), FormValue::from(""))].into_iter().collect();
    let reminder = class.new_instance_from_form_map(&Registry::new(), &form).unwrap();
    assert!(matches!(reminder.value("due"), Some(Value::Date(_))));

    let xml = encode_instance(&reminder, &CodecOptions::default()).unwrap();
    let decoded = decode_instance(&xml, &class).unwrap().unwrap();
    assert_eq!(decoded, reminder);
}

#[test]
fn list_values_are_written_as_value_children() {
    let xml = encode_instance(&sample_task(), &CodecOptions::default()).unwrap();
    assert!(xml.contains("<property><labels><value>bug</value><value>feature</value></labels></property>"));
    assert!(xml.contains("<className>Tasks.TaskClass</className>"));
    assert!(xml.contains("<name>Tasks.Board</name><number>3</number>"));
}

#[test]
fn empty_list_round_trips() {
    let mut task = Instance::new("Tasks.TaskClass");
    task.put("labels", Value::StringList(Vec::new()));
    let xml = encode_instance(&task, &CodecOptions::default()).unwrap();
    let decoded = decode_instance(&xml, &task_class()).unwrap().unwrap();
    assert_eq!(decoded.value("labels"), Some(&Value::StringList(Vec::new())));
}

// ── Lenient reading ──────────────────────────────────────────────

#[test]
fn undeclared_properties_are_skipped() {
    let xml = "<object><className>Tasks.TaskClass</className>\
               <property><title>t</title></property>\
               <property><removed>x</removed></property></object>";
    let decoded = decode_instance(xml, &task_class()).unwrap().unwrap();
    assert_eq!(decoded.property_names(), vec!["title"]);
}

#[test]
fn joined_list_text_is_split() {
    let xml = "<object><className>Tasks.TaskClass</className>\
               <property><labels>bug|feature</labels></property></object>";
    let decoded = decode_instance(xml, &task_class()).unwrap().unwrap();
    assert_eq!(
        decoded.value("labels"),
        Some(&Value::StringList(vec!["bug".into(), "feature".into()]))
    );
}

#[test]
fn joined_list_text_uses_field_separators() {
    let xml = "<object><className>Tasks.TaskClass</className>\
               <property><labels>bug,feature</labels></property>\
               <property><watchers>alice bob</watchers></property></object>";
    let decoded = decode_instance(xml, &task_class()).unwrap().unwrap();
    assert_eq!(
        decoded.value("labels"),
        Some(&Value::StringList(vec!["bug".into(), "feature".into()]))
    );
    assert_eq!(
        decoded.value("watchers"),
        Some(&Value::DbStringList(vec!["alice".into(), "bob".into()]))
    );
}

#[test]
fn missing_guid_gets_a_fresh_one() {
    let xml = "<object><className>Tasks.TaskClass</className></object>";
    let a = decode_instance(xml, &task_class()).unwrap().unwrap();
    let b = decode_instance(xml, &task_class()).unwrap().unwrap();
    assert_ne!(a.guid, b.guid);
    assert_eq!(a.number, 0);
}

// ── Errors ───────────────────────────────────────────────────────

#[test]
fn class_name_is_required() {
    let err = decode_instance("<object><number>1</number></object>", &task_class()).unwrap_err();
    assert!(matches!(err, XmlError::MissingElement { element, .. } if element == "className"));
}

#[test]
fn value_of_wrong_kind_is_types_error() {
    let xml = "<object><className>Tasks.TaskClass</className>\
               <property><estimate>lots</estimate></property></object>";
    let err = decode_instance(xml, &task_class()).unwrap_err();
    assert!(matches!(err, XmlError::Types(_)));
}

#[test]
fn bad_number_is_parse_error() {
    let xml = "<object><className>Tasks.TaskClass</className><number>x</number></object>";
    assert!(matches!(
        decode_instance(xml, &task_class()).unwrap_err(),
        XmlError::Parse { .. }
    ));
}
