use std::collections::HashSet;
use std::str::FromStr;
use xclass_types::ObjectReference;

#[test]
fn display_and_parse_roundtrip() {
    let r = ObjectReference::new("Blog.PostClass", 2);
    assert_eq!(r.to_string(), "Blog.PostClass[2]");
    assert_eq!(ObjectReference::parse(&r.to_string()).unwrap(), r);
}

#[test]
fn bare_class_name_is_object_zero() {
    let r = ObjectReference::from_str("XWiki.XWikiUsers").unwrap();
    assert_eq!(r.class_name, "XWiki.XWikiUsers");
    assert_eq!(r.number, 0);
}

#[test]
fn parse_rejects_malformed_references() {
    assert!(ObjectReference::parse("").is_err());
    assert!(ObjectReference::parse("[3]").is_err());
    assert!(ObjectReference::parse("A.B[3").is_err());
    assert!(ObjectReference::parse("A.B[x]").is_err());
    assert!(ObjectReference::parse("A.B[-1]").is_err());
}

#[test]
fn references_hash_by_class_and_number() {
    let mut set = HashSet::new();
    set.insert(ObjectReference::new("A.B", 0));
    set.insert(ObjectReference::new("A.B", 0));
    set.insert(ObjectReference::new("A.B", 1));
    assert_eq!(set.len(), 2);
}
