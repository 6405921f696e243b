use callsnap_types::*;

#[test]
fn test_identity_display() {
    let identity = FunctionIdentity::new("LoginForm", "submit");
    assert_eq!(identity.to_string(), "LoginForm.submit");
}

#[test]
fn test_snapshot_identity_match() {
    let snap = Snapshot::template("LoginForm", "submit");
    assert!(snap.has_identity(&FunctionIdentity::new("LoginForm", "submit")));
    assert!(!snap.has_identity(&FunctionIdentity::new("LoginForm", "reset")));
    assert!(snap.same_identity(&Snapshot::template("LoginForm", "submit").with_id("other")));
}

#[test]
fn test_archived_output_accessors() {
    let text = ArchivedOutput::Text("<p>hi</p>".to_string());
    assert_eq!(text.as_text(), Some("<p>hi</p>"));
    assert_eq!(text.extension(), "html");

    let structured = ArchivedOutput::Structured(serde_json::json!({ "a": 1 }));
    assert!(structured.as_text().is_none());
    assert_eq!(structured.as_structured().unwrap()["a"], 1);
    assert_eq!(structured.extension(), "json");
}

#[test]
fn test_flavor_display() {
    assert_eq!(Flavor::Async.to_string(), "async");
    assert!(Flavor::Async.is_async());
    assert!(!Flavor::Unknown.is_async());
}
