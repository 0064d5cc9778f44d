use super::{FieldPath, FieldPathSegment};

#[test]
fn renders_keys_and_indices() {
    let path = FieldPath::from_keys(["primitives", "CVA"]).key("parameters").index(1);
    assert_eq!(path.to_string(), "$.primitives.CVA.parameters[1]");
    assert_eq!(path.segments()[3], FieldPathSegment::Index(1));
}

#[test]
fn root_renders_as_dollar() {
    let path = FieldPath::root();
    assert!(path.is_root());
    assert_eq!(path.to_string(), "$");
}

#[test]
fn serializes_as_rendered_string() {
    let path = FieldPath::root().key("groups").index(0);
    assert_eq!(
        serde_json::to_value(&path).expect("encode"),
        serde_json::json!("$.groups[0]")
    );
}
