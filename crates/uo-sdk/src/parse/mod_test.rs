use super::{parse_document, parse_document_with_format, DocumentFormat, UoDocument};
use uo_core::ParameterValue;

#[test]
fn parse_json_node_dispatches_by_schema() {
    let input = r#"{"schema":"uo-node/0.1","nodeType":"sdl1SolutionPreparation","parameters":{"volume":2500}}"#;

    let parsed = parse_document_with_format(input, DocumentFormat::Json).expect("must parse");
    match parsed {
        UoDocument::Node(node) => {
            assert_eq!(node.node_type, "sdl1SolutionPreparation");
            assert_eq!(node.parameters["volume"], ParameterValue::Number(2500.0));
        }
        other => panic!("expected node document, got {other:?}"),
    }
}

#[test]
fn parse_yaml_unit_operation_is_auto_detected() {
    let input = r#"
schema: uo-unit-operation/0.1
id: activation
label: Catalyst Activation
primitives:
  CVA:
    name: Cyclic Voltammetry
    enabled: true
    outputs:
      ecsa: true
    parameters:
      scan_window:
        value: [0.05, 1.2]
  LSV:
    name: Linear Sweep
    enabled: true
    executionCondition:
      expression: CVA.ecsa > 0.5
      dependsOn: [CVA]
rules:
  minPrimitives: 1
  incompatiblePrimitives:
    - [CVA, CP]
"#;

    let parsed = parse_document(input).expect("must parse");
    let UoDocument::UnitOperation(document) = parsed else {
        panic!("expected unit operation document");
    };
    assert_eq!(document.version, "1.0");
    assert_eq!(document.primitives.len(), 2);
    assert_eq!(
        document.primitives["CVA"].parameters["scan_window"].value,
        ParameterValue::Range([0.05, 1.2])
    );
    assert_eq!(
        document.rules.incompatible_primitives,
        vec![("CVA".to_string(), "CP".to_string())]
    );
    let condition = document.primitives["LSV"]
        .execution_condition
        .as_ref()
        .expect("condition");
    assert_eq!(condition.depends_on, vec!["CVA".to_string()]);
}

#[test]
fn legacy_enabled_if_key_is_accepted() {
    let input = r#"{
        "schema": "uo-unit-operation/0.1",
        "id": "activation",
        "label": "Activation",
        "primitives": {
            "LSV": {
                "name": "Linear Sweep",
                "executionCondition": {"enabled_if": "CVA.ecsa > 0.5", "dependsOn": ["CVA"]}
            }
        }
    }"#;

    let UoDocument::UnitOperation(document) = parse_document(input).expect("must parse") else {
        panic!("expected unit operation document");
    };
    let condition = document.primitives["LSV"]
        .execution_condition
        .as_ref()
        .expect("condition");
    assert_eq!(condition.expression, "CVA.ecsa > 0.5");
}

#[test]
fn missing_schema_is_rejected() {
    let issues = parse_document(r#"{"nodeType":"x"}"#).expect_err("must reject");
    assert_eq!(issues[0].reference.as_deref(), Some("parse.schema_required"));
}

#[test]
fn unknown_schema_is_rejected() {
    let issues = parse_document(r#"{"schema":"uo-unknown/0.1"}"#).expect_err("must reject");
    assert!(issues
        .iter()
        .any(|issue| issue.reference.as_deref() == Some("parse.unsupported_schema")));
    assert_eq!(issues[0].field_path.to_string(), "$.schema");
}

#[test]
fn unknown_fields_fail_typed_parse() {
    let input = r#"{"schema":"uo-node/0.1","nodeType":"x","colour":"red"}"#;
    let issues = parse_document(input).expect_err("must reject");
    assert_eq!(
        issues[0].reference.as_deref(),
        Some("parse.typed_deserialize_error")
    );
}

#[test]
fn malformed_json_reports_parse_error() {
    let issues = parse_document_with_format("{", DocumentFormat::Json).expect_err("must reject");
    assert_eq!(issues[0].reference.as_deref(), Some("json.parse_error"));
}

#[test]
fn yaml_duplicate_keys_are_rejected() {
    let input = r#"
schema: uo-node/0.1
nodeType: a
nodeType: b
"#;
    let issues = parse_document_with_format(input, DocumentFormat::Yaml).expect_err("must reject");
    assert_eq!(issues[0].reference.as_deref(), Some("yaml.duplicate_key"));
}
