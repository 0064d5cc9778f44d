use super::{export_node, ExportMode, ExportOptions, ExportedParameter};
use crate::catalog::{NodeCatalog, NodeDefinition};
use serde_json::json;
use uo_core::{ParameterMap, ParameterValue};

fn node(node_type: &str) -> NodeDefinition {
    NodeCatalog::builtin()
        .get(node_type)
        .cloned()
        .expect("builtin node")
}

fn options(mode: ExportMode) -> ExportOptions {
    ExportOptions {
        mode,
        node_id: Some("node-1".to_string()),
        timestamp: Some("2024-07-23T10:00:00Z".to_string()),
    }
}

#[test]
fn execution_export_lists_effective_values() {
    let definition = node("sdl1SolutionPreparation");
    let stored = ParameterMap::from([("volume".to_string(), ParameterValue::from(2000))]);
    let export = export_node(&definition, &stored, &options(ExportMode::Execution)).expect("export");

    assert_eq!(
        export.parameters.get("volume"),
        Some(&ExportedParameter::Value(ParameterValue::Number(2000.0)))
    );
    assert_eq!(
        export.parameters.get("source_well"),
        Some(&ExportedParameter::Value(ParameterValue::from("A1")))
    );
    assert!(export.parameter_groups.is_none());
    assert_eq!(export.export_metadata.format, "SDL1_Execution");
    assert_eq!(export.export_metadata.total_parameters, export.parameters.len());
    assert_eq!(export.export_metadata.required_parameters, None);

    let steps: Vec<_> = export.execution_steps.iter().map(|step| step.operation.as_str()).collect();
    assert_eq!(steps, definition.primitive_operations);
    assert_eq!(export.execution_steps[1].description, "aspirate 2000 from A1");
    assert_eq!(export.execution_steps[1].estimated_duration, 4.0);
    assert_eq!(export.execution_steps[1].condition.as_deref(), Some("step_1_completed"));
}

#[test]
fn full_export_carries_definitions_and_units() {
    let definition = node("sdl1SolutionPreparation");
    let export = export_node(&definition, &ParameterMap::new(), &options(ExportMode::Full)).expect("export");
    let encoded = serde_json::to_value(&export).expect("encode");

    let volume = &encoded["parameters"]["volume"];
    assert_eq!(volume["value"], json!(5000.0));
    assert_eq!(volume["unit"], json!("uL"));
    assert_eq!(volume["valueWithUnit"], json!("5000_uL"));
    assert_eq!(volume["group"], json!("liquid_handling"));
    assert_eq!(
        volume["validation"],
        json!({"required": true, "min": 1.0, "max": 10000.0, "dataType": "number"})
    );

    let well = &encoded["parameters"]["target_well"];
    assert_eq!(well["unit"], json!(null));
    assert!(well.get("valueWithUnit").is_none());

    assert_eq!(
        encoded["parameterGroups"]["dispense_offsets"]["parameterKeys"],
        json!(["dispense_offset_x", "dispense_offset_y", "dispense_offset_z"])
    );
    assert_eq!(encoded["exportMetadata"]["format"], json!("SDL1_Enhanced"));
    assert_eq!(encoded["exportMetadata"]["exportType"], json!("full"));
    assert!(export.export_metadata.required_parameters.is_some());
}

#[test]
fn loop_blocks_follow_the_active_loop_type() {
    let definition = node("sdl1SequenceControl");
    let export = export_node(&definition, &ParameterMap::new(), &options(ExportMode::Execution)).expect("export");
    assert!(export.loop_condition.is_none());
    assert!(export.break_condition.is_none());

    let stored = ParameterMap::from([
        ("loop_type".to_string(), ParameterValue::from("condition_based")),
        ("check_interval".to_string(), ParameterValue::from(0)),
    ]);
    let export = export_node(&definition, &stored, &options(ExportMode::Execution)).expect("export");
    let encoded = serde_json::to_value(&export).expect("encode");
    assert_eq!(
        encoded["loopCondition"],
        json!({
            "type": "expression",
            "expr": "voltage_threshold",
            "description": "Loop while: voltage_threshold",
            "maxIterations": 100.0
        })
    );
    assert_eq!(
        encoded["breakCondition"],
        json!({
            "type": "expression",
            "expr": "voltage < -1.5",
            "description": "Break when: voltage < -1.5",
            "checkInterval": 1.0
        })
    );
}

#[test]
fn fingerprint_ignores_timestamp_but_tracks_values() {
    let definition = node("sdl1WashCleaning");
    let first = export_node(&definition, &ParameterMap::new(), &options(ExportMode::Execution)).expect("export");
    let later = export_node(
        &definition,
        &ParameterMap::new(),
        &ExportOptions {
            timestamp: Some("2025-01-01T00:00:00Z".to_string()),
            ..options(ExportMode::Execution)
        },
    )
    .expect("export");
    assert_eq!(first.fingerprint, later.fingerprint);
    assert_eq!(first.fingerprint.len(), 64);

    let changed = export_node(
        &definition,
        &ParameterMap::from([("cleaning_cycles".to_string(), ParameterValue::from(3))]),
        &options(ExportMode::Execution),
    )
    .expect("export");
    assert_ne!(first.fingerprint, changed.fingerprint);
}
