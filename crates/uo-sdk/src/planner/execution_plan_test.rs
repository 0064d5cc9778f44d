use super::{build_execution_plan, describe_operation, estimate_duration};
use uo_core::{ParameterMap, ParameterValue};

fn parameters(entries: &[(&str, ParameterValue)]) -> ParameterMap {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[test]
fn numbers_steps_and_chains_conditions() {
    let plan = build_execution_plan(
        &["select_pipette", "aspirate_solution", "move_to_target", "dispense_solution", "drop_tip"],
        &parameters(&[("volume", 5000.into()), ("source_well", "A1".into())]),
    );

    let conditions = plan
        .steps
        .iter()
        .map(|step| step.condition.as_deref())
        .collect::<Vec<_>>();
    assert_eq!(
        conditions,
        vec![
            None,
            Some("step_1_completed"),
            Some("step_2_completed"),
            Some("step_3_completed"),
            Some("step_4_completed"),
        ]
    );
    assert_eq!(plan.steps[1].description, "aspirate 5000 from A1");
    assert_eq!(plan.steps[1].estimated_duration, 10.0);
    assert_eq!(plan.total_estimated_duration, 5.0 + 10.0 + 3.0 + 10.0 + 5.0);
}

#[test]
fn empty_operation_list_yields_empty_plan() {
    let plan = build_execution_plan::<&str>(&[], &ParameterMap::new());
    assert!(plan.steps.is_empty());
    assert_eq!(plan.total_estimated_duration, 0.0);
}

#[test]
fn liquid_transfer_has_two_second_floor() {
    let small = parameters(&[("volume", 200.into())]);
    assert_eq!(estimate_duration("aspirate_solution", &small), 2.0);
    assert_eq!(estimate_duration("dispense_solution", &ParameterMap::new()), 2.0);
}

#[test]
fn timed_operations_follow_their_parameters() {
    let electrochem = parameters(&[
        ("cp_duration", 720.into()),
        ("ocv_duration", 0.into()),
        ("peis_points_per_decade", 10.into()),
        ("ultrasonic_time", 2500.into()),
    ]);
    assert_eq!(estimate_duration("apply_current", &electrochem), 720.0);
    assert_eq!(estimate_duration("measure_ocv", &electrochem), 60.0);
    assert_eq!(estimate_duration("measure_impedance", &electrochem), 100.0);
    assert_eq!(estimate_duration("measure_impedance", &ParameterMap::new()), 50.0);
    assert_eq!(estimate_duration("activate_ultrasonic", &electrochem), 2.5);
    assert_eq!(estimate_duration("activate_ultrasonic", &ParameterMap::new()), 5.0);
}

#[test]
fn deposition_duration_wins_over_cp_duration() {
    let both = parameters(&[("deposition_duration", 300.into()), ("cp_duration", 720.into())]);
    assert_eq!(estimate_duration("apply_current", &both), 300.0);
}

#[test]
fn fixed_and_fallback_durations() {
    let none = ParameterMap::new();
    assert_eq!(estimate_duration("move_to_well", &none), 3.0);
    assert_eq!(estimate_duration("create_file", &none), 2.0);
    assert_eq!(estimate_duration("write_data", &none), 2.0);
    assert_eq!(estimate_duration("wait", &none), 5.0);
    assert_eq!(estimate_duration("wait", &parameters(&[("duration", 30.into())])), 5.0);
    assert_eq!(estimate_duration("initialize_potentiostat", &none), 5.0);
}

#[test]
fn descriptions_fill_templates_or_humanize() {
    let none = ParameterMap::new();
    assert_eq!(describe_operation("aspirate_solution", &none), "aspirate solution from source");
    assert_eq!(describe_operation("dispense_solution", &none), "dispense to target well");
    assert_eq!(
        describe_operation("measure_impedance", &parameters(&[("peis_start_frequency", 10000.into())])),
        "measure impedance 10000Hz to 0.1Hz"
    );
    assert_eq!(
        describe_operation("create_file", &parameters(&[("export_format", "JSON".into())])),
        "create JSON file with pattern default"
    );
    assert_eq!(describe_operation("Connect_Electrodes", &none), "connect electrodes");
    assert_eq!(
        describe_operation("apply_current", &parameters(&[("deposition_current", (-0.004).into())])),
        "apply -0.004A for durations"
    );
}
