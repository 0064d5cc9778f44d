use super::{evaluate_step_condition, ExecutionStep};
use uo_core::{ParameterMap, ParameterValue};

fn parameters() -> ParameterMap {
    ParameterMap::from([
        ("measurement_type".to_string(), ParameterValue::from("OCV")),
        ("include_metadata".to_string(), ParameterValue::from(true)),
        ("wait_before".to_string(), ParameterValue::from(0)),
        ("ultrasonic_time".to_string(), ParameterValue::from(5000)),
        ("loop_count".to_string(), ParameterValue::from(5)),
        ("label".to_string(), ParameterValue::from("two words")),
    ])
}

#[test]
fn step_without_condition_is_active() {
    assert!(evaluate_step_condition(&ExecutionStep::new("record_data"), &parameters()));
    assert!(evaluate_step_condition(
        &ExecutionStep::new("record_data").when(""),
        &parameters()
    ));
    assert!(evaluate_step_condition(
        &ExecutionStep::new("record_data").when("  "),
        &parameters()
    ));
}

#[test]
fn equality_compares_tokens_as_strings() {
    let parameters = parameters();
    let ocv = ExecutionStep::new("measure_ocv").when("measurement_type == OCV");
    let cp = ExecutionStep::new("apply_current").when("measurement_type == CP");
    assert!(evaluate_step_condition(&ocv, &parameters));
    assert!(!evaluate_step_condition(&cp, &parameters));
}

#[test]
fn equality_trims_both_sides() {
    let step = ExecutionStep::new("measure_ocv").when("  measurement_type ==   OCV  ");
    assert!(evaluate_step_condition(&step, &parameters()));
}

#[test]
fn equality_coerces_booleans_strictly() {
    let mut parameters = parameters();
    let step = ExecutionStep::new("write_metadata").when("include_metadata == true");
    assert!(evaluate_step_condition(&step, &parameters));

    parameters.insert("include_metadata".to_string(), "true".into());
    assert!(!evaluate_step_condition(&step, &parameters));
}

#[test]
fn equality_never_matches_numbers() {
    let step = ExecutionStep::new("increment_counter").when("loop_count == 5");
    assert!(!evaluate_step_condition(&step, &parameters()));
}

#[test]
fn equality_on_missing_parameter_is_inactive() {
    let step = ExecutionStep::new("check_condition").when("loop_type == condition_based");
    assert!(!evaluate_step_condition(&step, &parameters()));
}

#[test]
fn equality_accepts_any_token_text() {
    let mut parameters = parameters();
    let spaced = ExecutionStep::new("tag").when("label == two words");
    assert!(evaluate_step_condition(&spaced, &parameters));
    parameters.insert("label".to_string(), "other".into());
    assert!(!evaluate_step_condition(&spaced, &parameters));

    let quoted = ExecutionStep::new("tag").when("label == 'other'");
    assert!(!evaluate_step_condition(&quoted, &parameters));
    parameters.insert("label".to_string(), "'other'".into());
    assert!(evaluate_step_condition(&quoted, &parameters));

    let empty = ExecutionStep::new("tag").when("label == ");
    assert!(!evaluate_step_condition(&empty, &parameters));
    parameters.insert("label".to_string(), "".into());
    assert!(evaluate_step_condition(&empty, &parameters));
}

#[test]
fn other_shapes_keep_the_step_active() {
    let parameters = parameters();
    for condition in [
        "wait_before > 0",
        "wait_after > 0",
        "ultrasonic_time > 0",
        "measurement_type ==",
        "measurement_type==OCV",
        "alert('x')",
        "a == b == c",
        "measurement_type == CP || measurement_type == LSV",
    ] {
        let step = ExecutionStep::new("wait").when(condition);
        assert!(evaluate_step_condition(&step, &parameters), "{condition}");
    }
}

#[test]
fn comparison_stays_active_whatever_the_value() {
    let step = ExecutionStep::new("wait").when("wait_before > 0");
    let mut parameters = parameters();
    assert!(evaluate_step_condition(&step, &parameters));
    parameters.insert("wait_before".to_string(), 30.into());
    assert!(evaluate_step_condition(&step, &parameters));
    parameters.remove("wait_before");
    assert!(evaluate_step_condition(&step, &parameters));
}
