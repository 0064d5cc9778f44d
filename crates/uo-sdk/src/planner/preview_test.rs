use super::{preview_steps, render_plan_text, render_preview_text};
use crate::planner::{build_execution_plan, ExecutionStep};
use uo_core::{ParameterMap, ParameterValue};

fn steps() -> Vec<ExecutionStep> {
    vec![
        ExecutionStep::new("wait")
            .when("wait_before > 0")
            .describe("Wait before starting"),
        ExecutionStep::new("connect_electrodes"),
        ExecutionStep::new("measure_ocv").when("measurement_type == OCV"),
        ExecutionStep::new("apply_current").when("measurement_type == CP"),
    ]
}

#[test]
fn counts_active_steps() {
    let parameters = ParameterMap::from([
        ("wait_before".to_string(), ParameterValue::from(0)),
        ("measurement_type".to_string(), ParameterValue::from("CP")),
    ]);
    let preview = preview_steps(&steps(), &parameters);

    let flags = preview.steps.iter().map(|step| step.active).collect::<Vec<_>>();
    assert_eq!(flags, vec![true, true, false, true]);
    assert_eq!(preview.active_steps, 3);
    assert_eq!(preview.steps[3].index, 4);
}

#[test]
fn renders_preview_lines() {
    let parameters = ParameterMap::from([
        ("wait_before".to_string(), ParameterValue::from(10)),
        ("measurement_type".to_string(), ParameterValue::from("OCV")),
    ]);
    let text = render_preview_text(&preview_steps(&steps(), &parameters));
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Execution Preview (3 of 4 steps active)");
    assert_eq!(lines[1], "- [active] 1. wait (if wait_before > 0)");
    assert_eq!(lines[2], "  Wait before starting");
    assert_eq!(lines[5], "- [skipped] 4. apply_current (if measurement_type == CP)");
}

#[test]
fn renders_plan_lines() {
    let plan = build_execution_plan(&["move_to_well", "write_data"], &ParameterMap::new());
    let text = render_plan_text(&plan);
    assert_eq!(
        text,
        "Execution plan: steps=2 total_estimated_duration=5s\n\
         - 1. move_to_well ~3s after=- move to well target\n\
         - 2. write_data ~2s after=step_1_completed write data"
    );
}
