use serde::{Deserialize, Serialize};
use uo_core::ParameterMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedStep {
    pub step: usize,
    pub operation: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    pub estimated_duration: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPlan {
    pub steps: Vec<PlannedStep>,
    pub total_estimated_duration: f64,
}

/// Linear plan over `operations`; step `n > 1` waits on step `n - 1`.
pub fn build_execution_plan<S: AsRef<str>>(
    operations: &[S],
    parameters: &ParameterMap,
) -> ExecutionPlan {
    let steps = operations
        .iter()
        .enumerate()
        .map(|(index, operation)| {
            let operation = operation.as_ref();
            PlannedStep {
                step: index + 1,
                operation: operation.to_string(),
                description: describe_operation(operation, parameters),
                condition: (index > 0).then(|| format!("step_{index}_completed")),
                estimated_duration: estimate_duration(operation, parameters),
            }
        })
        .collect::<Vec<_>>();
    let total_estimated_duration = steps.iter().map(|step| step.estimated_duration).sum();

    ExecutionPlan {
        steps,
        total_estimated_duration,
    }
}

/// Human-readable line for one operation, filled from the parameters.
pub fn describe_operation(operation: &str, parameters: &ParameterMap) -> String {
    let text = |key: &str, fallback: &str| {
        parameters
            .get(key)
            .filter(|value| !value.is_blank())
            .map_or_else(|| fallback.to_string(), ToString::to_string)
    };

    match operation {
        "aspirate_solution" => format!(
            "aspirate {} from {}",
            text("volume", "solution"),
            text("source_well", "source")
        ),
        "dispense_solution" => format!("dispense to {} well", text("target_well", "target")),
        "move_to_well" => format!("move to well {}", text("target_well", "target")),
        "apply_current" => format!(
            "apply {}A for {}s",
            text("deposition_current", "current"),
            text("deposition_duration", "duration")
        ),
        "measure_impedance" => format!(
            "measure impedance {}Hz to {}Hz",
            text("peis_start_frequency", "10k"),
            text("peis_end_frequency", "0.1")
        ),
        "dispense_cleaning_solution" => {
            format!("dispense {}mL", text("pump1_volume", "cleaning solution"))
        }
        "create_file" => format!(
            "create {} file with pattern {}",
            text("export_format", "CSV"),
            text("file_naming", "default")
        ),
        other => other.replace('_', " ").to_lowercase(),
    }
}

/// Estimated seconds for one operation. Zero-valued parameters fall back
/// to the defaults.
pub fn estimate_duration(operation: &str, parameters: &ParameterMap) -> f64 {
    let number = |key: &str| {
        parameters
            .get(key)
            .and_then(|value| value.coerce_f64())
            .filter(|value| *value != 0.0 && !value.is_nan())
    };

    match operation {
        "aspirate_solution" | "dispense_solution" => {
            (number("volume").unwrap_or(1000.0) / 1000.0 * 2.0).max(2.0)
        }
        "move_to_well" | "move_to_target" => 3.0,
        "apply_current" => number("deposition_duration")
            .or_else(|| number("cp_duration"))
            .unwrap_or(60.0),
        "measure_ocv" => number("ocv_duration").unwrap_or(60.0),
        "measure_impedance" => (number("peis_points_per_decade").unwrap_or(5.0) * 10.0).max(30.0),
        "activate_ultrasonic" => number("ultrasonic_time").unwrap_or(5000.0) / 1000.0,
        "write_data" | "create_file" => 2.0,
        _ => 5.0,
    }
}

#[cfg(test)]
#[path = "execution_plan_test.rs"]
mod tests;
