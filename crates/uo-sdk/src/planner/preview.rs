use super::condition::{evaluate_step_condition, ExecutionStep};
use super::execution_plan::ExecutionPlan;
use serde::{Deserialize, Serialize};
use uo_core::ParameterMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPreview {
    pub index: usize,
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPreview {
    pub steps: Vec<StepPreview>,
    pub active_steps: usize,
}

/// Every declared step with its current activity.
pub fn preview_steps(steps: &[ExecutionStep], parameters: &ParameterMap) -> ExecutionPreview {
    let steps = steps
        .iter()
        .enumerate()
        .map(|(index, step)| StepPreview {
            index: index + 1,
            operation: step.operation.clone(),
            condition: step.condition.clone(),
            description: step.description.clone(),
            active: evaluate_step_condition(step, parameters),
        })
        .collect::<Vec<_>>();
    let active_steps = steps.iter().filter(|step| step.active).count();

    ExecutionPreview {
        steps,
        active_steps,
    }
}

pub fn render_preview_text(preview: &ExecutionPreview) -> String {
    let mut lines = Vec::<String>::new();
    lines.push(format!(
        "Execution Preview ({} of {} steps active)",
        preview.active_steps,
        preview.steps.len()
    ));
    for step in &preview.steps {
        let state = if step.active { "active" } else { "skipped" };
        let mut line = format!("- [{state}] {}. {}", step.index, step.operation);
        if let Some(condition) = &step.condition {
            line.push_str(&format!(" (if {condition})"));
        }
        lines.push(line);
        if let Some(description) = &step.description {
            lines.push(format!("  {description}"));
        }
    }
    lines.join("\n")
}

pub fn render_plan_text(plan: &ExecutionPlan) -> String {
    let mut lines = Vec::<String>::new();
    lines.push(format!(
        "Execution plan: steps={} total_estimated_duration={}s",
        plan.steps.len(),
        plan.total_estimated_duration
    ));
    for step in &plan.steps {
        let after = step.condition.as_deref().unwrap_or("-");
        lines.push(format!(
            "- {}. {} ~{}s after={} {}",
            step.step, step.operation, step.estimated_duration, after, step.description
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;
