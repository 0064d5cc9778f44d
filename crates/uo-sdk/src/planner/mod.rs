mod condition;
mod execution_plan;
mod preview;

pub use condition::{evaluate_step_condition, ExecutionStep};
pub use execution_plan::{
    build_execution_plan, describe_operation, estimate_duration, ExecutionPlan, PlannedStep,
};
pub use preview::{
    preview_steps, render_plan_text, render_preview_text, ExecutionPreview, StepPreview,
};
