use crate::documents::UnitOperationDocument;
use uo_core::ValidationError;

/// Markdown overview of the enabled primitives and their current values.
pub fn markdown_summary(document: &UnitOperationDocument, errors: &[ValidationError]) -> String {
    let mut lines = vec![
        format!("### {} - Configuration Summary", document.label),
        format!("- Version: {}", document.version),
        format!("- Created: {}", document.created.as_deref().unwrap_or("unknown")),
        "- Primitives Enabled:".to_string(),
    ];

    for (id, primitive) in document.primitives.iter().filter(|(_, primitive)| primitive.enabled) {
        lines.push(format!("  - {id} ✅"));
        for (parameter_id, parameter) in &primitive.parameters {
            match &parameter.unit {
                Some(unit) => lines.push(format!("    - {parameter_id}: {} {unit}", parameter.value)),
                None => lines.push(format!("    - {parameter_id}: {}", parameter.value)),
            }
        }
    }

    let validation = if errors.is_empty() {
        "✅ All parameters valid"
    } else {
        "❌ Has errors"
    };
    lines.push(format!("- Validation: {validation}"));
    lines.join("\n")
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
