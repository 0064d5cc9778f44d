use super::markdown_summary;
use crate::documents::{PrimitiveConfig, PrimitiveParameter, UnitOperationDocument};
use uo_core::{ValidationError, ValidationErrorKind};

fn document() -> UnitOperationDocument {
    let mut document = UnitOperationDocument::new("activation", "Catalyst Activation")
        .primitive(
            "CVA",
            PrimitiveConfig::new("Cyclic Voltammetry")
                .enabled(true)
                .parameter("scan_rate", PrimitiveParameter::new(100).unit("mV/s"))
                .parameter("cycles", PrimitiveParameter::new(20)),
        )
        .primitive(
            "EIS",
            PrimitiveConfig::new("Impedance").parameter("points", PrimitiveParameter::new(10)),
        );
    document.created = Some("2025-04-01".to_string());
    document
}

#[test]
fn lists_enabled_primitives_with_values() {
    let summary = markdown_summary(&document(), &[]);
    assert_eq!(
        summary,
        "### Catalyst Activation - Configuration Summary\n\
         - Version: 1.0\n\
         - Created: 2025-04-01\n\
         - Primitives Enabled:\n  \
         - CVA ✅\n    \
         - scan_rate: 100 mV/s\n    \
         - cycles: 20\n\
         - Validation: ✅ All parameters valid"
    );
}

#[test]
fn flags_errors() {
    let errors = [ValidationError::new(ValidationErrorKind::UoValidation, "boom")];
    let summary = markdown_summary(&document(), &errors);
    assert!(summary.ends_with("- Validation: ❌ Has errors"));
    assert!(!summary.contains("EIS"));
}
