pub mod definition;
pub mod field_path;
pub mod fingerprint;
pub mod issues;
pub mod value;

pub use definition::{
    default_parameters, DependencyGuard, GuardError, ParameterDefinition, ParameterGroup,
    ParameterGroups, ParameterKind, SelectOption,
};
pub use field_path::{FieldPath, FieldPathSegment};
pub use fingerprint::{canonical_json_bytes, fingerprint_hex, FingerprintOptions};
pub use issues::{DocumentIssue, ValidationError, ValidationErrorKind};
pub use value::{ParameterMap, ParameterValue};
