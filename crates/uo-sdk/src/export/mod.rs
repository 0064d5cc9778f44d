mod import;
mod node;
mod units;

pub use import::{import_parameters, import_parameters_str, ImportError, ImportFormat, ImportedParameters};
pub use node::{
    export_node, ConditionBlock, ExportError, ExportMetadata, ExportMode, ExportOptions,
    ExportedParameter, FullParameter, GroupIndex, NodeExport, ParameterRules, EXPORT_VERSION,
};
pub use units::standardize_unit;
