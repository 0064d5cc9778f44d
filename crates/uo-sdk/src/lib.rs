pub mod catalog;
pub mod custom;
pub mod documents;
pub mod export;
pub mod parse;
pub mod planner;
pub mod state;
pub mod validate;

pub use catalog::{builtin_nodes, CatalogError, NodeCatalog, NodeDefinition};
pub use custom::{
    CustomExportBundle, CustomImportReport, CustomParameter, CustomParameterKind,
    CustomStoreError, CustomUoSchema, CustomUoStore, CustomValidation,
};
pub use documents::{
    ExecutionCondition, NodeDocument, ParameterDependencyRule, PrimitiveConfig,
    PrimitiveParameter, Primitives, RuleEffect, UnitOperationDocument, UnitOperationRules,
    ValueSource, NODE_DOCUMENT_SCHEMA, UNIT_OPERATION_DOCUMENT_SCHEMA,
};
pub use export::{
    export_node, import_parameters, import_parameters_str, standardize_unit, ExportError,
    ExportMode, ExportOptions, ImportError, ImportFormat, ImportedParameters, NodeExport,
};
pub use parse::{parse_document, parse_document_with_format, DocumentFormat, UoDocument};
pub use planner::{
    build_execution_plan, evaluate_step_condition, preview_steps, render_plan_text,
    render_preview_text, ExecutionPlan, ExecutionPreview, ExecutionStep, PlannedStep, StepPreview,
};
pub use state::{
    markdown_summary, NodeFormState, StateError, UnitOperationAction, UnitOperationState,
    UnitOperationTemplate,
};
pub use validate::{
    apply_dependency_rules, validate_cross_primitive_dependencies, validate_node_data,
    validate_parameter, validate_parameter_groups, validate_unit_operation_rules, AppliedRule,
};
