mod parameter;
mod primitive;

pub use parameter::{
    active_parameters, effective_parameters, resolve_dependency, validate_parameter,
    validate_parameter_groups,
};
pub use primitive::{
    apply_dependency_rules, build_condition_context, validate_cross_primitive_dependencies,
    validate_node_data, validate_primitive, validate_unit_operation_rules, AppliedRule,
};
