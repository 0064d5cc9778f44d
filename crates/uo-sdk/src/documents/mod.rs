mod node;
mod unit_operation;

pub use node::{NodeDocument, NODE_DOCUMENT_SCHEMA};
pub use unit_operation::{
    ExecutionCondition, ParameterDependencyRule, PrimitiveConfig, PrimitiveParameter,
    Primitives, RuleEffect, UnitOperationDocument, UnitOperationRules, ValueSource,
    UNIT_OPERATION_DOCUMENT_SCHEMA,
};
