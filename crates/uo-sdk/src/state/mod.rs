mod node_form;
mod summary;
mod unit_operation;

pub use node_form::NodeFormState;
pub use summary::markdown_summary;
pub use unit_operation::{
    ChangeKind, ChangeLogEntry, StateError, UnitOperationAction, UnitOperationState,
    UnitOperationTemplate,
};
