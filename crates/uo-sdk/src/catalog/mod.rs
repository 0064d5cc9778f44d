mod builtin;
mod definition;
mod index;

pub use builtin::builtin_nodes;
pub use definition::NodeDefinition;
pub use index::{CatalogError, NodeCatalog};
