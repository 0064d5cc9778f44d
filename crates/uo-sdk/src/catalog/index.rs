use super::builtin::builtin_nodes;
use super::definition::NodeDefinition;
use indexmap::IndexMap;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("node type `{0}` is already registered")]
    DuplicateNodeType(String),
    #[error("node type `{0}` is not registered")]
    UnknownNodeType(String),
    #[error("node type `{0}` is built in and cannot be removed")]
    BuiltinNodeType(String),
}

/// Node types by `node_type`, in registration order.
#[derive(Debug, Clone, Default)]
pub struct NodeCatalog {
    nodes: IndexMap<String, NodeDefinition>,
}

impl NodeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for node in builtin_nodes() {
            catalog.nodes.insert(node.node_type.clone(), node);
        }
        catalog
    }

    pub fn register(&mut self, definition: NodeDefinition) -> Result<(), CatalogError> {
        if self.nodes.contains_key(&definition.node_type) {
            return Err(CatalogError::DuplicateNodeType(definition.node_type));
        }
        tracing::debug!(node_type = %definition.node_type, custom = definition.custom, "registered node type");
        self.nodes.insert(definition.node_type.clone(), definition);
        Ok(())
    }

    /// Registers every definition. A node type that is already present is
    /// skipped so one bad store entry cannot hide the rest of the catalog.
    pub fn with_custom(mut self, definitions: impl IntoIterator<Item = NodeDefinition>) -> Self {
        for definition in definitions {
            if let Err(err) = self.register(definition) {
                tracing::warn!(error = %err, "skipping custom node type");
            }
        }
        self
    }

    pub fn is_builtin(node_type: &str) -> bool {
        builtin_nodes().iter().any(|node| node.node_type == node_type)
    }

    /// Only custom node types can be removed.
    pub fn remove(&mut self, node_type: &str) -> Result<NodeDefinition, CatalogError> {
        match self.nodes.get(node_type) {
            None => Err(CatalogError::UnknownNodeType(node_type.to_string())),
            Some(definition) if !definition.custom => {
                Err(CatalogError::BuiltinNodeType(node_type.to_string()))
            }
            Some(_) => self
                .nodes
                .shift_remove(node_type)
                .ok_or_else(|| CatalogError::UnknownNodeType(node_type.to_string())),
        }
    }

    pub fn get(&self, node_type: &str) -> Option<&NodeDefinition> {
        self.nodes.get(node_type)
    }

    pub fn require(&self, node_type: &str) -> Result<&NodeDefinition, CatalogError> {
        self.get(node_type)
            .ok_or_else(|| CatalogError::UnknownNodeType(node_type.to_string()))
    }

    pub fn list(&self) -> impl Iterator<Item = &NodeDefinition> {
        self.nodes.values()
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a NodeDefinition> {
        self.nodes
            .values()
            .filter(move |definition| definition.category == category)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for definition in self.nodes.values() {
            if !categories.contains(&definition.category.as_str()) {
                categories.push(definition.category.as_str());
            }
        }
        categories
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod tests;
