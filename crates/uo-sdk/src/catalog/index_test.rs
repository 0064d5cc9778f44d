use super::{CatalogError, NodeCatalog};
use crate::catalog::NodeDefinition;

fn custom(node_type: &str) -> NodeDefinition {
    let mut definition = NodeDefinition::new(node_type, "Custom", "custom", "User defined");
    definition.custom = true;
    definition
}

#[test]
fn builtin_catalog_lists_nodes_in_palette_order() {
    let catalog = NodeCatalog::builtin();
    assert_eq!(catalog.len(), 7);
    let first = catalog.list().next().map(|node| node.node_type.as_str());
    assert_eq!(first, Some("sdl1SolutionPreparation"));
    assert_eq!(
        catalog.categories(),
        vec![
            "solution-prep",
            "electrode",
            "measurement",
            "cleaning",
            "data",
            "control",
            "optimization"
        ]
    );
}

#[test]
fn rejects_duplicate_node_types() {
    let mut catalog = NodeCatalog::builtin();
    let result = catalog.register(custom("sdl1WashCleaning"));
    assert_eq!(
        result,
        Err(CatalogError::DuplicateNodeType("sdl1WashCleaning".to_string()))
    );
}

#[test]
fn custom_nodes_join_and_leave_the_catalog() {
    let mut catalog = NodeCatalog::builtin()
        .with_custom([custom("custom_heater")]);
    assert_eq!(catalog.by_category("custom").count(), 1);
    assert!(catalog.require("custom_heater").is_ok());

    let removed = catalog.remove("custom_heater").expect("remove");
    assert_eq!(removed.node_type, "custom_heater");
    assert!(catalog.get("custom_heater").is_none());
}

#[test]
fn builtin_nodes_cannot_be_removed() {
    let mut catalog = NodeCatalog::builtin();
    assert_eq!(
        catalog.remove("sdl1DataExport").map(|node| node.node_type),
        Err(CatalogError::BuiltinNodeType("sdl1DataExport".to_string()))
    );
    assert_eq!(
        catalog.remove("missing").map(|node| node.node_type),
        Err(CatalogError::UnknownNodeType("missing".to_string()))
    );
}

#[test]
fn colliding_custom_nodes_are_skipped() {
    let catalog = NodeCatalog::builtin().with_custom([
        custom("sdl1SolutionPreparation"),
        custom("custom_heater"),
        custom("custom_heater"),
    ]);
    assert_eq!(catalog.len(), 8);
    let preparation = catalog.require("sdl1SolutionPreparation").expect("builtin kept");
    assert!(!preparation.custom);
    assert!(catalog.require("custom_heater").expect("custom kept").custom);
}

#[test]
fn recognizes_builtin_node_types() {
    assert!(NodeCatalog::is_builtin("sdl1BloxOptimization"));
    assert!(!NodeCatalog::is_builtin("custom_heater"));
}
