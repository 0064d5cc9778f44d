mod schema;
mod store;

pub use schema::{CustomParameter, CustomParameterKind, CustomUoSchema, CustomValidation, CUSTOM_CATEGORY};
pub use store::{
    CustomExportBundle, CustomImportReport, CustomStoreError, CustomUoStore, CUSTOM_BUNDLE_VERSION,
};
