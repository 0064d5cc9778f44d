mod read_document;

pub use read_document::{read_document, read_value, write_output};
