//! Flat-file structure definitions and the structure catalog.

mod catalog;
mod structure;

pub use catalog::StructureCatalog;
pub use structure::{FileStructure, RowStructure};
