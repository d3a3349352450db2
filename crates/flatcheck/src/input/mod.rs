//! Flat-file input: parsing and the parsed-file representation.

mod parser;
mod source;

pub use parser::FlatFileParser;
pub use source::{ParsedFile, SourceMetadata};
