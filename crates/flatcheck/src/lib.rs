//! flatcheck: schema-driven validation for fixed-structure delimited
//! flat files.
//!
//! A flat file is a delimited text file following a fixed per-line
//! structural convention: every row carries a type discriminator, and
//! row types share a grouping key that clusters related lines.
//! flatcheck matches a filename against a catalog of declared
//! structures, parses the file into an ordered row table, groups rows
//! by their schema-defined key, and runs named validation rules,
//! producing structured pass/fail results.
//!
//! # Core principles
//!
//! - **Declared, not inferred**: files are validated against a loaded
//!   structure catalog, never a guessed schema.
//! - **Findings are data**: validation failures are ordinary results;
//!   only structural and configuration problems are errors.
//! - **Nothing is dropped**: rows pass through the parser verbatim and
//!   in order, wrong field counts included, for rules to flag.
//!
//! # Example
//!
//! ```no_run
//! use flatcheck::{FlatCheck, StructureCatalog};
//!
//! let catalog = StructureCatalog::load("catalog.json").unwrap();
//! let checker = FlatCheck::new(catalog);
//! let report = checker.check("IMP_REC_2018_07_06.csv").unwrap();
//!
//! println!("rules run: {}", report.summary.cases);
//! println!("failures: {}", report.summary.failures);
//! ```

pub mod error;
pub mod grouping;
pub mod input;
pub mod rules;
pub mod schema;

mod flatcheck;

pub use crate::flatcheck::{CheckReport, CheckSummary, FlatCheck};
pub use error::{FlatCheckError, Result};
pub use grouping::RowGroups;
pub use input::{FlatFileParser, ParsedFile, SourceMetadata};
pub use rules::{RuleEngine, RuleProvider, RuleRegistry, TestCaseResult, TestCaseStepResult, TestSuiteResult};
pub use schema::{FileStructure, RowStructure, StructureCatalog};
