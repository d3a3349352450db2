//! Main FlatCheck facade tying matching, parsing and rule execution
//! together.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FlatCheckError, Result};
use crate::input::{FlatFileParser, SourceMetadata};
use crate::rules::{RuleEngine, TestSuiteResult};
use crate::schema::StructureCatalog;

/// Result of checking one file against its matched structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Name of the structure the file matched.
    pub structure: String,
    /// Results of the structure's declared rules.
    pub suite: TestSuiteResult,
    /// Summary statistics.
    pub summary: CheckSummary,
}

/// Summary of a check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSummary {
    /// Number of rules run.
    pub cases: usize,
    /// Total failing steps across all rules.
    pub failures: usize,
    /// Whether every rule passed.
    pub passed: bool,
}

/// The main checking engine: a structure catalog plus a rule engine.
///
/// The catalog is read-only after construction; every check builds its
/// own parsed file and results, so independent checks are safe to run
/// from separate invocations.
pub struct FlatCheck {
    catalog: StructureCatalog,
    parser: FlatFileParser,
    engine: RuleEngine,
}

impl FlatCheck {
    /// Create a checker over a catalog, with the builtin rules.
    pub fn new(catalog: StructureCatalog) -> Self {
        Self::with_engine(catalog, RuleEngine::with_builtin_rules())
    }

    /// Create a checker with a custom rule engine.
    pub fn with_engine(catalog: StructureCatalog, engine: RuleEngine) -> Self {
        Self {
            catalog,
            parser: FlatFileParser::new(),
            engine,
        }
    }

    /// The catalog this checker matches against.
    pub fn catalog(&self) -> &StructureCatalog {
        &self.catalog
    }

    /// Check a file: match its name against the catalog, parse it, and
    /// run the rules its structure declares.
    ///
    /// At this level a filename that matches no structure is an error
    /// ([`NoStructure`](FlatCheckError::NoStructure)) — the check
    /// cannot proceed without one. Callers wanting to treat absence as
    /// a non-error should use
    /// [`StructureCatalog::match_filename`] directly.
    pub fn check(&self, path: impl AsRef<Path>) -> Result<CheckReport> {
        let path = path.as_ref();
        let filename = path.to_string_lossy().into_owned();

        let structure = self
            .catalog
            .match_filename(&filename)?
            .ok_or(FlatCheckError::NoStructure { filename })?;

        let (parsed, source) = self.parser.parse_path(path, structure)?;
        let suite = self.engine.run_defined(&parsed)?;

        let summary = CheckSummary {
            cases: suite.cases.len(),
            failures: suite.total_failures(),
            passed: suite.passed(),
        };

        Ok(CheckReport {
            source,
            structure: structure.name.clone(),
            suite,
            summary,
        })
    }
}
