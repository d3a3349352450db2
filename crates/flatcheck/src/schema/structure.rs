//! File and row structure definitions.

use regex::Regex;

use crate::error::{FlatCheckError, Result};

/// Describes one row type within a file structure.
///
/// All column positions are 1-based, matching how flat-file layouts
/// are documented in interface agreements.
#[derive(Debug, Clone)]
pub struct RowStructure {
    /// Discriminator value identifying rows of this type.
    pub row_type: String,
    /// 1-based column position holding the grouping key.
    pub key_position: usize,
    /// Total expected field count for rows of this type.
    pub length: usize,
    /// 1-based column positions exempt from required-field checks.
    pub optional_fields: Vec<usize>,
}

impl RowStructure {
    /// Create a row structure with no optional fields.
    pub fn new(row_type: impl Into<String>, key_position: usize, length: usize) -> Self {
        Self {
            row_type: row_type.into(),
            key_position,
            length,
            optional_fields: Vec::new(),
        }
    }

    /// Set the optional field positions.
    pub fn with_optional_fields(mut self, positions: Vec<usize>) -> Self {
        self.optional_fields = positions;
        self
    }

    /// Whether a 1-based position is exempt from required-field checks.
    pub fn is_optional(&self, position: usize) -> bool {
        self.optional_fields.contains(&position)
    }
}

/// The declarative description of one flat-file format.
///
/// Immutable once built; owned by the [`StructureCatalog`] and
/// referenced (not owned) by parsed files.
///
/// [`StructureCatalog`]: crate::schema::StructureCatalog
#[derive(Debug, Clone)]
pub struct FileStructure {
    /// Unique structure name.
    pub name: String,
    /// Raw filename pattern as declared in the catalog.
    pub file_pattern: String,
    /// Compiled pattern, matched anchored at the start of the base name.
    pattern: Regex,
    /// Field separator byte.
    pub separator: u8,
    /// Quote byte.
    pub quote: u8,
    /// Leading rows to skip when parsing (0 for headerless files).
    pub header_rows: usize,
    /// 1-based column position holding the row-type discriminator.
    pub type_position: usize,
    /// Row structures, one per discriminator value.
    pub row_structures: Vec<RowStructure>,
    /// Rule names to run by default for files of this structure.
    pub rules: Vec<String>,
}

impl FileStructure {
    /// Create a file structure. Fails if the pattern does not compile.
    pub fn new(
        name: impl Into<String>,
        file_pattern: impl Into<String>,
        separator: u8,
        quote: u8,
    ) -> Result<Self> {
        let name = name.into();
        let file_pattern = file_pattern.into();
        let pattern = Regex::new(&file_pattern).map_err(|e| FlatCheckError::Catalog {
            structure: name.clone(),
            message: format!("invalid file pattern '{file_pattern}': {e}"),
        })?;

        Ok(Self {
            name,
            file_pattern,
            pattern,
            separator,
            quote,
            header_rows: 0,
            type_position: 1,
            row_structures: Vec::new(),
            rules: Vec::new(),
        })
    }

    /// Set the 1-based discriminator column position.
    pub fn with_type_position(mut self, position: usize) -> Self {
        self.type_position = position;
        self
    }

    /// Set the number of leading header rows to skip.
    pub fn with_header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }

    /// Append a row structure.
    pub fn with_row(mut self, row: RowStructure) -> Self {
        self.row_structures.push(row);
        self
    }

    /// Set the default rule list.
    pub fn with_rules(mut self, rules: Vec<String>) -> Self {
        self.rules = rules;
        self
    }

    /// Test a base name against the pattern, anchored at the start.
    ///
    /// The pattern must match beginning at the first character but
    /// need not consume the whole name, so `^IMP_REC` and `IMP_REC`
    /// behave identically.
    pub fn matches_basename(&self, basename: &str) -> bool {
        self.pattern
            .find(basename)
            .is_some_and(|m| m.start() == 0)
    }

    /// Find the row structure for a discriminator value.
    pub fn row_structure(&self, row_type: &str) -> Option<&RowStructure> {
        self.row_structures.iter().find(|r| r.row_type == row_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_anchored_at_start() {
        let structure = FileStructure::new("IMP_REC", "IMP_REC", b';', b'"').unwrap();
        assert!(structure.matches_basename("IMP_REC_2018_07_06.csv"));
        assert!(!structure.matches_basename("OLD_IMP_REC_2018_07_06.csv"));
    }

    #[test]
    fn test_explicit_anchor_is_equivalent() {
        let anchored = FileStructure::new("A", "^IMP_REC", b';', b'"').unwrap();
        let bare = FileStructure::new("B", "IMP_REC", b';', b'"').unwrap();
        for name in ["IMP_REC_x.csv", "X_IMP_REC.csv"] {
            assert_eq!(anchored.matches_basename(name), bare.matches_basename(name));
        }
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = FileStructure::new("BAD", "([", b';', b'"').unwrap_err();
        assert!(matches!(
            err,
            crate::error::FlatCheckError::Catalog { ref structure, .. } if structure == "BAD"
        ));
    }

    #[test]
    fn test_row_structure_lookup() {
        let structure = FileStructure::new("S", "S_", b';', b'"')
            .unwrap()
            .with_row(RowStructure::new("E", 3, 10))
            .with_row(RowStructure::new("L", 3, 12).with_optional_fields(vec![5, 6]));

        assert_eq!(structure.row_structure("L").unwrap().length, 12);
        assert!(structure.row_structure("L").unwrap().is_optional(5));
        assert!(!structure.row_structure("L").unwrap().is_optional(4));
        assert!(structure.row_structure("Z").is_none());
    }
}
