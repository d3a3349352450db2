//! Structure catalog: loading, validation and filename matching.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{FlatCheckError, Result};
use super::structure::{FileStructure, RowStructure};

/// Raw catalog definition as it appears in the JSON file.
#[derive(Debug, Deserialize)]
struct CatalogDef {
    structures: IndexMap<String, StructureDef>,
}

#[derive(Debug, Deserialize)]
struct StructureDef {
    file_pattern: String,
    separator: String,
    #[serde(default = "default_quote")]
    quote: String,
    type_position: usize,
    #[serde(default)]
    header_rows: usize,
    rows: Vec<RowDef>,
    #[serde(default)]
    rules: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RowDef {
    row_type: String,
    key_position: usize,
    length: usize,
    #[serde(default)]
    optional_fields: Vec<usize>,
}

fn default_quote() -> String {
    "\"".to_string()
}

/// A read-only collection of named file structures.
///
/// Loaded once at startup and never mutated afterwards. Iteration
/// order follows the definition file.
#[derive(Debug, Clone)]
pub struct StructureCatalog {
    structures: IndexMap<String, FileStructure>,
}

impl StructureCatalog {
    /// Build a catalog from already-constructed structures.
    ///
    /// Duplicate names keep the last entry, matching map semantics of
    /// the JSON definition format.
    pub fn from_structures(structures: Vec<FileStructure>) -> Self {
        Self {
            structures: structures.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    /// Load and validate a catalog from a JSON definition file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| FlatCheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| FlatCheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let def: CatalogDef = serde_json::from_str(json)?;

        let mut structures = IndexMap::with_capacity(def.structures.len());
        for (name, struct_def) in def.structures {
            let structure = build_structure(&name, struct_def)?;
            structures.insert(name, structure);
        }

        Ok(Self { structures })
    }

    /// Number of structures in the catalog.
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    /// Whether the catalog holds no structures.
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Get a structure by name.
    pub fn get(&self, name: &str) -> Option<&FileStructure> {
        self.structures.get(name)
    }

    /// Iterate over structures in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &FileStructure> {
        self.structures.values()
    }

    /// Select the single structure whose pattern matches a filename.
    ///
    /// The path portion is stripped and the base name is tested
    /// against every structure's pattern, anchored at the start.
    ///
    /// Returns `Ok(None)` when nothing matches; absence is for the
    /// caller to handle. Two or more matches mean overlapping catalog
    /// patterns and fail with
    /// [`AmbiguousStructure`](FlatCheckError::AmbiguousStructure).
    pub fn match_filename(&self, filename: &str) -> Result<Option<&FileStructure>> {
        let basename = Path::new(filename)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.to_string());

        let matches: Vec<&FileStructure> = self
            .structures
            .values()
            .filter(|s| s.matches_basename(&basename))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0])),
            _ => Err(FlatCheckError::AmbiguousStructure {
                filename: basename,
                matches: matches.iter().map(|s| s.name.clone()).collect(),
            }),
        }
    }
}

/// Validate one raw definition and compile it into a `FileStructure`.
fn build_structure(name: &str, def: StructureDef) -> Result<FileStructure> {
    let separator = single_byte(name, "separator", &def.separator)?;
    let quote = single_byte(name, "quote", &def.quote)?;

    if def.type_position == 0 {
        return Err(catalog_error(name, "type_position is 1-based and must be >= 1"));
    }

    let mut structure = FileStructure::new(name, def.file_pattern, separator, quote)?
        .with_type_position(def.type_position)
        .with_header_rows(def.header_rows)
        .with_rules(def.rules);

    for row_def in def.rows {
        if row_def.key_position == 0 {
            return Err(catalog_error(
                name,
                &format!("key_position for row type '{}' must be >= 1", row_def.row_type),
            ));
        }
        if structure.row_structure(&row_def.row_type).is_some() {
            return Err(catalog_error(
                name,
                &format!("duplicate row type discriminator '{}'", row_def.row_type),
            ));
        }
        structure = structure.with_row(
            RowStructure::new(row_def.row_type, row_def.key_position, row_def.length)
                .with_optional_fields(row_def.optional_fields),
        );
    }

    Ok(structure)
}

fn single_byte(structure: &str, field: &str, value: &str) -> Result<u8> {
    let bytes = value.as_bytes();
    if bytes.len() != 1 {
        return Err(catalog_error(
            structure,
            &format!("{field} must be a single ASCII character, got '{value}'"),
        ));
    }
    Ok(bytes[0])
}

fn catalog_error(structure: &str, message: &str) -> FlatCheckError {
    FlatCheckError::Catalog {
        structure: structure.to_string(),
        message: message.to_string(),
    }
}
