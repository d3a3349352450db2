//! Key-based grouping of heterogeneous row types.

use indexmap::IndexMap;

use crate::error::{FlatCheckError, Result};
use crate::input::ParsedFile;

/// Rows of a parsed file partitioned by their grouping key.
///
/// Keys appear in first-seen order; rows within a group keep their
/// source order. Rows are borrowed from the originating
/// [`ParsedFile`], which is never mutated.
#[derive(Debug, Clone)]
pub struct RowGroups<'p> {
    groups: IndexMap<String, Vec<&'p [String]>>,
}

impl<'p> RowGroups<'p> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no groups exist.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether a key has at least one row.
    pub fn contains_key(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    /// Rows for a key, or `None` if the key never occurred.
    pub fn get(&self, key: &str) -> Option<&[&'p [String]]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Rows for a key; an absent key yields an empty slice.
    pub fn rows_for_key(&self, key: &str) -> &[&'p [String]] {
        self.get(key).unwrap_or(&[])
    }

    /// Iterate over keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Iterate over (key, rows) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'p [String]])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Partition a parsed file's rows by their grouping key.
///
/// For each row the discriminator is read at the structure's type
/// position, the matching [`RowStructure`] selects the key position
/// for that row type, and the row joins the group for the key value
/// found there. A discriminator with no matching row structure is a
/// data-integrity failure: skipping the row would silently corrupt
/// downstream grouping, so the whole operation fails with
/// [`UnknownRowType`](FlatCheckError::UnknownRowType).
///
/// Pure: grouping the same file twice yields structurally equal
/// results.
///
/// [`RowStructure`]: crate::schema::RowStructure
pub fn group_rows<'p>(parsed: &'p ParsedFile<'_>) -> Result<RowGroups<'p>> {
    let structure = parsed.structure;
    let mut groups: IndexMap<String, Vec<&'p [String]>> = IndexMap::new();

    for (idx, row) in parsed.rows.iter().enumerate() {
        let row_type = parsed.field(idx, structure.type_position);
        let row_structure = structure.row_structure(row_type).ok_or_else(|| {
            FlatCheckError::UnknownRowType {
                row: idx + 1,
                row_type: row_type.to_string(),
                file: parsed.display_name.clone(),
            }
        })?;

        let key = parsed.field(idx, row_structure.key_position);
        groups.entry(key.to_string()).or_default().push(row.as_slice());
    }

    Ok(RowGroups { groups })
}
