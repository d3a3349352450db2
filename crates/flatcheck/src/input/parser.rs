//! Delimited flat-file parser driven by a file structure.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{FlatCheckError, Result};
use crate::schema::FileStructure;
use super::source::{ParsedFile, SourceMetadata};

/// Parses delimited sources using a structure's separator and quote
/// conventions.
///
/// The parser only splits: field counts and content are not validated
/// here. Malformed rows pass through verbatim for rules to flag.
#[derive(Debug, Default)]
pub struct FlatFileParser;

impl FlatFileParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file from disk, returning the parsed rows and source
    /// metadata (size, content hash, row count).
    pub fn parse_path<'a>(
        &self,
        path: impl AsRef<Path>,
        structure: &'a FileStructure,
    ) -> Result<(ParsedFile<'a>, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| FlatCheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| FlatCheckError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let parsed = self.parse_reader(contents.as_slice(), structure, display_name)?;

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            parsed.row_count(),
        );

        Ok((parsed, metadata))
    }

    /// Parse any readable source against a structure.
    ///
    /// Quoting follows standard delimited-text rules: a field enclosed
    /// in the quote character may contain the separator literally, and
    /// an embedded quote is escaped by doubling. Flat files carry one
    /// row per line, so each source line becomes exactly one row: a
    /// blank line becomes an empty row rather than being dropped, and
    /// the 1-based row index of every finding stays aligned with the
    /// source line number. The structure's configured header rows are
    /// skipped.
    pub fn parse_reader<'a>(
        &self,
        mut source: impl Read,
        structure: &'a FileStructure,
        display_name: impl Into<String>,
    ) -> Result<ParsedFile<'a>> {
        let display_name = display_name.into();

        let mut text = String::new();
        source.read_to_string(&mut text).map_err(|e| FlatCheckError::Io {
            path: PathBuf::from(&display_name),
            source: e,
        })?;

        let mut rows = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if idx < structure.header_rows {
                continue;
            }
            rows.push(self.split_line(line, structure)?);
        }

        Ok(ParsedFile::new(structure, display_name, rows))
    }

    /// Split one source line into its fields.
    fn split_line(&self, line: &str, structure: &FileStructure) -> Result<Vec<String>> {
        if line.is_empty() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(structure.separator)
            .quote(structure.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());

        let record = reader.records().next().transpose()?.unwrap_or_default();
        Ok(record.iter().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semicolon_structure() -> FileStructure {
        FileStructure::new("TEST", "^TEST", b';', b'"').unwrap()
    }

    #[test]
    fn test_parse_preserves_row_order() {
        let structure = semicolon_structure();
        let data = "E;1;a\nL;2;b\nL;3;c\n";
        let parsed = FlatFileParser::new()
            .parse_reader(data.as_bytes(), &structure, "test.csv")
            .unwrap();

        assert_eq!(parsed.row_count(), 3);
        assert_eq!(parsed.rows[0], vec!["E", "1", "a"]);
        assert_eq!(parsed.rows[2], vec!["L", "3", "c"]);
    }

    #[test]
    fn test_quoted_field_keeps_embedded_separator() {
        let structure = semicolon_structure();
        let data = "E;\"a;b\";c\n";
        let parsed = FlatFileParser::new()
            .parse_reader(data.as_bytes(), &structure, "test.csv")
            .unwrap();

        assert_eq!(parsed.rows[0], vec!["E", "a;b", "c"]);
    }

    #[test]
    fn test_doubled_quote_unescapes() {
        let structure = semicolon_structure();
        let data = "E;\"say \"\"hi\"\"\";c\n";
        let parsed = FlatFileParser::new()
            .parse_reader(data.as_bytes(), &structure, "test.csv")
            .unwrap();

        assert_eq!(parsed.rows[0][1], "say \"hi\"");
    }

    #[test]
    fn test_malformed_row_passes_through() {
        // Wrong field counts are a rule concern, not a parse error.
        let structure = semicolon_structure();
        let data = "E;1;a;extra;fields\nL;2\n";
        let parsed = FlatFileParser::new()
            .parse_reader(data.as_bytes(), &structure, "test.csv")
            .unwrap();

        assert_eq!(parsed.rows[0].len(), 5);
        assert_eq!(parsed.rows[1].len(), 2);
    }

    #[test]
    fn test_blank_line_becomes_empty_row() {
        // A blank line is a row like any other; dropping it would
        // shift every later row index away from its source line.
        let structure = semicolon_structure();
        let data = "E;k1;v\n\nE;k2;w\n";
        let parsed = FlatFileParser::new()
            .parse_reader(data.as_bytes(), &structure, "test.csv")
            .unwrap();

        assert_eq!(parsed.row_count(), 3);
        assert!(parsed.rows[1].is_empty());
        assert_eq!(parsed.rows[2], vec!["E", "k2", "w"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let structure = semicolon_structure();
        let data = "E;k1;v\r\n\r\nE;k2;w\r\n";
        let parsed = FlatFileParser::new()
            .parse_reader(data.as_bytes(), &structure, "test.csv")
            .unwrap();

        assert_eq!(parsed.row_count(), 3);
        assert_eq!(parsed.rows[0], vec!["E", "k1", "v"]);
        assert!(parsed.rows[1].is_empty());
    }

    #[test]
    fn test_header_rows_skipped() {
        let structure = semicolon_structure().with_header_rows(1);
        let data = "TYPE;ID;VALUE\nE;1;a\nL;2;b\n";
        let parsed = FlatFileParser::new()
            .parse_reader(data.as_bytes(), &structure, "test.csv")
            .unwrap();

        assert_eq!(parsed.row_count(), 2);
        assert_eq!(parsed.rows[0][0], "E");
    }

    #[test]
    fn test_field_accessor_is_1_based_and_total() {
        let structure = semicolon_structure();
        let data = "E;1\n";
        let parsed = FlatFileParser::new()
            .parse_reader(data.as_bytes(), &structure, "test.csv")
            .unwrap();

        assert_eq!(parsed.field(0, 1), "E");
        assert_eq!(parsed.field(0, 2), "1");
        assert_eq!(parsed.field(0, 3), "");
        assert_eq!(parsed.field(9, 1), "");
    }
}
