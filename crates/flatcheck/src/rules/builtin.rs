//! Builtin rules shipped with the library.

use crate::input::ParsedFile;

use super::registry::RuleProvider;
use super::result::{TestCaseResult, TestCaseStepResult};

/// Failure tag for an empty required field.
pub const REQUIRED_FIELD: &str = "REQUIRED_FIELD";
/// Failure tag for a row whose discriminator matches no row structure.
pub const UNKNOWN_ROW_TYPE: &str = "UNKNOWN_ROW_TYPE";

// Article lines ("L") sourced from N21 carry marker "C" in column 2
// and may leave the article field in column 4 empty. This is a single
// documented business carve-out, kept as an explicit special case.
const CARVEOUT_ROW_TYPE: &str = "L";
const CARVEOUT_MARKER_POSITION: usize = 2;
const CARVEOUT_MARKER_VALUE: &str = "C";
const CARVEOUT_EXEMPT_POSITION: usize = 4;

/// The provider holding the builtin rules.
pub fn builtin_provider() -> RuleProvider {
    RuleProvider::new("builtin").register("required_fields", required_fields)
}

/// Flag empty fields at required positions.
///
/// For each row, every position up to the row type's declared length
/// must be non-empty unless it is listed in the row type's optional
/// fields or the N21 carve-out applies. Rows with an unknown
/// discriminator yield one failing step; that is a data finding, not
/// an execution failure, so the rule keeps going.
pub fn required_fields(parsed: &ParsedFile) -> TestCaseResult {
    let mut result = TestCaseResult::new("required_fields");
    let structure = parsed.structure;

    for idx in 0..parsed.row_count() {
        let row_type = parsed.field(idx, structure.type_position);
        let Some(row_structure) = structure.row_structure(row_type) else {
            result.push(TestCaseStepResult::failure(
                idx + 1,
                UNKNOWN_ROW_TYPE,
                format!("No row structure for type '{row_type}'"),
                parsed.display_name.clone(),
            ));
            continue;
        };

        for position in 1..=row_structure.length {
            if row_structure.is_optional(position) {
                continue;
            }
            if row_type == CARVEOUT_ROW_TYPE
                && position == CARVEOUT_EXEMPT_POSITION
                && parsed.field(idx, CARVEOUT_MARKER_POSITION) == CARVEOUT_MARKER_VALUE
            {
                continue;
            }
            if parsed.field(idx, position).is_empty() {
                result.push(TestCaseStepResult::failure(
                    idx + 1,
                    REQUIRED_FIELD,
                    format!("Missing required field at position {position}"),
                    parsed.display_name.clone(),
                ));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FileStructure, RowStructure};

    fn structure() -> FileStructure {
        FileStructure::new("IMP_REC", "^IMP_REC", b';', b'"')
            .unwrap()
            .with_row(RowStructure::new("E", 3, 4).with_optional_fields(vec![4]))
            .with_row(RowStructure::new("L", 3, 5))
    }

    fn parsed<'a>(s: &'a FileStructure, rows: Vec<Vec<&str>>) -> ParsedFile<'a> {
        ParsedFile::new(
            s,
            "IMP_REC_1.csv",
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        )
    }

    #[test]
    fn test_full_row_emits_no_findings() {
        let s = structure();
        let file = parsed(&s, vec![vec!["E", "a", "k", "b"]]);
        let result = required_fields(&file);
        assert!(result.passed());
        assert!(result.steps.is_empty());
    }

    #[test]
    fn test_empty_required_field_is_flagged_once() {
        let s = structure();
        let file = parsed(&s, vec![vec!["E", "", "k", "b"]]);
        let result = required_fields(&file);

        assert_eq!(result.steps.len(), 1);
        let step = &result.steps[0];
        assert_eq!(step.row, 1);
        assert_eq!(step.kind, REQUIRED_FIELD);
        assert_eq!(step.message, "Missing required field at position 2");
        assert_eq!(step.file, "IMP_REC_1.csv");
    }

    #[test]
    fn test_optional_position_is_exempt() {
        let s = structure();
        // Position 4 is optional for E rows.
        let file = parsed(&s, vec![vec!["E", "a", "k", ""]]);
        assert!(required_fields(&file).passed());
    }

    #[test]
    fn test_short_row_flags_missing_tail_fields() {
        let s = structure();
        // E row declared length 4; only 2 fields present, position 4 optional.
        let file = parsed(&s, vec![vec!["E", "a"]]);
        let result = required_fields(&file);
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.steps[0].message, "Missing required field at position 3");
    }

    #[test]
    fn test_n21_carveout_exempts_article_field() {
        let s = structure();
        // L row with marker "C": column 4 may be empty.
        let file = parsed(&s, vec![vec!["L", "C", "k", "", "v"]]);
        assert!(required_fields(&file).passed());

        // Same row without the marker: column 4 is required again.
        let file = parsed(&s, vec![vec!["L", "X", "k", "", "v"]]);
        let result = required_fields(&file);
        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.steps[0].message, "Missing required field at position 4");
    }

    #[test]
    fn test_carveout_is_scoped_to_l_rows() {
        let s = FileStructure::new("S", "^S", b';', b'"')
            .unwrap()
            .with_row(RowStructure::new("E", 3, 4));
        // An E row with marker "C" gets no exemption.
        let file = parsed(&s, vec![vec!["E", "C", "k", ""]]);
        let result = required_fields(&file);
        assert_eq!(result.steps.len(), 1);
    }

    #[test]
    fn test_unknown_row_type_is_a_finding_not_an_error() {
        let s = structure();
        let file = parsed(&s, vec![vec!["Z", "a", "k", "b"], vec!["E", "a", "k", "b"]]);
        let result = required_fields(&file);

        assert_eq!(result.steps.len(), 1);
        assert_eq!(result.steps[0].kind, UNKNOWN_ROW_TYPE);
        assert_eq!(result.steps[0].row, 1);
    }

    #[test]
    fn test_multiple_findings_keep_row_order() {
        let s = structure();
        let file = parsed(&s, vec![
            vec!["E", "", "k", ""],
            vec!["L", "X", "", "a", "v"],
        ]);
        let result = required_fields(&file);

        let rows: Vec<usize> = result.steps.iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![1, 2]);
        assert_eq!(result.failure_count(), 2);
    }
}
