//! Suite execution over a rule registry.

use crate::error::Result;
use crate::input::ParsedFile;

use super::builtin::builtin_provider;
use super::registry::{RuleFn, RuleRegistry};
use super::result::{TestCaseResult, TestSuiteResult};

/// Resolves rule names and executes them against parsed files.
pub struct RuleEngine {
    registry: RuleRegistry,
}

impl RuleEngine {
    /// Create an engine over an explicit registry.
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Create an engine with the builtin rules as its first provider.
    pub fn with_builtin_rules() -> Self {
        Self::new(RuleRegistry::new().with_provider(builtin_provider()))
    }

    /// Run one named rule against a parsed file.
    pub fn run_rule(&self, name: &str, parsed: &ParsedFile) -> Result<TestCaseResult> {
        let rule = self.registry.resolve(name)?;
        Ok(rule(parsed))
    }

    /// Run an ordered list of rule names and aggregate the results.
    ///
    /// All names are resolved before anything runs: a resolution
    /// failure aborts the whole suite and no partial result is
    /// returned. Case order matches the requested rule order.
    pub fn run_suite<S: AsRef<str>>(
        &self,
        names: &[S],
        parsed: &ParsedFile,
    ) -> Result<TestSuiteResult> {
        let resolved: Vec<&RuleFn> = names
            .iter()
            .map(|name| self.registry.resolve(name.as_ref()))
            .collect::<Result<_>>()?;

        let mut suite = TestSuiteResult::new();
        for rule in resolved {
            suite.cases.push(rule(parsed));
        }
        Ok(suite)
    }

    /// Run exactly the rules declared by the file's own structure.
    pub fn run_defined(&self, parsed: &ParsedFile) -> Result<TestSuiteResult> {
        self.run_suite(&parsed.structure.rules, parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlatCheckError;
    use crate::rules::{RuleProvider, TestCaseStepResult};
    use crate::schema::{FileStructure, RowStructure};

    fn structure_with_rules(rules: Vec<&str>) -> FileStructure {
        FileStructure::new("S", "^S", b';', b'"')
            .unwrap()
            .with_row(RowStructure::new("E", 2, 2))
            .with_rules(rules.into_iter().map(String::from).collect())
    }

    fn always_failing(parsed: &ParsedFile) -> TestCaseResult {
        let mut result = TestCaseResult::new("b");
        result.push(TestCaseStepResult::failure(
            1,
            "ALWAYS",
            "always fails",
            parsed.display_name.clone(),
        ));
        result
    }

    fn always_passing(_: &ParsedFile) -> TestCaseResult {
        TestCaseResult::new("a")
    }

    #[test]
    fn test_suite_order_matches_request_order() {
        let engine = RuleEngine::new(
            RuleRegistry::new().with_provider(
                RuleProvider::new("test")
                    .register("a", always_passing)
                    .register("b", always_failing),
            ),
        );
        let structure = structure_with_rules(vec![]);
        let parsed = ParsedFile::new(&structure, "S_1.csv", vec![vec!["E".into(), "k".into()]]);

        let suite = engine.run_suite(&["b", "a"], &parsed).unwrap();
        assert_eq!(suite.cases.len(), 2);
        assert_eq!(suite.cases[0].name, "b");
        assert_eq!(suite.cases[1].name, "a");
        assert!(!suite.passed());
        assert_eq!(suite.total_failures(), 1);
    }

    #[test]
    fn test_unresolvable_name_aborts_whole_suite() {
        let engine = RuleEngine::with_builtin_rules();
        let structure = structure_with_rules(vec![]);
        let parsed = ParsedFile::new(&structure, "S_1.csv", Vec::new());

        let err = engine
            .run_suite(&["required_fields", "nonexistent_rule"], &parsed)
            .unwrap_err();
        match err {
            FlatCheckError::RuleNotFound { rule } => assert_eq!(rule, "nonexistent_rule"),
            other => panic!("expected RuleNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_run_defined_uses_structure_rule_list() {
        let engine = RuleEngine::with_builtin_rules();
        let structure = structure_with_rules(vec!["required_fields"]);
        let parsed = ParsedFile::new(
            &structure,
            "S_1.csv",
            vec![vec!["E".into(), "k".into()]],
        );

        let suite = engine.run_defined(&parsed).unwrap();
        assert_eq!(suite.cases.len(), 1);
        assert_eq!(suite.cases[0].name, "required_fields");
        assert!(suite.passed());
    }

    #[test]
    fn test_validation_findings_do_not_abort_the_run() {
        let engine = RuleEngine::new(
            RuleRegistry::new().with_provider(
                RuleProvider::new("test")
                    .register("failing", always_failing)
                    .register("passing", always_passing),
            ),
        );
        let structure = structure_with_rules(vec![]);
        let parsed = ParsedFile::new(&structure, "S_1.csv", Vec::new());

        let suite = engine.run_suite(&["failing", "passing"], &parsed).unwrap();
        assert_eq!(suite.cases.len(), 2);
        assert!(!suite.cases[0].passed());
        assert!(suite.cases[1].passed());
    }
}
