//! Explicit rule registry with ordered providers.
//!
//! Rule names resolve against a configured, ordered list of providers;
//! the first provider defining a name wins. Providers register their
//! checks once at startup, so resolution is a plain map lookup with no
//! runtime reflection.

use indexmap::IndexMap;

use crate::error::{FlatCheckError, Result};
use crate::input::ParsedFile;
use super::result::TestCaseResult;

/// An executable check: inspects a parsed file and returns findings.
///
/// Rules never error for ordinary validation findings — findings are
/// data in the returned [`TestCaseResult`].
pub type RuleFn = Box<dyn Fn(&ParsedFile) -> TestCaseResult + Send + Sync>;

/// A named source of rules.
#[derive(Default)]
pub struct RuleProvider {
    name: String,
    rules: IndexMap<String, RuleFn>,
}

impl RuleProvider {
    /// Create an empty provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: IndexMap::new(),
        }
    }

    /// Provider name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a rule under a name. A later registration of the same
    /// name within one provider replaces the earlier one.
    pub fn register(
        mut self,
        name: impl Into<String>,
        rule: impl Fn(&ParsedFile) -> TestCaseResult + Send + Sync + 'static,
    ) -> Self {
        self.rules.insert(name.into(), Box::new(rule));
        self
    }

    /// Look up a rule by exact name.
    pub fn get(&self, name: &str) -> Option<&RuleFn> {
        self.rules.get(name)
    }

    /// Names of the registered rules, in registration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for RuleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleProvider")
            .field("name", &self.name)
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// An ordered list of rule providers.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    providers: Vec<RuleProvider>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider. Providers are scanned in insertion order.
    pub fn with_provider(mut self, provider: RuleProvider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Resolve a rule name, first provider wins.
    ///
    /// Exhausting every provider without a match fails with
    /// [`RuleNotFound`](FlatCheckError::RuleNotFound); a requested
    /// check is never silently skipped.
    pub fn resolve(&self, name: &str) -> Result<&RuleFn> {
        self.providers
            .iter()
            .find_map(|p| p.get(name))
            .ok_or_else(|| FlatCheckError::RuleNotFound {
                rule: name.to_string(),
            })
    }
}
