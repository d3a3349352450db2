//! Rule execution: named checks, providers, and result aggregation.

mod builtin;
mod engine;
mod registry;
mod result;

pub use builtin::{builtin_provider, required_fields, REQUIRED_FIELD, UNKNOWN_ROW_TYPE};
pub use engine::RuleEngine;
pub use registry::{RuleFn, RuleProvider, RuleRegistry};
pub use result::{TestCaseResult, TestCaseStepResult, TestSuiteResult};
