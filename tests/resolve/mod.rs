//! Resolution engine tests.
//!
//! End-to-end coverage of the resolver over hand-built scope trees:
//! - Reference scenarios (shadowing, privacy, qualification, dynamism)
//! - Scope-stack construction and lexical walking
//! - Accessibility rules
//! - Ranking and outcome reduction
//! - Comparator laws (property-based)

pub mod tests_properties;
pub mod tests_scenarios;
pub mod tests_scope_stack;
