// ava-core/src/domain/rules/mod.rs

pub mod checkers;
pub mod engine;
pub mod rule;
pub mod scope;
pub mod templates;
pub mod validator;
pub mod violation;

// Re-exports
pub use checkers::RuleChecker;
pub use engine::RulesEngine;
pub use rule::{
    FieldType, FieldValidation, FieldValidator, MatchMode, Rule, RuleConfig, RuleDraft, RuleScope,
    RuleSeverity, RuleType,
};
pub use templates::{RuleTemplate, builtin_templates, find_template};
pub use validator::{RuleValidation, RuleValidator};
pub use violation::{RuleCheckResult, RuleViolation, ViolationContext};
