// ava-core/src/domain/rules/engine.rs

use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::domain::rules::checkers::{
    ExtensionChecker, FilenameChecker, FilesizeChecker, MetadataChecker, PathChecker, RuleChecker,
};
use crate::domain::rules::{Rule, RuleCheckResult, RuleType, RuleViolation};
use crate::domain::workspace::FileNode;

/// Dispatches rules to their checker after scope filtering.
///
/// The registry starts with the five built-in checkers. `register_checker`
/// adds implementations for other rule types or replaces a built-in one.
pub struct RulesEngine {
    checkers: HashMap<RuleType, Box<dyn RuleChecker>>,
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesEngine {
    pub fn new() -> Self {
        let mut checkers: HashMap<RuleType, Box<dyn RuleChecker>> = HashMap::new();
        checkers.insert(RuleType::Filename, Box::new(FilenameChecker));
        checkers.insert(RuleType::Filesize, Box::new(FilesizeChecker));
        checkers.insert(RuleType::Extension, Box::new(ExtensionChecker));
        checkers.insert(RuleType::Metadata, Box::new(MetadataChecker));
        checkers.insert(RuleType::Path, Box::new(PathChecker));
        Self { checkers }
    }

    pub fn register_checker(&mut self, rule_type: RuleType, checker: Box<dyn RuleChecker>) {
        self.checkers.insert(rule_type, checker);
    }

    pub fn has_checker(&self, rule_type: RuleType) -> bool {
        self.checkers.contains_key(&rule_type)
    }

    /// Rule types of enabled rules that have no registered checker, in order
    /// of first appearance.
    pub fn missing_checkers(&self, rules: &[Rule]) -> Vec<RuleType> {
        let mut missing = Vec::new();
        for rule in rules.iter().filter(|r| r.enabled) {
            if !self.has_checker(rule.rule_type) && !missing.contains(&rule.rule_type) {
                missing.push(rule.rule_type);
            }
        }
        missing
    }

    fn warn_missing_checkers(&self, rules: &[Rule]) {
        for rule_type in self.missing_checkers(rules) {
            warn!(rule_type = %rule_type, "No checker found for rule type, skipping its rules");
        }
    }

    /// Checks one file against every enabled, in-scope rule, in rule order.
    /// Rules without a registered checker are skipped with a warning.
    pub fn check_file(&self, file: &FileNode, rules: &[Rule]) -> Vec<RuleViolation> {
        self.warn_missing_checkers(rules);
        self.check_one(file, rules)
    }

    fn check_one(&self, file: &FileNode, rules: &[Rule]) -> Vec<RuleViolation> {
        rules
            .iter()
            .filter(|rule| rule.enabled)
            .filter(|rule| rule.scope.includes(file))
            .filter_map(|rule| {
                let Some(checker) = self.checkers.get(&rule.rule_type) else {
                    debug!(rule_id = %rule.id, file = %file.path, "Rule skipped: no checker");
                    return None;
                };
                checker.check(file, rule)
            })
            .collect()
    }

    /// Checks every `File` node (folders are never checked directly).
    /// A missing checker is warned about once per rule type.
    pub fn check_files(&self, files: &[FileNode], rules: &[Rule]) -> RuleCheckResult {
        self.warn_missing_checkers(rules);
        let mut violations = Vec::new();
        let mut total_checked = 0;

        for file in files.iter().filter(|f| f.is_file()) {
            total_checked += 1;
            violations.extend(self.check_one(file, rules));
        }

        debug!(
            total_checked,
            total_violations = violations.len(),
            "Rule check finished"
        );
        RuleCheckResult::new(violations, total_checked)
    }

    /// Same result as [`RulesEngine::check_files`], with the outer file loop
    /// spread over the rayon pool. Violations keep input file order.
    pub fn check_files_parallel(&self, files: &[FileNode], rules: &[Rule]) -> RuleCheckResult {
        self.warn_missing_checkers(rules);
        let per_file: Vec<Vec<RuleViolation>> = files
            .par_iter()
            .filter(|f| f.is_file())
            .map(|file| self.check_one(file, rules))
            .collect();

        let total_checked = per_file.len();
        let violations: Vec<RuleViolation> = per_file.into_iter().flatten().collect();

        debug!(
            total_checked,
            total_violations = violations.len(),
            "Parallel rule check finished"
        );
        RuleCheckResult::new(violations, total_checked)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::rules::checkers::ContentChecker;
    use crate::domain::rules::test_support::rule_with;
    use crate::domain::rules::{RuleConfig, RuleScope, RuleSeverity};
    use std::collections::BTreeSet;

    fn kebab_rule() -> Rule {
        let mut rule = rule_with(
            RuleType::Filename,
            RuleConfig {
                pattern: Some(r"^[a-z0-9]+(-[a-z0-9]+)*\.tsx$".into()),
                ..RuleConfig::default()
            },
        );
        rule.id = "kebab".into();
        rule.severity = RuleSeverity::Warning;
        rule
    }

    fn no_exe_rule() -> Rule {
        let mut rule = rule_with(
            RuleType::Extension,
            RuleConfig {
                forbidden_extensions: vec!["exe".into()],
                ..RuleConfig::default()
            },
        );
        rule.id = "no-exe".into();
        rule
    }

    fn sample_tree() -> Vec<FileNode> {
        vec![
            FileNode::folder("d1", "/src"),
            FileNode::file("f1", "/src/MyComponent.tsx"),
            FileNode::file("f2", "/src/my-component.tsx"),
            FileNode::file("f3", "/bin/Tool.exe"),
        ]
    }

    #[test]
    fn test_check_file_end_to_end_filename() {
        let engine = RulesEngine::new();
        let rule = kebab_rule();
        let violations = engine.check_file(&FileNode::file("f1", "/MyComponent.tsx"), &[rule.clone()]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, rule.severity);
    }

    #[test]
    fn test_disabled_rules_are_ignored() {
        let engine = RulesEngine::new();
        let mut rule = kebab_rule();
        rule.enabled = false;
        assert!(engine
            .check_file(&FileNode::file("f1", "/MyComponent.tsx"), &[rule])
            .is_empty());
    }

    #[test]
    fn test_out_of_scope_rules_are_ignored() {
        let engine = RulesEngine::new();
        let mut rule = kebab_rule();
        rule.scope = RuleScope {
            exclude_paths: vec!["/legacy".into()],
            ..RuleScope::default()
        };
        assert!(engine
            .check_file(&FileNode::file("f1", "/legacy/MyComponent.tsx"), &[rule])
            .is_empty());
    }

    #[test]
    fn test_unknown_rule_type_is_skipped() {
        let engine = RulesEngine::new();
        let content = rule_with(
            RuleType::Content,
            RuleConfig {
                content_pattern: Some("x".into()),
                ..RuleConfig::default()
            },
        );
        let violations = engine.check_file(
            &FileNode::file("f1", "/MyComponent.tsx").with_content("y"),
            &[content, kebab_rule()],
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "kebab");
    }

    #[test]
    fn test_file_accumulates_violations_across_rules_in_order() {
        let engine = RulesEngine::new();
        let mut exe_name = kebab_rule();
        exe_name.config.pattern = Some(r"^[a-z]+\.[a-z]+$".into());
        let violations =
            engine.check_file(&FileNode::file("f3", "/bin/Tool.exe"), &[exe_name, no_exe_rule()]);
        let ids: Vec<&str> = violations.iter().map(|v| v.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["kebab", "no-exe"]);
    }

    #[test]
    fn test_check_files_skips_folders_and_counts() {
        let engine = RulesEngine::new();
        let result = engine.check_files(&sample_tree(), &[kebab_rule(), no_exe_rule()]);

        assert_eq!(result.total_checked, 3);
        assert!(!result.passed);
        // MyComponent.tsx (kebab), Tool.exe (kebab + no-exe)
        assert_eq!(result.total_violations, 3);
        assert!(result.violations.iter().all(|v| v.file_node_id != "d1"));
    }

    #[test]
    fn test_empty_rule_set_passes() {
        let result = RulesEngine::new().check_files(&sample_tree(), &[]);
        assert!(result.passed);
        assert_eq!(result.total_violations, 0);
    }

    #[test]
    fn test_checking_is_idempotent_apart_from_ids() {
        let engine = RulesEngine::new();
        let rules = [kebab_rule(), no_exe_rule()];
        let first = engine.check_files(&sample_tree(), &rules);
        let second = engine.check_files(&sample_tree(), &rules);

        let key = |r: &RuleCheckResult| -> BTreeSet<(String, String, String, RuleSeverity)> {
            r.violations
                .iter()
                .map(|v| (v.rule_id.clone(), v.file_node_id.clone(), v.message.clone(), v.severity))
                .collect()
        };
        assert_eq!(key(&first), key(&second));

        let first_ids: BTreeSet<&str> = first.violations.iter().map(|v| v.id.as_str()).collect();
        assert!(second.violations.iter().all(|v| !first_ids.contains(v.id.as_str())));
    }

    #[test]
    fn test_parallel_matches_sequential_order() {
        let engine = RulesEngine::new();
        let rules = [kebab_rule(), no_exe_rule()];
        let files: Vec<FileNode> = (0..200)
            .map(|i| FileNode::file(format!("f{i}"), format!("/src/File{i}.exe")))
            .collect();

        let seq = engine.check_files(&files, &rules);
        let par = engine.check_files_parallel(&files, &rules);

        let order = |r: &RuleCheckResult| -> Vec<(String, String)> {
            r.violations
                .iter()
                .map(|v| (v.file_node_id.clone(), v.rule_id.clone()))
                .collect()
        };
        assert_eq!(seq.total_checked, par.total_checked);
        assert_eq!(order(&seq), order(&par));
    }

    #[test]
    fn test_registered_checkers_extend_the_engine() {
        let mut engine = RulesEngine::new();
        assert!(!engine.has_checker(RuleType::Content));
        engine.register_checker(RuleType::Content, Box::new(ContentChecker));

        let always = |file: &FileNode, rule: &Rule| {
            Some(RuleViolation::new(rule, file, "custom", None))
        };
        engine.register_checker(RuleType::Custom, Box::new(always));

        let custom = rule_with(RuleType::Custom, RuleConfig::default());
        let violations = engine.check_file(&FileNode::file("f", "/a"), &[custom]);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.starts_with("custom"));
    }

    #[test]
    fn test_missing_checkers_are_reported_once_per_type() {
        let engine = RulesEngine::new();
        let content = |id: &str| {
            let mut rule = rule_with(RuleType::Content, RuleConfig::default());
            rule.id = id.into();
            rule
        };
        let mut disabled = rule_with(RuleType::Custom, RuleConfig::default());
        disabled.enabled = false;
        let rules = [content("c1"), kebab_rule(), content("c2"), disabled];

        assert_eq!(engine.missing_checkers(&rules), vec![RuleType::Content]);
        let result = engine.check_files(&sample_tree(), &rules);
        assert!(result.violations.iter().all(|v| v.rule_id == "kebab"));
    }
}

