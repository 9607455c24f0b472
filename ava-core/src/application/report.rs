// ava-core/src/application/report.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::domain::project::ComplianceMode;
use crate::domain::rules::{Rule, RuleCheckResult, RuleSeverity};

const TOP_N: usize = 5;
const EXAMPLES_PER_RULE: usize = 3;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleViolationCount {
    pub rule_id: String,
    pub rule_name: String,
    pub count: usize,
    pub severity: RuleSeverity,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileViolationCount {
    pub file_id: String,
    pub file_path: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub total_checks: usize,
    pub total_violations: usize,
    pub violations_by_type: BTreeMap<String, usize>,
    pub violations_by_severity: BTreeMap<String, usize>,
    /// Share of checked files without any violation, 0-100.
    pub compliance_score: f64,
    pub top_violating_rules: Vec<RuleViolationCount>,
    pub most_affected_files: Vec<FileViolationCount>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViolationExample {
    pub file_id: String,
    pub file_path: String,
    pub message: String,
    pub detected_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViolationsByRule {
    pub rule_id: String,
    pub rule_name: String,
    pub rule_type: String,
    pub severity: RuleSeverity,
    pub count: usize,
    pub examples: Vec<ViolationExample>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub mode: ComplianceMode,
    pub summary: ComplianceSummary,
    pub violations: Vec<ViolationsByRule>,
}

impl ComplianceReport {
    /// Aggregates a check result. `rules` resolves names and types; a
    /// violation whose rule is not in the slice is reported under its id.
    pub fn from_result(result: &RuleCheckResult, rules: &[Rule]) -> Self {
        Self::with_mode(result, rules, ComplianceMode::default())
    }

    pub fn with_mode(result: &RuleCheckResult, rules: &[Rule], mode: ComplianceMode) -> Self {
        let by_id: HashMap<&str, &Rule> = rules.iter().map(|r| (r.id.as_str(), r)).collect();

        let mut by_severity = BTreeMap::new();
        let mut by_type = BTreeMap::new();
        // Rule order of first appearance keeps the per-rule list stable.
        let mut per_rule: Vec<ViolationsByRule> = Vec::new();
        let mut per_file: Vec<FileViolationCount> = Vec::new();

        for v in &result.violations {
            *by_severity.entry(v.severity.as_str().to_string()).or_insert(0) += 1;

            let rule = by_id.get(v.rule_id.as_str());
            let rule_type = rule
                .map(|r| r.rule_type.as_str().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            *by_type.entry(rule_type.clone()).or_insert(0) += 1;

            let example = ViolationExample {
                file_id: v.file_node_id.clone(),
                file_path: v.context.file_path.clone(),
                message: v.message.clone(),
                detected_at: v.detected_at,
            };
            match per_rule.iter_mut().find(|r| r.rule_id == v.rule_id) {
                Some(entry) => {
                    entry.count += 1;
                    if entry.examples.len() < EXAMPLES_PER_RULE {
                        entry.examples.push(example);
                    }
                }
                None => per_rule.push(ViolationsByRule {
                    rule_id: v.rule_id.clone(),
                    rule_name: rule.map(|r| r.name.clone()).unwrap_or_else(|| v.rule_id.clone()),
                    rule_type,
                    severity: v.severity,
                    count: 1,
                    examples: vec![example],
                }),
            }

            match per_file.iter_mut().find(|f| f.file_id == v.file_node_id) {
                Some(entry) => entry.count += 1,
                None => per_file.push(FileViolationCount {
                    file_id: v.file_node_id.clone(),
                    file_path: v.context.file_path.clone(),
                    count: 1,
                }),
            }
        }

        let mut top_rules: Vec<RuleViolationCount> = per_rule
            .iter()
            .map(|r| RuleViolationCount {
                rule_id: r.rule_id.clone(),
                rule_name: r.rule_name.clone(),
                count: r.count,
                severity: r.severity,
            })
            .collect();
        // Stable sort: ties keep first-appearance order.
        top_rules.sort_by(|a, b| b.count.cmp(&a.count));
        top_rules.truncate(TOP_N);

        // One entry per distinct file.
        let affected = per_file.len();
        per_file.sort_by(|a, b| b.count.cmp(&a.count));
        per_file.truncate(TOP_N);

        Self {
            id: format!("report_{}", uuid::Uuid::new_v4().simple()),
            generated_at: Utc::now(),
            mode,
            summary: ComplianceSummary {
                total_checks: result.total_checked,
                total_violations: result.total_violations,
                violations_by_type: by_type,
                violations_by_severity: by_severity,
                compliance_score: compliance_score(result.total_checked, affected),
                top_violating_rules: top_rules,
                most_affected_files: per_file,
            },
            violations: per_rule,
        }
    }
}

fn compliance_score(checked: usize, affected: usize) -> f64 {
    if checked == 0 {
        return 100.0;
    }
    let clean = checked.saturating_sub(affected) as f64;
    (clean / checked as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::rules::test_support::rule_with;
    use crate::domain::rules::{RuleConfig, RuleType, RulesEngine};
    use crate::domain::workspace::FileNode;

    fn fixture() -> (Vec<Rule>, Vec<FileNode>) {
        let mut kebab = rule_with(
            RuleType::Filename,
            RuleConfig {
                pattern: Some(r"^[a-z0-9-]+\.[a-z]+$".into()),
                ..RuleConfig::default()
            },
        );
        kebab.id = "kebab".into();
        let mut no_exe = rule_with(
            RuleType::Extension,
            RuleConfig {
                forbidden_extensions: vec!["exe".into()],
                ..RuleConfig::default()
            },
        );
        no_exe.id = "no-exe".into();
        no_exe.severity = RuleSeverity::Warning;

        let files = vec![
            FileNode::file("1", "/src/Bad_Name.exe"),
            FileNode::file("2", "/src/Also_Bad.ts"),
            FileNode::file("3", "/src/good-name.ts"),
        ];
        (vec![kebab, no_exe], files)
    }

    #[test]
    fn test_score_rounding() {
        assert_eq!(compliance_score(0, 0), 100.0);
        assert_eq!(compliance_score(3, 1), 66.7);
        assert_eq!(compliance_score(4, 4), 0.0);
    }

    #[test]
    fn test_report_aggregates() {
        let (rules, files) = fixture();
        let result = RulesEngine::new().check_files(&files, &rules);
        let report = ComplianceReport::from_result(&result, &rules);
        let s = &report.summary;

        assert_eq!(s.total_checks, 3);
        assert_eq!(s.total_violations, 3);
        assert_eq!(s.violations_by_severity.get("error"), Some(&2));
        assert_eq!(s.violations_by_severity.get("warning"), Some(&1));
        assert_eq!(s.violations_by_type.get("filename"), Some(&2));
        assert_eq!(s.violations_by_type.get("extension"), Some(&1));

        assert_eq!(s.top_violating_rules[0].rule_id, "kebab");
        assert_eq!(s.top_violating_rules[0].count, 2);
        assert_eq!(s.most_affected_files[0].file_path, "/src/Bad_Name.exe");
        assert_eq!(s.most_affected_files[0].count, 2);
        // One of three files is clean.
        assert_eq!(s.compliance_score, 33.3);
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.mode, ComplianceMode::Advisory);
    }

    #[test]
    fn test_unknown_rule_falls_back_to_id() {
        let files = vec![FileNode::file("1", "/a.txt")];
        let rules = vec![rule_with(
            RuleType::Extension,
            RuleConfig {
                forbidden_extensions: vec!["txt".into()],
                ..RuleConfig::default()
            },
        )];
        let result = RulesEngine::new().check_files(&files, &rules);
        let report = ComplianceReport::from_result(&result, &[]);
        assert_eq!(report.violations[0].rule_name, "extension-rule");
        assert_eq!(report.summary.violations_by_type.get("unknown"), Some(&1));
    }

    #[test]
    fn test_score_counts_files_beyond_the_top_list() {
        let rules = vec![rule_with(
            RuleType::Extension,
            RuleConfig {
                forbidden_extensions: vec!["exe".into()],
                ..RuleConfig::default()
            },
        )];
        let mut files: Vec<FileNode> = (0..7)
            .map(|i| FileNode::file(format!("bad{i}"), format!("/bin/tool{i}.exe")))
            .collect();
        files.extend((0..3).map(|i| FileNode::file(format!("ok{i}"), format!("/doc/page{i}.md"))));

        let result = RulesEngine::new().check_files(&files, &rules);
        let s = ComplianceReport::from_result(&result, &rules).summary;
        assert_eq!(s.most_affected_files.len(), TOP_N);
        assert_eq!(s.compliance_score, 30.0);
    }
}
