// ava-core/src/domain/workflow/validation.rs

use tracing::debug;

use crate::domain::graph::JobGraph;
use crate::domain::workflow::model::{ParsedWorkflow, WorkflowValidation};
use crate::domain::workflow::parser::WorkflowParser;

impl WorkflowParser {
    /// Referential checks on a parsed workflow. Structural problems
    /// (no jobs, dangling `needs`, dependency cycles) are errors; empty jobs
    /// and steps without an action are warnings.
    pub fn validate(workflow: &ParsedWorkflow) -> WorkflowValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if workflow.jobs.is_empty() {
            errors.push("Workflow must have at least one job".to_string());
        }

        let graph = JobGraph::new(&workflow.jobs);
        for (job, dep) in graph.missing_dependencies() {
            errors.push(format!(
                "Job \"{}\" depends on non-existent job \"{}\"",
                job, dep
            ));
        }

        for job in &workflow.jobs {
            if job.steps.is_empty() {
                warnings.push(format!("Job \"{}\" has no steps", job.id));
            }
            for (idx, step) in job.steps.iter().enumerate() {
                if !step.has_action() {
                    warnings.push(format!(
                        "Step {} in job \"{}\" has neither 'uses' nor 'run'",
                        idx + 1,
                        job.id
                    ));
                }
            }
        }

        if let Some(cycle) = graph.find_cycle() {
            errors.push(format!(
                "Circular dependencies detected: {}",
                cycle.join(" -> ")
            ));
        }

        debug!(
            workflow = %workflow.name,
            errors = errors.len(),
            warnings = warnings.len(),
            "Workflow validated"
        );

        WorkflowValidation {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn validate(yaml: &str) -> WorkflowValidation {
        let wf = WorkflowParser::parse(yaml, "wf.yml").workflow.unwrap();
        WorkflowParser::validate(&wf)
    }

    #[test]
    fn test_minimal_workflow_is_valid() {
        let v = validate("on: push\njobs:\n  build:\n    runs-on: ubuntu-latest\n    steps:\n      - run: echo hi");
        assert!(v.valid);
        assert!(v.errors.is_empty());
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn test_no_jobs() {
        let v = validate("on: push\n");
        assert!(!v.valid);
        assert_eq!(v.errors, vec!["Workflow must have at least one job"]);
    }

    #[test]
    fn test_missing_dependency() {
        let yaml = r#"
on: push
jobs:
  deploy:
    needs: [build, package]
    steps:
      - run: ./deploy.sh
  build:
    steps:
      - run: make
"#;
        let v = validate(yaml);
        assert!(!v.valid);
        assert_eq!(
            v.errors,
            vec![r#"Job "deploy" depends on non-existent job "package""#]
        );
    }

    #[test]
    fn test_three_job_cycle_reported_once() {
        let yaml = r#"
on: push
jobs:
  a:
    needs: c
    steps: [{run: a}]
  b:
    needs: a
    steps: [{run: b}]
  c:
    needs: b
    steps: [{run: c}]
"#;
        let v = validate(yaml);
        assert!(!v.valid);
        let cycles: Vec<&String> = v
            .errors
            .iter()
            .filter(|e| e.starts_with("Circular dependencies detected: "))
            .collect();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0], "Circular dependencies detected: a -> c -> b -> a");
        for job in ["a", "b", "c"] {
            assert!(cycles[0].contains(job));
        }
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let v = validate("on: push\njobs:\n  loop:\n    needs: loop\n    steps: [{run: x}]\n");
        assert_eq!(v.errors, vec!["Circular dependencies detected: loop -> loop"]);
    }

    #[test]
    fn test_step_and_job_warnings() {
        let yaml = r#"
on: push
jobs:
  empty:
    runs-on: ubuntu-latest
  odd:
    steps:
      - run: ok
      - name: Nothing to do
"#;
        let v = validate(yaml);
        assert!(v.valid);
        assert_eq!(
            v.warnings,
            vec![
                r#"Job "empty" has no steps"#,
                r#"Step 2 in job "odd" has neither 'uses' nor 'run'"#,
            ]
        );
    }
}
