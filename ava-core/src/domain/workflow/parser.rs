// ava-core/src/domain/workflow/parser.rs

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::workflow::model::{
    ParseResult, ParsedJob, ParsedStep, ParsedTrigger, ParsedWorkflow, RunsOn,
};

/// GitHub-Actions style workflow parser.
///
/// Documents are loaded into an untyped `serde_yaml::Value`: there are no
/// type constructors to execute, and custom tags stay inert data.
pub struct WorkflowParser;

impl WorkflowParser {
    pub fn parse(yaml_content: &str, file_name: &str) -> ParseResult {
        let mut data: Value = match serde_yaml::from_str(yaml_content) {
            Ok(value) => value,
            Err(e) => return ParseResult::failed(format!("YAML parsing failed: {}", e)),
        };
        if let Err(e) = data.apply_merge() {
            return ParseResult::failed(format!("YAML parsing failed: {}", e));
        }

        let Value::Mapping(root) = data else {
            return ParseResult::failed("Invalid YAML: Root must be an object");
        };

        let mut warnings = Vec::new();

        let name = root
            .get("name")
            .and_then(scalar_string)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| strip_yaml_extension(file_name).to_string());

        // YAML 1.1 tooling sometimes turns the bare `on` key into `true`.
        let on = root.get("on").or_else(|| root.get(Value::Bool(true)));
        let triggers = on.map(parse_triggers).unwrap_or_default();

        let jobs = root
            .get("jobs")
            .and_then(Value::as_mapping)
            .map(parse_jobs)
            .unwrap_or_default();

        if jobs.is_empty() {
            warnings.push("No jobs defined in workflow".to_string());
        }

        debug!(
            file = %file_name,
            triggers = triggers.len(),
            jobs = jobs.len(),
            "Workflow parsed"
        );

        ParseResult::ok(
            ParsedWorkflow {
                name,
                file_name: file_name.to_string(),
                triggers,
                jobs,
                env: root.get("env").and_then(Value::as_mapping).cloned(),
                defaults: root.get("defaults").filter(|v| !v.is_null()).cloned(),
            },
            warnings,
        )
    }

    /// Serializes a workflow back to YAML. Key order is
    /// `name, on, env, defaults, jobs`; redundant keys are left out.
    pub fn to_yaml(workflow: &ParsedWorkflow) -> Result<String, DomainError> {
        let mut root = Mapping::new();
        root.insert("name".into(), workflow.name.clone().into());

        match workflow.triggers.as_slice() {
            [] => {}
            [single] if single.config.is_empty() => {
                root.insert("on".into(), single.trigger_type.clone().into());
            }
            triggers => {
                let mut on = Mapping::new();
                for trigger in triggers {
                    let config = if trigger.config.is_empty() {
                        Value::Null
                    } else {
                        Value::Mapping(trigger.config.clone())
                    };
                    on.insert(trigger.trigger_type.clone().into(), config);
                }
                root.insert("on".into(), Value::Mapping(on));
            }
        }

        if let Some(env) = &workflow.env {
            root.insert("env".into(), Value::Mapping(env.clone()));
        }
        if let Some(defaults) = &workflow.defaults {
            root.insert("defaults".into(), defaults.clone());
        }

        if !workflow.jobs.is_empty() {
            let mut jobs = Mapping::new();
            for job in &workflow.jobs {
                jobs.insert(job.id.clone().into(), Value::Mapping(job_to_mapping(job)));
            }
            root.insert("jobs".into(), Value::Mapping(jobs));
        }

        serde_yaml::to_string(&Value::Mapping(root))
            .map_err(|e| DomainError::WorkflowSerialize(e.to_string()))
    }
}

fn strip_yaml_extension(file_name: &str) -> &str {
    file_name
        .strip_suffix(".yml")
        .or_else(|| file_name.strip_suffix(".yaml"))
        .unwrap_or(file_name)
}

/// Strings, numbers and booleans all read as text (`if: true`, `name: 2024`).
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        _ => None,
    }
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_string).collect(),
        other => scalar_string(other).into_iter().collect(),
    }
}

fn parse_triggers(on: &Value) -> Vec<ParsedTrigger> {
    match on {
        Value::Mapping(events) => events
            .iter()
            .filter_map(|(event, config)| {
                let trigger_type = scalar_string(event)?;
                Some(ParsedTrigger {
                    trigger_type,
                    config: config.as_mapping().cloned().unwrap_or_default(),
                })
            })
            .collect(),
        other => string_list(other)
            .into_iter()
            .map(ParsedTrigger::bare)
            .collect(),
    }
}

fn parse_jobs(jobs: &Mapping) -> Vec<ParsedJob> {
    jobs.iter()
        .filter_map(|(key, data)| {
            let id = scalar_string(key)?;
            // Malformed entries are dropped without failing the parse.
            let data = data.as_mapping()?;
            Some(parse_job(id, data))
        })
        .collect()
}

fn parse_job(id: String, data: &Mapping) -> ParsedJob {
    let runs_on = match data.get("runs-on") {
        Some(labels @ Value::Sequence(_)) => RunsOn::Labels(string_list(labels)),
        Some(Value::Mapping(group)) => RunsOn::Group(group.clone()),
        Some(other) => scalar_string(other)
            .filter(|s| !s.is_empty())
            .map(RunsOn::Label)
            .unwrap_or_default(),
        None => RunsOn::default(),
    };

    let steps = data
        .get("steps")
        .and_then(Value::as_sequence)
        .map(|steps| {
            steps
                .iter()
                .enumerate()
                .filter_map(|(index, step)| step.as_mapping().map(|s| parse_step(index, s)))
                .collect()
        })
        .unwrap_or_default();

    ParsedJob {
        name: data
            .get("name")
            .and_then(scalar_string)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| id.clone()),
        id,
        runs_on,
        needs: data.get("needs").map(string_list).unwrap_or_default(),
        steps,
        condition: data.get("if").and_then(scalar_string),
        env: data.get("env").and_then(Value::as_mapping).cloned(),
        timeout_minutes: data.get("timeout-minutes").and_then(Value::as_u64),
    }
}

fn parse_step(index: usize, data: &Mapping) -> ParsedStep {
    ParsedStep {
        name: data.get("name").and_then(scalar_string),
        uses: data.get("uses").and_then(scalar_string),
        run: data.get("run").and_then(scalar_string),
        with: data.get("with").and_then(Value::as_mapping).cloned(),
        env: data.get("env").and_then(Value::as_mapping).cloned(),
        condition: data.get("if").and_then(scalar_string),
        ..ParsedStep::at(index)
    }
}

fn job_to_mapping(job: &ParsedJob) -> Mapping {
    let mut out = Mapping::new();
    if job.name != job.id {
        out.insert("name".into(), job.name.clone().into());
    }
    out.insert("runs-on".into(), job.runs_on.to_value());

    match job.needs.as_slice() {
        [] => {}
        [single] => {
            out.insert("needs".into(), single.clone().into());
        }
        many => {
            out.insert(
                "needs".into(),
                Value::Sequence(many.iter().cloned().map(Value::String).collect()),
            );
        }
    }

    if let Some(env) = &job.env {
        out.insert("env".into(), Value::Mapping(env.clone()));
    }
    if let Some(condition) = &job.condition {
        out.insert("if".into(), condition.clone().into());
    }
    if let Some(timeout) = job.timeout_minutes {
        out.insert("timeout-minutes".into(), timeout.into());
    }

    let steps = job
        .steps
        .iter()
        .map(|step| Value::Mapping(step_to_mapping(step)))
        .collect();
    out.insert("steps".into(), Value::Sequence(steps));
    out
}

fn step_to_mapping(step: &ParsedStep) -> Mapping {
    let mut out = Mapping::new();
    let text_fields = [
        ("name", &step.name),
        ("uses", &step.uses),
        ("run", &step.run),
    ];
    for (key, value) in text_fields {
        if let Some(value) = value {
            out.insert(key.into(), value.clone().into());
        }
    }
    if let Some(with) = &step.with {
        out.insert("with".into(), Value::Mapping(with.clone()));
    }
    if let Some(env) = &step.env {
        out.insert("env".into(), Value::Mapping(env.clone()));
    }
    if let Some(condition) = &step.condition {
        out.insert("if".into(), condition.clone().into());
    }
    out
}
