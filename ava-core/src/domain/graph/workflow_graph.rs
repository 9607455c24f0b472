// ava-core/src/domain/graph/workflow_graph.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::{HashMap, HashSet};

use crate::domain::workflow::{AgentType, ParsedWorkflow, WorkflowParser, infer_agent_type};

const RUN_LABEL_CHARS: usize = 30;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Trigger,
    Job,
    Step,
    Agent,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    Triggers,
    DependsOn,
    Sequence,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<AgentType>,
    #[serde(default)]
    pub metadata: Map<String, JsonValue>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

/// Node/edge view of a workflow for visualizers. Derived on demand, never
/// stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowGraph {
    pub workflow_id: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl WorkflowGraph {
    pub fn from_workflow(workflow: &ParsedWorkflow) -> Self {
        let mut graph = WorkflowGraph {
            workflow_id: workflow.file_name.clone(),
            ..Default::default()
        };

        for (idx, trigger) in workflow.triggers.iter().enumerate() {
            graph.nodes.push(GraphNode {
                id: trigger_node_id(idx),
                node_type: NodeType::Trigger,
                label: trigger.trigger_type.clone(),
                agent_type: None,
                metadata: to_json_object(&trigger.config),
            });
        }

        for job in &workflow.jobs {
            let mut metadata = Map::new();
            metadata.insert("runsOn".into(), to_json(&job.runs_on));
            metadata.insert("stepCount".into(), job.steps.len().into());
            graph.nodes.push(GraphNode {
                id: job.id.clone(),
                node_type: NodeType::Job,
                label: job.name.clone(),
                agent_type: None,
                metadata,
            });

            // Conditional jobs are not wired to triggers.
            if job.condition.is_none() {
                for idx in 0..workflow.triggers.len() {
                    graph.push_edge(trigger_node_id(idx), job.id.clone(), EdgeType::Triggers);
                }
            }

            for dep in &job.needs {
                graph.push_edge(dep.clone(), job.id.clone(), EdgeType::DependsOn);
            }

            let mut previous = job.id.clone();
            for step in &job.steps {
                let step_node = format!("{}-{}", job.id, step.id);

                let mut metadata = Map::new();
                if let Some(uses) = &step.uses {
                    metadata.insert("uses".into(), uses.clone().into());
                }
                if let Some(run) = &step.run {
                    metadata.insert("run".into(), run.clone().into());
                }

                let label = step
                    .name
                    .clone()
                    .filter(|s| !s.is_empty())
                    .or_else(|| step.uses.clone().filter(|s| !s.is_empty()))
                    .or_else(|| {
                        step.run
                            .as_deref()
                            .filter(|s| !s.is_empty())
                            .map(|r| r.chars().take(RUN_LABEL_CHARS).collect())
                    })
                    .unwrap_or_else(|| "Step".to_string());

                graph.nodes.push(GraphNode {
                    id: step_node.clone(),
                    node_type: NodeType::Step,
                    label,
                    agent_type: Some(infer_agent_type(step)),
                    metadata,
                });

                graph.push_edge(previous, step_node.clone(), EdgeType::Sequence);
                previous = step_node;
            }
        }

        graph
    }

    fn push_edge(&mut self, source: String, target: String, edge_type: EdgeType) {
        self.edges.push(GraphEdge {
            source,
            target,
            edge_type,
        });
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edges_of(&self, edge_type: EdgeType) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.edge_type == edge_type)
    }

    /// Mermaid `graph LR` rendering. Triggers are stadiums, jobs rectangles,
    /// steps flags; dependency edges are thick, trigger edges dotted.
    pub fn to_mermaid(&self) -> String {
        let mut lines = Vec::new();
        lines.push("graph LR".to_string());
        let ids = mermaid_ids(&self.nodes);
        let id_of = |raw: &str| ids.get(raw).cloned().unwrap_or_else(|| mermaid_id(raw));

        for node in &self.nodes {
            let id = id_of(&node.id);
            let label = mermaid_label(&node.label);
            let line = match node.node_type {
                NodeType::Trigger => format!("    {}([\"{}\"])", id, label),
                NodeType::Job => format!("    {}[\"{}\"]", id, label),
                NodeType::Step | NodeType::Agent => format!("    {}>\"{}\"]", id, label),
            };
            lines.push(line);
        }

        for edge in &self.edges {
            let arrow = match edge.edge_type {
                EdgeType::Triggers => "-.->",
                EdgeType::DependsOn => "==>",
                EdgeType::Sequence => "-->",
            };
            lines.push(format!(
                "    {} {} {}",
                id_of(&edge.source),
                arrow,
                id_of(&edge.target)
            ));
        }

        lines.join("\n")
    }
}

impl WorkflowParser {
    pub fn generate_graph(workflow: &ParsedWorkflow) -> WorkflowGraph {
        WorkflowGraph::from_workflow(workflow)
    }
}

fn trigger_node_id(idx: usize) -> String {
    format!("trigger-{}", idx)
}

fn to_json<T: Serialize>(value: &T) -> JsonValue {
    serde_json::to_value(value).unwrap_or(JsonValue::Null)
}

/// YAML mappings with non-string keys do not convert; they become `{}`.
fn to_json_object<T: Serialize>(value: &T) -> Map<String, JsonValue> {
    match serde_json::to_value(value) {
        Ok(JsonValue::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Mermaid ids only allow `[A-Za-z0-9_]` reliably.
fn mermaid_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Sanitized ids in node order. Ids that sanitize to one already taken
/// (`a.b` after `a_b`) get a `_2`, `_3`, ... suffix.
fn mermaid_ids(nodes: &[GraphNode]) -> HashMap<&str, String> {
    let mut taken = HashSet::new();
    let mut ids = HashMap::with_capacity(nodes.len());
    for node in nodes {
        if ids.contains_key(node.id.as_str()) {
            continue;
        }
        let base = mermaid_id(&node.id);
        let mut candidate = base.clone();
        let mut n = 2;
        while taken.contains(&candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        taken.insert(candidate.clone());
        ids.insert(node.id.as_str(), candidate);
    }
    ids
}

fn mermaid_label(label: &str) -> String {
    label.replace('"', "#quot;").replace('\n', " ")
}
