// ava-core/src/domain/graph/mod.rs

pub mod dag;
pub mod workflow_graph;

pub use dag::JobGraph;
pub use workflow_graph::{EdgeType, GraphEdge, GraphNode, NodeType, WorkflowGraph};
