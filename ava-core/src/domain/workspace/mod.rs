// ava-core/src/domain/workspace/mod.rs

pub mod file_node;

pub use file_node::{FileMetadata, FileNode, FileNodeType};
