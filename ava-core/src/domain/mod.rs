pub mod error;
pub mod graph;
pub mod project;
pub mod rules;
pub mod workflow;
pub mod workspace;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
