// ava-core/src/ports/source.rs

// What the use cases need from the outside world, without knowing where it
// comes from: a file tree (scanner, upload, API) and a rule set (file, DB).

use crate::domain::rules::Rule;
use crate::domain::workspace::FileNode;
use crate::error::AvaError;

pub trait FileTreeSource: Send + Sync {
    fn load_nodes(&self) -> Result<Vec<FileNode>, AvaError>;
}

pub trait RuleSource: Send + Sync {
    fn load_rules(&self) -> Result<Vec<Rule>, AvaError>;
}

// In-memory sources, mostly for callers that already hold the data.
impl FileTreeSource for Vec<FileNode> {
    fn load_nodes(&self) -> Result<Vec<FileNode>, AvaError> {
        Ok(self.clone())
    }
}

impl RuleSource for Vec<Rule> {
    fn load_rules(&self) -> Result<Vec<Rule>, AvaError> {
        Ok(self.clone())
    }
}
