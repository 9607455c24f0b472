// ava-core/src/domain/rules/scope.rs

use crate::domain::rules::rule::RuleScope;
use crate::domain::workspace::FileNode;
use crate::domain::workspace::file_node::normalize_extension;

impl RuleScope {
    /// Scope membership, evaluated in a fixed order:
    /// apply-to-all, file types, tags, excluded paths, included paths.
    /// Exclusion runs before inclusion, so an exclude always beats a broader include.
    pub fn includes(&self, file: &FileNode) -> bool {
        if self.apply_to_all {
            return true;
        }

        if !self.file_types.is_empty() {
            let Some(ext) = file.normalized_extension() else {
                return false;
            };
            if !self.file_types.iter().any(|t| normalize_extension(t) == ext) {
                return false;
            }
        }

        if !self.tags.is_empty() {
            let file_tags = &file.metadata.tags;
            if !self.tags.iter().any(|tag| file_tags.contains(tag)) {
                return false;
            }
        }

        // Substring semantics on purpose: no glob expansion.
        if self
            .exclude_paths
            .iter()
            .any(|pattern| file.path.contains(pattern.as_str()))
        {
            return false;
        }

        if !self.include_paths.is_empty()
            && !self
                .include_paths
                .iter()
                .any(|pattern| file.path.contains(pattern.as_str()))
        {
            return false;
        }

        true
    }
}
