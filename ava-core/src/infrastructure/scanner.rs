// ava-core/src/infrastructure/scanner.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::{DirEntry, WalkDir};

use crate::domain::project::ScanConfig;
use crate::domain::workspace::FileNode;
use crate::error::AvaError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::FileTreeSource;

/// Builds the workspace file tree from a local directory.
///
/// Node ids and paths are root-relative with a leading `/` and `/`
/// separators on every platform (`/src/app.ts`). The root itself is not a
/// node. Entries are visited in file-name order so ids are stable between
/// runs.
#[derive(Debug, Clone)]
pub struct FsTreeScanner {
    root: PathBuf,
    exclude: Vec<String>,
    load_content: bool,
    max_content_bytes: u64,
}

impl FsTreeScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(root, &ScanConfig::default())
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &ScanConfig) -> Self {
        Self {
            root: root.into(),
            exclude: config.exclude.clone(),
            load_content: config.load_content,
            max_content_bytes: config.max_content_bytes,
        }
    }

    pub fn with_content(mut self, max_bytes: u64) -> Self {
        self.load_content = true;
        self.max_content_bytes = max_bytes;
        self
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclude.iter().any(|e| e == name))
    }

    #[instrument(skip(self), fields(root = ?self.root))]
    pub fn scan(&self) -> Result<Vec<FileNode>, InfrastructureError> {
        let mut nodes = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e));

        for entry in walker {
            let entry = entry?;
            if entry.depth() == 0 {
                continue;
            }
            let Some(rel) = relative_path(&self.root, entry.path()) else {
                continue;
            };

            if entry.file_type().is_dir() {
                nodes.push(FileNode::folder(rel.clone(), rel));
                continue;
            }
            if !entry.file_type().is_file() {
                continue;
            }

            let size = entry.metadata()?.len();
            let mut node = FileNode::file(rel.clone(), rel).with_size(size);
            if self.load_content && size <= self.max_content_bytes {
                // Binary files stay without content.
                if let Ok(text) = String::from_utf8(fs::read(entry.path())?) {
                    node = node.with_content(text);
                }
            }
            nodes.push(node);
        }

        info!(nodes = nodes.len(), "File tree scanned");
        debug!(excluded = ?self.exclude, "Scan exclusions");
        Ok(nodes)
    }
}

impl FileTreeSource for FsTreeScanner {
    fn load_nodes(&self) -> Result<Vec<FileNode>, AvaError> {
        Ok(self.scan()?)
    }
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(format!("/{}", parts.join("/")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::workspace::FileNodeType;
    use anyhow::Result;
    use tempfile::tempdir;

    fn fixture() -> Result<tempfile::TempDir> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("src/components"))?;
        fs::create_dir_all(dir.path().join("node_modules/left-pad"))?;
        fs::write(dir.path().join("src/components/MyButton.tsx"), "export {}")?;
        fs::write(dir.path().join("src/index.ts"), "import './components'")?;
        fs::write(dir.path().join("node_modules/left-pad/index.js"), "module.exports = 1")?;
        fs::write(dir.path().join("logo.png"), [0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe])?;
        Ok(dir)
    }

    #[test]
    fn test_scan_layout() -> Result<()> {
        let dir = fixture()?;
        let nodes = FsTreeScanner::new(dir.path()).scan()?;
        let paths: Vec<&str> = nodes.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/logo.png",
                "/src",
                "/src/components",
                "/src/components/MyButton.tsx",
                "/src/index.ts",
            ]
        );

        let button = &nodes[3];
        assert_eq!(button.id, "/src/components/MyButton.tsx");
        assert_eq!(button.name, "MyButton.tsx");
        assert_eq!(button.node_type, FileNodeType::File);
        assert_eq!(button.metadata.extension.as_deref(), Some("tsx"));
        assert_eq!(button.metadata.size, Some(9));
        assert!(button.content.is_none());
        assert_eq!(nodes[1].node_type, FileNodeType::Folder);
        Ok(())
    }

    #[test]
    fn test_content_loading_skips_binary_and_large_files() -> Result<()> {
        let dir = fixture()?;
        let nodes = FsTreeScanner::new(dir.path()).with_content(12).scan()?;
        let by_path = |p: &str| nodes.iter().find(|n| n.path == p).unwrap();

        assert_eq!(
            by_path("/src/components/MyButton.tsx").content.as_deref(),
            Some("export {}")
        );
        // 21 bytes, over the limit.
        assert!(by_path("/src/index.ts").content.is_none());
        // Not UTF-8.
        assert!(by_path("/logo.png").content.is_none());
        Ok(())
    }

    #[test]
    fn test_custom_exclusions() -> Result<()> {
        let dir = fixture()?;
        let config = ScanConfig {
            exclude: vec!["components".into()],
            ..ScanConfig::default()
        };
        let nodes = FsTreeScanner::from_config(dir.path(), &config).scan()?;
        assert!(nodes.iter().any(|n| n.path.starts_with("/node_modules")));
        assert!(!nodes.iter().any(|n| n.path.contains("components")));
        Ok(())
    }
}
