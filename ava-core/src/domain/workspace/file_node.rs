// ava-core/src/domain/workspace/file_node.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node of the workspace file tree, as handed over by the file tree producer.
/// The rules engine only ever reads it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    pub id: String,
    /// Full path from the workspace root, e.g. `/src/components/button.tsx`.
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: FileNodeType,
    #[serde(default)]
    pub metadata: FileMetadata,
    /// Only filled by producers that load file bodies (content rules).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileNodeType {
    #[default]
    File,
    Folder,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Free-form fields, kept in declaration order.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub custom_fields: Map<String, Value>,
}

impl FileNode {
    /// Creates a file node whose name and extension are derived from `path`.
    pub fn file(id: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let name = base_name(&path).to_string();
        let extension = name
            .rsplit_once('.')
            .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
            .map(|(_, ext)| ext.to_string());

        Self {
            id: id.into(),
            name,
            path,
            node_type: FileNodeType::File,
            metadata: FileMetadata {
                extension,
                ..FileMetadata::default()
            },
            content: None,
        }
    }

    pub fn folder(id: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            id: id.into(),
            name: base_name(&path).to_string(),
            path,
            node_type: FileNodeType::Folder,
            metadata: FileMetadata::default(),
            content: None,
        }
    }

    pub fn with_size(mut self, bytes: u64) -> Self {
        self.metadata.size = Some(bytes);
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.metadata.extension = Some(extension.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.metadata.tags.push(tag.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.custom_fields.insert(key.into(), value.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn is_file(&self) -> bool {
        self.node_type == FileNodeType::File
    }

    /// Lower-cased extension without its leading dot. `None` when the
    /// producer supplied no (or an empty) extension.
    pub fn normalized_extension(&self) -> Option<String> {
        self.metadata
            .extension
            .as_deref()
            .map(normalize_extension)
            .filter(|ext| !ext.is_empty())
    }

    /// A custom field counts as present only when it holds a non-empty value
    /// (`null`, `false`, `0` and `""` are treated as missing).
    pub fn has_field(&self, key: &str) -> bool {
        self.metadata
            .custom_fields
            .get(key)
            .is_some_and(value_is_present)
    }

    /// Textual form of a present custom field, used for pattern and enum checks.
    pub fn field_text(&self, key: &str) -> Option<String> {
        self.metadata
            .custom_fields
            .get(key)
            .filter(|v| value_is_present(v))
            .map(value_to_text)
    }
}

pub(crate) fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

fn base_name(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}

fn value_is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_derives_name_and_extension() {
        let node = FileNode::file("f1", "/src/components/Button.TSX");
        assert_eq!(node.name, "Button.TSX");
        assert_eq!(node.normalized_extension().as_deref(), Some("tsx"));
        assert!(node.is_file());

        let dotfile = FileNode::file("f2", "/.gitignore");
        assert_eq!(dotfile.normalized_extension(), None);
    }

    #[test]
    fn test_extension_normalization_strips_dot() {
        let node = FileNode::file("f1", "/bin/tool").with_extension(".EXE");
        assert_eq!(node.normalized_extension().as_deref(), Some("exe"));
    }

    #[test]
    fn test_field_presence_follows_truthiness() {
        let node = FileNode::file("f1", "/a.md")
            .with_field("author", "ada")
            .with_field("draft", false)
            .with_field("reviews", 0)
            .with_field("owner", "")
            .with_field("labels", json!(["a", "b"]));

        assert!(node.has_field("author"));
        assert!(!node.has_field("draft"));
        assert!(!node.has_field("reviews"));
        assert!(!node.has_field("owner"));
        assert!(!node.has_field("missing"));
        assert_eq!(node.field_text("labels").as_deref(), Some("a,b"));
    }

    #[test]
    fn test_deserializes_camel_case_wire_format() -> anyhow::Result<()> {
        let raw = r#"{
            "id": "n1",
            "path": "/docs/readme.md",
            "name": "readme.md",
            "type": "file",
            "metadata": { "size": 2048, "extension": "md", "customFields": { "author": "bob" } }
        }"#;
        let node: FileNode = serde_json::from_str(raw)?;
        assert_eq!(node.metadata.size, Some(2048));
        assert_eq!(node.field_text("author").as_deref(), Some("bob"));
        Ok(())
    }
}
