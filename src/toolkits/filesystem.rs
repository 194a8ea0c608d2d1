use async_trait::async_trait;
use indoc::indoc;
use serde_json::{json, Value};
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::toolkit::Toolkit;
use crate::errors::{AgentError, AgentResult};
use crate::models::content::Content;
use crate::models::tool::{Tool, ToolCall};

/// File browsing confined to a root directory.
pub struct FilesystemToolkit {
    root: PathBuf,
    tools: Vec<Tool>,
}

impl FilesystemToolkit {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let list_files = Tool::new(
            "list_files",
            "Lists files in the specified directory to help the user browse.",
            json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Directory to list, relative to the agent's root. Defaults to the root itself."
                    }
                },
                "required": []
            }),
        );

        let read_file = Tool::new(
            "read_file",
            "Reads the text content of a file. Use this to analyze the data inside a file.",
            json!({
                "type": "object",
                "properties": {
                    "filename": {
                        "type": "string",
                        "description": "The file to read, relative to the agent's root."
                    }
                },
                "required": ["filename"]
            }),
        );

        Self {
            root: root.into(),
            tools: vec![list_files, read_file],
        }
    }

    // Paths stay inside the root: no absolute paths, no parent traversal.
    fn resolve(&self, path_str: &str) -> AgentResult<PathBuf> {
        let path = Path::new(path_str);
        if path.is_absolute()
            || path
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(AgentError::InvalidParameters(format!(
                "Path '{}' is outside the allowed directory",
                path_str
            )));
        }
        Ok(self.root.join(path))
    }

    fn list_files(&self, params: &Value) -> AgentResult<Vec<Content>> {
        let path = params.get("path").and_then(|v| v.as_str()).unwrap_or(".");
        let dir = self.resolve(path)?;

        let entries = fs::read_dir(&dir).map_err(|e| {
            AgentError::ExecutionError(format!("Error accessing directory: {}", e))
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();

        let listing = if names.is_empty() {
            "The directory is empty.".to_string()
        } else {
            names.join("\n")
        };
        Ok(vec![Content::text(listing)])
    }

    fn read_file(&self, params: &Value) -> AgentResult<Vec<Content>> {
        let filename = params
            .get("filename")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AgentError::InvalidParameters("'filename' parameter required".into())
            })?;
        let path = self.resolve(filename)?;

        let content = fs::read_to_string(&path)
            .map_err(|e| AgentError::ExecutionError(format!("Error reading file: {}", e)))?;
        Ok(vec![Content::text(content)])
    }
}

#[async_trait]
impl Toolkit for FilesystemToolkit {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn description(&self) -> &str {
        "Browses and reads files in the agent's working directory"
    }

    fn instructions(&self) -> &str {
        indoc! {"
            Use list_files to discover what is present before reading. All
            paths are relative to the working directory; you cannot read
            outside it.
        "}
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> AgentResult<Vec<Content>> {
        match tool_call.name.as_str() {
            "list_files" => self.list_files(&tool_call.arguments),
            "read_file" => self.read_file(&tool_call.arguments),
            _ => Err(AgentError::ToolNotFound(tool_call.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toolkit_with_files() -> (tempfile::TempDir, FilesystemToolkit) {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("notes.txt")).unwrap();
        writeln!(file, "first line").unwrap();
        fs::File::create(dir.path().join("data.csv")).unwrap();
        let toolkit = FilesystemToolkit::new(dir.path());
        (dir, toolkit)
    }

    #[tokio::test]
    async fn test_list_files() {
        let (_dir, toolkit) = toolkit_with_files();
        let result = toolkit
            .call(ToolCall::new("list_files", json!({})))
            .await
            .unwrap();
        assert_eq!(result[0].as_text(), Some("data.csv\nnotes.txt"));
    }

    #[tokio::test]
    async fn test_read_file() {
        let (_dir, toolkit) = toolkit_with_files();
        let result = toolkit
            .call(ToolCall::new("read_file", json!({"filename": "notes.txt"})))
            .await
            .unwrap();
        assert_eq!(result[0].as_text(), Some("first line\n"));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let (_dir, toolkit) = toolkit_with_files();
        let result = toolkit
            .call(ToolCall::new("read_file", json!({"filename": "nope.txt"})))
            .await;
        assert!(matches!(result, Err(AgentError::ExecutionError(_))));
    }

    #[tokio::test]
    async fn test_parent_traversal_rejected() {
        let (_dir, toolkit) = toolkit_with_files();
        let result = toolkit
            .call(ToolCall::new(
                "read_file",
                json!({"filename": "../outside.txt"}),
            ))
            .await;
        assert!(matches!(result, Err(AgentError::InvalidParameters(_))));
    }

    #[tokio::test]
    async fn test_absolute_path_rejected() {
        let (_dir, toolkit) = toolkit_with_files();
        let result = toolkit
            .call(ToolCall::new("read_file", json!({"filename": "/etc/hosts"})))
            .await;
        assert!(matches!(result, Err(AgentError::InvalidParameters(_))));
    }

    #[tokio::test]
    async fn test_list_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let toolkit = FilesystemToolkit::new(dir.path());
        let result = toolkit
            .call(ToolCall::new("list_files", json!({})))
            .await
            .unwrap();
        assert_eq!(result[0].as_text(), Some("The directory is empty."));
    }
}
