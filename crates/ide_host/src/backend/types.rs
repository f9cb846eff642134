//! Wire models for the workspace backend's JSON endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// Folder listing returned by `GET /list-files`: folder name to the file names it contains.
pub struct FileTree {
    /// Folders keyed by name. File order is the order the backend returned.
    pub folders: BTreeMap<String, Vec<String>>,
}

impl FileTree {
    /// Returns `true` when `folder` contains a file called `file_name`.
    pub fn contains_file(&self, folder: &str, file_name: &str) -> bool {
        self.folders
            .get(folder)
            .is_some_and(|files| files.iter().any(|f| f == file_name))
    }

    /// Iterates folders in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.folders
            .iter()
            .map(|(folder, files)| (folder.as_str(), files.as_slice()))
    }
}

impl<const N: usize> From<[(&str, &[&str]); N]> for FileTree {
    fn from(entries: [(&str, &[&str]); N]) -> Self {
        let folders = entries
            .into_iter()
            .map(|(folder, files)| {
                (
                    folder.to_string(),
                    files.iter().map(|f| f.to_string()).collect(),
                )
            })
            .collect();
        Self { folders }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Identifies one file: body of `POST /create-file` and `DELETE /delete-file`.
pub struct FileRef {
    /// Containing folder.
    pub folder: String,
    /// File name inside the folder.
    pub file_name: String,
}

impl FileRef {
    /// Creates a file reference.
    pub fn new(folder: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            file_name: file_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// File plus text: body of `POST /save-file` and `POST /execute`.
pub struct FileRequest {
    /// Containing folder.
    pub folder: String,
    /// File name inside the folder.
    pub file_name: String,
    /// Full text of the file.
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Body of `POST /create-folder` and `DELETE /delete-folder`.
pub struct FolderRequest {
    /// Folder name.
    pub folder_name: String,
}

impl FolderRequest {
    /// Creates a folder request.
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Response of `POST /execute`. The backend may fill either field or both.
pub struct ExecuteResponse {
    /// Captured standard output.
    #[serde(default)]
    pub output: Option<String>,
    /// Compiler/runtime error text, or a backend rejection such as an unsupported file type.
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecuteResponse {
    /// Text for the output panel: `output` when non-empty, otherwise `error`, otherwise empty.
    pub fn display_text(&self) -> &str {
        match self.output.as_deref() {
            Some(output) if !output.is_empty() => output,
            _ => self.error.as_deref().unwrap_or_default(),
        }
    }
}

/// Decodes a `GET /read-file` body.
///
/// The backend serialises its return value, so a file body usually arrives as a JSON string
/// literal. Bodies that are not a JSON string are taken verbatim.
pub fn decode_text_content(body: &str) -> String {
    match serde_json::from_str::<String>(body) {
        Ok(text) => text,
        Err(_) => body.to_string(),
    }
}

/// Extracts the `detail` field of a backend error body (`{"detail": "..."}`).
///
/// Validation errors carry a list of objects under `detail`; their `msg` fields are joined.
pub fn decode_error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}
