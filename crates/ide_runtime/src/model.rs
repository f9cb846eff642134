use std::collections::BTreeSet;

use ide_host::{BackendError, FileTree};

use crate::session::Session;

pub const NO_FILE_OPEN_MESSAGE: &str = "⚠ No file is open!";
pub const NO_FILES_TO_SAVE_MESSAGE: &str = "No files are open.";
pub const RUNNING_MESSAGE: &str = "Running...";
pub const SAVED_ALL_MESSAGE: &str = "All files saved!";
pub const ARCHIVE_MIME_TYPE: &str = "application/zip";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTreeState {
    pub tree: FileTree,
    pub expanded: BTreeSet<String>,
    pub loaded: bool,
}

impl FileTreeState {
    pub fn replace(&mut self, tree: FileTree) {
        self.expanded
            .retain(|folder| tree.folders.contains_key(folder));
        self.tree = tree;
        self.loaded = true;
    }

    pub fn toggle(&mut self, folder: &str) {
        if !self.expanded.remove(folder) {
            self.expanded.insert(folder.to_string());
        }
    }

    pub fn is_expanded(&self, folder: &str) -> bool {
        self.expanded.contains(folder)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeState {
    pub session: Session,
    pub tree: FileTreeState,
    pub console: String,
    pub running: bool,
    pub saving: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A create/delete request against the workspace backend.
pub enum WorkspaceMutation {
    CreateFolder { folder_name: String },
    CreateFile { folder: String, file_name: String },
    DeleteFolder { folder_name: String },
    DeleteFile { folder: String, file_name: String },
}

impl WorkspaceMutation {
    /// Returns the first blank field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        let blank = |value: &str| value.trim().is_empty();
        match self {
            Self::CreateFolder { folder_name } | Self::DeleteFolder { folder_name } => {
                blank(folder_name).then_some("folder name")
            }
            Self::CreateFile { folder, file_name } | Self::DeleteFile { folder, file_name } => {
                if blank(folder) {
                    Some("folder name")
                } else if blank(file_name) {
                    Some("file name")
                } else {
                    None
                }
            }
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Self::CreateFolder { folder_name } => {
                format!("Folder '{folder_name}' created successfully.")
            }
            Self::CreateFile { folder, file_name } => {
                format!("File '{file_name}' created in folder '{folder}'.")
            }
            Self::DeleteFolder { folder_name } => {
                format!("Folder '{folder_name}' deleted successfully.")
            }
            Self::DeleteFile { file_name, .. } => {
                format!("File '{file_name}' deleted successfully.")
            }
        }
    }

    pub fn failure_message(&self, error: &BackendError) -> String {
        let action = match self {
            Self::CreateFolder { .. } => "creating folder",
            Self::CreateFile { .. } => "creating file",
            Self::DeleteFolder { .. } => "deleting folder",
            Self::DeleteFile { .. } => "deleting file",
        };
        format!("Error {action}: {error}")
    }
}
