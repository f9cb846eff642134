//! In-memory workspace backend used by host-agnostic tests and headless harnesses.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use super::service::{WorkspaceBackend, WorkspaceFuture};
use super::types::{ExecuteResponse, FileRef, FileRequest, FileTree, FolderRequest};
use crate::BackendError;

#[derive(Debug, Default)]
struct MemoryWorkspace {
    folders: BTreeMap<String, BTreeMap<String, String>>,
    offline: bool,
    execute_response: Option<ExecuteResponse>,
    executed: Vec<FileRequest>,
    saved: Vec<FileRequest>,
}

#[derive(Debug, Clone, Default)]
/// In-memory backend that mirrors the status codes and messages of the real server.
///
/// Clones share the same storage.
pub struct MemoryWorkspaceBackend {
    inner: Rc<RefCell<MemoryWorkspace>>,
}

impl MemoryWorkspaceBackend {
    /// Seeds a file, creating its folder when missing.
    pub fn with_file(self, folder: &str, file_name: &str, text: &str) -> Self {
        self.inner
            .borrow_mut()
            .folders
            .entry(folder.to_string())
            .or_default()
            .insert(file_name.to_string(), text.to_string());
        self
    }

    /// Makes every subsequent call fail with a transport error (or recover when `false`).
    pub fn set_offline(&self, offline: bool) {
        self.inner.borrow_mut().offline = offline;
    }

    /// Overrides the response returned by [`WorkspaceBackend::execute`].
    pub fn set_execute_response(&self, response: ExecuteResponse) {
        self.inner.borrow_mut().execute_response = Some(response);
    }

    /// Returns the stored text of a file.
    pub fn file_text(&self, folder: &str, file_name: &str) -> Option<String> {
        self.inner
            .borrow()
            .folders
            .get(folder)
            .and_then(|files| files.get(file_name))
            .cloned()
    }

    /// Returns every save request received, in order.
    pub fn saved(&self) -> Vec<FileRequest> {
        self.inner.borrow().saved.clone()
    }

    /// Returns every execute request received, in order.
    pub fn executed(&self) -> Vec<FileRequest> {
        self.inner.borrow().executed.clone()
    }

    fn guard(&self) -> Result<(), BackendError> {
        if self.inner.borrow().offline {
            Err(BackendError::Transport("Failed to fetch".to_string()))
        } else {
            Ok(())
        }
    }

    fn not_found(what: &str) -> BackendError {
        BackendError::Status {
            status: 404,
            message: format!("{what} not found"),
        }
    }

    fn write(&self, request: &FileRequest) {
        self.inner
            .borrow_mut()
            .folders
            .entry(request.folder.clone())
            .or_default()
            .insert(request.file_name.clone(), request.code.clone());
    }
}

impl WorkspaceBackend for MemoryWorkspaceBackend {
    fn list_files<'a>(&'a self) -> WorkspaceFuture<'a, Result<FileTree, BackendError>> {
        Box::pin(async move {
            self.guard()?;
            let folders = self
                .inner
                .borrow()
                .folders
                .iter()
                .map(|(folder, files)| (folder.clone(), files.keys().cloned().collect()))
                .collect();
            Ok(FileTree { folders })
        })
    }

    fn read_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<String, BackendError>> {
        Box::pin(async move {
            self.guard()?;
            self.file_text(&file.folder, &file.file_name)
                .ok_or_else(|| Self::not_found("File"))
        })
    }

    fn save_file<'a>(
        &'a self,
        request: &'a FileRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async move {
            self.guard()?;
            if !self.inner.borrow().folders.contains_key(&request.folder) {
                return Err(Self::not_found("Folder"));
            }
            self.write(request);
            self.inner.borrow_mut().saved.push(request.clone());
            Ok(())
        })
    }

    fn execute<'a>(
        &'a self,
        request: &'a FileRequest,
    ) -> WorkspaceFuture<'a, Result<ExecuteResponse, BackendError>> {
        Box::pin(async move {
            self.guard()?;
            self.write(request);
            let mut inner = self.inner.borrow_mut();
            inner.executed.push(request.clone());
            if let Some(response) = inner.execute_response.clone() {
                return Ok(response);
            }
            let supported =
                request.file_name.ends_with(".py") || request.file_name.ends_with(".java");
            Ok(if supported {
                ExecuteResponse {
                    output: Some(String::new()),
                    error: Some(String::new()),
                }
            } else {
                ExecuteResponse {
                    output: None,
                    error: Some("Unsupported file type".to_string()),
                }
            })
        })
    }

    fn create_folder<'a>(
        &'a self,
        request: &'a FolderRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async move {
            self.guard()?;
            let mut inner = self.inner.borrow_mut();
            if inner.folders.contains_key(&request.folder_name) {
                return Err(BackendError::Status {
                    status: 400,
                    message: "Folder already exists".to_string(),
                });
            }
            inner
                .folders
                .insert(request.folder_name.clone(), BTreeMap::new());
            Ok(())
        })
    }

    fn create_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async move {
            self.guard()?;
            self.inner
                .borrow_mut()
                .folders
                .entry(file.folder.clone())
                .or_default()
                .entry(file.file_name.clone())
                .or_default();
            Ok(())
        })
    }

    fn delete_folder<'a>(
        &'a self,
        request: &'a FolderRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async move {
            self.guard()?;
            self.inner
                .borrow_mut()
                .folders
                .remove(&request.folder_name)
                .map(|_| ())
                .ok_or_else(|| Self::not_found("Folder"))
        })
    }

    fn delete_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async move {
            self.guard()?;
            self.inner
                .borrow_mut()
                .folders
                .get_mut(&file.folder)
                .and_then(|files| files.remove(&file.file_name))
                .map(|_| ())
                .ok_or_else(|| Self::not_found("File"))
        })
    }

    fn download_project<'a>(&'a self) -> WorkspaceFuture<'a, Result<Vec<u8>, BackendError>> {
        Box::pin(async move {
            self.guard()?;
            let inner = self.inner.borrow();
            if inner.folders.is_empty() {
                return Err(BackendError::Status {
                    status: 404,
                    message: "No files found to download.".to_string(),
                });
            }
            // Stand-in archive: one `folder/file` path per line.
            let mut listing = String::new();
            for (folder, files) in &inner.folders {
                for name in files.keys() {
                    listing.push_str(&format!("{folder}/{name}\n"));
                }
            }
            Ok(listing.into_bytes())
        })
    }
}
