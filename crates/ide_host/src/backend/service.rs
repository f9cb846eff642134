//! Workspace backend service contract.

use std::{future::Future, pin::Pin};

use super::types::{ExecuteResponse, FileRef, FileRequest, FileTree, FolderRequest};
use crate::BackendError;

/// Object-safe boxed future used by [`WorkspaceBackend`] async methods.
pub type WorkspaceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for the workspace backend. Each method is one request/response exchange.
pub trait WorkspaceBackend {
    /// `GET /list-files`.
    fn list_files<'a>(&'a self) -> WorkspaceFuture<'a, Result<FileTree, BackendError>>;

    /// `GET /read-file?folder=&file=`.
    fn read_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<String, BackendError>>;

    /// `POST /save-file`.
    fn save_file<'a>(
        &'a self,
        request: &'a FileRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>>;

    /// `POST /execute`.
    fn execute<'a>(
        &'a self,
        request: &'a FileRequest,
    ) -> WorkspaceFuture<'a, Result<ExecuteResponse, BackendError>>;

    /// `POST /create-folder`.
    fn create_folder<'a>(
        &'a self,
        request: &'a FolderRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>>;

    /// `POST /create-file`.
    fn create_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>>;

    /// `DELETE /delete-folder`.
    fn delete_folder<'a>(
        &'a self,
        request: &'a FolderRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>>;

    /// `DELETE /delete-file`.
    fn delete_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>>;

    /// `GET /download-project`; returns the archive bytes.
    fn download_project<'a>(&'a self) -> WorkspaceFuture<'a, Result<Vec<u8>, BackendError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op backend for builds without a transport and for baseline tests.
pub struct NoopWorkspaceBackend;

impl WorkspaceBackend for NoopWorkspaceBackend {
    fn list_files<'a>(&'a self) -> WorkspaceFuture<'a, Result<FileTree, BackendError>> {
        Box::pin(async { Err(BackendError::Unavailable("list_files")) })
    }

    fn read_file<'a>(
        &'a self,
        _file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<String, BackendError>> {
        Box::pin(async { Err(BackendError::Unavailable("read_file")) })
    }

    fn save_file<'a>(
        &'a self,
        _request: &'a FileRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async { Err(BackendError::Unavailable("save_file")) })
    }

    fn execute<'a>(
        &'a self,
        _request: &'a FileRequest,
    ) -> WorkspaceFuture<'a, Result<ExecuteResponse, BackendError>> {
        Box::pin(async { Err(BackendError::Unavailable("execute")) })
    }

    fn create_folder<'a>(
        &'a self,
        _request: &'a FolderRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async { Err(BackendError::Unavailable("create_folder")) })
    }

    fn create_file<'a>(
        &'a self,
        _file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async { Err(BackendError::Unavailable("create_file")) })
    }

    fn delete_folder<'a>(
        &'a self,
        _request: &'a FolderRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async { Err(BackendError::Unavailable("delete_folder")) })
    }

    fn delete_file<'a>(
        &'a self,
        _file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async { Err(BackendError::Unavailable("delete_file")) })
    }

    fn download_project<'a>(&'a self) -> WorkspaceFuture<'a, Result<Vec<u8>, BackendError>> {
        Box::pin(async { Err(BackendError::Unavailable("download_project")) })
    }
}
