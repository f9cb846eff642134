use ide_host::{
    BackendConfig, BackendError, ExecuteResponse, FileRef, FileRequest, FileTree, FolderRequest,
    NoopWorkspaceBackend, WorkspaceBackend, WorkspaceFuture,
};

use crate::{HttpWorkspaceBackend, WebDialogService, WebDownloadService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected transport for the workspace backend.
pub enum BackendStrategy {
    /// `fetch` requests to the configured base URL.
    Http,
    /// No transport; every call reports [`BackendError::Unavailable`].
    Stub,
}

/// Returns the compile-time selected backend strategy for the active build.
pub const fn selected_backend_strategy() -> BackendStrategy {
    #[cfg(feature = "backend-stub")]
    {
        BackendStrategy::Stub
    }

    #[cfg(not(feature = "backend-stub"))]
    {
        BackendStrategy::Http
    }
}

/// Returns the selected backend strategy as a stable string token.
pub fn backend_strategy_name() -> &'static str {
    match selected_backend_strategy() {
        BackendStrategy::Http => "http",
        BackendStrategy::Stub => "stub",
    }
}

/// Adapter enum that erases the concrete backend behind [`WorkspaceBackend`].
#[derive(Debug, Clone)]
pub enum WorkspaceBackendAdapter {
    /// HTTP transport.
    Http(HttpWorkspaceBackend),
    /// No-op fallback.
    Stub(NoopWorkspaceBackend),
}

impl WorkspaceBackend for WorkspaceBackendAdapter {
    fn list_files<'a>(&'a self) -> WorkspaceFuture<'a, Result<FileTree, BackendError>> {
        match self {
            Self::Http(backend) => backend.list_files(),
            Self::Stub(backend) => backend.list_files(),
        }
    }

    fn read_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<String, BackendError>> {
        match self {
            Self::Http(backend) => backend.read_file(file),
            Self::Stub(backend) => backend.read_file(file),
        }
    }

    fn save_file<'a>(
        &'a self,
        request: &'a FileRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        match self {
            Self::Http(backend) => backend.save_file(request),
            Self::Stub(backend) => backend.save_file(request),
        }
    }

    fn execute<'a>(
        &'a self,
        request: &'a FileRequest,
    ) -> WorkspaceFuture<'a, Result<ExecuteResponse, BackendError>> {
        match self {
            Self::Http(backend) => backend.execute(request),
            Self::Stub(backend) => backend.execute(request),
        }
    }

    fn create_folder<'a>(
        &'a self,
        request: &'a FolderRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        match self {
            Self::Http(backend) => backend.create_folder(request),
            Self::Stub(backend) => backend.create_folder(request),
        }
    }

    fn create_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        match self {
            Self::Http(backend) => backend.create_file(file),
            Self::Stub(backend) => backend.create_file(file),
        }
    }

    fn delete_folder<'a>(
        &'a self,
        request: &'a FolderRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        match self {
            Self::Http(backend) => backend.delete_folder(request),
            Self::Stub(backend) => backend.delete_folder(request),
        }
    }

    fn delete_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        match self {
            Self::Http(backend) => backend.delete_file(file),
            Self::Stub(backend) => backend.delete_file(file),
        }
    }

    fn download_project<'a>(&'a self) -> WorkspaceFuture<'a, Result<Vec<u8>, BackendError>> {
        match self {
            Self::Http(backend) => backend.download_project(),
            Self::Stub(backend) => backend.download_project(),
        }
    }
}

/// Builds the workspace backend for the compile-time selected strategy.
pub fn workspace_backend(config: BackendConfig) -> WorkspaceBackendAdapter {
    match selected_backend_strategy() {
        BackendStrategy::Http => WorkspaceBackendAdapter::Http(HttpWorkspaceBackend::new(config)),
        BackendStrategy::Stub => WorkspaceBackendAdapter::Stub(NoopWorkspaceBackend),
    }
}

/// Builds the browser dialog service.
pub fn dialog_service() -> WebDialogService {
    WebDialogService
}

/// Builds the browser download service.
pub fn download_service() -> WebDownloadService {
    WebDownloadService
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_build_selects_http_backend() {
        #[cfg(not(feature = "backend-stub"))]
        {
            assert_eq!(selected_backend_strategy(), BackendStrategy::Http);
            assert_eq!(backend_strategy_name(), "http");
            let adapter = workspace_backend(BackendConfig::default());
            assert!(matches!(adapter, WorkspaceBackendAdapter::Http(ref http)
                if http.config().base_url() == "http://127.0.0.1:8000"));
        }
        #[cfg(feature = "backend-stub")]
        {
            assert_eq!(backend_strategy_name(), "stub");
        }
    }
}
