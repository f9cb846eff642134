//! Typed host contracts shared between the IDE runtime and its browser adapters.
//!
//! This crate is the API boundary to the workspace backend. It exposes the wire models of the
//! backend's JSON endpoints, the async [`WorkspaceBackend`] service trait, user-dialog and download
//! service traits, and backend configuration. Concrete browser adapters live in `ide_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod backend;
pub mod config;
pub mod dialogs;
pub mod error;

pub use backend::memory::MemoryWorkspaceBackend;
pub use backend::service::{NoopWorkspaceBackend, WorkspaceBackend, WorkspaceFuture};
pub use backend::types::{
    decode_error_detail, decode_text_content, ExecuteResponse, FileRef, FileRequest, FileTree,
    FolderRequest,
};
pub use config::{BackendConfig, ConfigError, ARCHIVE_FILE_NAME, DEFAULT_BACKEND_URL};
pub use dialogs::{
    DialogService, DownloadFuture, DownloadService, NoopDialogService, NoopDownloadService,
};
pub use error::BackendError;
