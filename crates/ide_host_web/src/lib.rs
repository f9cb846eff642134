//! Browser (`wasm32`) implementations of the [`ide_host`] service contracts.
//!
//! This crate wires the workspace backend to `fetch`, user dialogs to `window.alert` /
//! `window.prompt`, and project downloads to Blob object URLs. Every browser call goes through
//! `bridge::interop`, which compiles to stubs on native targets so host tests can run anywhere.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time backend-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod backend;
mod bridge;
pub mod dialogs;

pub use adapters::{
    backend_strategy_name, dialog_service, download_service, selected_backend_strategy,
    workspace_backend, BackendStrategy, WorkspaceBackendAdapter,
};
pub use backend::HttpWorkspaceBackend;
pub use dialogs::{WebDialogService, WebDownloadService};
