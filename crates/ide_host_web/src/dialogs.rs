//! Dialog and download adapters backed by `window.alert`, `window.prompt`, and Blob URLs.

use ide_host::{DialogService, DownloadFuture, DownloadService};

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Browser dialogs.
pub struct WebDialogService;

impl DialogService for WebDialogService {
    fn alert(&self, message: &str) -> Result<(), String> {
        bridge::alert(message)
    }

    fn prompt(&self, message: &str) -> Result<Option<String>, String> {
        bridge::prompt(message)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser downloads through a temporary object URL and anchor click.
pub struct WebDownloadService;

impl DownloadService for WebDownloadService {
    fn save_bytes<'a>(
        &'a self,
        file_name: &'a str,
        mime_type: &'a str,
        bytes: &'a [u8],
    ) -> DownloadFuture<'a, Result<(), String>> {
        Box::pin(async move { bridge::save_bytes(file_name, mime_type, bytes) })
    }
}
