//! Blocking user dialogs and file-download service contracts.

use std::{future::Future, pin::Pin};

/// Host service for blocking user dialogs.
pub trait DialogService {
    /// Shows a blocking message.
    fn alert(&self, message: &str) -> Result<(), String>;

    /// Asks for one line of text. `Ok(None)` when the user cancels.
    fn prompt(&self, message: &str) -> Result<Option<String>, String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Dialog service for targets without a UI: alerts are dropped and prompts are cancelled.
pub struct NoopDialogService;

impl DialogService for NoopDialogService {
    fn alert(&self, _message: &str) -> Result<(), String> {
        Ok(())
    }

    fn prompt(&self, _message: &str) -> Result<Option<String>, String> {
        Ok(None)
    }
}

/// Object-safe boxed future used by [`DownloadService`].
pub type DownloadFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that hands downloaded bytes to the user as a file.
pub trait DownloadService {
    /// Offers `bytes` to the user under `file_name`.
    fn save_bytes<'a>(
        &'a self,
        file_name: &'a str,
        mime_type: &'a str,
        bytes: &'a [u8],
    ) -> DownloadFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Download service that discards the payload.
pub struct NoopDownloadService;

impl DownloadService for NoopDownloadService {
    fn save_bytes<'a>(
        &'a self,
        _file_name: &'a str,
        _mime_type: &'a str,
        _bytes: &'a [u8],
    ) -> DownloadFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}
