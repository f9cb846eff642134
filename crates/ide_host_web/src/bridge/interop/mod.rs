//! Target routing for browser bridge calls.

use ide_host::BackendError;

use super::{HttpRequest, HttpResponse};

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub async fn send(request: HttpRequest) -> Result<HttpResponse, BackendError> {
    imp::send(request).await
}

pub fn alert(message: &str) -> Result<(), String> {
    imp::alert(message)
}

pub fn prompt(message: &str) -> Result<Option<String>, String> {
    imp::prompt(message)
}

pub fn save_bytes(file_name: &str, mime_type: &str, bytes: &[u8]) -> Result<(), String> {
    imp::save_bytes(file_name, mime_type, bytes)
}
