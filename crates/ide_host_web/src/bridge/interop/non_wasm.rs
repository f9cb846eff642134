use super::*;

fn unsupported() -> String {
    "Browser APIs are only available when compiled for wasm32".to_string()
}

pub async fn send(_request: HttpRequest) -> Result<HttpResponse, BackendError> {
    Err(BackendError::Unavailable("fetch"))
}

pub fn alert(_message: &str) -> Result<(), String> {
    Err(unsupported())
}

pub fn prompt(_message: &str) -> Result<Option<String>, String> {
    Err(unsupported())
}

pub fn save_bytes(_file_name: &str, _mime_type: &str, _bytes: &[u8]) -> Result<(), String> {
    Err(unsupported())
}
