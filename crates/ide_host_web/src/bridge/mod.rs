//! Browser capability bridge for `ide_host_web` service adapters.
//!
//! Transport types are target independent; the calls that touch `window` are routed through
//! `interop`, which falls back to stubs when not compiled for `wasm32`.

mod interop;

use ide_host::BackendError;
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// HTTP methods used by the workspace backend.
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Method token as sent on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A fully built request: absolute URL plus optional JSON body.
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: String,
    /// Serialized JSON body, sent with `Content-Type: application/json`.
    pub json_body: Option<String>,
}

impl HttpRequest {
    /// Builds a body-less `GET` request.
    pub fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            json_body: None,
        }
    }

    /// Builds a request carrying `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Decode`] when `body` cannot be serialized.
    pub fn json<T: Serialize>(
        method: HttpMethod,
        url: String,
        body: &T,
    ) -> Result<Self, BackendError> {
        let json_body =
            serde_json::to_string(body).map_err(|err| BackendError::Decode(err.to_string()))?;
        Ok(Self {
            method,
            url,
            json_body: Some(json_body),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Status and raw body of a completed exchange.
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns `true` for `2xx` statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Converts non-`2xx` responses into [`BackendError::Status`].
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Status`] carrying the backend's detail message.
    pub fn ensure_success(self) -> Result<Self, BackendError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(BackendError::from_status(self.status, &self.text()))
        }
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Decode`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BackendError> {
        serde_json::from_slice(&self.body).map_err(|err| BackendError::Decode(err.to_string()))
    }
}

pub async fn send(request: HttpRequest) -> Result<HttpResponse, BackendError> {
    interop::send(request).await
}

pub fn alert(message: &str) -> Result<(), String> {
    interop::alert(message)
}

pub fn prompt(message: &str) -> Result<Option<String>, String> {
    interop::prompt(message)
}

pub fn save_bytes(file_name: &str, mime_type: &str, bytes: &[u8]) -> Result<(), String> {
    interop::save_bytes(file_name, mime_type, bytes)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use ide_host::FolderRequest;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn json_requests_serialize_body() {
        let request = HttpRequest::json(
            HttpMethod::Delete,
            "http://h/delete-folder".to_string(),
            &FolderRequest::new("src"),
        )
        .expect("build");
        assert_eq!(request.method.as_str(), "DELETE");
        assert_eq!(request.json_body.as_deref(), Some(r#"{"folder_name":"src"}"#));
        assert_eq!(HttpRequest::get("http://h/list-files".into()).json_body, None);
    }

    #[test]
    fn responses_map_status_and_decode_json() {
        let ok = HttpResponse {
            status: 200,
            body: br#"{"src":["a.py"]}"#.to_vec(),
        };
        let tree: ide_host::FileTree = ok.clone().ensure_success().expect("ok").json().expect("json");
        assert!(tree.contains_file("src", "a.py"));

        let missing = HttpResponse {
            status: 404,
            body: br#"{"detail":"File not found"}"#.to_vec(),
        };
        assert_eq!(
            missing.ensure_success().expect_err("404"),
            BackendError::Status {
                status: 404,
                message: "File not found".to_string()
            }
        );

        let garbage = HttpResponse {
            status: 200,
            body: b"<html>".to_vec(),
        };
        assert!(matches!(
            garbage.json::<ide_host::ExecuteResponse>(),
            Err(BackendError::Decode(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn browser_calls_are_unavailable_natively() {
        let err = block_on(send(HttpRequest::get("http://h/list-files".into())))
            .expect_err("no fetch natively");
        assert_eq!(err, BackendError::Unavailable("fetch"));
        assert!(alert("hi").is_err());
        assert!(prompt("name?").is_err());
        assert!(save_bytes("project.zip", "application/zip", &[1, 2]).is_err());
    }
}
