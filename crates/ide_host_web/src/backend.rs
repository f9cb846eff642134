//! `fetch`-backed workspace backend.

use ide_host::{
    decode_text_content, BackendConfig, BackendError, ExecuteResponse, FileRef, FileRequest,
    FileTree, FolderRequest, WorkspaceBackend, WorkspaceFuture,
};

use crate::bridge::{self, HttpMethod, HttpRequest};

#[derive(Debug, Clone, Default)]
/// Workspace backend that talks JSON over HTTP to the configured base URL.
pub struct HttpWorkspaceBackend {
    config: BackendConfig,
}

impl HttpWorkspaceBackend {
    /// Creates a backend for `config`.
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    /// Active backend configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub(crate) fn list_files_request(&self) -> HttpRequest {
        HttpRequest::get(self.config.endpoint("/list-files"))
    }

    pub(crate) fn read_file_request(&self, file: &FileRef) -> HttpRequest {
        HttpRequest::get(self.config.read_file_url(file))
    }

    pub(crate) fn download_request(&self) -> HttpRequest {
        HttpRequest::get(self.config.endpoint("/download-project"))
    }

    fn json_request<T: serde::Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &T,
    ) -> Result<HttpRequest, BackendError> {
        HttpRequest::json(method, self.config.endpoint(path), body)
    }

    async fn send_unit(&self, request: Result<HttpRequest, BackendError>) -> Result<(), BackendError> {
        bridge::send(request?).await?.ensure_success().map(|_| ())
    }
}

impl WorkspaceBackend for HttpWorkspaceBackend {
    fn list_files<'a>(&'a self) -> WorkspaceFuture<'a, Result<FileTree, BackendError>> {
        Box::pin(async move {
            bridge::send(self.list_files_request())
                .await?
                .ensure_success()?
                .json()
        })
    }

    fn read_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<String, BackendError>> {
        Box::pin(async move {
            let response = bridge::send(self.read_file_request(file))
                .await?
                .ensure_success()?;
            Ok(decode_text_content(&response.text()))
        })
    }

    fn save_file<'a>(
        &'a self,
        request: &'a FileRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async move {
            self.send_unit(self.json_request(HttpMethod::Post, "/save-file", request))
                .await
        })
    }

    fn execute<'a>(
        &'a self,
        request: &'a FileRequest,
    ) -> WorkspaceFuture<'a, Result<ExecuteResponse, BackendError>> {
        Box::pin(async move {
            bridge::send(self.json_request(HttpMethod::Post, "/execute", request)?)
                .await?
                .ensure_success()?
                .json()
        })
    }

    fn create_folder<'a>(
        &'a self,
        request: &'a FolderRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async move {
            self.send_unit(self.json_request(HttpMethod::Post, "/create-folder", request))
                .await
        })
    }

    fn create_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async move {
            self.send_unit(self.json_request(HttpMethod::Post, "/create-file", file))
                .await
        })
    }

    fn delete_folder<'a>(
        &'a self,
        request: &'a FolderRequest,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async move {
            self.send_unit(self.json_request(HttpMethod::Delete, "/delete-folder", request))
                .await
        })
    }

    fn delete_file<'a>(
        &'a self,
        file: &'a FileRef,
    ) -> WorkspaceFuture<'a, Result<(), BackendError>> {
        Box::pin(async move {
            self.send_unit(self.json_request(HttpMethod::Delete, "/delete-file", file))
                .await
        })
    }

    fn download_project<'a>(&'a self) -> WorkspaceFuture<'a, Result<Vec<u8>, BackendError>> {
        Box::pin(async move {
            let response = bridge::send(self.download_request())
                .await?
                .ensure_success()?;
            Ok(response.body)
        })
    }
}
