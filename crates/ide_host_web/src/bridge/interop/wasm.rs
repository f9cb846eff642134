use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Request, RequestInit, Response, Url};

use super::*;

fn js_error(err: JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "window is unavailable".to_string())
}

pub async fn send(request: HttpRequest) -> Result<HttpResponse, BackendError> {
    let transport = |err: JsValue| BackendError::Transport(js_error(err));

    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    if let Some(body) = request.json_body.as_deref() {
        init.set_body(&JsValue::from_str(body));
    }
    let js_request = Request::new_with_str_and_init(&request.url, &init).map_err(transport)?;
    if request.json_body.is_some() {
        js_request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(transport)?;
    }

    let window = window().map_err(BackendError::Transport)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&js_request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;
    let buffer = JsFuture::from(response.array_buffer().map_err(transport)?)
        .await
        .map_err(transport)?;

    Ok(HttpResponse {
        status: response.status(),
        body: Uint8Array::new(&buffer).to_vec(),
    })
}

pub fn alert(message: &str) -> Result<(), String> {
    window()?.alert_with_message(message).map_err(js_error)
}

pub fn prompt(message: &str) -> Result<Option<String>, String> {
    window()?.prompt_with_message(message).map_err(js_error)
}

pub fn save_bytes(file_name: &str, mime_type: &str, bytes: &[u8]) -> Result<(), String> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| "document is unavailable".to_string())?;
    let body = document
        .body()
        .ok_or_else(|| "document body is unavailable".to_string())?;

    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let object_url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "anchor element cast failed".to_string())?;
    anchor.set_href(&object_url);
    anchor.set_download(file_name);
    body.append_child(&anchor).map_err(js_error)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_error)?;
    Url::revoke_object_url(&object_url).map_err(js_error)
}
