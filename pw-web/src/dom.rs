use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Headers, Request, RequestInit, RequestMode, Response, Storage, Window};

/// The browser window, absent outside a browser (SSR and native tests).
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// The current document, if a window exists.
#[must_use]
pub fn document() -> Option<Document> {
    window()?.document()
}

fn require_window() -> Result<Window, JsValue> {
    window().ok_or_else(|| JsValue::from_str("no browser window"))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Status code and body text of a completed fetch.
pub struct FetchedText {
    pub status: u16,
    pub body: String,
}

/// Perform a JSON fetch and read the body as text.
///
/// The bearer token, when present, is sent as an `Authorization` header.
///
/// # Errors
/// Any failure to build the request, reach the server or read the body.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_text(
    method: &str,
    url: &str,
    json_body: Option<&str>,
    bearer: Option<&str>,
) -> Result<FetchedText, JsValue> {
    let headers = Headers::new()?;
    headers.set("Accept", "application/json")?;
    if json_body.is_some() {
        headers.set("Content-Type", "application/json")?;
    }
    if let Some(token) = bearer {
        headers.set("Authorization", &format!("Bearer {token}"))?;
    }

    let init = RequestInit::new();
    init.set_method(method);
    init.set_mode(RequestMode::Cors);
    init.set_headers(&headers);
    if let Some(body) = json_body {
        init.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &init)?;
    let resp_value = JsFuture::from(require_window()?.fetch_with_request(&request)).await?;
    let response: Response = resp_value.dyn_into()?;
    let text = JsFuture::from(response.text()?).await?;
    Ok(FetchedText {
        status: response.status(),
        body: text.as_string().unwrap_or_default(),
    })
}

/// `localStorage` of the current window.
///
/// # Errors
/// Fails without a window, or when storage is disabled for this origin.
pub fn local_storage() -> Result<Storage, JsValue> {
    require_window()?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage disabled"))
}
