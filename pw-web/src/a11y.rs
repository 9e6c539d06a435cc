// Accessibility helpers

/// Id of the polite live region rendered by the app shell.
pub const STATUS_REGION_ID: &str = "pw-status";

/// Update the live region status for screen readers
///
/// Updates the text content of the status region if present.
pub fn set_status(msg: &str) {
    if let Some(node) = crate::dom::document()
        .and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}

/// Move keyboard focus back to the element that opened a dialog.
pub fn restore_focus(id: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        if let Some(el) = crate::dom::document()
            .and_then(|doc| doc.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let _ = el.focus();
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = id;
    }
}
