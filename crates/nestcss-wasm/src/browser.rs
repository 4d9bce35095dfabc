//! `StyleDocument` over the browser DOM.
//!
//! Calls the DOM through `js_sys::Reflect`, so no typed DOM bindings are needed.

use js_sys::{Array, Function, Reflect};
use nestcss_core::StyleError;
use nestcss_dom::StyleDocument;
use wasm_bindgen::{JsCast, JsValue};

/// The global `document`.
pub struct BrowserDocument {
    document: JsValue,
}

impl BrowserDocument {
    /// Look up `globalThis.document`.
    pub fn current() -> Result<Self, StyleError> {
        let document = get(&js_sys::global(), "document")?;
        if document.is_undefined() || document.is_null() {
            return Err(host_error("no global document"));
        }
        Ok(Self { document })
    }
}

impl StyleDocument for BrowserDocument {
    type Element = JsValue;

    fn get_element_by_id(&self, id: &str) -> Result<Option<JsValue>, StyleError> {
        let found = call(&self.document, "getElementById", &[JsValue::from_str(id)])?;
        Ok((!found.is_null()).then_some(found))
    }

    fn tag_name(&self, element: &JsValue) -> Result<String, StyleError> {
        get(element, "tagName")?
            .as_string()
            .ok_or_else(|| host_error("element has no tagName"))
    }

    fn create_style_element(&mut self) -> Result<JsValue, StyleError> {
        call(&self.document, "createElement", &[JsValue::from_str("style")])
    }

    fn set_text_content(&mut self, element: &JsValue, text: &str) -> Result<(), StyleError> {
        set(element, "textContent", &JsValue::from_str(text))
    }

    fn set_id(&mut self, element: &JsValue, id: &str) -> Result<(), StyleError> {
        set(element, "id", &JsValue::from_str(id))
    }

    fn append_child(&mut self, parent: &JsValue, child: &JsValue) -> Result<(), StyleError> {
        call(parent, "appendChild", &[child.clone()]).map(|_| ())
    }

    fn head(&self) -> Result<JsValue, StyleError> {
        let head = get(&self.document, "head")?;
        if head.is_null() || head.is_undefined() {
            return Err(host_error("document has no head"));
        }
        Ok(head)
    }
}

/// Write a message with `console.warn`. Silently does nothing without a console.
pub fn console_warn(message: &str) {
    if let Ok(console) = get(&js_sys::global(), "console") {
        let _ = call(&console, "warn", &[JsValue::from_str(message)]);
    }
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, StyleError> {
    Reflect::get(target, &JsValue::from_str(key))
        .map_err(|_| host_error(&format!("failed to read {key}")))
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), StyleError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map_err(|_| host_error(&format!("failed to set {key}")))
        .map(|_| ())
}

fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, StyleError> {
    let function: Function = get(target, method)?
        .dyn_into()
        .map_err(|_| host_error(&format!("{method} is not a function")))?;
    let args: Array = args.iter().collect();
    function
        .apply(target, &args)
        .map_err(|e| host_error(&format!("{method} threw: {}", describe(&e))))
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            get(err, "message")
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| "unknown error".into())
}

fn host_error(message: &str) -> StyleError {
    StyleError::Host {
        message: message.to_string(),
    }
}
