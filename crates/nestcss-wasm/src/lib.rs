//! WASM bindings for nestcss.
//!
//! Exposes `toCss()` and `injectStyle()` to JavaScript via wasm-bindgen.
//! Both throw on invalid input.

pub mod browser;

use nestcss_core::{StyleError, StyleNode};
use nestcss_dom::{InjectOptions, Injection, StyleContent};
use wasm_bindgen::prelude::*;

pub use browser::BrowserDocument;

/// Convert a nested style object into CSS text.
///
/// Throws a JS error if `value` is not a plain object, or if a nested value
/// is neither a string, a number, nor an object.
#[wasm_bindgen(js_name = toCss)]
pub fn to_css(value: JsValue) -> Result<String, JsError> {
    let root = style_node_from_js(&value).map_err(to_js_error)?;
    Ok(nestcss_core::to_css(&root))
}

/// Write a stylesheet into a `<style>` element of the current document.
///
/// `content` is CSS text or a style object. With an `id`, an existing
/// `<style>` of that id is replaced, or kept when `overridable` is `false`.
/// New elements go to `host`, or `document.head` when omitted.
#[wasm_bindgen(js_name = injectStyle)]
pub fn inject_style(
    content: JsValue,
    id: Option<String>,
    overridable: Option<bool>,
    host: JsValue,
) -> Result<(), JsError> {
    let content = style_content_from_js(&content).map_err(to_js_error)?;

    let id = non_empty_id(id);
    let mut options = inject_options(id.clone(), overridable);
    if !host.is_undefined() && !host.is_null() {
        options = options.with_host(host);
    }

    let mut doc = BrowserDocument::current().map_err(to_js_error)?;
    let outcome = nestcss_dom::inject_style(&mut doc, content, options).map_err(to_js_error)?;

    if outcome == Injection::Skipped {
        if let Some(id) = id {
            browser::console_warn(&skip_message(&id));
        }
    }
    Ok(())
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(err: StyleError) -> JsError {
    JsError::new(&err.to_string())
}

fn skip_message(id: &str) -> String {
    format!("nestcss: <style id=\"{id}\"> already exists and is not overridable; skipped")
}

/// An empty id names nothing, so it is treated as no id at all.
fn non_empty_id(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.is_empty())
}

fn inject_options(id: Option<String>, overridable: Option<bool>) -> InjectOptions<JsValue> {
    let options = InjectOptions::new().overridable(overridable.unwrap_or(true));
    match id {
        Some(id) => options.with_id(id),
        None => options,
    }
}

/// Shape of a JS value, as far as input checks care.
#[derive(Debug, Clone, PartialEq, Eq)]
enum JsKind {
    Undefined,
    Null,
    Array,
    Object,
    String,
    /// Any other `typeof` result.
    Other(String),
}

impl JsKind {
    fn of(value: &JsValue) -> Self {
        if value.is_undefined() {
            JsKind::Undefined
        } else if value.is_null() {
            JsKind::Null
        } else if js_sys::Array::is_array(value) {
            JsKind::Array
        } else if value.is_object() {
            JsKind::Object
        } else if value.is_string() {
            JsKind::String
        } else {
            JsKind::Other(value.js_typeof().as_string().unwrap_or_else(|| "unknown".into()))
        }
    }

    fn name(&self) -> String {
        match self {
            JsKind::Undefined => "undefined".into(),
            JsKind::Null => "null".into(),
            JsKind::Array => "array".into(),
            JsKind::Object => "object".into(),
            JsKind::String => "string".into(),
            JsKind::Other(name) => name.clone(),
        }
    }
}

/// `toCss` accepts plain objects only.
fn check_style_object(kind: &JsKind) -> Result<(), StyleError> {
    match kind {
        JsKind::Object => Ok(()),
        other => Err(StyleError::InvalidInput {
            expected: "a style object",
            received: other.name(),
        }),
    }
}

/// `injectStyle` accepts CSS text or a plain object.
fn check_style_content(kind: &JsKind) -> Result<(), StyleError> {
    match kind {
        JsKind::Object | JsKind::String => Ok(()),
        other => Err(StyleError::InvalidInput {
            expected: "CSS text or a style object",
            received: other.name(),
        }),
    }
}

fn style_node_from_js(value: &JsValue) -> Result<StyleNode, StyleError> {
    check_style_object(&JsKind::of(value))?;
    serde_wasm_bindgen::from_value(value.clone()).map_err(|e| StyleError::Malformed {
        message: e.to_string(),
    })
}

fn style_content_from_js(value: &JsValue) -> Result<StyleContent, StyleError> {
    check_style_content(&JsKind::of(value))?;
    match value.as_string() {
        Some(css) => Ok(StyleContent::Css(css)),
        None => style_node_from_js(value).map(StyleContent::Tree),
    }
}
