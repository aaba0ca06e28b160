//! WASM bindings for the LayoutKit compiler.
//!
//! Backs the interactive playground, which recompiles the whole document on
//! every keystroke. Structured results cross the boundary as plain JS
//! objects via serde-wasm-bindgen.

use layoutkit_codegen::safelist::{self, SafelistFormat};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Compile LayoutKit markup to structured results.
///
/// Returns `{ results: [{ component, props, classes, html }], warnings:
/// [{ line, rule, message, severity, fix? }] }`.
#[wasm_bindgen]
pub fn compile(source: &str) -> Result<JsValue, JsError> {
    to_js(&layoutkit_codegen::compile_to_results(source))
}

/// Rewrite LayoutKit markup to plain HTML.
#[wasm_bindgen(js_name = compileMarkup)]
pub fn compile_markup(source: &str) -> String {
    layoutkit_codegen::compile_to_markup(source)
}

/// Every class the compiler can emit, in the requested format
/// (`plain`, `json` or `css`).
#[wasm_bindgen]
pub fn safelist(format: Option<String>) -> Result<String, JsError> {
    let format = match format.as_deref() {
        Some(name) => name.parse().map_err(|e: String| JsError::new(&e))?,
        None => SafelistFormat::default(),
    };
    safelist::render(format).map_err(|e| JsError::new(&e.to_string()))
}

/// Markdown hover card for a component, or `undefined` for unknown tags.
#[wasm_bindgen]
pub fn describe(tag: &str) -> Option<String> {
    layoutkit_codegen::describe(tag).map(|doc| doc.to_markdown())
}

/// The ten component names, for completion lists.
#[wasm_bindgen]
pub fn components() -> js_sys::Array {
    layoutkit_codegen::components()
        .into_iter()
        .map(JsValue::from_str)
        .collect()
}

/// Get the compiler version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
