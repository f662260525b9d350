//! WASM bindings for the figjsx generator.
//!
//! Exposes `render()`, `compile()` and `classes()` to JavaScript via
//! wasm-bindgen. Inputs are JSON strings; errors are thrown as JS errors.

use figjsx_codegen::{collect, CompilerOutput, GeneratedComponent, RenderContext};
use serde::Serialize;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

/// Render the root of a design tree to JSX.
///
/// `components_json` and `images_json` are JSON objects of strings; pass
/// `"{}"` for empty tables.
#[wasm_bindgen]
pub fn render(
    tree_json: &str,
    components_json: &str,
    images_json: &str,
) -> Result<String, JsError> {
    let root = parse_tree(tree_json)?;
    let components = parse_table(components_json, "components")?;
    let images = parse_table(images_json, "images")?;
    let ctx = RenderContext::new(&components, &images);
    Ok(figjsx_codegen::render(&root, &ctx))
}

/// Compile a whole document.
///
/// Returns `{ pages: [...], components: [...] }`, each entry being
/// `{ id, name, componentName, jsx }`.
#[wasm_bindgen]
pub fn compile(tree_json: &str, images_json: &str) -> Result<JsValue, JsError> {
    let output = native_compile(tree_json, images_json)?;
    serde_wasm_bindgen::to_value(&JsOutput::from(&output))
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Class string for a single node (children are ignored).
#[wasm_bindgen]
pub fn classes(node_json: &str) -> Result<String, JsError> {
    let node = figjsx_model::parse_node(node_json).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(figjsx_codegen::class_string(&node))
}

/// Get the generator version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// =========================================================================
// Native helpers
// =========================================================================

/// Error from the JSON inputs, before conversion to a JS error.
#[derive(Debug)]
struct InputError(String);

impl From<InputError> for JsError {
    fn from(e: InputError) -> Self {
        JsError::new(&e.0)
    }
}

fn parse_tree(tree_json: &str) -> Result<figjsx_model::Node, InputError> {
    figjsx_model::parse_document(tree_json).map_err(|e| InputError(e.to_string()))
}

fn parse_table(json: &str, what: &str) -> Result<HashMap<String, String>, InputError> {
    serde_json::from_str(json).map_err(|e| InputError(format!("invalid {what} table: {e}")))
}

fn native_compile(tree_json: &str, images_json: &str) -> Result<CompilerOutput, InputError> {
    let root = parse_tree(tree_json)?;
    let images = parse_table(images_json, "images")?;
    let components = collect::component_names(&root);
    let ctx = RenderContext::new(&components, &images);
    Ok(figjsx_codegen::compile(&root, &ctx))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsComponent<'a> {
    id: &'a str,
    name: &'a str,
    component_name: &'a str,
    jsx: &'a str,
}

#[derive(Serialize)]
struct JsOutput<'a> {
    pages: Vec<JsComponent<'a>>,
    components: Vec<JsComponent<'a>>,
}

impl<'a> From<&'a GeneratedComponent> for JsComponent<'a> {
    fn from(c: &'a GeneratedComponent) -> Self {
        Self {
            id: &c.id,
            name: &c.name,
            component_name: &c.component_name,
            jsx: &c.jsx,
        }
    }
}

impl<'a> From<&'a CompilerOutput> for JsOutput<'a> {
    fn from(output: &'a CompilerOutput) -> Self {
        Self {
            pages: output.pages.iter().map(JsComponent::from).collect(),
            components: output.components.iter().map(JsComponent::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Native tests (non-WASM): verify the pipeline behind the bindings
    // =========================================================================

    const DOC: &str = r#"{"document":{"id":"0:0","type":"DOCUMENT","children":[
        {"id":"0:1","type":"CANVAS","children":[
            {"id":"1:1","name":"Logo","type":"COMPONENT"},
            {"id":"2:1","name":"Landing","type":"FRAME","layoutMode":"VERTICAL","children":[
                {"id":"2:2","type":"INSTANCE","componentId":"1:1"},
                {"id":"2:3","name":"Photo","type":"RECTANGLE","fills":[{"type":"IMAGE","imageRef":"ref1"}]}
            ]}
        ]}
    ]}}"#;

    #[test]
    fn test_compile_document() {
        let output = native_compile(DOC, r#"{"ref1":"/img/ref1.png"}"#).unwrap();
        assert_eq!(output.pages.len(), 1);
        assert_eq!(output.components.len(), 1);
        assert_eq!(
            output.pages[0].jsx,
            "<div className=\"flex flex-col\"><Logo className=\"\"></Logo>\n\
             <Image src=\"/img/ref1.png\" alt=\"Photo\" width={0} height={0} className=\"\" /></div>"
        );
    }

    #[test]
    fn test_js_output_shape() {
        let output = native_compile(DOC, "{}").unwrap();
        let js = JsOutput::from(&output);
        assert_eq!(js.pages[0].component_name, "Landing");
        assert_eq!(js.components[0].component_name, "Logo");
    }

    #[test]
    fn test_invalid_table() {
        let err = native_compile(DOC, "[1]").unwrap_err();
        assert!(err.0.starts_with("invalid images table"));
    }

    #[test]
    fn test_invalid_tree() {
        assert!(native_compile("{}", "{}").is_err());
        assert!(parse_tree("not json").is_err());
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
        assert!(v.contains('.'));
    }

    #[test]
    fn test_multiple_compiles() {
        // No state leaks between calls
        let out1 = native_compile(DOC, r#"{"ref1":"/a.png"}"#).unwrap();
        let out2 = native_compile(DOC, "{}").unwrap();
        assert!(out1.pages[0].jsx.contains("/a.png"));
        assert!(!out2.pages[0].jsx.contains("/a.png"));
    }
}
