//! figjsx code generator
//!
//! Turns a design document tree into JSX with Tailwind utility classes.
//! [`style`] derives the class string for a single node; [`jsx`] walks the
//! tree and emits markup; [`compile`] renders every page frame and
//! component definition of a document.
//!
//! ```text
//! Node tree + tables → compile() → CompilerOutput { pages, components }
//! ```

pub mod classify;
pub mod collect;
pub mod jsx;
pub mod module;
pub mod style;

pub use classify::{NodeClassifier, TagClassifier};
pub use jsx::{render, Escaping, RenderContext, RenderOptions, FALLBACK_COMPONENT};
pub use module::component_module;
pub use style::{class_string, derive_classes};

use collect::NameAllocator;
use figjsx_model::{Node, NodeKind};

/// One rendered root: a page frame or a component definition.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedComponent {
    pub id: String,
    pub name: String,
    pub component_name: String,
    pub jsx: String,
}

/// The compiled output for a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilerOutput {
    /// Top-level frames of every page, in document order.
    pub pages: Vec<GeneratedComponent>,
    /// Every visible component definition, in document order.
    pub components: Vec<GeneratedComponent>,
}

impl CompilerOutput {
    /// Pages first, then components.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedComponent> {
        self.pages.iter().chain(self.components.iter())
    }
}

/// Code generation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Codegen error: {message}")]
pub struct CodegenError {
    pub message: String,
}

/// Render every page frame and component definition under `root`.
///
/// Component definitions are named from `ctx.components`; page frames get
/// fresh PascalCase names that do not collide with them.
pub fn compile(root: &Node, ctx: &RenderContext) -> CompilerOutput {
    let mut output = CompilerOutput::default();

    let mut names = NameAllocator::new();
    for name in ctx.components.values() {
        names.reserve(name);
    }

    let mut definitions = Vec::new();
    visible_components(root, &mut definitions);
    for node in definitions {
        let component_name = match ctx.components.get(&node.id) {
            Some(name) => name.clone(),
            None => names.allocate(&node.name),
        };
        output.components.push(GeneratedComponent {
            id: node.id.clone(),
            name: node.name.clone(),
            component_name,
            jsx: render(node, ctx),
        });
    }

    for frame in page_roots(root) {
        output.pages.push(GeneratedComponent {
            id: frame.id.clone(),
            name: frame.name.clone(),
            component_name: names.allocate(&frame.name),
            jsx: render(frame, ctx),
        });
    }

    log::debug!(
        "compiled {} pages and {} components",
        output.pages.len(),
        output.components.len()
    );
    output
}

/// Component definitions in document order. Hidden subtrees are not
/// entered, so a definition under a hidden frame or page is skipped.
fn visible_components<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    if !node.is_visible() {
        return;
    }
    if node.kind == NodeKind::Component {
        out.push(node);
    }
    for child in node.children() {
        visible_components(child, out);
    }
}

/// Visible top-level frames of each page. Component definitions are
/// rendered separately and skipped here.
fn page_roots(root: &Node) -> Vec<&Node> {
    let canvases: Vec<&Node> = match root.kind {
        NodeKind::Document => root.children().iter().collect(),
        NodeKind::Canvas => vec![root],
        _ => return if root.is_visible() { vec![root] } else { vec![] },
    };
    canvases
        .into_iter()
        .filter(|canvas| canvas.is_visible())
        .flat_map(|canvas| canvas.children())
        .filter(|node| {
            node.is_visible()
                && !matches!(node.kind, NodeKind::Component | NodeKind::ComponentSet)
        })
        .collect()
}

/// Format a number, removing `.0` for integers.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figjsx_model::parse_document;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.0), "0");
    }

    fn compile_json(json: &str) -> CompilerOutput {
        let root = parse_document(json).unwrap();
        let components = collect::component_names(&root);
        let images = HashMap::new();
        let ctx = RenderContext::new(&components, &images);
        compile(&root, &ctx)
    }

    #[test]
    fn test_compile_empty_document() {
        let output = compile_json(r#"{"document":{"id":"0:0","type":"DOCUMENT","children":[]}}"#);
        assert_eq!(output, CompilerOutput::default());
    }

    #[test]
    fn test_compile_pages_and_components() {
        let output = compile_json(
            r#"{"document":{"id":"0:0","type":"DOCUMENT","children":[
                {"id":"0:1","name":"Page 1","type":"CANVAS","children":[
                    {"id":"1:1","name":"Card","type":"COMPONENT","children":[
                        {"id":"1:2","type":"TEXT","characters":"Title"}]},
                    {"id":"2:1","name":"Card","type":"FRAME","children":[
                        {"id":"2:2","type":"INSTANCE","componentId":"1:1"}]},
                    {"id":"3:1","name":"Draft","type":"FRAME","visible":false}]},
                {"id":"0:2","name":"Hidden page","type":"CANVAS","visible":false,"children":[
                    {"id":"4:1","name":"Other","type":"FRAME"}]}]}}"#,
        );

        assert_eq!(output.components.len(), 1);
        assert_eq!(output.components[0].component_name, "Card");
        assert_eq!(
            output.components[0].jsx,
            "<div className=\"\"><p className=\"\">Title</p></div>"
        );

        assert_eq!(output.pages.len(), 1);
        assert_eq!(output.pages[0].id, "2:1");
        assert_eq!(output.pages[0].component_name, "Card2");
        assert_eq!(
            output.pages[0].jsx,
            "<div className=\"\"><Card className=\"\"></Card></div>"
        );

        let ids: Vec<&str> = output.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2:1", "1:1"]);
    }

    #[test]
    fn test_components_under_hidden_frames_are_skipped() {
        let doc = json!({
            "document": {
                "id": "0:0",
                "type": "DOCUMENT",
                "children": [
                    {
                        "id": "0:1",
                        "type": "CANVAS",
                        "children": [
                            {
                                "id": "1:1",
                                "name": "Archive",
                                "type": "FRAME",
                                "visible": false,
                                "children": [
                                    { "id": "1:2", "name": "Secret", "type": "COMPONENT" }
                                ]
                            },
                            { "id": "2:1", "name": "Shown", "type": "COMPONENT" }
                        ]
                    },
                    {
                        "id": "0:2",
                        "type": "CANVAS",
                        "visible": false,
                        "children": [
                            { "id": "3:1", "name": "Drafted", "type": "COMPONENT" }
                        ]
                    }
                ]
            }
        });
        let output = compile_json(&doc.to_string());
        let names: Vec<&str> = output
            .components
            .iter()
            .map(|c| c.component_name.as_str())
            .collect();
        assert_eq!(names, vec!["Shown"]);
        assert!(output.pages.is_empty());
    }

    #[test]
    fn test_compile_bare_frame() {
        let output = compile_json(r#"{"id":"5:5","name":"hero section","type":"FRAME"}"#);
        assert_eq!(output.pages.len(), 1);
        assert_eq!(output.pages[0].component_name, "HeroSection");
        assert_eq!(output.pages[0].jsx, "<section className=\"\"></section>");
    }
}
