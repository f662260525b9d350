//! JSX generator.
//!
//! Walks a node tree depth-first and emits one JSX string per subtree.
//! Each visible node gets its class string from [`crate::style`], then is
//! emitted as a component instance, a text paragraph, a `next/image`
//! element, or a classified container wrapping its children.

use crate::classify::{NodeClassifier, TagClassifier};
use crate::format_number;
use crate::style;
use figjsx_model::{Node, NodeKind, Paint};
use std::collections::HashMap;

/// Tag used for instances whose component is missing from the table.
pub const FALLBACK_COMPONENT: &str = "UnknownComponent";

static DEFAULT_CLASSIFIER: TagClassifier = TagClassifier;

/// How `characters` and `name` are embedded in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escaping {
    /// Substitute verbatim.
    #[default]
    Raw,
    /// Escape JSX-significant characters in text and attribute values.
    Jsx,
}

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub escaping: Escaping,
    pub fallback_component: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escaping: Escaping::Raw,
            fallback_component: FALLBACK_COMPONENT.to_string(),
        }
    }
}

/// Everything the generator consults besides the node itself.
pub struct RenderContext<'a> {
    /// Component id → component name.
    pub components: &'a HashMap<String, String>,
    /// Image ref → resolved path or URL.
    pub images: &'a HashMap<String, String>,
    pub classifier: &'a dyn NodeClassifier,
    pub options: RenderOptions,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        components: &'a HashMap<String, String>,
        images: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            components,
            images,
            classifier: &DEFAULT_CLASSIFIER,
            options: RenderOptions::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: &'a dyn NodeClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}

/// Which emission rule applies to a node. Checked in declaration order.
enum Variant<'n> {
    Instance,
    Text,
    Image(&'n Paint),
    Element,
}

fn variant(node: &Node) -> Variant<'_> {
    if node.kind == NodeKind::Instance {
        return Variant::Instance;
    }
    if node.kind == NodeKind::Text {
        return Variant::Text;
    }
    match node.image_fill() {
        Some(paint) => Variant::Image(paint),
        None => Variant::Element,
    }
}

/// Render a node and its visible descendants to JSX.
///
/// Hidden nodes render to an empty string and their subtree is not
/// visited. Lookup misses fall back instead of failing.
pub fn render(node: &Node, ctx: &RenderContext) -> String {
    if !node.is_visible() {
        log::debug!("skipping hidden node {} ({})", node.id, node.name);
        return String::new();
    }
    log::trace!("render {:?} {} ({})", node.kind, node.id, node.name);

    let class_name = style::class_string(node);

    match variant(node) {
        Variant::Instance => render_instance(node, &class_name, ctx),
        Variant::Text => render_text(node, &class_name, ctx),
        Variant::Image(paint) => render_image(node, paint, &class_name, ctx),
        Variant::Element => render_element(node, &class_name, ctx),
    }
}

/// Children in order, one per line. A hidden child keeps its (empty) line.
fn render_children(node: &Node, ctx: &RenderContext) -> String {
    node.children()
        .iter()
        .map(|child| render(child, ctx))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_instance(node: &Node, class_name: &str, ctx: &RenderContext) -> String {
    let resolved = node
        .component_ref()
        .and_then(|id| ctx.components.get(id));
    let name = match resolved {
        Some(name) => name.as_str(),
        None => {
            log::debug!(
                "instance {} references unknown component {:?}",
                node.id,
                node.component_ref()
            );
            ctx.options.fallback_component.as_str()
        }
    };
    let children = render_children(node, ctx);
    format!("<{name} className=\"{class_name}\">{children}</{name}>")
}

/// Text nodes are leaves for markup purposes; children are ignored.
fn render_text(node: &Node, class_name: &str, ctx: &RenderContext) -> String {
    let text = node.characters.as_deref().unwrap_or("");
    let text = match ctx.options.escaping {
        Escaping::Raw => text.to_string(),
        Escaping::Jsx => escape_text(text),
    };
    format!("<p className=\"{class_name}\">{text}</p>")
}

fn render_image(node: &Node, paint: &Paint, class_name: &str, ctx: &RenderContext) -> String {
    let src = match paint.image_ref().and_then(|r| ctx.images.get(r)) {
        Some(src) => src.as_str(),
        None => {
            log::debug!(
                "image {:?} of node {} has no resolved path",
                paint.image_ref(),
                node.id
            );
            ""
        }
    };
    let alt = match ctx.options.escaping {
        Escaping::Raw => node.name.clone(),
        Escaping::Jsx => escape_attr(&node.name),
    };
    let (width, height) = node.dimensions();
    format!(
        "<Image src=\"{src}\" alt=\"{alt}\" width={{{}}} height={{{}}} className=\"{class_name}\" />",
        format_number(width.unwrap_or(0.0)),
        format_number(height.unwrap_or(0.0)),
    )
}

fn render_element(node: &Node, class_name: &str, ctx: &RenderContext) -> String {
    let tag = ctx.classifier.classify(node);
    let children = render_children(node, ctx);
    format!("<{tag} className=\"{class_name}\">{children}</{tag}>")
}

/// Escape text content for JSX.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("{'{'}"),
            '}' => out.push_str("{'}'}"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a double-quoted JSX attribute value.
pub fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use figjsx_model::parse_node;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tables() -> (HashMap<String, String>, HashMap<String, String>) {
        let components = HashMap::from([("C1".to_string(), "Button".to_string())]);
        let images = HashMap::from([("img1".to_string(), "/images/img1.png".to_string())]);
        (components, images)
    }

    fn gen(json: &str) -> String {
        let (components, images) = tables();
        let ctx = RenderContext::new(&components, &images);
        render(&parse_node(json).unwrap(), &ctx)
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    #[test]
    fn test_hidden_node_renders_nothing() {
        assert_eq!(
            gen(r#"{"id":"1","type":"FRAME","visible":false,"children":[
                {"id":"2","type":"TEXT","characters":"secret"}]}"#),
            ""
        );
    }

    #[test]
    fn test_hidden_child_is_pruned() {
        let out = gen(
            r#"{"id":"1","type":"FRAME","children":[
                {"id":"2","type":"TEXT","characters":"shown"},
                {"id":"3","type":"FRAME","visible":false,"children":[
                    {"id":"4","type":"TEXT","characters":"secret"}]}]}"#,
        );
        assert_eq!(out, "<div className=\"\"><p className=\"\">shown</p>\n</div>");
    }

    #[test]
    fn test_hidden_child_keeps_empty_line() {
        let tree = json!({
            "id": "1",
            "type": "FRAME",
            "children": [
                { "id": "a", "type": "TEXT", "characters": "A" },
                { "id": "b", "type": "TEXT", "characters": "B", "visible": false },
                { "id": "c", "type": "TEXT", "characters": "C" }
            ]
        });
        assert_eq!(
            gen(&tree.to_string()),
            "<div className=\"\"><p className=\"\">A</p>\n\n<p className=\"\">C</p></div>"
        );
    }

    // =========================================================================
    // Variants
    // =========================================================================

    #[test]
    fn test_text_node() {
        assert_eq!(
            gen(r#"{"id":"1","type":"TEXT","visible":true,"characters":"Hi","fontWeight":800}"#),
            "<p className=\"font-bold\">Hi</p>"
        );
    }

    #[test]
    fn test_text_without_characters() {
        assert_eq!(gen(r#"{"id":"1","type":"TEXT"}"#), "<p className=\"\"></p>");
    }

    #[test]
    fn test_text_ignores_children() {
        assert_eq!(
            gen(r#"{"id":"1","type":"TEXT","characters":"Hi","children":[
                {"id":"2","type":"TEXT","characters":"nested"}]}"#),
            "<p className=\"\">Hi</p>"
        );
    }

    #[test]
    fn test_text_raw_by_default() {
        assert_eq!(
            gen(r#"{"id":"1","type":"TEXT","characters":"a < b {c}"}"#),
            "<p className=\"\">a < b {c}</p>"
        );
    }

    #[test]
    fn test_text_jsx_escaping() {
        let (components, images) = tables();
        let ctx = RenderContext::new(&components, &images).with_options(RenderOptions {
            escaping: Escaping::Jsx,
            ..RenderOptions::default()
        });
        let node = parse_node(r#"{"id":"1","type":"TEXT","characters":"a < b {c} & d"}"#).unwrap();
        assert_eq!(
            render(&node, &ctx),
            "<p className=\"\">a &lt; b {'{'}c{'}'} &amp; d</p>"
        );
    }

    #[test]
    fn test_instance_resolves_main_component() {
        assert_eq!(
            gen(r#"{"id":"1","type":"INSTANCE","mainComponent":{"id":"C1"},"componentId":"C9",
                "cornerRadius":4,"children":[{"id":"2","type":"TEXT","characters":"OK"}]}"#),
            "<Button className=\"rounded-[4px]\"><p className=\"\">OK</p></Button>"
        );
    }

    #[test]
    fn test_instance_falls_back_to_component_id() {
        assert_eq!(
            gen(r#"{"id":"1","type":"INSTANCE","componentId":"C1"}"#),
            "<Button className=\"\"></Button>"
        );
    }

    #[test]
    fn test_instance_miss_uses_fallback_name() {
        let components = HashMap::new();
        let images = HashMap::new();
        let ctx = RenderContext::new(&components, &images);
        let node = parse_node(r#"{"id":"1","type":"INSTANCE","mainComponent":{"id":"X"}}"#).unwrap();
        assert_eq!(
            render(&node, &ctx),
            "<UnknownComponent className=\"\"></UnknownComponent>"
        );
    }

    #[test]
    fn test_instance_ignores_characters_and_images() {
        assert_eq!(
            gen(r#"{"id":"1","type":"INSTANCE","componentId":"C1","characters":"no",
                "fills":[{"type":"IMAGE","imageRef":"img1"}]}"#),
            "<Button className=\"\"></Button>"
        );
    }

    #[test]
    fn test_image_node() {
        assert_eq!(
            gen(r#"{"id":"1","name":"Hero photo","type":"RECTANGLE",
                "absoluteBoundingBox":{"x":0,"y":0,"width":320,"height":200},
                "fills":[{"type":"IMAGE","imageRef":"img1","visible":false}]}"#),
            "<Image src=\"/images/img1.png\" alt=\"Hero photo\" width={320} height={200} \
             className=\"w-[320px] h-[200px]\" />"
        );
    }

    #[test]
    fn test_image_missing_from_table() {
        assert_eq!(
            gen(r#"{"id":"1","name":"Avatar","type":"ELLIPSE","cornerRadius":2,
                "fills":[{"type":"IMAGE","imageRef":"unknown"}]}"#),
            "<Image src=\"\" alt=\"Avatar\" width={0} height={0} className=\"rounded-[2px]\" />"
        );
    }

    #[test]
    fn test_default_element_uses_classifier() {
        assert_eq!(
            gen(r#"{"id":"1","name":"CTA Button","type":"FRAME","layoutMode":"HORIZONTAL",
                "primaryAxisAlignItems":"CENTER","itemSpacing":8}"#),
            "<button className=\"flex flex-row justify-center gap-[8px]\"></button>"
        );
    }

    #[test]
    fn test_injected_classifier() {
        let (components, images) = tables();
        let classifier = |node: &Node| format!("x-{}", node.id);
        let ctx = RenderContext::new(&components, &images).with_classifier(&classifier);
        let node = parse_node(r#"{"id":"7","type":"GROUP"}"#).unwrap();
        assert_eq!(render(&node, &ctx), "<x-7 className=\"\"></x-7>");
    }

    // =========================================================================
    // Ordering and determinism
    // =========================================================================

    #[test]
    fn test_children_order_preserved() {
        assert_eq!(
            gen(r#"{"id":"1","type":"FRAME","children":[
                {"id":"a","type":"TEXT","characters":"A"},
                {"id":"b","type":"TEXT","characters":"B"},
                {"id":"c","type":"TEXT","characters":"C"}]}"#),
            "<div className=\"\"><p className=\"\">A</p>\n<p className=\"\">B</p>\n<p className=\"\">C</p></div>"
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let (components, images) = tables();
        let ctx = RenderContext::new(&components, &images);
        let node = parse_node(
            r#"{"id":"1","type":"FRAME","children":[
                {"id":"2","type":"INSTANCE","componentId":"C1"},
                {"id":"3","type":"RECTANGLE","fills":[{"type":"IMAGE","imageRef":"img1"}]}]}"#,
        )
        .unwrap();
        assert_eq!(render(&node, &ctx), render(&node, &ctx));
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"Tom & "Jerry""#), "Tom &amp; &quot;Jerry&quot;");
    }
}
