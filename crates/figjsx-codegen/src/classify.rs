//! Node classification.
//!
//! The markup generator asks a classifier for the tag of every node that is
//! not an instance, text, or image. Callers can inject their own; the
//! default looks at the layer name first, then at the node kind.

use figjsx_model::{Node, NodeKind};

/// Maps a node to the tag used when no more specific variant applies.
/// Must be total: every node gets a tag.
pub trait NodeClassifier {
    fn classify(&self, node: &Node) -> String;
}

impl<F> NodeClassifier for F
where
    F: Fn(&Node) -> String,
{
    fn classify(&self, node: &Node) -> String {
        self(node)
    }
}

/// Name hints, then a per-kind fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagClassifier;

impl NodeClassifier for TagClassifier {
    fn classify(&self, node: &Node) -> String {
        tag_from_name(&node.name)
            .unwrap_or_else(|| tag_for_kind(node.kind))
            .to_string()
    }
}

/// Semantic tag suggested by a word in the layer name.
fn tag_from_name(name: &str) -> Option<&'static str> {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .find_map(|word| match word.to_lowercase().as_str() {
            "button" | "btn" | "cta" => Some("button"),
            "header" => Some("header"),
            "nav" | "navbar" | "navigation" | "menu" => Some("nav"),
            "footer" => Some("footer"),
            "section" => Some("section"),
            "sidebar" | "aside" => Some("aside"),
            "link" => Some("a"),
            _ => None,
        })
}

fn tag_for_kind(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Document => "main",
        NodeKind::Canvas | NodeKind::Section => "section",
        NodeKind::Text => "p",
        NodeKind::Vector
        | NodeKind::Line
        | NodeKind::Ellipse
        | NodeKind::RegularPolygon
        | NodeKind::Star
        | NodeKind::BooleanOperation => "svg",
        NodeKind::Frame
        | NodeKind::Group
        | NodeKind::Rectangle
        | NodeKind::Component
        | NodeKind::ComponentSet
        | NodeKind::Instance
        | NodeKind::Slice
        | NodeKind::Unknown => "div",
    }
}
