//! Lookup-table collection.
//!
//! Builds the component-name table from the component definitions in a
//! document, and lists the image refs an external downloader must resolve
//! before rendering.

use figjsx_model::{Node, NodeKind};
use std::collections::{HashMap, HashSet};

/// Hands out unique PascalCase identifiers, suffixing repeats with `2`, `3`, ...
#[derive(Debug, Default)]
pub struct NameAllocator {
    used: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a name as taken without allocating it.
    pub fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }

    pub fn allocate(&mut self, layer_name: &str) -> String {
        let base = pascal_case(layer_name);
        let mut candidate = base.clone();
        let mut n = 2;
        while self.used.contains(&candidate) {
            candidate = format!("{base}{n}");
            n += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Convert a layer name to a PascalCase identifier.
///
/// `"primary button/hover"` → `"PrimaryButtonHover"`. Names that would not
/// start with a letter get a `Component` prefix.
pub fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    match out.chars().next() {
        None => "Component".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Component{out}"),
        Some(_) => out,
    }
}

/// Map every component definition's id to a unique identifier derived
/// from its name. Hidden definitions are included: instances can still
/// reference them.
pub fn component_names(root: &Node) -> HashMap<String, String> {
    let mut names = NameAllocator::new();
    let mut table = HashMap::new();
    root.walk(&mut |node| {
        if node.kind == NodeKind::Component {
            let name = names.allocate(&node.name);
            log::trace!("component {} -> {name}", node.id);
            table.insert(node.id.clone(), name);
        }
    });
    table
}

/// Distinct image refs used by fills of visible nodes, in render order.
pub fn image_refs(root: &Node) -> Vec<String> {
    let mut refs = Vec::new();
    collect_image_refs(root, &mut refs);
    refs
}

fn collect_image_refs(node: &Node, refs: &mut Vec<String>) {
    if !node.is_visible() {
        return;
    }
    for image_ref in node.fills.iter().filter_map(|f| f.image_ref()) {
        if !refs.iter().any(|r| r == image_ref) {
            refs.push(image_ref.to_string());
        }
    }
    for child in node.children() {
        collect_image_refs(child, refs);
    }
}
