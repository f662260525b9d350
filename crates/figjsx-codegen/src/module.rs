//! Component module wrapper.
//!
//! Wraps rendered JSX in a default-exported React function component,
//! with imports for `next/image` and any sibling components it references.

use crate::CodegenError;

/// Build a `.jsx` module for one rendered root.
///
/// `known_components` lists the component names that live next to this
/// module; only the ones the markup actually uses are imported.
pub fn component_module(
    name: &str,
    jsx: &str,
    known_components: &[&str],
) -> Result<String, CodegenError> {
    if !is_component_identifier(name) {
        return Err(CodegenError {
            message: format!("'{name}' is not a valid component name"),
        });
    }

    let mut out = String::new();
    if uses_tag(jsx, "Image") {
        out.push_str("import Image from 'next/image';\n");
    }
    let mut imported: Vec<&str> = Vec::new();
    for component in known_components {
        if *component != name && !imported.contains(component) && uses_tag(jsx, component) {
            out.push_str(&format!("import {component} from './{component}';\n"));
            imported.push(*component);
        }
    }
    if !out.is_empty() {
        out.push('\n');
    }

    out.push_str(&format!("export default function {name}() {{\n"));
    if jsx.is_empty() {
        out.push_str("  return null;\n");
    } else {
        out.push_str("  return (\n");
        for line in jsx.lines() {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("  );\n");
    }
    out.push_str("}\n");

    Ok(out)
}

/// Whether `<tag` appears as a complete tag name.
fn uses_tag(jsx: &str, tag: &str) -> bool {
    let needle = format!("<{tag}");
    jsx.match_indices(&needle).any(|(i, _)| {
        matches!(
            jsx[i + needle.len()..].chars().next(),
            Some(' ' | '>' | '/' | '\n')
        )
    })
}

/// React components must start with an upper-case letter.
fn is_component_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
