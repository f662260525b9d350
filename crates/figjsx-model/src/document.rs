//! Document loading.
//!
//! Accepts either a full file response (`{ "document": {...}, ... }`) or a
//! bare node tree, as produced by the node and file endpoints.

use crate::node::Node;
use crate::ParseError;
use serde::Deserialize;
use serde_json::Value;

/// Parse a design file or a bare node tree and return its root node.
pub fn parse_document(source: &str) -> Result<Node, ParseError> {
    let value: Value = serde_json::from_str(source)?;
    let root = match value {
        Value::Object(mut map) => match map.remove("document") {
            Some(document) => document,
            None if map.contains_key("id") && map.contains_key("type") => Value::Object(map),
            None => return Err(ParseError::MissingDocument),
        },
        _ => return Err(ParseError::MissingDocument),
    };
    node_from_value(root)
}

/// Parse a single node tree. Unlike [`parse_document`], no envelope is
/// recognised.
pub fn parse_node(source: &str) -> Result<Node, ParseError> {
    Ok(serde_json::from_str(source)?)
}

fn node_from_value(value: Value) -> Result<Node, ParseError> {
    Node::deserialize(value).map_err(|e| ParseError::Schema {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_response() {
        let doc = parse_document(
            r#"{"name":"Landing","document":{"id":"0:0","name":"Document","type":"DOCUMENT","children":[]}}"#,
        )
        .unwrap();
        assert_eq!(doc.kind, NodeKind::Document);
        assert_eq!(doc.id, "0:0");
    }

    #[test]
    fn test_bare_node() {
        let doc = parse_document(r#"{"id":"1:1","type":"FRAME","name":"Hero"}"#).unwrap();
        assert_eq!(doc.kind, NodeKind::Frame);
        assert_eq!(doc.name, "Hero");
    }

    #[test]
    fn test_missing_document() {
        let err = parse_document(r#"{"name":"Landing","version":"1"}"#).unwrap_err();
        assert_eq!(err, ParseError::MissingDocument);
        let err = parse_document("[1, 2]").unwrap_err();
        assert_eq!(err, ParseError::MissingDocument);
    }

    #[test]
    fn test_syntax_error_has_position() {
        let err = parse_document("{\n  \"id\": ").unwrap_err();
        match err {
            ParseError::Syntax { line, .. } => assert_eq!(line, 2),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_schema_error() {
        let err = parse_document(r#"{"document":{"id":"0","type":"FRAME","children":"nope"}}"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::Schema { .. }));
    }

    #[test]
    fn test_parse_node() {
        let node = parse_node(r#"{"id":"2:3","type":"TEXT","characters":"Hi"}"#).unwrap();
        assert_eq!(node.characters.as_deref(), Some("Hi"));
    }
}
