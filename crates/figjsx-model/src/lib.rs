//! figjsx document model
//!
//! Typed representation of a design-tool document tree, deserialized from
//! the JSON the design tool serves. Every attribute is optional; the code
//! generator treats absence as "contributes nothing".
//!
//! ```
//! let root = figjsx_model::parse_document(
//!     r#"{"document":{"id":"0:0","type":"DOCUMENT","children":[]}}"#,
//! ).unwrap();
//! assert_eq!(root.kind, figjsx_model::NodeKind::Document);
//! ```

pub mod document;
pub mod node;
pub mod paint;

pub use document::{parse_document, parse_node};
pub use node::{Node, NodeKind, Typography};
pub use paint::{Effect, EffectKind, GradientKind, GradientStop, Paint, PaintKind, Rgba};

/// Error raised while loading a document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Parse error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
    #[error("Invalid document: {message}")]
    Schema { message: String },
    #[error("No document found in design file")]
    MissingDocument,
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_syntax() || e.is_eof() {
            ParseError::Syntax {
                message: e.to_string(),
                line: e.line(),
                column: e.column(),
            }
        } else {
            ParseError::Schema {
                message: e.to_string(),
            }
        }
    }
}
