//! The design document tree.
//!
//! A single `Node` struct covers every kind. Attribute groups (layout,
//! geometry, appearance, typography) are independent, so each field is an
//! `Option` and absence always means "not set".

use crate::paint::{Effect, Paint};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Node kinds and layout enums
// ---------------------------------------------------------------------------

/// Node type as reported by the design tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Vector,
    Rectangle,
    Line,
    Ellipse,
    RegularPolygon,
    Star,
    BooleanOperation,
    Text,
    Component,
    ComponentSet,
    Instance,
    Slice,
    #[default]
    #[serde(other)]
    Unknown,
}

impl NodeKind {
    /// Shape kinds drawn from vector geometry.
    pub fn is_vector(self) -> bool {
        matches!(
            self,
            NodeKind::Vector
                | NodeKind::Line
                | NodeKind::Ellipse
                | NodeKind::RegularPolygon
                | NodeKind::Star
                | NodeKind::BooleanOperation
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    None,
    Horizontal,
    Vertical,
    #[serde(other)]
    Unknown,
}

/// Alignment along an auto-layout axis. Primary and counter axes share one
/// enum; each axis only maps the values it supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    Min,
    Center,
    Max,
    SpaceBetween,
    SpaceAround,
    Baseline,
    Stretch,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizingMode {
    Auto,
    Fixed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutWrap {
    NoWrap,
    Wrap,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutPositioning {
    Auto,
    Absolute,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridPattern {
    Columns,
    Rows,
    Grid,
    #[serde(other)]
    Unknown,
}

/// A layout grid attached to a frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutGrid {
    pub pattern: GridPattern,
    pub count: Option<i64>,
    pub gutter_size: Option<f64>,
    pub section_size: Option<f64>,
}

/// `flexBasis` is either a length or the `"AUTO"` keyword.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexBasis {
    Length(f64),
    Keyword(String),
}

impl FlexBasis {
    /// The length, if this is not a keyword.
    pub fn length(&self) -> Option<f64> {
        match self {
            FlexBasis::Length(n) => Some(*n),
            FlexBasis::Keyword(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeAlign {
    Inside,
    Outside,
    Center,
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// Typography enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignHorizontal {
    Left,
    Center,
    Right,
    Justified,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignVertical {
    Top,
    Center,
    Bottom,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    Original,
    Upper,
    Lower,
    Title,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    None,
    Underline,
    Strikethrough,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontName {
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub style: String,
}

/// Type style nested under `style` in file responses.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub line_height_px: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub text_align_horizontal: Option<TextAlignHorizontal>,
    pub text_align_vertical: Option<TextAlignVertical>,
    pub text_case: Option<TextCase>,
    pub text_decoration: Option<TextDecoration>,
}

/// Resolved typography for a text node: node-level fields first, then the
/// nested type style.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Typography<'a> {
    pub font_family: Option<&'a str>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub line_height_px: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub align_horizontal: Option<TextAlignHorizontal>,
    pub align_vertical: Option<TextAlignVertical>,
    pub text_case: Option<TextCase>,
    pub decoration: Option<TextDecoration>,
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentRef {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One element of the design tree.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub visible: Option<bool>,
    pub children: Option<Vec<Node>>,

    // Layout
    pub layout_mode: Option<LayoutMode>,
    pub layout_wrap: Option<LayoutWrap>,
    pub layout_grids: Vec<LayoutGrid>,
    pub layout_positioning: Option<LayoutPositioning>,
    pub primary_axis_align_items: Option<AxisAlign>,
    pub counter_axis_align_items: Option<AxisAlign>,
    pub primary_axis_sizing_mode: Option<SizingMode>,
    pub counter_axis_sizing_mode: Option<SizingMode>,
    pub item_spacing: Option<f64>,
    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,

    // Geometry
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rotation: Option<f64>,
    pub absolute_bounding_box: Option<Rect>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    pub margin_left: Option<f64>,
    pub margin_right: Option<f64>,
    pub margin_top: Option<f64>,
    pub margin_bottom: Option<f64>,
    pub flex_grow: Option<f64>,
    pub flex_shrink: Option<f64>,
    pub flex_basis: Option<FlexBasis>,

    // Appearance
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub background: Vec<Paint>,
    pub opacity: Option<f64>,
    pub effects: Vec<Effect>,
    pub blend_mode: Option<String>,
    pub corner_radius: Option<f64>,
    pub top_left_radius: Option<f64>,
    pub top_right_radius: Option<f64>,
    pub bottom_left_radius: Option<f64>,
    pub bottom_right_radius: Option<f64>,
    pub stroke_weight: Option<f64>,
    pub stroke_align: Option<StrokeAlign>,

    // Typography
    pub characters: Option<String>,
    pub font_size: Option<f64>,
    pub font_name: Option<FontName>,
    pub font_weight: Option<f64>,
    pub line_height_px: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub text_align_horizontal: Option<TextAlignHorizontal>,
    pub text_align_vertical: Option<TextAlignVertical>,
    pub text_case: Option<TextCase>,
    pub text_decoration: Option<TextDecoration>,
    pub style: Option<TypeStyle>,

    // Clipping and transitions
    pub clips_content: Option<bool>,
    pub is_mask: Option<bool>,
    pub transition_duration: Option<f64>,
    pub transition_easing: Option<String>,

    // Instances
    pub component_id: Option<String>,
    pub main_component: Option<ComponentRef>,
}

impl Node {
    pub fn new(id: &str, name: &str, kind: NodeKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            ..Self::default()
        }
    }

    /// A node without an explicit `visible: false` is visible.
    pub fn is_visible(&self) -> bool {
        self.visible != Some(false)
    }

    /// Children in render order; empty for leaves.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Width and height from the bounding box, falling back to the raw
    /// size fields when the box is absent or zero-sized on that axis.
    pub fn dimensions(&self) -> (Option<f64>, Option<f64>) {
        let bbox = self.absolute_bounding_box;
        let width = bbox
            .map(|b| b.width)
            .filter(|w| *w != 0.0)
            .or(self.width);
        let height = bbox
            .map(|b| b.height)
            .filter(|h| *h != 0.0)
            .or(self.height);
        (width, height)
    }

    /// The component this instance points at: `mainComponent.id` first,
    /// then `componentId`.
    pub fn component_ref(&self) -> Option<&str> {
        self.main_component
            .as_ref()
            .map(|c| c.id.as_str())
            .filter(|id| !id.is_empty())
            .or_else(|| self.component_id.as_deref().filter(|id| !id.is_empty()))
    }

    /// First image fill, visible or not.
    pub fn image_fill(&self) -> Option<&Paint> {
        self.fills.iter().find(|f| f.is_image())
    }

    /// Typography with node-level fields taking precedence over `style`.
    pub fn typography(&self) -> Typography<'_> {
        let style = self.style.as_ref();
        Typography {
            font_family: self
                .font_name
                .as_ref()
                .map(|f| f.family.as_str())
                .filter(|f| !f.is_empty())
                .or_else(|| style.and_then(|s| s.font_family.as_deref())),
            font_size: self.font_size.or(style.and_then(|s| s.font_size)),
            font_weight: self.font_weight.or(style.and_then(|s| s.font_weight)),
            line_height_px: self
                .line_height_px
                .or(style.and_then(|s| s.line_height_px)),
            letter_spacing: self
                .letter_spacing
                .or(style.and_then(|s| s.letter_spacing)),
            align_horizontal: self
                .text_align_horizontal
                .or(style.and_then(|s| s.text_align_horizontal)),
            align_vertical: self
                .text_align_vertical
                .or(style.and_then(|s| s.text_align_vertical)),
            text_case: self.text_case.or(style.and_then(|s| s.text_case)),
            decoration: self
                .text_decoration
                .or(style.and_then(|s| s.text_decoration)),
        }
    }

    /// Pre-order traversal over this node and every descendant, hidden
    /// ones included.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Find a node by id anywhere in this subtree.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }
}
