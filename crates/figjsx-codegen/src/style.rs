//! Tailwind class derivation.
//!
//! Maps one node's visual attributes to utility-class tokens. Fifteen
//! independent extractors run in a fixed order; their output is
//! concatenated, empty tokens are dropped, and repeats keep their first
//! position. Only the node itself is consulted, never its children.

use crate::format_number;
use figjsx_model::node::{
    AxisAlign, GridPattern, LayoutMode, LayoutPositioning, LayoutWrap, SizingMode, StrokeAlign,
    TextAlignHorizontal, TextAlignVertical, TextCase, TextDecoration,
};
use figjsx_model::{EffectKind, Node, NodeKind, PaintKind, Rgba};

type Extractor = fn(&Node, &mut Vec<String>);

/// Extractors in output order.
const EXTRACTORS: [Extractor; 15] = [
    opacity,
    layout,
    position,
    dimensions,
    flex_item,
    margins,
    fill,
    background,
    border,
    corners,
    effects,
    typography,
    overflow,
    blend,
    transition,
];

/// Default color for shadows that carry no color of their own.
const SHADOW_FALLBACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.25);

/// Derive the ordered, deduplicated class tokens for a node.
pub fn derive_classes(node: &Node) -> Vec<String> {
    let mut raw = Vec::new();
    for extract in EXTRACTORS {
        extract(node, &mut raw);
    }

    let mut tokens: Vec<String> = Vec::with_capacity(raw.len());
    for token in raw {
        if !token.is_empty() && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// The class tokens joined with single spaces.
pub fn class_string(node: &Node) -> String {
    derive_classes(node).join(" ")
}

/// `Some(n)` when the field is present and nonzero.
fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn px(prefix: &str, value: f64) -> String {
    format!("{prefix}-[{}px]", format_number(value))
}

fn percent(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

fn opacity(node: &Node, out: &mut Vec<String>) {
    if let Some(o) = node.opacity.filter(|o| *o < 1.0) {
        out.push(format!("opacity-[{}]", percent(o)));
    }
}

fn layout(node: &Node, out: &mut Vec<String>) {
    match node.layout_mode {
        Some(mode @ (LayoutMode::Horizontal | LayoutMode::Vertical)) => {
            flex_container(node, mode, out)
        }
        _ => grid_container(node, out),
    }
}

fn flex_container(node: &Node, mode: LayoutMode, out: &mut Vec<String>) {
    out.push("flex".into());
    out.push(
        if mode == LayoutMode::Horizontal {
            "flex-row"
        } else {
            "flex-col"
        }
        .into(),
    );
    if node.layout_wrap == Some(LayoutWrap::Wrap) {
        out.push("flex-wrap".into());
    }

    let justify = match node.primary_axis_align_items {
        Some(AxisAlign::Min) => Some("justify-start"),
        Some(AxisAlign::Center) => Some("justify-center"),
        Some(AxisAlign::Max) => Some("justify-end"),
        Some(AxisAlign::SpaceBetween) => Some("justify-between"),
        Some(AxisAlign::SpaceAround) => Some("justify-around"),
        _ => None,
    };
    out.extend(justify.map(String::from));

    let items = match node.counter_axis_align_items {
        Some(AxisAlign::Min) => Some("items-start"),
        Some(AxisAlign::Center) => Some("items-center"),
        Some(AxisAlign::Max) => Some("items-end"),
        Some(AxisAlign::Baseline) => Some("items-baseline"),
        Some(AxisAlign::Stretch) => Some("items-stretch"),
        _ => None,
    };
    out.extend(items.map(String::from));

    if node.primary_axis_sizing_mode == Some(SizingMode::Auto) {
        out.push("flex-auto".into());
    }
    if node.counter_axis_sizing_mode == Some(SizingMode::Auto) {
        out.push("self-auto".into());
    }
    if let Some(gap) = nonzero(node.item_spacing) {
        out.push(px("gap", gap));
    }

    let paddings = [
        ("pl", node.padding_left),
        ("pr", node.padding_right),
        ("pt", node.padding_top),
        ("pb", node.padding_bottom),
    ];
    for (prefix, value) in paddings {
        if let Some(v) = nonzero(value) {
            out.push(px(prefix, v));
        }
    }
}

/// Only the first layout grid is translated.
fn grid_container(node: &Node, out: &mut Vec<String>) {
    let Some(grid) = node.layout_grids.first() else {
        return;
    };
    out.push("grid".into());

    let count = grid
        .count
        .filter(|c| *c > 0)
        .map_or_else(|| "auto".to_string(), |c| c.to_string());
    match grid.pattern {
        GridPattern::Grid => out.push("grid-cols-auto".into()),
        GridPattern::Columns => out.push(format!("grid-cols-{count}")),
        GridPattern::Rows => out.push(format!("grid-rows-{count}")),
        GridPattern::Unknown => {}
    }

    if let Some(gutter) = nonzero(grid.gutter_size) {
        out.push(px("gap", gutter));
    }
    if let Some(section) = nonzero(grid.section_size) {
        out.push(px("auto-cols", section));
    }
}

fn position(node: &Node, out: &mut Vec<String>) {
    if node.layout_positioning == Some(LayoutPositioning::Absolute) {
        out.push("absolute".into());
    }
    if let Some(x) = node.x {
        out.push(px("left", x));
    }
    if let Some(y) = node.y {
        out.push(px("top", y));
    }
    if let Some(r) = nonzero(node.rotation) {
        out.push(format!("rotate-[{}deg]", format_number(r)));
    }
}

fn dimensions(node: &Node, out: &mut Vec<String>) {
    let (width, height) = node.dimensions();
    let sizes = [
        ("w", width),
        ("h", height),
        ("min-w", node.min_width),
        ("max-w", node.max_width),
        ("min-h", node.min_height),
        ("max-h", node.max_height),
    ];
    for (prefix, value) in sizes {
        if let Some(v) = nonzero(value) {
            out.push(px(prefix, v));
        }
    }
}

fn flex_item(node: &Node, out: &mut Vec<String>) {
    if let Some(grow) = nonzero(node.flex_grow) {
        out.push(format!("grow-[{}]", format_number(grow)));
    }
    if let Some(shrink) = nonzero(node.flex_shrink) {
        out.push(format!("shrink-[{}]", format_number(shrink)));
    }
    let basis = node.flex_basis.as_ref().and_then(|b| b.length());
    if let Some(basis) = nonzero(basis) {
        out.push(px("basis", basis));
    }
}

fn margins(node: &Node, out: &mut Vec<String>) {
    let margins = [
        ("ml", node.margin_left),
        ("mr", node.margin_right),
        ("mt", node.margin_top),
        ("mb", node.margin_bottom),
    ];
    for (prefix, value) in margins {
        if let Some(v) = nonzero(value) {
            out.push(px(prefix, v));
        }
    }
}

fn fill(node: &Node, out: &mut Vec<String>) {
    let Some(paint) = node
        .fills
        .iter()
        .find(|f| f.is_visible())
        .or_else(|| node.fills.first())
    else {
        return;
    };

    match &paint.kind {
        PaintKind::Solid { color } => {
            if let Some(color) = color {
                out.push(format!("bg-[{}]", color.to_hex()));
            }
            if let Some(o) = paint.opacity.filter(|o| *o < 1.0) {
                out.push(format!("bg-opacity-[{}]", percent(o)));
            }
        }
        // Intermediate stops are dropped: only the endpoints are encoded.
        PaintKind::Gradient { stops, .. } => {
            out.push("bg-gradient-to-r".into());
            if let (Some(first), Some(last)) = (stops.first(), stops.last()) {
                out.push(format!("from-[{}]", first.color.to_hex()));
                out.push(format!("to-[{}]", last.color.to_hex()));
            }
        }
        PaintKind::Image { .. } | PaintKind::Unsupported(_) => {}
    }
}

fn background(node: &Node, out: &mut Vec<String>) {
    if let Some(PaintKind::Solid { color: Some(color) }) = node.background.first().map(|p| &p.kind)
    {
        out.push(format!("bg-[{}]", color.to_hex()));
    }
}

fn border(node: &Node, out: &mut Vec<String>) {
    let (Some(stroke), Some(weight)) = (node.strokes.first(), nonzero(node.stroke_weight)) else {
        return;
    };
    if let PaintKind::Solid { color: Some(color) } = &stroke.kind {
        out.push(px("border", weight));
        out.push("border-solid".into());
        out.push(format!("border-[{}]", color.to_hex()));
        if node.stroke_align == Some(StrokeAlign::Inside) {
            out.push("border-inside".into());
        }
    }
}

fn corners(node: &Node, out: &mut Vec<String>) {
    if let Some(radius) = node.corner_radius.filter(|r| *r > 0.0) {
        out.push(px("rounded", radius));
        return;
    }
    let corners = [
        ("rounded-tl", node.top_left_radius),
        ("rounded-tr", node.top_right_radius),
        ("rounded-bl", node.bottom_left_radius),
        ("rounded-br", node.bottom_right_radius),
    ];
    for (prefix, value) in corners {
        if let Some(v) = nonzero(value) {
            out.push(px(prefix, v));
        }
    }
}

fn effects(node: &Node, out: &mut Vec<String>) {
    for effect in node.effects.iter().filter(|e| e.is_visible()) {
        let radius = format_number(effect.radius.unwrap_or(0.0));
        match effect.kind {
            EffectKind::DropShadow | EffectKind::InnerShadow => {
                let inset = if effect.kind == EffectKind::InnerShadow {
                    "inset_"
                } else {
                    ""
                };
                let offset = effect.offset.unwrap_or_default();
                let color = effect.color.unwrap_or(SHADOW_FALLBACK);
                out.push(format!(
                    "shadow-[{inset}{}px_{}px_{radius}px_{}px_{}]",
                    format_number(offset.x),
                    format_number(offset.y),
                    format_number(effect.spread.unwrap_or(0.0)),
                    color.to_rgba_string(),
                ));
            }
            EffectKind::LayerBlur | EffectKind::BackgroundBlur => {
                out.push(format!("blur-[{radius}px]"));
            }
            EffectKind::Unknown => {}
        }
    }

    if !node.effects.is_empty() {
        out.push("hover:shadow-lg".into());
        out.push("transition-shadow".into());
        out.push("duration-200".into());
    }
}

fn typography(node: &Node, out: &mut Vec<String>) {
    if node.kind != NodeKind::Text {
        return;
    }
    let t = node.typography();

    if let Some(size) = nonzero(t.font_size) {
        out.push(px("text", size));
    }
    if let Some(family) = t.font_family.filter(|f| !f.trim().is_empty()) {
        let slug = family
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        out.push(format!("font-{slug}"));
    }
    if let Some(weight) = nonzero(t.font_weight) {
        let token = if weight >= 700.0 {
            "font-bold"
        } else if weight >= 500.0 {
            "font-medium"
        } else {
            "font-normal"
        };
        out.push(token.into());
    }
    if let Some(leading) = nonzero(t.line_height_px) {
        out.push(px("leading", leading));
    }
    if let Some(tracking) = nonzero(t.letter_spacing) {
        out.push(px("tracking", tracking));
    }

    let align = match t.align_horizontal {
        Some(TextAlignHorizontal::Center) => Some("text-center"),
        Some(TextAlignHorizontal::Right) => Some("text-right"),
        Some(TextAlignHorizontal::Justified) => Some("text-justify"),
        _ => None,
    };
    let valign = match t.align_vertical {
        Some(TextAlignVertical::Center) => Some("align-middle"),
        Some(TextAlignVertical::Bottom) => Some("align-bottom"),
        _ => None,
    };
    let case = match t.text_case {
        Some(TextCase::Upper) => Some("uppercase"),
        Some(TextCase::Lower) => Some("lowercase"),
        Some(TextCase::Title) => Some("capitalize"),
        _ => None,
    };
    let decoration = match t.decoration {
        Some(TextDecoration::Underline) => Some("underline"),
        Some(TextDecoration::Strikethrough) => Some("line-through"),
        _ => None,
    };
    out.extend(
        [align, valign, case, decoration]
            .into_iter()
            .flatten()
            .map(String::from),
    );
}

fn overflow(node: &Node, out: &mut Vec<String>) {
    if node.clips_content == Some(true) {
        out.push("overflow-hidden".into());
    }
    if node.is_mask == Some(true) {
        out.push("mask-image".into());
    }
}

fn blend(node: &Node, out: &mut Vec<String>) {
    if let Some(mode) = node.blend_mode.as_deref().filter(|m| !m.is_empty()) {
        out.push(format!("mix-blend-{}", mode.to_lowercase()));
    }
}

/// The easing curve itself is not encoded; any easing maps to `ease-in-out`.
fn transition(node: &Node, out: &mut Vec<String>) {
    if let Some(duration) = nonzero(node.transition_duration) {
        out.push("transition".into());
        out.push(format!("duration-[{}ms]", format_number(duration)));
    }
    if node
        .transition_easing
        .as_deref()
        .is_some_and(|e| !e.is_empty())
    {
        out.push("ease-in-out".into());
    }
}
