//! Paints, colors, and effects.
//!
//! Design files describe fills and strokes as a `type` string plus a bag of
//! optional fields. These types turn the tag into a closed enum so callers
//! match exhaustively instead of comparing strings.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, with an `aa` pair appended only when alpha is below 1.
    pub fn to_hex(&self) -> String {
        let mut hex = format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        );
        if self.a < 1.0 {
            hex.push_str(&format!("{:02x}", channel(self.a)));
        }
        hex
    }

    /// `rgba(r,g,b,a)` with floored 0-255 channels and the raw alpha.
    pub fn to_rgba_string(&self) -> String {
        format!(
            "rgba({},{},{},{})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            format_alpha(self.a)
        )
    }
}

/// Scale a unit channel to 0-255, flooring and clamping.
fn channel(value: f64) -> u8 {
    (value * 255.0).floor().clamp(0.0, 255.0) as u8
}

fn format_alpha(a: f64) -> String {
    if a.fract() == 0.0 && a.is_finite() {
        format!("{}", a as i64)
    } else {
        format!("{a}")
    }
}

// ---------------------------------------------------------------------------
// Paint
// ---------------------------------------------------------------------------

/// A gradient stop.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GradientStop {
    #[serde(default)]
    pub position: f64,
    pub color: Rgba,
}

/// The four gradient variants a design file can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientKind {
    Linear,
    Radial,
    Angular,
    Diamond,
}

/// What a paint draws.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintKind {
    Solid { color: Option<Rgba> },
    Gradient {
        kind: GradientKind,
        stops: Vec<GradientStop>,
    },
    Image { image_ref: Option<String> },
    /// Emoji, video, and any paint type added after this crate was written.
    Unsupported(String),
}

/// A fill, stroke, or background entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawPaint")]
pub struct Paint {
    pub kind: PaintKind,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
}

impl Paint {
    pub fn solid(color: Rgba) -> Self {
        Self {
            kind: PaintKind::Solid { color: Some(color) },
            visible: None,
            opacity: None,
        }
    }

    pub fn image(image_ref: &str) -> Self {
        Self {
            kind: PaintKind::Image {
                image_ref: Some(image_ref.to_string()),
            },
            visible: None,
            opacity: None,
        }
    }

    pub fn gradient(kind: GradientKind, stops: Vec<GradientStop>) -> Self {
        Self {
            kind: PaintKind::Gradient { kind, stops },
            visible: None,
            opacity: None,
        }
    }

    /// A paint without an explicit `visible: false` is visible.
    pub fn is_visible(&self) -> bool {
        self.visible != Some(false)
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, PaintKind::Image { .. })
    }

    pub fn image_ref(&self) -> Option<&str> {
        match &self.kind {
            PaintKind::Image { image_ref } => image_ref.as_deref(),
            _ => None,
        }
    }
}

/// Wire shape of a paint before the `type` tag is resolved.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPaint {
    #[serde(rename = "type", default)]
    kind: String,
    visible: Option<bool>,
    opacity: Option<f64>,
    color: Option<Rgba>,
    #[serde(default)]
    gradient_stops: Vec<GradientStop>,
    image_ref: Option<String>,
}

impl From<RawPaint> for Paint {
    fn from(raw: RawPaint) -> Self {
        let gradient = |kind| PaintKind::Gradient {
            kind,
            stops: raw.gradient_stops.clone(),
        };
        let kind = match raw.kind.as_str() {
            "SOLID" => PaintKind::Solid { color: raw.color },
            "GRADIENT_LINEAR" => gradient(GradientKind::Linear),
            "GRADIENT_RADIAL" => gradient(GradientKind::Radial),
            "GRADIENT_ANGULAR" => gradient(GradientKind::Angular),
            "GRADIENT_DIAMOND" => gradient(GradientKind::Diamond),
            "IMAGE" => PaintKind::Image {
                image_ref: raw.image_ref.clone(),
            },
            other => PaintKind::Unsupported(other.to_string()),
        };
        Paint {
            kind,
            visible: raw.visible,
            opacity: raw.opacity,
        }
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// A shadow or blur attached to a node.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Effect {
    #[serde(rename = "type", default)]
    pub kind: EffectKind,
    pub visible: Option<bool>,
    pub radius: Option<f64>,
    pub spread: Option<f64>,
    pub offset: Option<Vector>,
    pub color: Option<Rgba>,
}

impl Effect {
    pub fn is_visible(&self) -> bool {
        self.visible != Some(false)
    }
}
