//! Render projection: slide space to viewport space.
//!
//! [`project`] is a pure function. Identical slides and viewports always give
//! identical primitives, and every element yields exactly one primitive so
//! the consumer can rely on the counts matching.

pub mod thumbnail;

use serde::Serialize;

use crate::constants::{canvas, layout, render};
use crate::model::{Color, ElementKind, FontWeight, Slide, SlideElement, Style, TextAlign};
use crate::types::ElementId;

pub use thumbnail::{extract_text, thumbnail_svg};

/// Position and size in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// Horizontal anchor of content inside its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Left.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Right.
    End,
}

impl From<TextAlign> for Anchor {
    fn from(align: TextAlign) -> Self {
        match align {
            TextAlign::Left => Self::Start,
            TextAlign::Center => Self::Center,
            TextAlign::Right => Self::End,
        }
    }
}

/// Resolved font for a text primitive.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Font {
    /// Scaled size, when the element specifies one.
    pub size: Option<f64>,
    /// Family name.
    pub family: Option<String>,
    /// Weight.
    pub weight: FontWeight,
    /// Italic flag.
    pub italic: bool,
}

/// What to draw inside a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// Text run.
    Text {
        /// Text to draw, newlines preserved.
        content: String,
        /// Scaled font.
        font: Font,
        /// Horizontal anchor.
        anchor: Anchor,
        /// Text color.
        color: Option<Color>,
        /// Box fill.
        background: Option<Color>,
    },
    /// Bitmap drawn to fit the frame.
    Image {
        /// Data URI or external reference.
        source: String,
    },
    /// Filled rectangle.
    Shape {
        /// Fill color.
        fill: Color,
    },
    /// Labeled box standing in for content that cannot be drawn directly.
    Placeholder {
        /// Label, e.g. "Chart".
        label: String,
        /// Scaled label font size.
        font_size: f64,
        /// Box fill.
        fill: Color,
    },
}

/// One positioned, scaled draw instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawPrimitive {
    /// Element this primitive was produced from.
    pub element_id: ElementId,
    /// Viewport-space frame.
    pub frame: Frame,
    /// Content.
    #[serde(flatten)]
    pub kind: PrimitiveKind,
}

/// Viewport-space background of a slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundPrimitive {
    /// Fill color.
    pub fill: Color,
    /// Image drawn over the fill, scaled to cover.
    pub image: Option<String>,
}

/// Scale factors from slide space to a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Horizontal factor.
    pub x: f64,
    /// Vertical factor.
    pub y: f64,
}

impl Scale {
    /// Factors for a viewport. Negative or non-finite sizes count as zero.
    pub fn for_viewport(width: f64, height: f64) -> Self {
        let clamp = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self { x: clamp(width) / canvas::WIDTH, y: clamp(height) / canvas::HEIGHT }
    }

    /// Uniform factor for text, so glyphs are never stretched.
    pub fn text(self) -> f64 {
        self.x.min(self.y)
    }
}

/// Project a slide into draw primitives for a `width` x `height` viewport.
///
/// Returns one primitive per element in z-order. A viewport without drawable
/// area still yields every primitive, with zero-sized frames.
pub fn project(slide: &Slide, width: f64, height: f64) -> Vec<DrawPrimitive> {
    let scale = Scale::for_viewport(width, height);
    slide.elements.iter().map(|element| project_element(element, scale)).collect()
}

/// Background fill for a slide, white when none is set.
pub fn project_background(slide: &Slide) -> BackgroundPrimitive {
    let background = slide.background.clone().unwrap_or_default();
    BackgroundPrimitive {
        fill: background.color.unwrap_or_else(|| color(layout::BACKGROUND_COLOR)),
        image: background.image,
    }
}

fn project_element(element: &SlideElement, scale: Scale) -> DrawPrimitive {
    let bounds = element.bounds;
    let frame = Frame {
        x: bounds.x * scale.x,
        y: bounds.y * scale.y,
        width: bounds.width * scale.x,
        height: bounds.height * scale.y,
    };
    let style = element.style.clone().unwrap_or_default();

    let kind = match &element.kind {
        ElementKind::Text { content } => text_primitive(content, &style, scale),
        ElementKind::Image { source: Some(source), .. } => PrimitiveKind::Image { source: source.to_uri() },
        ElementKind::Image { source: None, alt } => placeholder(label_or(alt, "Image"), scale),
        ElementKind::Shape => PrimitiveKind::Shape {
            fill: style.background.unwrap_or_else(|| color(render::SHAPE_FILL)),
        },
        ElementKind::Chart { caption } => placeholder(label_or(caption, "Chart"), scale),
        ElementKind::Table { caption } => placeholder(label_or(caption, "Table"), scale),
        ElementKind::Unknown => placeholder("Unsupported element".to_string(), scale),
    };

    DrawPrimitive { element_id: element.id.clone(), frame, kind }
}

fn text_primitive(content: &str, style: &Style, scale: Scale) -> PrimitiveKind {
    PrimitiveKind::Text {
        content: content.to_string(),
        font: Font {
            size: style.font_size.map(|s| s * scale.text()),
            family: style.font_family.clone(),
            weight: style.weight.unwrap_or_default(),
            italic: style.italic.unwrap_or(false),
        },
        anchor: style.align.map(Anchor::from).unwrap_or_default(),
        color: style.color.clone(),
        background: style.background.clone(),
    }
}

fn placeholder(label: String, scale: Scale) -> PrimitiveKind {
    PrimitiveKind::Placeholder {
        label,
        font_size: render::PLACEHOLDER_FONT_SIZE * scale.text(),
        fill: color(render::PLACEHOLDER_FILL),
    }
}

fn label_or(text: &str, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

/// Parse one of the built-in color constants.
fn color(code: &str) -> Color {
    Color::parse(code).unwrap_or_else(|_| Color::rgb(0, 0, 0))
}
