//! Slide elements and their geometry.

use serde::{Deserialize, Serialize};

use crate::model::style::Style;
use crate::types::ElementId;

/// Axis-aligned box in slide space (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, must be positive.
    pub width: f64,
    /// Height, must be positive.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Finite, non-negative origin and a strictly positive size.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height].iter().all(|v| v.is_finite())
            && self.x >= 0.0
            && self.y >= 0.0
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Semantic role of an element, used to address "the title" of a slide whose
/// element ids were generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementRole {
    /// Slide title placeholder.
    Title,
    /// Main body text.
    Body,
}

impl ElementRole {
    /// Map a role keyword (as used in commands) to a role.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "title" | "heading" => Some(Self::Title),
            "body" | "content" | "text" => Some(Self::Body),
            _ => None,
        }
    }
}

/// Binary reference for image elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ImageSource {
    /// Image bytes carried inline as base64.
    Embedded {
        /// MIME type such as `image/png`.
        mime: String,
        /// Base64 payload.
        data: String,
    },
    /// Reference to an image stored outside the document.
    Linked {
        /// Path or URL.
        target: String,
    },
}

impl ImageSource {
    /// Embed raw image bytes.
    pub fn from_bytes(mime: impl Into<String>, bytes: &[u8]) -> Self {
        Self::Embedded { mime: mime.into(), data: base64::encode(bytes) }
    }

    /// Parse a `data:<mime>;base64,<payload>` URI, or treat anything else as
    /// a linked target.
    pub fn parse(reference: &str) -> Self {
        reference
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map_or_else(
                || Self::Linked { target: reference.to_string() },
                |(mime, data)| Self::Embedded { mime: mime.to_string(), data: data.to_string() },
            )
    }

    /// Renderable reference: a data URI for embedded images, the target otherwise.
    pub fn to_uri(&self) -> String {
        match self {
            Self::Embedded { mime, data } => format!("data:{mime};base64,{data}"),
            Self::Linked { target } => target.clone(),
        }
    }

    /// Decoded bytes of an embedded image. `None` for links or bad base64.
    pub fn decoded(&self) -> Option<Vec<u8>> {
        match self {
            Self::Embedded { data, .. } => base64::decode(data).ok(),
            Self::Linked { .. } => None,
        }
    }
}

/// Variant-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// Text box.
    Text {
        /// Text content, newlines separate paragraphs.
        content: String,
    },
    /// Picture.
    Image {
        /// Image data, if the decoder supplied any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<ImageSource>,
        /// Alternative text.
        #[serde(default)]
        alt: String,
    },
    /// Plain shape, styled only.
    Shape,
    /// Chart placeholder.
    Chart {
        /// Caption shown on the placeholder.
        #[serde(default)]
        caption: String,
    },
    /// Table placeholder.
    Table {
        /// Caption shown on the placeholder.
        #[serde(default)]
        caption: String,
    },
    /// Element type this build does not know about. Kept so that it still
    /// occupies its box when rendered.
    #[serde(other)]
    Unknown,
}

impl ElementKind {
    /// Lower-case variant name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Shape => "shape",
            Self::Chart { .. } => "chart",
            Self::Table { .. } => "table",
            Self::Unknown => "unknown",
        }
    }
}

/// One positioned item on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideElement {
    /// Identity, unique within the owning slide.
    pub id: ElementId,
    /// Optional semantic role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ElementRole>,
    /// Box in slide space.
    pub bounds: Rect,
    /// Optional style bundle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    /// Variant payload.
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl SlideElement {
    /// Create an element of any kind with no role or style.
    pub fn new(id: impl Into<ElementId>, bounds: Rect, kind: ElementKind) -> Self {
        Self { id: id.into(), role: None, bounds, style: None, kind }
    }

    /// Create a text element.
    pub fn text(id: impl Into<ElementId>, bounds: Rect, content: impl Into<String>) -> Self {
        Self::new(id, bounds, ElementKind::Text { content: content.into() })
    }

    /// Create an image element.
    pub fn image(id: impl Into<ElementId>, bounds: Rect, source: Option<ImageSource>) -> Self {
        Self::new(id, bounds, ElementKind::Image { source, alt: String::new() })
    }

    /// Create a shape element.
    pub fn shape(id: impl Into<ElementId>, bounds: Rect) -> Self {
        Self::new(id, bounds, ElementKind::Shape)
    }

    /// Set the role.
    #[must_use]
    pub const fn with_role(mut self, role: ElementRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Set the style bundle.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Text content for text elements.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { content } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn rect_validity() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!Rect::new(-1.0, 0.0, 10.0, 10.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, 0.0, 10.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, 10.0, f64::NAN).is_valid());
    }

    #[test]
    fn image_source_data_uri_round_trip() {
        let source = ImageSource::from_bytes("image/png", &[0x89, b'P', b'N', b'G']);
        let uri = source.to_uri();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(ImageSource::parse(&uri), source);
        assert_eq!(source.decoded().unwrap(), vec![0x89, b'P', b'N', b'G']);

        let linked = ImageSource::parse("media/logo.png");
        assert_eq!(linked, ImageSource::Linked { target: "media/logo.png".into() });
        assert!(linked.decoded().is_none());
    }

    #[test]
    fn unknown_element_type_deserializes() {
        let json = r#"{"id":"v1","bounds":{"x":0,"y":0,"width":10,"height":10},"type":"video"}"#;
        let element: SlideElement = serde_json::from_str(json).unwrap();
        assert_eq!(element.kind, ElementKind::Unknown);
    }

    #[test]
    fn text_element_serializes_flat() {
        let element = SlideElement::text("t", Rect::new(1.0, 2.0, 3.0, 4.0), "hi").with_role(ElementRole::Title);
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["content"], "hi");
        assert_eq!(value["role"], "title");
    }
}
