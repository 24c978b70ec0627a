//! Presentations and slides.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::IdGenerator;
use crate::model::element::SlideElement;
use crate::model::layout;
use crate::model::style::Color;
use crate::types::{PresentationId, SlideId};

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Author, when the source carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    /// Format version string of the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Slide background.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Background {
    /// Fill color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Image reference drawn over the fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One slide. Elements are in z-order: later elements draw on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Identity, unique within the presentation.
    pub id: SlideId,
    /// Optional slide title (shown in navigation, not drawn).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Elements in z-order.
    #[serde(default)]
    pub elements: Vec<SlideElement>,
    /// Optional background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    /// Speaker notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Slide {
    /// Create an empty slide.
    pub fn new(id: impl Into<SlideId>) -> Self {
        Self { id: id.into(), title: None, elements: Vec::new(), background: None, notes: None }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append an element on top of the existing ones.
    #[must_use]
    pub fn with_element(mut self, element: SlideElement) -> Self {
        self.elements.push(element);
        self
    }
}

/// An ordered deck of slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    /// Identity.
    pub id: PresentationId,
    /// Document title.
    pub title: String,
    /// Slides in navigation and render order.
    #[serde(default)]
    pub slides: Vec<Slide>,
    /// Metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Presentation {
    /// Create a presentation with no slides.
    pub fn new(id: impl Into<PresentationId>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into(), slides: Vec::new(), metadata: Metadata::default() }
    }

    /// A new blank presentation holding one title slide.
    pub fn blank(title: impl Into<String>, ids: &mut dyn IdGenerator) -> Self {
        let title = title.into();
        let now = Utc::now();

        let slide = Slide::new(ids.slide())
            .with_title("Slide 1")
            .with_element(layout::title_element(ids, title.clone()))
            .with_element(layout::body_element(ids, String::new()));

        Self {
            id: ids.presentation(),
            title,
            slides: vec![slide],
            metadata: Metadata { created_at: Some(now), modified_at: Some(now), ..Metadata::default() },
        }
    }

    /// Append a slide.
    #[must_use]
    pub fn with_slide(mut self, slide: Slide) -> Self {
        self.slides.push(slide);
        self
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slide at `index`, if any.
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::model::element::ElementRole;

    #[test]
    fn blank_presentation_has_titled_slide() {
        let mut ids = SequentialIds::new("b");
        let deck = Presentation::blank("Quarterly Review", &mut ids);

        assert_eq!(deck.slide_count(), 1);
        let slide = deck.slide(0).map(|s| s.elements.clone()).unwrap_or_default();
        assert_eq!(slide.len(), 2);
        assert_eq!(slide[0].role, Some(ElementRole::Title));
        assert_eq!(slide[0].text_content(), Some("Quarterly Review"));
        assert!(deck.metadata.created_at.is_some());
    }
}
