//! Structural invariants and lookups.

use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::model::element::{ElementRole, SlideElement};
use crate::model::presentation::{Presentation, Slide};
use crate::types::{ElementId, SlideId};

/// A broken invariant, located by slide index and element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Bounding box has a negative origin, a non-positive size or a non-finite value.
    InvalidBounds {
        /// Index of the slide.
        slide: usize,
        /// Offending element.
        element: ElementId,
    },
    /// Two elements on one slide share an id.
    DuplicateElementId {
        /// Index of the slide.
        slide: usize,
        /// The repeated id.
        element: ElementId,
    },
    /// Two slides share an id.
    DuplicateSlideId {
        /// Index of the second slide carrying the id.
        slide: usize,
        /// The repeated id.
        id: SlideId,
    },
    /// Font size is zero, negative or not finite.
    InvalidFontSize {
        /// Index of the slide.
        slide: usize,
        /// Offending element.
        element: ElementId,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBounds { slide, element } => {
                write!(f, "slide {slide}: element {element} has an invalid bounding box")
            }
            Self::DuplicateElementId { slide, element } => {
                write!(f, "slide {slide}: element id {element} is not unique")
            }
            Self::DuplicateSlideId { slide, id } => write!(f, "slide {slide}: slide id {id} is not unique"),
            Self::InvalidFontSize { slide, element } => {
                write!(f, "slide {slide}: element {element} has an invalid font size")
            }
        }
    }
}

/// Check every structural invariant. Returns an empty list for a valid presentation.
pub fn validate(presentation: &Presentation) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut slide_ids = HashSet::new();

    for (index, slide) in presentation.slides.iter().enumerate() {
        if !slide_ids.insert(&slide.id) {
            violations.push(Violation::DuplicateSlideId { slide: index, id: slide.id.clone() });
        }
        violations.extend(validate_slide(index, slide));
    }

    violations
}

/// Check the invariants of a single slide. `index` is used for reporting only.
pub fn validate_slide(index: usize, slide: &Slide) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut element_ids = HashSet::new();

    for element in &slide.elements {
        if !element_ids.insert(&element.id) {
            violations.push(Violation::DuplicateElementId { slide: index, element: element.id.clone() });
        }
        if !element.bounds.is_valid() {
            violations.push(Violation::InvalidBounds { slide: index, element: element.id.clone() });
        }
        let bad_font = element
            .style
            .as_ref()
            .and_then(|s| s.font_size)
            .is_some_and(|size| !size.is_finite() || size <= 0.0);
        if bad_font {
            violations.push(Violation::InvalidFontSize { slide: index, element: element.id.clone() });
        }
    }

    violations
}

/// No element on the slide matches the requested id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no element {0} on this slide")]
pub struct NotFound(pub ElementId);

/// Look up an element by id.
///
/// Exact id matches win. Otherwise a role keyword such as `title` or `body`
/// resolves to the first element carrying that role.
pub fn element_at<'a>(slide: &'a Slide, id: &ElementId) -> Result<&'a SlideElement, NotFound> {
    element_index(slide, id).map(|i| &slide.elements[i])
}

/// Position of the element [`element_at`] would return.
pub fn element_index(slide: &Slide, id: &ElementId) -> Result<usize, NotFound> {
    if let Some(index) = slide.elements.iter().position(|e| &e.id == id) {
        return Ok(index);
    }

    ElementRole::from_keyword(id.as_str())
        .and_then(|role| slide.elements.iter().position(|e| e.role == Some(role)))
        .ok_or_else(|| NotFound(id.clone()))
}
