//! In-memory presentation document model.
//!
//! Pure data plus validation predicates. Nothing here mutates a presentation;
//! edits go through [`crate::command`], which produces new values.

pub mod element;
pub mod layout;
pub mod presentation;
pub mod style;
pub mod validate;

// Re-export commonly used types
pub use element::{ElementKind, ElementRole, ImageSource, Rect, SlideElement};
pub use presentation::{Background, Metadata, Presentation, Slide};
pub use style::{Color, FontWeight, InvalidColor, Style, TextAlign};
pub use validate::{element_at, element_index, validate, NotFound, Violation};
