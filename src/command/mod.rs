//! Command engine: structured edits applied to a presentation.
//!
//! Commands are closed enums. [`apply`] is pure and returns a new
//! presentation plus an [`ApplyResult`]; [`CommandEngine`] owns session
//! state and the undo log; [`EngineHandle`] serializes concurrent callers.

pub mod analyze;
pub mod apply;
pub mod engine;
pub mod handle;

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::model::{Color, FontWeight, ImageSource, Rect, Style, TextAlign};
use crate::types::ElementId;

pub use analyze::{analyze, Report, SlideSummary};
pub use apply::apply;
pub use engine::{CommandEngine, NothingToUndo};
pub use handle::EngineHandle;

/// One user intent, resolved into a structured operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Make the slide at this index current.
    Navigate(usize),
    /// Change the content, geometry or style of an element.
    Edit {
        /// Slide holding the element.
        slide_index: usize,
        /// Element id or role keyword (`title`, `body`).
        element_id: ElementId,
        /// Fields to change.
        changes: ContentChanges,
    },
    /// Change only the style of an element.
    Format {
        /// Slide holding the element.
        slide_index: usize,
        /// Element id or role keyword.
        element_id: ElementId,
        /// Style fields to change.
        changes: StyleChanges,
    },
    /// Report on the presentation without changing it.
    Analyze,
    /// The utterance could not be turned into a command.
    Unrecognized {
        /// Human-readable explanation.
        reason: String,
    },
}

impl Command {
    /// Build an `Unrecognized` command.
    pub fn unrecognized(reason: impl Into<String>) -> Self {
        Self::Unrecognized { reason: reason.into() }
    }

    /// Build an `Edit` that replaces the text of an element.
    pub fn edit_content(slide_index: usize, element_id: impl Into<ElementId>, content: impl Into<String>) -> Self {
        Self::Edit {
            slide_index,
            element_id: element_id.into(),
            changes: ContentChanges { content: Some(content.into()), ..ContentChanges::default() },
        }
    }

    /// Short lower-case name, for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Navigate(_) => "navigate",
            Self::Edit { .. } => "edit",
            Self::Format { .. } => "format",
            Self::Analyze => "analyze",
            Self::Unrecognized { .. } => "unrecognized",
        }
    }

    /// Whether applying this command can change what the user sees.
    pub const fn changes_view(&self) -> bool {
        matches!(self, Self::Navigate(_) | Self::Edit { .. } | Self::Format { .. })
    }
}

/// Style fields a command may set. `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleChanges {
    /// New font size in points.
    pub font_size: Option<f64>,
    /// New font family.
    pub font_family: Option<String>,
    /// New text color.
    pub color: Option<Color>,
    /// New box fill.
    pub background: Option<Color>,
    /// New alignment.
    pub align: Option<TextAlign>,
    /// New weight.
    pub weight: Option<FontWeight>,
    /// New italic flag.
    pub italic: Option<bool>,
}

impl StyleChanges {
    /// True when nothing would change.
    pub const fn is_empty(&self) -> bool {
        self.font_size.is_none()
            && self.font_family.is_none()
            && self.color.is_none()
            && self.background.is_none()
            && self.align.is_none()
            && self.weight.is_none()
            && self.italic.is_none()
    }

    /// Style with these changes laid over `base`.
    pub fn applied_to(&self, base: &Style) -> Style {
        base.merged(&Style {
            font_size: self.font_size,
            font_family: self.font_family.clone(),
            color: self.color.clone(),
            background: self.background.clone(),
            align: self.align,
            weight: self.weight,
            italic: self.italic,
        })
    }
}

/// Closed set of fields an `Edit` may change. `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentChanges {
    /// Text for text elements, caption for charts and tables.
    pub content: Option<String>,
    /// New picture. Image elements only.
    pub image: Option<ImageSource>,
    /// New bounding box.
    pub bounds: Option<Rect>,
    /// Style changes.
    pub style: StyleChanges,
}

impl ContentChanges {
    /// True when nothing would change.
    pub const fn is_empty(&self) -> bool {
        self.content.is_none() && self.image.is_none() && self.bounds.is_none() && self.style.is_empty()
    }
}

impl From<StyleChanges> for ContentChanges {
    fn from(style: StyleChanges) -> Self {
        Self { style, ..Self::default() }
    }
}

/// What a successful apply did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "lowercase")]
pub enum Effect {
    /// The current slide is now `index`.
    Navigated {
        /// New current slide.
        index: usize,
    },
    /// An element's content or geometry changed.
    Edited {
        /// Slide holding the element.
        slide_index: usize,
        /// Resolved id of the changed element.
        element_id: ElementId,
    },
    /// An element's style changed.
    Formatted {
        /// Slide holding the element.
        slide_index: usize,
        /// Resolved id of the changed element.
        element_id: ElementId,
    },
    /// Analysis report. The presentation is unchanged.
    Analyzed(Report),
}

/// Why a command was refused. The presentation is returned unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Slide index outside `0..len`.
    #[error("slide {} is out of range, the presentation has {len} slides", .index + 1)]
    OutOfRange {
        /// Requested zero-based index.
        index: usize,
        /// Number of slides.
        len: usize,
    },
    /// The slide or element does not exist.
    #[error("no element {element_id} on slide {}", .slide_index + 1)]
    NotFound {
        /// Requested slide.
        slide_index: usize,
        /// Requested element id or role keyword.
        element_id: ElementId,
    },
    /// The change does not fit the element or would break an invariant.
    #[error("invalid change: {0}")]
    InvalidChange(String),
}

/// Outcome of applying one command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", content = "detail", rename_all = "snake_case")]
pub enum ApplyResult {
    /// The command took effect.
    Applied(Effect),
    /// The command was valid but had nothing to do.
    NoOp(String),
    /// The command was refused.
    Rejected(RejectReason),
}

impl ApplyResult {
    /// True for `Applied`.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// True for `Rejected`.
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl fmt::Display for ApplyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied(Effect::Navigated { index }) => write!(f, "navigated to slide {}", index + 1),
            Self::Applied(Effect::Edited { slide_index, element_id }) => {
                write!(f, "edited {element_id} on slide {}", slide_index + 1)
            }
            Self::Applied(Effect::Formatted { slide_index, element_id }) => {
                write!(f, "formatted {element_id} on slide {}", slide_index + 1)
            }
            Self::Applied(Effect::Analyzed(report)) => write!(f, "analyzed {} slides", report.slide_count),
            Self::NoOp(reason) => write!(f, "nothing to do: {reason}"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}
