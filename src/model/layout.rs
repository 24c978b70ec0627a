//! Standard title/body layout.
//!
//! Used for every slide built from text alone: decoded slides and new blank
//! presentations. Positions derive only from the fixed canvas and margins so
//! the same text always lands in the same place.

use crate::constants::{canvas, layout};
use crate::ids::IdGenerator;
use crate::model::element::{ElementRole, Rect, SlideElement};
use crate::model::style::{Color, FontWeight, Style, TextAlign};

/// Box of the title band.
pub fn title_bounds() -> Rect {
    Rect::new(
        layout::MARGIN,
        layout::MARGIN,
        canvas::WIDTH - 2.0 * layout::MARGIN,
        layout::TITLE_HEIGHT,
    )
}

/// Box of the body band, everything below the title down to the bottom margin.
pub fn body_bounds() -> Rect {
    let top = layout::MARGIN + layout::TITLE_HEIGHT + layout::BAND_GAP;
    Rect::new(
        layout::MARGIN,
        top,
        canvas::WIDTH - 2.0 * layout::MARGIN,
        canvas::HEIGHT - top - layout::MARGIN,
    )
}

/// Style for the title element.
pub fn title_style() -> Style {
    Style {
        font_size: Some(layout::TITLE_FONT_SIZE),
        font_family: Some(layout::FONT_FAMILY.to_string()),
        color: Color::parse(layout::TITLE_COLOR).ok(),
        align: Some(TextAlign::Center),
        weight: Some(FontWeight::Bold),
        ..Style::default()
    }
}

/// Style for the body element.
pub fn body_style() -> Style {
    Style {
        font_size: Some(layout::BODY_FONT_SIZE),
        font_family: Some(layout::FONT_FAMILY.to_string()),
        color: Color::parse(layout::BODY_COLOR).ok(),
        align: Some(TextAlign::Left),
        ..Style::default()
    }
}

/// Title text element in the top band.
pub fn title_element(ids: &mut dyn IdGenerator, text: impl Into<String>) -> SlideElement {
    SlideElement::text(ids.element(), title_bounds(), text)
        .with_role(ElementRole::Title)
        .with_style(title_style())
}

/// Body text element in the remaining band.
pub fn body_element(ids: &mut dyn IdGenerator, text: impl Into<String>) -> SlideElement {
    SlideElement::text(ids.element(), body_bounds(), text)
        .with_role(ElementRole::Body)
        .with_style(body_style())
}
