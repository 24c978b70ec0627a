//! Plain-text extraction and thumbnail rendering for slide lists.

use quick_xml::escape::escape;
use std::fmt::Write;

use crate::constants::thumbnail;
use crate::model::{ElementKind, Slide};
use crate::render::project_background;

/// All text content of a slide, one block per text element, separated by a blank line.
pub fn extract_text(slide: &Slide) -> String {
    slide
        .elements
        .iter()
        .filter_map(|element| match &element.kind {
            ElementKind::Text { content } if !content.trim().is_empty() => Some(content.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Small SVG card showing the slide's background and title.
pub fn thumbnail_svg(slide: &Slide) -> String {
    let background = project_background(slide);
    let title = slide.title.as_deref().filter(|t| !t.trim().is_empty()).unwrap_or("Slide");
    let (width, height) = (thumbnail::WIDTH, thumbnail::HEIGHT);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r##"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg"><rect width="{width}" height="{height}" fill="{fill}" stroke="#cccccc"/><text x="{cx}" y="{cy}" text-anchor="middle" font-size="12" fill="#333333">{title}</text></svg>"##,
        fill = background.fill,
        cx = width / 2,
        cy = height / 2,
        title = escape(title),
    );
    svg
}
