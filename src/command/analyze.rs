//! Structural analysis of a presentation.
//!
//! Deterministic: the same presentation always yields the same report.

use serde::Serialize;
use std::fmt;

use crate::model::{ElementKind, ElementRole, Presentation, Slide};

/// Paragraph count above which a slide's text is considered dense.
const DENSE_PARAGRAPHS: usize = 6;

/// Per-slide counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideSummary {
    /// Zero-based slide index.
    pub index: usize,
    /// Slide title, if any.
    pub title: Option<String>,
    /// Total number of elements.
    pub element_count: usize,
    /// Number of text elements.
    pub text_count: usize,
    /// Number of images, charts and tables.
    pub visual_count: usize,
    /// True when at least one image element is present.
    pub has_image: bool,
    /// True when speaker notes are present.
    pub has_notes: bool,
    /// Non-empty text paragraphs across all text elements.
    pub paragraph_count: usize,
}

/// Result of [`analyze`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Number of slides.
    pub slide_count: usize,
    /// One entry per slide, in order.
    pub slides: Vec<SlideSummary>,
    /// Improvement suggestions, in slide order.
    pub suggestions: Vec<String>,
}

/// Summarize every slide and derive suggestions.
pub fn analyze(presentation: &Presentation) -> Report {
    let slides: Vec<SlideSummary> =
        presentation.slides.iter().enumerate().map(|(index, slide)| summarize(index, slide)).collect();
    let suggestions = suggestions(&slides);

    Report { slide_count: slides.len(), slides, suggestions }
}

fn summarize(index: usize, slide: &Slide) -> SlideSummary {
    let mut summary = SlideSummary {
        index,
        title: slide.title.clone(),
        element_count: slide.elements.len(),
        text_count: 0,
        visual_count: 0,
        has_image: false,
        has_notes: slide.notes.as_deref().is_some_and(|n| !n.trim().is_empty()),
        paragraph_count: 0,
    };

    for element in &slide.elements {
        match &element.kind {
            ElementKind::Text { content } => {
                summary.text_count += 1;
                if element.role != Some(ElementRole::Title) {
                    summary.paragraph_count += content.lines().filter(|l| !l.trim().is_empty()).count();
                }
            }
            ElementKind::Image { .. } => {
                summary.visual_count += 1;
                summary.has_image = true;
            }
            ElementKind::Chart { .. } | ElementKind::Table { .. } => summary.visual_count += 1,
            ElementKind::Shape | ElementKind::Unknown => {}
        }
    }

    summary
}

fn suggestions(slides: &[SlideSummary]) -> Vec<String> {
    if slides.is_empty() {
        return vec!["The presentation has no slides yet".to_string()];
    }

    let mut out = Vec::new();

    let text_only: Vec<String> = slides
        .iter()
        .filter(|s| s.visual_count == 0 && s.text_count > 0)
        .map(|s| (s.index + 1).to_string())
        .collect();
    if !text_only.is_empty() {
        out.push(format!("Consider adding images or charts to slide(s) {}", text_only.join(", ")));
    }

    for slide in slides {
        if slide.element_count == 0 {
            out.push(format!("Slide {} is empty", slide.index + 1));
        }
        if slide.paragraph_count > DENSE_PARAGRAPHS {
            out.push(format!(
                "Slide {} has {} paragraphs of text, consider splitting it",
                slide.index + 1,
                slide.paragraph_count
            ));
        }
    }

    let closes = slides.last().and_then(|s| s.title.as_deref()).is_some_and(|t| {
        let t = t.to_lowercase();
        ["conclusion", "summary", "questions", "thank"].iter().any(|w| t.contains(w))
    });
    if slides.len() >= 3 && !closes {
        out.push("You might want to add a conclusion slide".to_string());
    }

    out
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} slides", self.slide_count)?;
        for slide in &self.slides {
            writeln!(
                f,
                "  {}. {} ({} elements, {} visual{})",
                slide.index + 1,
                slide.title.as_deref().unwrap_or("Untitled"),
                slide.element_count,
                slide.visual_count,
                if slide.has_notes { ", notes" } else { "" }
            )?;
        }
        if !self.suggestions.is_empty() {
            writeln!(f, "Suggestions:")?;
            for suggestion in &self.suggestions {
                writeln!(f, "  • {suggestion}")?;
            }
        }
        Ok(())
    }
}
