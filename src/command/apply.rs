//! Pure command application.

use tracing::debug;

use crate::command::analyze::analyze;
use crate::command::{ApplyResult, Command, ContentChanges, Effect, RejectReason};
use crate::model::validate::validate_slide;
use crate::model::{element_index, ElementKind, Presentation, SlideElement};
use crate::types::ElementId;

/// Apply `command` to `presentation`.
///
/// Never mutates the input. Unless the result is `Applied` with an edit or
/// format effect, the returned presentation equals the input.
pub fn apply(presentation: &Presentation, command: &Command) -> (Presentation, ApplyResult) {
    let result = match command {
        Command::Navigate(index) => Ok(navigate(presentation, *index)),
        Command::Edit { slide_index, element_id, changes } => {
            change_element(presentation, *slide_index, element_id, changes).map(|(next, element_id)| {
                let effect = Effect::Edited { slide_index: *slide_index, element_id };
                (next, ApplyResult::Applied(effect))
            })
        }
        Command::Format { slide_index, element_id, changes } => {
            let changes = ContentChanges::from(changes.clone());
            change_element(presentation, *slide_index, element_id, &changes).map(|(next, element_id)| {
                let effect = Effect::Formatted { slide_index: *slide_index, element_id };
                (next, ApplyResult::Applied(effect))
            })
        }
        Command::Analyze => Ok((presentation.clone(), ApplyResult::Applied(Effect::Analyzed(analyze(presentation))))),
        Command::Unrecognized { reason } => Ok((presentation.clone(), ApplyResult::NoOp(reason.clone()))),
    };

    let (next, result) = result.unwrap_or_else(|outcome| (presentation.clone(), outcome));
    debug!(command = command.name(), %result, "Applied command");
    (next, result)
}

fn navigate(presentation: &Presentation, index: usize) -> (Presentation, ApplyResult) {
    let len = presentation.slide_count();
    let result = if index < len {
        ApplyResult::Applied(Effect::Navigated { index })
    } else {
        ApplyResult::Rejected(RejectReason::OutOfRange { index, len })
    };
    (presentation.clone(), result)
}

/// Apply a change set to one element. `Err` carries the non-applied outcome.
fn change_element(
    presentation: &Presentation,
    slide_index: usize,
    element_id: &ElementId,
    changes: &ContentChanges,
) -> Result<(Presentation, ElementId), ApplyResult> {
    let not_found = || ApplyResult::Rejected(RejectReason::NotFound { slide_index, element_id: element_id.clone() });

    let slide = presentation.slide(slide_index).ok_or_else(not_found)?;
    let position = element_index(slide, element_id).map_err(|_| not_found())?;

    if changes.is_empty() {
        return Err(ApplyResult::NoOp("no changes requested".to_string()));
    }

    let current = &slide.elements[position];
    let updated = changed(current, changes).map_err(|e| ApplyResult::Rejected(RejectReason::InvalidChange(e)))?;
    if &updated == current {
        return Err(ApplyResult::NoOp(format!("{} already has the requested values", current.id)));
    }

    let mut next = presentation.clone();
    let resolved_id = updated.id.clone();
    let slide = &mut next.slides[slide_index];
    slide.elements[position] = updated;

    if let Some(violation) = validate_slide(slide_index, slide).into_iter().next() {
        return Err(ApplyResult::Rejected(RejectReason::InvalidChange(violation.to_string())));
    }

    Ok((next, resolved_id))
}

/// The element with `changes` merged in, or why they do not fit it.
fn changed(element: &SlideElement, changes: &ContentChanges) -> Result<SlideElement, String> {
    let mut next = element.clone();

    if let Some(content) = &changes.content {
        match &mut next.kind {
            ElementKind::Text { content: text } => text.clone_from(content),
            ElementKind::Chart { caption } | ElementKind::Table { caption } => caption.clone_from(content),
            other => return Err(format!("a {} element has no text content", other.name())),
        }
    }

    if let Some(image) = &changes.image {
        match &mut next.kind {
            ElementKind::Image { source, .. } => *source = Some(image.clone()),
            other => return Err(format!("cannot set an image on a {} element", other.name())),
        }
    }

    if let Some(bounds) = changes.bounds {
        if !bounds.is_valid() {
            return Err(format!(
                "bounds {}x{} at ({}, {}) are not a valid box",
                bounds.width, bounds.height, bounds.x, bounds.y
            ));
        }
        next.bounds = bounds;
    }

    if !changes.style.is_empty() {
        if changes.style.font_size.is_some_and(|size| !size.is_finite() || size <= 0.0) {
            return Err("font size must be a positive number".to_string());
        }
        next.style = Some(changes.style.applied_to(&element.style.clone().unwrap_or_default()));
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::command::StyleChanges;
    use crate::model::{ElementRole, FontWeight, ImageSource, Rect, Slide};
    use pretty_assertions::assert_eq;

    fn deck() -> Presentation {
        let slide = |n: usize| {
            Slide::new(format!("s{n}"))
                .with_element(
                    SlideElement::text(format!("t{n}"), Rect::new(50.0, 50.0, 700.0, 80.0), format!("Title {n}"))
                        .with_role(ElementRole::Title),
                )
                .with_element(SlideElement::image(format!("i{n}"), Rect::new(100.0, 200.0, 50.0, 50.0), None))
        };
        Presentation::new("p", "Deck").with_slide(slide(0)).with_slide(slide(1)).with_slide(slide(2))
    }

    #[test]
    fn navigate_in_and_out_of_range() {
        let deck = deck();
        for i in 0..3 {
            let (next, result) = apply(&deck, &Command::Navigate(i));
            assert_eq!(result, ApplyResult::Applied(Effect::Navigated { index: i }));
            assert_eq!(next, deck);
        }
        let (next, result) = apply(&deck, &Command::Navigate(3));
        assert_eq!(result, ApplyResult::Rejected(RejectReason::OutOfRange { index: 3, len: 3 }));
        assert_eq!(next, deck);
    }

    #[test]
    fn edit_title_by_role_touches_only_that_slide() {
        let deck = deck();
        let (next, result) = apply(&deck, &Command::edit_content(1, "title", "New Title"));

        assert_eq!(result, ApplyResult::Applied(Effect::Edited { slide_index: 1, element_id: "t1".into() }));
        assert_eq!(next.slides[1].elements[0].text_content(), Some("New Title"));
        assert_eq!(next.slides[0], deck.slides[0]);
        assert_eq!(next.slides[2], deck.slides[2]);
        assert_eq!(next.metadata, deck.metadata);
    }

    #[test]
    fn edit_missing_slide_or_element_is_not_found() {
        let deck = deck();
        let (next, result) = apply(&deck, &Command::edit_content(7, "title", "x"));
        assert!(matches!(result, ApplyResult::Rejected(RejectReason::NotFound { slide_index: 7, .. })));
        assert_eq!(next, deck);

        let (_, result) = apply(&deck, &Command::edit_content(0, "nope", "x"));
        assert!(matches!(result, ApplyResult::Rejected(RejectReason::NotFound { .. })));
    }

    #[test]
    fn incompatible_changes_are_rejected() {
        let deck = deck();
        let (next, result) = apply(&deck, &Command::edit_content(0, "i0", "text on an image"));
        assert!(matches!(result, ApplyResult::Rejected(RejectReason::InvalidChange(_))));
        assert_eq!(next, deck);

        let image = Command::Edit {
            slide_index: 0,
            element_id: "t0".into(),
            changes: ContentChanges { image: Some(ImageSource::parse("a.png")), ..ContentChanges::default() },
        };
        assert!(apply(&deck, &image).1.is_rejected());

        let bounds = Command::Edit {
            slide_index: 0,
            element_id: "t0".into(),
            changes: ContentChanges { bounds: Some(Rect::new(0.0, 0.0, -5.0, 10.0)), ..ContentChanges::default() },
        };
        assert!(apply(&deck, &bounds).1.is_rejected());

        let font = Command::Format {
            slide_index: 0,
            element_id: "t0".into(),
            changes: StyleChanges { font_size: Some(0.0), ..StyleChanges::default() },
        };
        assert!(apply(&deck, &font).1.is_rejected());
    }

    #[test]
    fn image_and_bounds_edits_apply() {
        let deck = deck();
        let command = Command::Edit {
            slide_index: 2,
            element_id: "i2".into(),
            changes: ContentChanges {
                image: Some(ImageSource::parse("media/chart.png")),
                bounds: Some(Rect::new(10.0, 10.0, 100.0, 100.0)),
                ..ContentChanges::default()
            },
        };
        let (next, result) = apply(&deck, &command);
        assert!(result.is_applied());
        let element = &next.slides[2].elements[1];
        assert_eq!(element.bounds, Rect::new(10.0, 10.0, 100.0, 100.0));
        assert!(matches!(&element.kind, ElementKind::Image { source: Some(_), .. }));
    }

    #[test]
    fn empty_or_unchanged_edits_are_no_ops() {
        let deck = deck();
        let empty = Command::Edit { slide_index: 0, element_id: "t0".into(), changes: ContentChanges::default() };
        assert!(matches!(apply(&deck, &empty).1, ApplyResult::NoOp(_)));

        let same = Command::edit_content(0, "t0", "Title 0");
        let (next, result) = apply(&deck, &same);
        assert!(matches!(result, ApplyResult::NoOp(_)));
        assert_eq!(next, deck);
    }

    #[test]
    fn format_merges_style() {
        let deck = deck();
        let command = Command::Format {
            slide_index: 0,
            element_id: "title".into(),
            changes: StyleChanges { weight: Some(FontWeight::Bold), font_size: Some(40.0), ..StyleChanges::default() },
        };
        let (next, result) = apply(&deck, &command);
        assert_eq!(result, ApplyResult::Applied(Effect::Formatted { slide_index: 0, element_id: "t0".into() }));
        let style = next.slides[0].elements[0].style.clone().unwrap();
        assert_eq!(style.weight, Some(FontWeight::Bold));
        assert_eq!(style.font_size, Some(40.0));
    }

    #[test]
    fn analyze_is_idempotent_and_read_only() {
        let deck = deck();
        let (first, a) = apply(&deck, &Command::Analyze);
        let (second, b) = apply(&first, &Command::Analyze);
        assert_eq!(first, deck);
        assert_eq!(second, deck);
        assert_eq!(a, b);
    }

    #[test]
    fn unrecognized_is_a_no_op() {
        let deck = deck();
        let (next, result) = apply(&deck, &Command::unrecognized("what?"));
        assert_eq!(result, ApplyResult::NoOp("what?".into()));
        assert_eq!(next, deck);
    }
}
