//! Human-readable acknowledgments for applied commands.

use crate::command::{ApplyResult, Command, Effect, StyleChanges};
use crate::model::{FontWeight, TextAlign};

/// Reply text for `command` after the engine returned `result`.
pub fn acknowledge(command: &Command, result: &ApplyResult) -> String {
    match (command, result) {
        (Command::Unrecognized { reason }, _) => reason.clone(),
        (_, ApplyResult::Rejected(reason)) => format!("I couldn't do that: {reason}."),
        (_, ApplyResult::NoOp(reason)) => format!("Nothing to change: {reason}."),
        (_, ApplyResult::Applied(effect)) => match effect {
            Effect::Navigated { index } => format!("Here's slide {}.", index + 1),
            Effect::Edited { slide_index, .. } => {
                format!("I've updated the {} on slide {}.", target_name(command), slide_index + 1)
            }
            Effect::Formatted { slide_index, .. } => {
                let detail = match command {
                    Command::Format { changes, .. } => describe(changes),
                    _ => None,
                };
                match detail {
                    Some(detail) => format!(
                        "I've {detail} for the {} on slide {}.",
                        target_name(command),
                        slide_index + 1
                    ),
                    None => format!("I've reformatted the {} on slide {}.", target_name(command), slide_index + 1),
                }
            }
            Effect::Analyzed(report) => format!("Here's my analysis of your presentation:\n\n{report}"),
        },
    }
}

fn target_name(command: &Command) -> String {
    match command {
        Command::Edit { element_id, .. } | Command::Format { element_id, .. } => match element_id.as_str() {
            "title" | "heading" => "title".to_string(),
            "body" | "content" | "text" => "text".to_string(),
            other => format!("element {other}"),
        },
        _ => "element".to_string(),
    }
}

/// Short description of a style change, e.g. "set the font size to 24".
fn describe(changes: &StyleChanges) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(size) = changes.font_size {
        parts.push(format!("set the font size to {size}"));
    }
    match changes.weight {
        Some(FontWeight::Bold) => parts.push("made the text bold".to_string()),
        Some(FontWeight::Normal) => parts.push("removed bold".to_string()),
        None => {}
    }
    if let Some(italic) = changes.italic {
        parts.push(if italic { "made the text italic" } else { "removed italics" }.to_string());
    }
    if let Some(align) = changes.align {
        let side = match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        };
        parts.push(format!("aligned the text {side}"));
    }
    if let Some(color) = &changes.color {
        parts.push(format!("changed the color to {color}"));
    }
    if let Some(background) = &changes.background {
        parts.push(format!("changed the background to {background}"));
    }
    if let Some(family) = &changes.font_family {
        parts.push(format!("switched the font to {family}"));
    }

    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => {
            let last = parts.pop().unwrap_or_default();
            Some(format!("{} and {last}", parts.join(", ")))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::command::RejectReason;

    #[test]
    fn navigation_and_rejection() {
        let applied = ApplyResult::Applied(Effect::Navigated { index: 2 });
        assert_eq!(acknowledge(&Command::Navigate(2), &applied), "Here's slide 3.");

        let rejected = ApplyResult::Rejected(RejectReason::OutOfRange { index: 4, len: 3 });
        assert_eq!(
            acknowledge(&Command::Navigate(4), &rejected),
            "I couldn't do that: slide 5 is out of range, the presentation has 3 slides."
        );
    }

    #[test]
    fn edit_and_format_name_their_target() {
        let edit = Command::edit_content(0, "title", "New");
        let result = ApplyResult::Applied(Effect::Edited { slide_index: 0, element_id: "e-7".into() });
        assert_eq!(acknowledge(&edit, &result), "I've updated the title on slide 1.");

        let format = Command::Format {
            slide_index: 1,
            element_id: "body".into(),
            changes: StyleChanges {
                weight: Some(FontWeight::Bold),
                align: Some(TextAlign::Center),
                ..StyleChanges::default()
            },
        };
        let result = ApplyResult::Applied(Effect::Formatted { slide_index: 1, element_id: "e-8".into() });
        assert_eq!(
            acknowledge(&format, &result),
            "I've made the text bold and aligned the text center for the text on slide 2."
        );
    }

    #[test]
    fn unrecognized_reason_is_passed_through() {
        let command = Command::unrecognized("no document loaded");
        assert_eq!(acknowledge(&command, &ApplyResult::NoOp("no document loaded".into())), "no document loaded");
    }
}
