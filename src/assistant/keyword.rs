//! Deterministic keyword resolver, the default [`IntentResolver`].
//!
//! Rules are tried in a fixed order: greetings, help, edits with a
//! replacement text, navigation, formatting, analysis, then vague edit
//! requests.
//! Anything else is answered with the help text.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use crate::assistant::{Candidate, Context, IntentResolver, ResolveError};
use crate::command::{Command, ContentChanges, StyleChanges};
use crate::model::{Color, FontWeight, TextAlign};

/// Font size used for "make it larger".
const LARGER_FONT_SIZE: f64 = 24.0;

/// Font size used for "make it smaller".
const SMALLER_FONT_SIZE: f64 = 12.0;

/// Greeting shown for "hello" and friends.
pub const GREETING: &str = "Hello! I'm your presentation assistant. I can help you edit slides, \
change formatting, navigate your presentation and analyze its content. What would you like to work on?";

/// Help text listing the phrasings this resolver understands.
pub const HELP: &str = "I can help you with:\n\
\n\
Navigation:\n\
• \"Go to slide 3\"\n\
• \"Next slide\" or \"Previous slide\"\n\
• \"First slide\" or \"Last slide\"\n\
\n\
Editing:\n\
• \"Edit the title to Quarterly Results\"\n\
• \"Change the body to Revenue grew 12%\"\n\
\n\
Formatting:\n\
• \"Make the text larger\"\n\
• \"Make the title bold\"\n\
• \"Center the title\"\n\
• \"Color the title #336699\"\n\
\n\
Analysis:\n\
• \"Analyze this presentation\"";

lazy_static! {
    #[allow(clippy::expect_used)]
    static ref GREETING_RE: Regex =
        Regex::new(r"(?i)^\s*(hello|hi|hey|greetings|good (morning|afternoon|evening))\b").expect("valid regex: GREETING_RE");

    #[allow(clippy::expect_used)]
    static ref HELP_RE: Regex =
        Regex::new(r"(?i)\bhelp\b|what can you do").expect("valid regex: HELP_RE");

    /// "go to slide 3", "show me slide 2", "slide 4".
    #[allow(clippy::expect_used)]
    static ref SLIDE_NUMBER_RE: Regex =
        Regex::new(r"(?i)\bslide\s*#?\s*(\d+)\b").expect("valid regex: SLIDE_NUMBER_RE");

    #[allow(clippy::expect_used)]
    static ref RELATIVE_RE: Regex =
        Regex::new(r"(?i)\b(next|previous|prev|back|first|last)\b(\s+slide)?").expect("valid regex: RELATIVE_RE");

    /// "edit the title to X", "change the body text of this slide to X".
    #[allow(clippy::expect_used)]
    static ref EDIT_RE: Regex = Regex::new(
        r#"(?i)\b(?:edit|change|update|set|replace|rename)\s+(?:the\s+)?(title|heading|body|content|text)(?:\s+text)?(?:\s+(?:of|on)\s+(?:this|the current)\s+slide)?\s+(?:to|with)\s*:?\s+(.+?)\s*$"#
    )
    .expect("valid regex: EDIT_RE");

    #[allow(clippy::expect_used)]
    static ref EDIT_VAGUE_RE: Regex =
        Regex::new(r"(?i)\b(edit|change|update|modify|replace|rewrite)\b").expect("valid regex: EDIT_VAGUE_RE");

    #[allow(clippy::expect_used)]
    static ref FONT_SIZE_RE: Regex =
        Regex::new(r"(?i)\bfont\s*size\s*(?:to\s+)?(\d+(?:\.\d+)?)").expect("valid regex: FONT_SIZE_RE");

    #[allow(clippy::expect_used)]
    static ref COLOR_RE: Regex =
        Regex::new(r"(?i)\bcolou?r\b.*?(#[0-9a-f]{6}\b|#[0-9a-f]{3}\b)").expect("valid regex: COLOR_RE");

    #[allow(clippy::expect_used)]
    static ref ALIGN_RE: Regex =
        Regex::new(r"(?i)\b(center|centre|left|right)(?:ed)?\b").expect("valid regex: ALIGN_RE");

    #[allow(clippy::expect_used)]
    static ref ANALYZE_RE: Regex = Regex::new(
        r"(?i)\b(analy[sz]e|analysis|review|check|improve|suggestions?|feedback)\b|what do you think|how does it look"
    )
    .expect("valid regex: ANALYZE_RE");
}

/// Rule-based resolver matching the phrasings listed in [`HELP`].
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordResolver;

#[async_trait]
impl IntentResolver for KeywordResolver {
    async fn classify(&self, utterance: &str, context: &Context) -> Result<Candidate, ResolveError> {
        Ok(classify(utterance, context))
    }
}

/// Synchronous core of [`KeywordResolver`].
pub fn classify(utterance: &str, context: &Context) -> Candidate {
    let text = utterance.trim();
    if text.is_empty() {
        return Candidate::Clarify(HELP.to_string());
    }

    if GREETING_RE.is_match(text) {
        return Candidate::Inform(GREETING.to_string());
    }
    if HELP_RE.is_match(text) {
        return Candidate::Inform(HELP.to_string());
    }
    if let Some(caps) = EDIT_RE.captures(text) {
        let target = target_keyword(&caps[1]);
        let content = caps[2].trim_matches(|c| matches!(c, '"' | '\'' | '“' | '”')).to_string();
        return Candidate::Command(Command::Edit {
            slide_index: context.current_slide_index,
            element_id: target.into(),
            changes: ContentChanges { content: Some(content), ..ContentChanges::default() },
        });
    }
    if let Some(candidate) = navigation(text, context) {
        return candidate;
    }
    if let Some(changes) = style_changes(text) {
        let target = if text.to_lowercase().contains("title") { "title" } else { "body" };
        return Candidate::Command(Command::Format {
            slide_index: context.current_slide_index,
            element_id: target.into(),
            changes,
        });
    }
    if ANALYZE_RE.is_match(text) {
        return Candidate::Command(Command::Analyze);
    }
    if EDIT_VAGUE_RE.is_match(text) {
        return Candidate::Clarify(
            "What should the new text say? Try \"edit the title to Quarterly Results\".".to_string(),
        );
    }

    Candidate::Clarify(format!("I'm not sure how to help with that request. {HELP}"))
}

fn navigation(text: &str, context: &Context) -> Option<Candidate> {
    if let Some(caps) = SLIDE_NUMBER_RE.captures(text) {
        return Some(match caps[1].parse::<usize>() {
            Ok(0) => Candidate::Clarify("Slides are numbered from 1.".to_string()),
            Ok(number) => Candidate::Command(Command::Navigate(number - 1)),
            Err(_) => Candidate::Clarify(format!("{} is not a slide number I can use.", &caps[1])),
        });
    }

    // A keyword followed by "slide" wins over an earlier bare one, so
    // "go back to the first slide" means the first slide.
    let caps = RELATIVE_RE
        .captures_iter(text)
        .find(|c| c.get(2).is_some())
        .or_else(|| RELATIVE_RE.captures(text))?;
    // Without "slide" only short phrases like "next" or "go back" count.
    if caps.get(2).is_none() && text.split_whitespace().count() > 2 {
        return None;
    }

    let current = context.current_slide_index;
    let candidate = match caps[1].to_lowercase().as_str() {
        "next" => Candidate::Command(Command::Navigate(current + 1)),
        "previous" | "prev" | "back" => match current.checked_sub(1) {
            Some(index) => Candidate::Command(Command::Navigate(index)),
            None => Candidate::Inform("You're already on the first slide.".to_string()),
        },
        "first" => Candidate::Command(Command::Navigate(0)),
        _ => match context.total_slides.checked_sub(1) {
            Some(index) => Candidate::Command(Command::Navigate(index)),
            None => Candidate::Clarify("There are no slides to show yet.".to_string()),
        },
    };
    Some(candidate)
}

fn target_keyword(word: &str) -> &'static str {
    match word.to_lowercase().as_str() {
        "title" | "heading" => "title",
        _ => "body",
    }
}

/// Style changes named in `text`, or `None` if it names none.
fn style_changes(text: &str) -> Option<StyleChanges> {
    let lower = text.to_lowercase();
    let mut changes = StyleChanges::default();

    if let Some(caps) = FONT_SIZE_RE.captures(text) {
        changes.font_size = caps[1].parse().ok();
    } else if ["larger", "bigger", "increase"].iter().any(|w| lower.contains(w)) {
        changes.font_size = Some(LARGER_FONT_SIZE);
    } else if ["smaller", "decrease", "shrink"].iter().any(|w| lower.contains(w)) {
        changes.font_size = Some(SMALLER_FONT_SIZE);
    }

    if lower.contains("bold") {
        changes.weight = Some(if lower.contains("not bold") || lower.contains("unbold") {
            FontWeight::Normal
        } else {
            FontWeight::Bold
        });
    }
    if lower.contains("italic") {
        changes.italic = Some(!lower.contains("not italic"));
    }
    if lower.contains("align") || lower.contains("center") || lower.contains("centre") {
        changes.align = ALIGN_RE.captures(text).and_then(|caps| TextAlign::from_keyword(&caps[1]));
    }
    if let Some(caps) = COLOR_RE.captures(text) {
        changes.color = Color::parse(&caps[1]).ok();
    }

    (!changes.is_empty()).then_some(changes)
}
