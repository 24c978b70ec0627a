//! Assistant bridge: free text in, one [`Command`] out.
//!
//! Classification belongs to a pluggable [`IntentResolver`]. The bridge only
//! enforces the guards that depend on session context, so resolvers stay
//! context-free and the engine never sees an out-of-range navigation from
//! the assistant.

pub mod keyword;
pub mod reply;
pub mod transcript;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::command::Command;

pub use keyword::KeywordResolver;
pub use reply::acknowledge;
pub use transcript::{ChatMessage, MessageKind, Sender, Transcript};

/// Session facts a resolver and the bridge guards may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Context {
    /// Zero-based index of the slide on screen.
    pub current_slide_index: usize,
    /// Number of slides in the open presentation.
    pub total_slides: usize,
    /// False while only the placeholder deck is shown.
    pub has_presentation: bool,
}

/// What a resolver made of an utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// A structured command.
    Command(Command),
    /// The resolver needs more detail from the user.
    Clarify(String),
    /// Informational reply with nothing to apply (greetings, help).
    Inform(String),
}

/// The resolver could not produce a candidate at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("intent resolver failed: {0}")]
pub struct ResolveError(pub String);

/// Classifies utterances. Implementations may be rule based or remote.
#[async_trait]
pub trait IntentResolver: Send + Sync {
    /// Turn one utterance into a candidate.
    async fn classify(&self, utterance: &str, context: &Context) -> Result<Candidate, ResolveError>;
}

/// Simulated latency before a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelayPolicy {
    /// Reply immediately.
    #[default]
    None,
    /// Wait this long before classifying.
    Fixed(Duration),
}

impl DelayPolicy {
    /// `Fixed` for a non-zero duration, `None` otherwise.
    pub const fn from_duration(delay: Duration) -> Self {
        if delay.is_zero() {
            Self::None
        } else {
            Self::Fixed(delay)
        }
    }

    async fn wait(self) {
        if let Self::Fixed(delay) = self {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Reason used when analysis is requested with nothing open.
pub const NO_DOCUMENT: &str = "no document loaded";

/// Adapter from free text to commands. Owns no document state.
pub struct AssistantBridge {
    resolver: Box<dyn IntentResolver>,
    delay: DelayPolicy,
}

impl std::fmt::Debug for AssistantBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantBridge").field("delay", &self.delay).finish_non_exhaustive()
    }
}

impl Default for AssistantBridge {
    fn default() -> Self {
        Self::new(KeywordResolver)
    }
}

impl AssistantBridge {
    /// Bridge over `resolver` with no delay.
    pub fn new(resolver: impl IntentResolver + 'static) -> Self {
        Self { resolver: Box::new(resolver), delay: DelayPolicy::None }
    }

    /// Set the reply delay.
    #[must_use]
    pub const fn with_delay(mut self, delay: DelayPolicy) -> Self {
        self.delay = delay;
        self
    }

    /// Resolve an utterance into exactly one command.
    pub async fn resolve(&self, utterance: &str, context: &Context) -> Command {
        self.delay.wait().await;

        let candidate = match self.resolver.classify(utterance, context).await {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!(error = %e, "Intent resolution failed");
                return Command::unrecognized(format!("I couldn't process that request ({e})"));
            }
        };
        debug!(?candidate, "Resolved utterance");

        match candidate {
            Candidate::Command(command) => guard(command, context),
            Candidate::Clarify(text) | Candidate::Inform(text) => Command::Unrecognized { reason: text },
        }
    }
}

/// Downgrade commands the current context cannot satisfy.
pub fn guard(command: Command, context: &Context) -> Command {
    match command {
        Command::Navigate(index) if index >= context.total_slides => Command::unrecognized(format!(
            "I can't navigate to slide {} because your presentation only has {} slides",
            index + 1,
            context.total_slides
        )),
        Command::Analyze if !context.has_presentation => Command::unrecognized(NO_DOCUMENT),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    struct Fixed(Result<Candidate, ResolveError>);

    #[async_trait]
    impl IntentResolver for Fixed {
        async fn classify(&self, _utterance: &str, _context: &Context) -> Result<Candidate, ResolveError> {
            self.0.clone()
        }
    }

    const CTX: Context = Context { current_slide_index: 0, total_slides: 3, has_presentation: true };

    #[tokio::test]
    async fn out_of_range_navigation_is_downgraded() {
        let bridge = AssistantBridge::default();
        match bridge.resolve("go to slide 9", &CTX).await {
            Command::Unrecognized { reason } => {
                assert!(reason.contains("slide 9"), "{reason}");
                assert!(reason.contains("3 slides"), "{reason}");
            }
            other => panic!("expected unrecognized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn analyze_without_document_is_downgraded() {
        let bridge = AssistantBridge::new(Fixed(Ok(Candidate::Command(Command::Analyze))));
        let ctx = Context { has_presentation: false, ..CTX };
        assert_eq!(bridge.resolve("analyze", &ctx).await, Command::unrecognized(NO_DOCUMENT));
        assert_eq!(bridge.resolve("analyze", &CTX).await, Command::Analyze);
    }

    #[tokio::test]
    async fn guards_apply_to_any_resolver() {
        let bridge = AssistantBridge::new(Fixed(Ok(Candidate::Command(Command::Navigate(3)))));
        assert!(matches!(bridge.resolve("anything", &CTX).await, Command::Unrecognized { .. }));
    }

    #[tokio::test]
    async fn resolver_failure_and_clarify_become_unrecognized() {
        let failing = AssistantBridge::new(Fixed(Err(ResolveError("timeout".into()))));
        assert!(matches!(failing.resolve("x", &CTX).await, Command::Unrecognized { .. }));

        let clarify = AssistantBridge::new(Fixed(Ok(Candidate::Clarify("Which slide?".into()))));
        assert_eq!(clarify.resolve("x", &CTX).await, Command::unrecognized("Which slide?"));
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_waits_before_resolving() {
        let bridge = AssistantBridge::default().with_delay(DelayPolicy::Fixed(Duration::from_millis(1500)));
        let start = tokio::time::Instant::now();
        bridge.resolve("next slide", &CTX).await;
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
