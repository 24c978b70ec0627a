//! Session state: current presentation, current slide and the undo log.

use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, warn};

use crate::command::apply::apply;
use crate::command::{ApplyResult, Command, Effect};
use crate::constants::history;
use crate::model::Presentation;

/// `undo()` or `redo()` found an empty log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("nothing to undo")]
pub struct NothingToUndo;

/// Presentation plus current slide, the unit the undo log stores.
#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    presentation: Presentation,
    current: usize,
}

/// Owns one editing session.
///
/// Every applied Navigate, Edit or Format pushes the prior snapshot onto a
/// bounded undo log; the oldest entry is evicted once `depth` is reached.
/// Any new successful apply clears the redo stack.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    state: Snapshot,
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    depth: usize,
}

impl CommandEngine {
    /// Start a session on `presentation` with the default undo depth.
    pub fn new(presentation: Presentation) -> Self {
        Self::with_depth(presentation, history::DEFAULT_UNDO_DEPTH)
    }

    /// Start a session keeping at most `depth` undo entries (at least one).
    pub fn with_depth(presentation: Presentation, depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            state: Snapshot { presentation, current: 0 },
            undo: VecDeque::with_capacity(depth),
            redo: Vec::new(),
            depth,
        }
    }

    /// The current presentation.
    pub const fn presentation(&self) -> &Presentation {
        &self.state.presentation
    }

    /// Index of the current slide.
    pub const fn current_slide(&self) -> usize {
        self.state.current
    }

    /// Number of entries `undo()` can restore.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Configured undo depth.
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Apply a command to the current state.
    pub fn apply(&mut self, command: &Command) -> ApplyResult {
        let (next, result) = apply(&self.state.presentation, command);

        match &result {
            ApplyResult::Applied(effect) => {
                let current = match effect {
                    Effect::Navigated { index } => *index,
                    Effect::Edited { slide_index, .. } | Effect::Formatted { slide_index, .. } => *slide_index,
                    Effect::Analyzed(_) => self.state.current,
                };
                let prior = std::mem::replace(&mut self.state, Snapshot { presentation: next, current });
                self.push_undo(prior);
                self.redo.clear();
                debug!(command = command.name(), undo_len = self.undo.len(), "State changed");
            }
            ApplyResult::Rejected(reason) => warn!(command = command.name(), %reason, "Command rejected"),
            _ => {}
        }

        result
    }

    /// Restore the snapshot taken before the most recent successful apply.
    pub fn undo(&mut self) -> Result<&Presentation, NothingToUndo> {
        let prior = self.undo.pop_back().ok_or(NothingToUndo)?;
        let undone = std::mem::replace(&mut self.state, prior);
        self.redo.push(undone);
        debug!(undo_len = self.undo.len(), "Undo");
        Ok(&self.state.presentation)
    }

    /// Re-apply the most recently undone apply.
    pub fn redo(&mut self) -> Result<&Presentation, NothingToUndo> {
        let next = self.redo.pop().ok_or(NothingToUndo)?;
        let prior = std::mem::replace(&mut self.state, next);
        self.push_undo(prior);
        debug!(undo_len = self.undo.len(), "Redo");
        Ok(&self.state.presentation)
    }

    /// Replace the whole session with a freshly imported presentation.
    pub fn replace(&mut self, presentation: Presentation) {
        self.state = Snapshot { presentation, current: 0 };
        self.undo.clear();
        self.redo.clear();
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        if self.undo.len() == self.depth {
            self.undo.pop_front();
        }
        self.undo.push_back(snapshot);
    }
}
