//! Identity generation for documents.
//!
//! Generators are explicit values handed to whoever builds a presentation, so
//! two imports never share a counter and tests can pin identities.

use uuid::Uuid;

use crate::types::{ElementId, PresentationId, SlideId};

/// Source of fresh identities for one construction session.
pub trait IdGenerator: Send {
    /// Produce the next raw identity string.
    fn next_raw(&mut self) -> String;

    /// Fresh presentation identity.
    fn presentation(&mut self) -> PresentationId {
        PresentationId(self.next_raw())
    }

    /// Fresh slide identity.
    fn slide(&mut self) -> SlideId {
        SlideId(self.next_raw())
    }

    /// Fresh element identity.
    fn element(&mut self) -> ElementId {
        ElementId(self.next_raw())
    }
}

/// Random v4 UUIDs. The production generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_raw(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` identities, counted from 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Create a generator producing `prefix-1`, `prefix-2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: 1 }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIds {
    fn next_raw(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
