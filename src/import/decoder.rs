//! Decoder contract and registry.
//!
//! A decoder turns container bytes into per-slide raw text. It knows nothing
//! about layout or identities; the pipeline owns both.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::import::format::PresentationFormat;
use crate::import::odf::OdfDecoder;
use crate::import::ooxml::OoxmlDecoder;

/// Text content of one slide as a decoder sees it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSlide {
    /// Title placeholder text.
    pub title: Option<String>,
    /// Body paragraphs in reading order.
    pub body: Vec<String>,
    /// Speaker notes.
    pub notes: Option<String>,
}

impl RawSlide {
    /// Slide with a title and body paragraphs.
    pub fn new(title: impl Into<String>, body: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { title: Some(title.into()), body: body.into_iter().map(Into::into).collect(), notes: None }
    }
}

/// Document properties a container may carry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeckMetadata {
    /// Author.
    pub author: Option<String>,
    /// Creation time.
    pub created: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified: Option<DateTime<Utc>>,
    /// Format or generator version.
    pub version: Option<String>,
}

/// Everything a decoder returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedDeck {
    /// Declared number of slides. Must equal `slides.len()`.
    pub slide_count: usize,
    /// Raw content, one entry per slide.
    pub slides: Vec<RawSlide>,
    /// Document properties.
    pub metadata: DeckMetadata,
}

impl DecodedDeck {
    /// Deck whose declared count matches its slides.
    pub fn from_slides(slides: Vec<RawSlide>) -> Self {
        Self { slide_count: slides.len(), slides, metadata: DeckMetadata::default() }
    }
}

/// Failure reported by a decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bytes are not a well-formed instance of the format.
    #[error("corrupt data: {0}")]
    Corrupt(String),

    /// The bytes are valid but use a feature the decoder cannot read.
    #[error("unsupported content: {0}")]
    Unsupported(String),

    /// The decoder ran out of memory or hit a size limit.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
}

/// A format-specific decoder.
pub trait Decoder: Send + Sync {
    /// Decode a complete file.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedDeck, DecodeError>;

    /// Get the format name (for logging).
    fn format_name(&self) -> &'static str;
}

/// Decoders keyed by format.
#[derive(Clone, Default)]
pub struct DecoderRegistry {
    decoders: HashMap<PresentationFormat, Arc<dyn Decoder>>,
}

impl DecoderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { decoders: HashMap::new() }
    }

    /// Registry with the built-in packaged-XML and OpenDocument decoders.
    /// Legacy binary files stay unavailable until a decoder is registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PresentationFormat::Pptx, OoxmlDecoder::default());
        registry.register(PresentationFormat::Odp, OdfDecoder::default());
        registry
    }

    /// Register (or replace) the decoder for a format.
    pub fn register(&mut self, format: PresentationFormat, decoder: impl Decoder + 'static) {
        self.decoders.insert(format, Arc::new(decoder));
    }

    /// Decoder for a format, if one is registered.
    pub fn get(&self, format: PresentationFormat) -> Option<Arc<dyn Decoder>> {
        self.decoders.get(&format).cloned()
    }

    /// Check whether a format has a decoder.
    pub fn supports(&self, format: PresentationFormat) -> bool {
        self.decoders.contains_key(&format)
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut formats: Vec<_> = self.decoders.iter().map(|(k, v)| (k.extension(), v.format_name())).collect();
        formats.sort_unstable();
        f.debug_struct("DecoderRegistry").field("decoders", &formats).finish()
    }
}
