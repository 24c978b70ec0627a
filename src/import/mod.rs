//! Import pipeline: raw bytes plus a declared file name in, a presentation out.
//!
//! The pipeline detects the format from the file name, hands the bytes to the
//! registered decoder, and lays each decoded slide out on the standard
//! title/body bands with fresh identities. Decoder failures surface as
//! [`ImportError`] values; a partially built presentation is never returned.

pub mod decoder;
pub mod format;
pub mod odf;
pub mod ooxml;
pub mod package;

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::constants::layout::BACKGROUND_COLOR;
use crate::ids::{IdGenerator, UuidIds};
use crate::model::{layout, Background, Color, Metadata, Presentation, Slide};

pub use decoder::{DeckMetadata, DecodeError, DecodedDeck, Decoder, DecoderRegistry, RawSlide};
pub use format::PresentationFormat;
pub use odf::OdfDecoder;
pub use ooxml::OoxmlDecoder;

/// Outcome of one file-open operation.
pub type ImportResult = Result<Presentation, ImportError>;

/// Why an import produced no presentation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The file name does not carry a recognized presentation extension, or
    /// the decoder reported content it cannot read.
    #[error("unsupported format {extension:?}: {reason}")]
    UnsupportedFormat {
        /// Extension as declared (may be empty).
        extension: String,
        /// What made it unsupported.
        reason: String,
    },

    /// The bytes are not a valid instance of the detected format.
    #[error("corrupt data: {reason}")]
    CorruptData {
        /// Decoder diagnostic.
        reason: String,
    },

    /// The format is recognized but no decoder is registered for it.
    #[error("no decoder available for {format}")]
    DecoderUnavailable {
        /// The detected format.
        format: PresentationFormat,
    },

    /// The decoder ran out of resources. Fatal; surfaced unchanged.
    #[error("decoder exhausted its resources: {0}")]
    ResourceExhausted(#[source] DecodeError),

    /// The import was cancelled before it finished.
    #[error("import cancelled")]
    Cancelled,
}

impl ImportError {
    fn from_decode(error: DecodeError, format: PresentationFormat) -> Self {
        match error {
            DecodeError::Corrupt(reason) => Self::CorruptData { reason },
            DecodeError::Unsupported(reason) => {
                Self::UnsupportedFormat { extension: format.extension().to_string(), reason }
            }
            exhausted @ DecodeError::ResourceExhausted(_) => Self::ResourceExhausted(exhausted),
        }
    }
}

/// Turns bytes into presentations using a registry of decoders.
#[derive(Debug, Clone)]
pub struct ImportPipeline {
    registry: Arc<DecoderRegistry>,
}

impl Default for ImportPipeline {
    fn default() -> Self {
        Self::new(DecoderRegistry::with_defaults())
    }
}

impl ImportPipeline {
    /// Create a pipeline over a decoder registry.
    pub fn new(registry: DecoderRegistry) -> Self {
        Self { registry: Arc::new(registry) }
    }

    /// Import with random UUID identities.
    pub fn import(&self, bytes: &[u8], file_name: &str) -> ImportResult {
        self.import_with(bytes, file_name, &mut UuidIds)
    }

    /// Import, drawing every identity from `ids`.
    pub fn import_with(&self, bytes: &[u8], file_name: &str, ids: &mut dyn IdGenerator) -> ImportResult {
        let format = PresentationFormat::from_file_name(file_name).ok_or_else(|| ImportError::UnsupportedFormat {
            extension: format::extension_of(file_name).unwrap_or_default().to_string(),
            reason: "not a recognized presentation file".to_string(),
        })?;

        let decoder = self.registry.get(format).ok_or(ImportError::DecoderUnavailable { format })?;

        let deck = decoder.decode(bytes).map_err(|e| {
            tracing::warn!("{} decoder rejected {file_name}: {e}", decoder.format_name());
            ImportError::from_decode(e, format)
        })?;

        let presentation = assemble(deck, &format::title_from_file_name(file_name), ids)?;
        tracing::info!("Imported {} slides from {file_name}", presentation.slides.len());
        Ok(presentation)
    }

    /// Run an import in the background. Decoding happens on the blocking pool.
    pub fn spawn_import(&self, bytes: Vec<u8>, file_name: String) -> ImportTask {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let pipeline = self.clone();

        let handle = tokio::spawn(async move {
            let work = tokio::task::spawn_blocking(move || pipeline.import(&bytes, &file_name));
            tokio::select! {
                biased;
                Ok(()) = cancel_rx => Err(ImportError::Cancelled),
                joined = work => joined.unwrap_or_else(|e| Err(ImportError::CorruptData {
                    reason: format!("decoder task failed: {e}"),
                })),
            }
        });

        ImportTask { handle, cancel: Some(cancel_tx) }
    }
}

/// Handle to a background import.
///
/// Cancelling resolves the task to [`ImportError::Cancelled`]; whatever the
/// decoder produces afterwards is discarded.
#[derive(Debug)]
pub struct ImportTask {
    handle: JoinHandle<ImportResult>,
    cancel: Option<oneshot::Sender<()>>,
}

impl ImportTask {
    /// Request cancellation. Has no effect once the import has finished.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Check whether the import has completed (or been cancelled).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the result.
    pub async fn join(self) -> ImportResult {
        // Holding the sender keeps the cancel branch from firing on drop.
        let Self { handle, cancel: _cancel } = self;
        handle.await.unwrap_or(Err(ImportError::Cancelled))
    }
}

/// Build a presentation from decoder output using the standard layout.
pub fn assemble(deck: DecodedDeck, fallback_title: &str, ids: &mut dyn IdGenerator) -> ImportResult {
    if deck.slide_count != deck.slides.len() {
        return Err(ImportError::CorruptData {
            reason: format!(
                "decoder declared {} slides but returned {}",
                deck.slide_count,
                deck.slides.len()
            ),
        });
    }

    let background = Color::parse(BACKGROUND_COLOR)
        .ok()
        .map(|color| Background { color: Some(color), image: None });

    let slides = deck
        .slides
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let heading = raw.title.filter(|t| !t.trim().is_empty());
            let label = format!("Slide {}", index + 1);
            Slide {
                id: ids.slide(),
                title: Some(heading.clone().unwrap_or_else(|| label.clone())),
                elements: vec![
                    layout::title_element(ids, heading.unwrap_or(label)),
                    layout::body_element(ids, raw.body.join("\n")),
                ],
                background: background.clone(),
                notes: raw.notes,
            }
        })
        .collect();

    let now = Utc::now();
    let meta = deck.metadata;
    Ok(Presentation {
        id: ids.presentation(),
        title: fallback_title.to_string(),
        slides,
        metadata: Metadata {
            author: meta.author,
            created_at: Some(meta.created.unwrap_or(now)),
            modified_at: Some(meta.modified.unwrap_or(now)),
            version: meta.version,
        },
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::ids::SequentialIds;
    use crate::model::validate;

    struct FixedDecoder(Result<DecodedDeck, DecodeError>);

    impl Decoder for FixedDecoder {
        fn decode(&self, _bytes: &[u8]) -> Result<DecodedDeck, DecodeError> {
            self.0.clone()
        }

        fn format_name(&self) -> &'static str {
            "fixed"
        }
    }

    fn pipeline_with(result: Result<DecodedDeck, DecodeError>) -> ImportPipeline {
        let mut registry = DecoderRegistry::new();
        registry.register(PresentationFormat::Ppt, FixedDecoder(result));
        ImportPipeline::new(registry)
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let result = ImportPipeline::default().import(b"", "deck.xyz");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat { ref extension, .. }) if extension == "xyz"));
    }

    #[test]
    fn missing_decoder_is_unavailable() {
        let result = ImportPipeline::default().import(b"", "legacy.ppt");
        assert_eq!(result, Err(ImportError::DecoderUnavailable { format: PresentationFormat::Ppt }));
    }

    #[test]
    fn decoded_slides_get_standard_layout() {
        let deck = DecodedDeck::from_slides(vec![
            RawSlide::new("Intro", ["Hello", "World"]),
            RawSlide { notes: Some("remember".into()), ..RawSlide::default() },
        ]);
        let mut ids = SequentialIds::new("t");
        let deck = pipeline_with(Ok(deck)).import_with(b"", "Talk.PPT", &mut ids).unwrap();

        assert_eq!(deck.title, "Talk");
        assert_eq!(deck.slides.len(), 2);
        assert!(validate(&deck).is_empty());

        let first = &deck.slides[0];
        assert_eq!(first.title.as_deref(), Some("Intro"));
        assert_eq!(first.elements[0].text_content(), Some("Intro"));
        assert_eq!(first.elements[1].text_content(), Some("Hello\nWorld"));
        assert_eq!(first.elements[0].bounds, layout::title_bounds());
        assert_eq!(first.elements[1].bounds, layout::body_bounds());

        let second = &deck.slides[1];
        assert_eq!(second.title.as_deref(), Some("Slide 2"));
        assert_eq!(second.notes.as_deref(), Some("remember"));
    }

    #[test]
    fn every_identity_is_fresh() {
        let deck = DecodedDeck::from_slides(vec![RawSlide::new("A", ["a"]), RawSlide::new("B", ["b"])]);
        let deck = pipeline_with(Ok(deck)).import(b"", "x.ppt").unwrap();

        let mut seen = std::collections::HashSet::new();
        assert!(seen.insert(deck.id.to_string()));
        for slide in &deck.slides {
            assert!(seen.insert(slide.id.to_string()));
            for element in &slide.elements {
                assert!(seen.insert(element.id.to_string()));
            }
        }
    }

    #[test]
    fn count_mismatch_is_corrupt() {
        let deck = DecodedDeck { slide_count: 3, slides: vec![RawSlide::default()], metadata: DeckMetadata::default() };
        assert!(matches!(pipeline_with(Ok(deck)).import(b"", "x.ppt"), Err(ImportError::CorruptData { .. })));
    }

    #[test]
    fn decoder_errors_map_to_import_errors() {
        let corrupt = pipeline_with(Err(DecodeError::Corrupt("bad".into()))).import(b"", "x.ppt");
        assert_eq!(corrupt, Err(ImportError::CorruptData { reason: "bad".into() }));

        let unsupported = pipeline_with(Err(DecodeError::Unsupported("encrypted".into()))).import(b"", "x.ppt");
        assert!(matches!(unsupported, Err(ImportError::UnsupportedFormat { .. })));

        let exhausted = DecodeError::ResourceExhausted("oom".into());
        let result = pipeline_with(Err(exhausted.clone())).import(b"", "x.ppt");
        assert_eq!(result, Err(ImportError::ResourceExhausted(exhausted)));
    }
}
