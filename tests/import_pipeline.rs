//! Import pipeline tests against real `.pptx` and `.odp` containers.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

mod common;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use slidepilot::ids::{SequentialIds, UuidIds};
use slidepilot::import::{ImportError, ImportPipeline, PresentationFormat};
use slidepilot::model::{validate, ElementRole, Presentation, Rect};

fn texts(presentation: &Presentation) -> Vec<(Option<String>, Vec<String>, Option<String>)> {
    presentation
        .slides
        .iter()
        .map(|slide| {
            let content = slide.elements.iter().filter_map(|e| e.text_content().map(str::to_string)).collect();
            (slide.title.clone(), content, slide.notes.clone())
        })
        .collect()
}

fn expected_texts() -> Vec<(Option<String>, Vec<String>, Option<String>)> {
    vec![
        (
            Some("Welcome".to_string()),
            vec!["Welcome".to_string(), "Agenda\nGoals".to_string()],
            Some("Introduce the team.".to_string()),
        ),
        (Some("Results".to_string()), vec!["Results".to_string(), "Revenue grew 12%".to_string()], None),
        (Some("Questions".to_string()), vec!["Questions".to_string(), String::new()], None),
    ]
}

#[test]
fn pptx_slides_follow_relationship_order() {
    let bytes = common::pptx(&common::sample_slides(), "Dana Reyes");
    let presentation = ImportPipeline::default().import(&bytes, "Quarterly Review.pptx").unwrap();

    assert_eq!(presentation.title, "Quarterly Review");
    assert_eq!(texts(&presentation), expected_texts());
    assert!(validate(&presentation).is_empty());

    let meta = &presentation.metadata;
    assert_eq!(meta.author.as_deref(), Some("Dana Reyes"));
    assert_eq!(meta.created_at, Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()));
    assert_eq!(meta.modified_at, Some(Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap()));
    assert_eq!(meta.version.as_deref(), Some("4"));
}

#[test]
fn odp_pages_decode_like_pptx() {
    let bytes = common::odp(&common::sample_slides(), "Sam Okafor");
    let presentation = ImportPipeline::default().import(&bytes, "deck.odp").unwrap();

    assert_eq!(presentation.title, "deck");
    assert_eq!(texts(&presentation), expected_texts());
    assert!(validate(&presentation).is_empty());
    assert_eq!(presentation.metadata.author.as_deref(), Some("Sam Okafor"));
    assert_eq!(
        presentation.metadata.created_at,
        Some(Utc.with_ymd_and_hms(2023, 11, 5, 14, 3, 22).unwrap())
    );
}

#[test]
fn decoded_slides_use_the_standard_layout() {
    let bytes = common::pptx(&common::sample_slides(), "Dana Reyes");
    let presentation = ImportPipeline::default().import(&bytes, "deck.pptx").unwrap();

    for slide in &presentation.slides {
        assert_eq!(slide.elements.len(), 2);
        let title = &slide.elements[0];
        let body = &slide.elements[1];
        assert_eq!(title.role, Some(ElementRole::Title));
        assert_eq!(title.bounds, Rect::new(50.0, 50.0, 700.0, 80.0));
        assert_eq!(body.role, Some(ElementRole::Body));
        assert_eq!(body.bounds, Rect::new(50.0, 150.0, 700.0, 400.0));
    }
}

#[test]
fn unknown_extension_is_unsupported() {
    let err = ImportPipeline::default().import(b"anything", "deck.xyz").unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat { ref extension, .. } if extension == "xyz"), "{err}");
}

#[test]
fn legacy_binary_formats_have_no_decoder() {
    let err = ImportPipeline::default().import(b"\xD0\xCF\x11\xE0", "old.ppt").unwrap_err();
    assert_eq!(err, ImportError::DecoderUnavailable { format: PresentationFormat::Ppt });
}

#[test]
fn garbage_bytes_are_corrupt() {
    let err = ImportPipeline::default().import(b"definitely not a zip archive", "deck.pptx").unwrap_err();
    assert!(matches!(err, ImportError::CorruptData { .. }), "{err}");

    let err = ImportPipeline::default().import(b"PK\x03\x04 truncated", "deck.odp").unwrap_err();
    assert!(matches!(err, ImportError::CorruptData { .. }), "{err}");
}

#[test]
fn pinned_identities_make_imports_identical() {
    let bytes = common::pptx(&common::sample_slides(), "Dana Reyes");
    let pipeline = ImportPipeline::default();

    let first = pipeline.import_with(&bytes, "deck.pptx", &mut SequentialIds::new("t")).unwrap();
    let second = pipeline.import_with(&bytes, "deck.pptx", &mut SequentialIds::new("t")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn random_identities_only_change_ids() {
    let bytes = common::pptx(&common::sample_slides(), "Dana Reyes");
    let pipeline = ImportPipeline::default();

    let mut first = pipeline.import_with(&bytes, "deck.pptx", &mut UuidIds).unwrap();
    let second = pipeline.import_with(&bytes, "deck.pptx", &mut UuidIds).unwrap();
    assert_ne!(first.id, second.id);

    first.id = second.id.clone();
    for (a, b) in first.slides.iter_mut().zip(&second.slides) {
        a.id = b.id.clone();
        for (x, y) in a.elements.iter_mut().zip(&b.elements) {
            x.id = y.id.clone();
        }
    }
    assert_eq!(first, second);
}

#[tokio::test]
async fn background_import_joins() {
    let bytes = common::odp(&common::sample_slides(), "Sam Okafor");
    let presentation = ImportPipeline::default().spawn_import(bytes, "talk.odp".to_string()).join().await.unwrap();
    assert_eq!(presentation.slide_count(), 3);
    assert_eq!(presentation.title, "talk");
}

#[tokio::test]
async fn cancelled_import_reports_cancelled() {
    let bytes = common::pptx(&common::sample_slides(), "Dana Reyes");
    let mut task = ImportPipeline::default().spawn_import(bytes, "deck.pptx".to_string());
    task.cancel();
    assert_eq!(task.join().await.unwrap_err(), ImportError::Cancelled);
}
