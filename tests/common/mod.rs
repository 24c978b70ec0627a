//! In-memory presentation packages for integration tests.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, dead_code)]

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Zip the given `(name, contents)` parts.
pub fn zip_parts(parts: &[(&str, String)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in parts {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// One slide for [`pptx`]: title, body paragraphs and optional notes.
pub struct SlideSpec<'a> {
    pub title: &'a str,
    pub body: &'a [&'a str],
    pub notes: Option<&'a str>,
}

fn pptx_shape(placeholder: &str, paragraphs: &[&str]) -> String {
    let paragraphs: String = paragraphs.iter().map(|p| format!("<a:p><a:r><a:t>{p}</a:t></a:r></a:p>")).collect();
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="s"/><p:cNvSpPr/><p:nvPr>{placeholder}</p:nvPr></p:nvSpPr><p:txBody><a:bodyPr/>{paragraphs}</p:txBody></p:sp>"#
    )
}

/// Build a minimal `.pptx`. Slides are listed in presentation.xml in reverse
/// part-name order to check that relationship order wins over file names.
pub fn pptx(slides: &[SlideSpec<'_>], author: &str) -> Vec<u8> {
    const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
    const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    const REL_NOTES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide";

    let count = slides.len();
    let mut parts: Vec<(String, String)> = Vec::new();
    let mut ids = String::new();
    let mut rels = String::new();

    for (index, slide) in slides.iter().enumerate() {
        // Presentation slide `index` lives in part number `count - index`.
        let number = count - index;
        ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + index, index + 1));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{REL_SLIDE}" Target="slides/slide{number}.xml"/>"#,
            index + 1
        ));

        let shapes = format!(
            "{}{}{}",
            pptx_shape(r#"<p:ph type="title"/>"#, &[slide.title]),
            pptx_shape(r#"<p:ph idx="1"/>"#, slide.body),
            pptx_shape(r#"<p:ph type="sldNum" idx="12"/>"#, &[number.to_string().as_str()]),
        );
        parts.push((
            format!("ppt/slides/slide{number}.xml"),
            format!(r#"<?xml version="1.0" encoding="UTF-8"?><p:sld {NS}><p:cSld><p:spTree>{shapes}</p:spTree></p:cSld></p:sld>"#),
        ));

        if let Some(notes) = slide.notes {
            parts.push((
                format!("ppt/slides/_rels/slide{number}.xml.rels"),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId2" Type="{REL_NOTES}" Target="../notesSlides/notesSlide{number}.xml"/></Relationships>"#
                ),
            ));
            let notes_shapes = format!(
                "{}{}",
                pptx_shape(r#"<p:ph type="sldImg"/>"#, &["thumbnail"]),
                pptx_shape(r#"<p:ph type="body" idx="1"/>"#, &[notes]),
            );
            parts.push((
                format!("ppt/notesSlides/notesSlide{number}.xml"),
                format!(r#"<?xml version="1.0" encoding="UTF-8"?><p:notes {NS}><p:cSld><p:spTree>{notes_shapes}</p:spTree></p:cSld></p:notes>"#),
            ));
        }
    }

    parts.push((
        "ppt/presentation.xml".to_string(),
        format!(r#"<?xml version="1.0" encoding="UTF-8"?><p:presentation {NS}><p:sldIdLst>{ids}</p:sldIdLst></p:presentation>"#),
    ));
    parts.push((
        "ppt/_rels/presentation.xml.rels".to_string(),
        format!(r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#),
    ));
    parts.push((
        "docProps/core.xml".to_string(),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/"><dc:title>Ignored Title</dc:title><dc:creator>{author}</dc:creator><cp:revision>4</cp:revision><dcterms:created>2024-03-01T09:30:00Z</dcterms:created><dcterms:modified>2024-03-02T10:00:00Z</dcterms:modified></cp:coreProperties>"#
        ),
    ));

    let borrowed: Vec<(&str, String)> = parts.iter().map(|(n, c)| (n.as_str(), c.clone())).collect();
    zip_parts(&borrowed)
}

/// Build a minimal `.odp` with the same slide description.
pub fn odp(slides: &[SlideSpec<'_>], author: &str) -> Vec<u8> {
    let mut pages = String::new();
    for (index, slide) in slides.iter().enumerate() {
        let body: String = slide.body.iter().map(|p| format!("<text:p>{p}</text:p>")).collect();
        let notes = slide.notes.map_or_else(String::new, |n| {
            format!(
                r#"<presentation:notes><draw:page-thumbnail/><draw:frame presentation:class="notes"><draw:text-box><text:p>{n}</text:p></draw:text-box></draw:frame></presentation:notes>"#
            )
        });
        pages.push_str(&format!(
            r#"<draw:page draw:name="page{}"><draw:frame presentation:class="title"><draw:text-box><text:p>{}</text:p></draw:text-box></draw:frame><draw:frame presentation:class="outline"><draw:text-box>{body}</draw:text-box></draw:frame>{notes}</draw:page>"#,
            index + 1,
            slide.title
        ));
    }

    let content = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:draw="urn:oasis:names:tc:opendocument:xmlns:drawing:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:presentation="urn:oasis:names:tc:opendocument:xmlns:presentation:1.0"><office:body><office:presentation>{pages}</office:presentation></office:body></office:document-content>"#
    );
    let meta = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><office:document-meta xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:meta="urn:oasis:names:tc:opendocument:xmlns:meta:1.0"><office:meta><meta:initial-creator>{author}</meta:initial-creator><meta:creation-date>2023-11-05T14:03:22</meta:creation-date></office:meta></office:document-meta>"#
    );

    zip_parts(&[
        ("mimetype", "application/vnd.oasis.opendocument.presentation".to_string()),
        ("content.xml", content),
        ("meta.xml", meta),
    ])
}

/// Three-slide deck used across the integration tests.
pub fn sample_slides() -> Vec<SlideSpec<'static>> {
    vec![
        SlideSpec { title: "Welcome", body: &["Agenda", "Goals"], notes: Some("Introduce the team.") },
        SlideSpec { title: "Results", body: &["Revenue grew 12%"], notes: None },
        SlideSpec { title: "Questions", body: &[], notes: None },
    ]
}
