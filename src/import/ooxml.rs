//! Text decoder for Office Open XML presentations (`.pptx`).
//!
//! Reads slide order from `ppt/presentation.xml` and its relationships, then
//! pulls title placeholders, body paragraphs and notes out of each slide part.
//! Geometry, media and theme parts are ignored; the pipeline lays slides out.

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::import::decoder::{DeckMetadata, DecodeError, DecodedDeck, Decoder, RawSlide};
use crate::import::package::{attr, attr_local, relationships, resolve_target, text_by_local_name, xml_error, Package};

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";
const CORE_PROPERTIES: &str = "docProps/core.xml";
const NOTES_REL_SUFFIX: &str = "/notesSlide";

/// Placeholder types that hold slide titles.
const TITLE_PLACEHOLDERS: &[&str] = &["title", "ctrTitle"];

/// Placeholder types whose text is chrome rather than content.
const CHROME_PLACEHOLDERS: &[&str] = &["sldNum", "dt", "ftr", "hdr", "sldImg"];

/// Decoder for `.pptx` packages.
#[derive(Debug, Default, Clone, Copy)]
pub struct OoxmlDecoder;

impl Decoder for OoxmlDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedDeck, DecodeError> {
        let mut package = Package::open(bytes)?;

        let slide_parts = slide_part_names(&mut package)?;
        let mut slides = Vec::with_capacity(slide_parts.len());
        for part in &slide_parts {
            slides.push(decode_slide(&mut package, part)?);
        }

        let metadata = match package.part(CORE_PROPERTIES)? {
            Some(xml) => core_properties(&xml)?,
            None => DeckMetadata::default(),
        };

        Ok(DecodedDeck { slide_count: slide_parts.len(), slides, metadata })
    }

    fn format_name(&self) -> &'static str {
        "OOXML"
    }
}

/// Slide part names in presentation order.
fn slide_part_names(package: &mut Package<'_>) -> Result<Vec<String>, DecodeError> {
    let presentation = package.required_part(PRESENTATION_PART)?;
    let rels = relationships(&package.required_part(PRESENTATION_RELS)?, PRESENTATION_RELS)?;

    let mut reader = Reader::from_reader(presentation.as_slice());
    reader.trim_text(true);

    let mut parts = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.local_name().as_ref() == b"sldId" => {
                let rel_id = attr(&e, b"r:id")
                    .ok_or_else(|| DecodeError::Corrupt("slide entry without r:id".to_string()))?;
                let rel = rels
                    .iter()
                    .find(|r| r.id == rel_id)
                    .ok_or_else(|| DecodeError::Corrupt(format!("dangling slide relationship {rel_id}")))?;
                parts.push(resolve_target("ppt", &rel.target));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(PRESENTATION_PART, &e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(parts)
}

fn decode_slide(package: &mut Package<'_>, part: &str) -> Result<RawSlide, DecodeError> {
    let shapes = shape_texts(&package.required_part(part)?, part)?;

    let mut title = None;
    let mut body = Vec::new();
    for shape in shapes {
        let placeholder = shape.placeholder.as_deref();
        if placeholder.is_some_and(|p| CHROME_PLACEHOLDERS.contains(&p)) {
            continue;
        }
        if title.is_none() && placeholder.is_some_and(|p| TITLE_PLACEHOLDERS.contains(&p)) {
            title = Some(shape.paragraphs.join(" "));
        } else {
            body.extend(shape.paragraphs);
        }
    }

    Ok(RawSlide { title, body, notes: notes_for(package, part)? })
}

/// Notes text for a slide part, following its `notesSlide` relationship.
fn notes_for(package: &mut Package<'_>, slide_part: &str) -> Result<Option<String>, DecodeError> {
    let (dir, file) = slide_part.rsplit_once('/').unwrap_or(("", slide_part));
    let rels_part = format!("{dir}/_rels/{file}.rels");

    let Some(rels_xml) = package.part(&rels_part)? else {
        return Ok(None);
    };
    let Some(rel) = relationships(&rels_xml, &rels_part)?.into_iter().find(|r| r.kind.ends_with(NOTES_REL_SUFFIX))
    else {
        return Ok(None);
    };

    let notes_part = resolve_target(dir, &rel.target);
    let Some(xml) = package.part(&notes_part)? else {
        return Ok(None);
    };

    let text = shape_texts(&xml, &notes_part)?
        .into_iter()
        .filter(|s| s.placeholder.as_deref() == Some("body"))
        .flat_map(|s| s.paragraphs)
        .collect::<Vec<_>>()
        .join("\n");

    Ok((!text.is_empty()).then_some(text))
}

/// Text of one shape, with its placeholder type if it is a placeholder.
#[derive(Debug, Default)]
struct ShapeText {
    placeholder: Option<String>,
    paragraphs: Vec<String>,
}

/// Walk a slide (or notes) part and collect paragraphs per shape. Paragraphs
/// outside any `p:sp` (tables in graphic frames) become placeholder-less shapes.
fn shape_texts(xml: &[u8], part: &str) -> Result<Vec<ShapeText>, DecodeError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);

    let mut shapes = Vec::new();
    let mut loose = ShapeText::default();
    let mut shape: Option<ShapeText> = None;
    let mut paragraph = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"sp" => shape = Some(ShapeText::default()),
                b"t" => in_text = true,
                b"ph" => mark_placeholder(shape.as_mut(), &e),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"ph" => mark_placeholder(shape.as_mut(), &e),
                b"br" => paragraph.push(' '),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                paragraph.push_str(&t.unescape().map_err(|e| xml_error(part, &e))?);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let text = paragraph.trim();
                    if !text.is_empty() {
                        shape.as_mut().unwrap_or(&mut loose).paragraphs.push(text.to_string());
                    }
                    paragraph.clear();
                }
                b"sp" => {
                    if let Some(done) = shape.take() {
                        if !done.paragraphs.is_empty() {
                            shapes.push(done);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, &e)),
            _ => {}
        }
        buf.clear();
    }

    if !loose.paragraphs.is_empty() {
        shapes.push(loose);
    }
    Ok(shapes)
}

fn mark_placeholder(shape: Option<&mut ShapeText>, element: &quick_xml::events::BytesStart<'_>) {
    if let Some(shape) = shape {
        // A placeholder without a type is a generic content ("obj") placeholder.
        shape.placeholder = Some(attr_local(element, b"type").unwrap_or_else(|| "obj".to_string()));
    }
}

fn core_properties(xml: &[u8]) -> Result<DeckMetadata, DecodeError> {
    let found = text_by_local_name(xml, CORE_PROPERTIES, &["creator", "created", "modified", "revision"])?;
    let date = |key: &str| {
        found
            .get(key)
            .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
            .map(|d| d.with_timezone(&Utc))
    };

    Ok(DeckMetadata {
        author: found.get("creator").cloned(),
        created: date("created"),
        modified: date("modified"),
        version: found.get("revision").cloned(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn shape_texts_split_title_and_body() {
        let xml = br#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree>
            <p:sp><p:nvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
              <p:txBody><a:p><a:r><a:t>Quarterly </a:t></a:r><a:r><a:t>Results</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:nvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr>
              <p:txBody><a:p><a:r><a:t>Revenue up</a:t></a:r></a:p><a:p><a:r><a:t>Costs &amp; risks</a:t></a:r></a:p></p:txBody></p:sp>
            <p:sp><p:nvSpPr><p:nvPr><p:ph type="sldNum"/></p:nvPr></p:nvSpPr>
              <p:txBody><a:p><a:r><a:t>3</a:t></a:r></a:p></p:txBody></p:sp>
        </p:spTree></p:cSld></p:sld>"#;

        let shapes = shape_texts(xml, "slide").unwrap();
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].placeholder.as_deref(), Some("title"));
        assert_eq!(shapes[0].paragraphs, vec!["Quarterly Results"]);
        assert_eq!(shapes[1].placeholder.as_deref(), Some("obj"));
        assert_eq!(shapes[1].paragraphs, vec!["Revenue up", "Costs & risks"]);
        assert_eq!(shapes[2].placeholder.as_deref(), Some("sldNum"));
    }

    #[test]
    fn core_properties_parse_dates() {
        let xml = br#"<cp:coreProperties xmlns:cp="c" xmlns:dc="d" xmlns:dcterms="t">
            <dc:title>Roadmap</dc:title><dc:creator>Ana Lima</dc:creator>
            <dcterms:created>2024-03-01T09:30:00Z</dcterms:created></cp:coreProperties>"#;
        let meta = core_properties(xml).unwrap();
        assert_eq!(meta.author.as_deref(), Some("Ana Lima"));
        assert_eq!(meta.created.map(|d| d.to_rfc3339()), Some("2024-03-01T09:30:00+00:00".to_string()));
        assert!(meta.modified.is_none());
    }

    #[test]
    fn non_zip_input_is_corrupt() {
        assert!(matches!(OoxmlDecoder.decode(b"PK nope"), Err(DecodeError::Corrupt(_))));
    }
}
