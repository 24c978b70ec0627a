//! Text decoder for OpenDocument presentations (`.odp`).

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::import::decoder::{DeckMetadata, DecodeError, DecodedDeck, Decoder, RawSlide};
use crate::import::package::{attr_local, text_by_local_name, xml_error, Package};

const CONTENT_PART: &str = "content.xml";
const META_PART: &str = "meta.xml";
const MIMETYPE_PART: &str = "mimetype";
const PRESENTATION_MIMETYPE: &str = "application/vnd.oasis.opendocument.presentation";

/// Decoder for `.odp` packages.
#[derive(Debug, Default, Clone, Copy)]
pub struct OdfDecoder;

impl Decoder for OdfDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedDeck, DecodeError> {
        let mut package = Package::open(bytes)?;

        if let Some(mimetype) = package.part(MIMETYPE_PART)? {
            let mimetype = String::from_utf8_lossy(&mimetype);
            if mimetype.trim() != PRESENTATION_MIMETYPE {
                return Err(DecodeError::Unsupported(format!(
                    "OpenDocument package of type {} is not a presentation",
                    mimetype.trim()
                )));
            }
        }

        let slides = pages(&package.required_part(CONTENT_PART)?)?;
        let metadata = match package.part(META_PART)? {
            Some(xml) => meta(&xml)?,
            None => DeckMetadata::default(),
        };

        Ok(DecodedDeck { slide_count: slides.len(), slides, metadata })
    }

    fn format_name(&self) -> &'static str {
        "ODF"
    }
}

/// Where the paragraph being read belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Title,
    Body,
    Notes,
}

#[derive(Debug, Default)]
struct PageState {
    title: Vec<String>,
    body: Vec<String>,
    notes: Vec<String>,
}

impl PageState {
    fn finish(self) -> RawSlide {
        RawSlide {
            title: (!self.title.is_empty()).then(|| self.title.join(" ")),
            body: self.body,
            notes: (!self.notes.is_empty()).then(|| self.notes.join("\n")),
        }
    }
}

fn pages(xml: &[u8]) -> Result<Vec<RawSlide>, DecodeError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);

    let mut slides = Vec::new();
    let mut page: Option<PageState> = None;
    let mut in_notes = false;
    let mut title_frame = false;
    let mut paragraph: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"page" => page = Some(PageState::default()),
                b"notes" => in_notes = true,
                b"frame" => title_frame = attr_local(&e, b"class").as_deref() == Some("title"),
                b"p" | b"h" => paragraph = Some(String::new()),
                _ => {}
            },
            Ok(Event::Empty(e)) => match (e.local_name().as_ref(), paragraph.as_mut()) {
                (b"s" | b"tab" | b"line-break", Some(text)) => text.push(' '),
                (b"page", _) if !in_notes => slides.push(RawSlide::default()),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let Some(text) = paragraph.as_mut() {
                    text.push_str(&t.unescape().map_err(|e| xml_error(CONTENT_PART, &e))?);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"p" | b"h" => {
                    let target = if in_notes {
                        Target::Notes
                    } else if title_frame {
                        Target::Title
                    } else {
                        Target::Body
                    };
                    let text = paragraph.take().unwrap_or_default();
                    let text = text.trim();
                    if let (Some(state), false) = (page.as_mut(), text.is_empty()) {
                        match target {
                            Target::Title => state.title.push(text.to_string()),
                            Target::Body => state.body.push(text.to_string()),
                            Target::Notes => state.notes.push(text.to_string()),
                        }
                    }
                }
                b"frame" => title_frame = false,
                b"notes" => in_notes = false,
                b"page" => {
                    if let Some(state) = page.take() {
                        slides.push(state.finish());
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(CONTENT_PART, &e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(slides)
}

fn meta(xml: &[u8]) -> Result<DeckMetadata, DecodeError> {
    let found = text_by_local_name(xml, META_PART, &["initial-creator", "creator", "creation-date", "date", "generator"])?;
    let date = |key: &str| found.get(key).and_then(|v| parse_odf_date(v));

    Ok(DeckMetadata {
        author: found.get("initial-creator").or_else(|| found.get("creator")).cloned(),
        created: date("creation-date"),
        modified: date("date"),
        version: found.get("generator").cloned(),
    })
}

/// ODF dates are ISO 8601, usually without a zone. Zone-less values are taken as UTC.
fn parse_odf_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|n| n.and_utc())
        })
}
