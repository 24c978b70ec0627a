//! Zip container and XML helpers shared by the packaged-XML decoders.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::import::decoder::DecodeError;

/// Largest uncompressed part we are willing to inflate.
pub const MAX_PART_SIZE: u64 = 64 * 1024 * 1024;

/// Read-only view of a zip container held in memory.
pub struct Package<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> Package<'a> {
    /// Open a container.
    pub fn open(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        let archive = ZipArchive::new(Cursor::new(bytes)).map_err(zip_error)?;
        Ok(Self { archive })
    }

    /// Read a part by name. `Ok(None)` when the part does not exist.
    pub fn part(&mut self, name: &str) -> Result<Option<Vec<u8>>, DecodeError> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(zip_error(e)),
        };

        if file.size() > MAX_PART_SIZE {
            return Err(DecodeError::ResourceExhausted(format!(
                "part {name} inflates to {} bytes, limit is {MAX_PART_SIZE}",
                file.size()
            )));
        }

        let mut buf = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
        file.read_to_end(&mut buf).map_err(|e| io_error(name, &e))?;
        Ok(Some(buf))
    }

    /// Read a part that must exist.
    pub fn required_part(&mut self, name: &str) -> Result<Vec<u8>, DecodeError> {
        self.part(name)?
            .ok_or_else(|| DecodeError::Corrupt(format!("missing required part {name}")))
    }
}

fn zip_error(e: ZipError) -> DecodeError {
    match e {
        ZipError::Io(io) => io_error("archive", &io),
        ZipError::UnsupportedArchive(msg) => DecodeError::Unsupported(msg.to_string()),
        ZipError::FileNotFound => DecodeError::Corrupt("missing archive entry".to_string()),
        other => DecodeError::Corrupt(format!("not a valid zip container: {other}")),
    }
}

fn io_error(what: &str, e: &std::io::Error) -> DecodeError {
    if e.kind() == std::io::ErrorKind::OutOfMemory {
        DecodeError::ResourceExhausted(format!("reading {what}: {e}"))
    } else {
        DecodeError::Corrupt(format!("reading {what}: {e}"))
    }
}

/// Map an XML parse failure to a decode error.
pub fn xml_error(part: &str, e: &quick_xml::Error) -> DecodeError {
    DecodeError::Corrupt(format!("malformed XML in {part}: {e}"))
}

/// Value of the attribute whose qualified name is exactly `qname`.
pub fn attr(element: &BytesStart<'_>, qname: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.as_ref() == qname)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Value of the first attribute whose local name is `local`, whatever its prefix.
pub fn attr_local(element: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Parse a relationships part in document order.
pub fn relationships(xml: &[u8], part: &str) -> Result<Vec<Relationship>, DecodeError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut rels = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attr(&e, b"Id"), attr(&e, b"Target")) {
                    rels.push(Relationship { id, target, kind: attr(&e, b"Type").unwrap_or_default() });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, &e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(rels)
}

/// One entry of a relationships part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship id, referenced as `r:id`.
    pub id: String,
    /// Target part, relative to the source part's directory.
    pub target: String,
    /// Relationship type URI.
    pub kind: String,
}

/// Resolve a relationship target against the directory of its source part.
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Collect the text of the first occurrence of each requested element, keyed by local name.
pub fn text_by_local_name(xml: &[u8], part: &str, names: &[&str]) -> Result<HashMap<String, String>, DecodeError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut found = HashMap::new();
    let mut current: Option<String> = None;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let local = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                current = names.contains(&local.as_str()).then_some(local);
            }
            Ok(Event::Text(t)) => {
                if let Some(name) = current.take() {
                    let text = t.unescape().map_err(|e| xml_error(part, &e))?;
                    let text = text.trim();
                    if !text.is_empty() {
                        found.entry(name).or_insert_with(|| text.to_string());
                    }
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(part, &e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(found)
}
