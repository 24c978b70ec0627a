//! File format detection by declared file name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Presentation formats the pipeline recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationFormat {
    /// Office Open XML package (`.pptx`).
    Pptx,
    /// Legacy binary PowerPoint (`.ppt`).
    Ppt,
    /// OpenDocument presentation (`.odp`).
    Odp,
}

impl PresentationFormat {
    /// Returns all recognized formats.
    pub const fn all() -> &'static [Self] {
        &[Self::Pptx, Self::Ppt, Self::Odp]
    }

    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pptx => "pptx",
            Self::Ppt => "ppt",
            Self::Odp => "odp",
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pptx => "PowerPoint (OOXML)",
            Self::Ppt => "PowerPoint 97-2003",
            Self::Odp => "OpenDocument Presentation",
        }
    }

    /// Detect the format from a file name's extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = extension_of(file_name)?.to_ascii_lowercase();
        Self::all().iter().copied().find(|f| f.extension() == extension)
    }
}

impl fmt::Display for PresentationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extension of the last path component, if it has one.
pub fn extension_of(file_name: &str) -> Option<&str> {
    Path::new(file_name).extension().and_then(|e| e.to_str())
}

/// File name with directories and extension removed.
pub fn title_from_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("Untitled")
        .to_string()
}
