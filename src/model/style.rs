//! Element styling.
//!
//! Styles are flat bundles of optional properties. There is no inheritance:
//! a missing property means "renderer default", never "take the parent's".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An absolute `#rrggbb` color code, stored in lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

/// A string that is not a `#rgb` or `#rrggbb` color code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color code {0:?}, expected #rrggbb")]
pub struct InvalidColor(pub String);

impl Color {
    /// Parse `#rrggbb` or the `#rgb` shorthand.
    pub fn parse(code: &str) -> Result<Self, InvalidColor> {
        let code = code.trim();
        let hex = code
            .strip_prefix('#')
            .filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| InvalidColor(code.to_string()))?;

        let expanded = match hex.len() {
            6 => hex.to_ascii_lowercase(),
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>().to_ascii_lowercase(),
            _ => return Err(InvalidColor(code.to_string())),
        };
        Ok(Self(format!("#{expanded}")))
    }

    /// Build a color from channel values.
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(format!("#{red:02x}{green:02x}{blue:02x}"))
    }

    /// The normalized `#rrggbb` code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Horizontal text alignment inside an element's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

impl TextAlign {
    /// Parse the keyword used in commands and decoders.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "left" | "l" | "start" => Some(Self::Left),
            "center" | "centre" | "ctr" | "middle" => Some(Self::Center),
            "right" | "r" | "end" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Optional style bundle attached to an element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    /// Font size in points, in slide space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Box fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    /// Horizontal alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    /// Font weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
    /// Italic flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

impl Style {
    /// True when no property is set.
    pub const fn is_empty(&self) -> bool {
        self.font_size.is_none()
            && self.font_family.is_none()
            && self.color.is_none()
            && self.background.is_none()
            && self.align.is_none()
            && self.weight.is_none()
            && self.italic.is_none()
    }

    /// Return a copy with every property set in `overlay` replacing ours.
    #[must_use]
    pub fn merged(&self, overlay: &Self) -> Self {
        Self {
            font_size: overlay.font_size.or(self.font_size),
            font_family: overlay.font_family.clone().or_else(|| self.font_family.clone()),
            color: overlay.color.clone().or_else(|| self.color.clone()),
            background: overlay.background.clone().or_else(|| self.background.clone()),
            align: overlay.align.or(self.align),
            weight: overlay.weight.or(self.weight),
            italic: overlay.italic.or(self.italic),
        }
    }
}
