//! Font container classification by file name (made by FontLab https://www.fontlab.com/)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical container format reported back to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFormat {
    TrueType,
    Woff,
    Woff2,
    Unknown,
}

impl FontFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            FontFormat::TrueType => "truetype",
            FontFormat::Woff => "woff",
            FontFormat::Woff2 => "woff2",
            FontFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a font by its file name suffix.
///
/// Only the name is consulted, and the match is case-sensitive: `Font.TTF`
/// and a WOFF2 file renamed to `.ttf` are both taken at their word.
pub fn classify(file_name: &str) -> FontFormat {
    if file_name.ends_with(".ttf") || file_name.ends_with(".otf") {
        FontFormat::TrueType
    } else if file_name.ends_with(".woff") {
        FontFormat::Woff
    } else if file_name.ends_with(".woff2") {
        FontFormat::Woff2
    } else {
        FontFormat::Unknown
    }
}
