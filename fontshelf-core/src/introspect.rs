//! Font introspection: family names and feature tags (made by FontLab https://www.fontlab.com/)
//!
//! The upload pipeline never pokes at font tables itself. It asks a
//! [`FontIntrospector`] what the bytes contain and gets back either a single
//! face or a collection of faces, each reduced to the two facts we care
//! about: what the family is called and which OpenType features it offers.
//!
//! [`FontationsIntrospector`] is the real implementation, reading sfnt
//! containers (TTF, OTF, TTC, OTC) through read-fonts and skrifa. WOFF 1.0
//! wrappers are unpacked first by [`crate::woff`]; WOFF2 comes back as
//! [`ParseError::Malformed`].

use crate::error::ParseError;

/// One face, boiled down to what the upload pipeline reports.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontFace {
    pub family_name: Option<String>,
    /// Feature tags in the order the font declares them, first occurrence wins.
    pub available_features: Vec<String>,
}

/// The members of a TTC/OTC container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontCollection {
    pub fonts: Vec<FontFace>,
}

impl FontCollection {
    /// First member whose family name matches exactly.
    pub fn get_font(&self, family_name: &str) -> Option<&FontFace> {
        self.fonts
            .iter()
            .find(|face| face.family_name.as_deref() == Some(family_name))
    }

    /// The first family name encountered while walking the members.
    ///
    /// Members without a family name are skipped, so a collection whose
    /// first face is unnamed still resolves to the next named one. Only a
    /// collection with no named member at all yields `None`.
    pub fn first_family(&self) -> Option<&str> {
        self.fonts
            .iter()
            .find_map(|face| face.family_name.as_deref())
    }
}

/// Outcome of parsing a font buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedFont {
    Single(FontFace),
    Collection(FontCollection),
}

/// Anything that can turn raw bytes into a [`ParsedFont`].
pub trait FontIntrospector: Send + Sync {
    fn parse(&self, data: &[u8]) -> Result<ParsedFont, ParseError>;
}

impl<T: FontIntrospector + ?Sized> FontIntrospector for &T {
    fn parse(&self, data: &[u8]) -> Result<ParsedFont, ParseError> {
        (**self).parse(data)
    }
}

impl<T: FontIntrospector + ?Sized> FontIntrospector for std::sync::Arc<T> {
    fn parse(&self, data: &[u8]) -> Result<ParsedFont, ParseError> {
        (**self).parse(data)
    }
}

#[cfg(feature = "fontations")]
pub use fontations::FontationsIntrospector;

#[cfg(feature = "fontations")]
mod fontations {
    use std::collections::HashSet;

    use read_fonts::types::Tag;
    use read_fonts::{FileRef, FontRef, TableProvider};
    use skrifa::string::StringId;
    use skrifa::{FontRef as SkrifaFontRef, MetadataProvider};
    use tracing::debug;

    use super::{FontCollection, FontFace, FontIntrospector, ParsedFont};
    use crate::error::ParseError;
    use crate::woff;

    /// Introspector backed by the fontations crates.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FontationsIntrospector;

    impl FontIntrospector for FontationsIntrospector {
        fn parse(&self, data: &[u8]) -> Result<ParsedFont, ParseError> {
            let data = woff::unwrap_sfnt(data)?;
            let data = &*data;
            let file = FileRef::new(data).map_err(|err| ParseError::Malformed(err.to_string()))?;

            match file {
                FileRef::Font(font) => Ok(ParsedFont::Single(read_face(&font, data, None))),
                FileRef::Collection(collection) => {
                    let mut fonts = Vec::new();
                    for index in 0..collection.len() {
                        match collection.get(index) {
                            Ok(font) => fonts.push(read_face(&font, data, Some(index))),
                            Err(err) => {
                                debug!(index, error = %err, "skipping unreadable collection member")
                            }
                        }
                    }
                    Ok(ParsedFont::Collection(FontCollection { fonts }))
                }
            }
        }
    }

    fn read_face(font: &FontRef, data: &[u8], ttc_index: Option<u32>) -> FontFace {
        FontFace {
            family_name: family_name(data, ttc_index),
            available_features: collect_features(font),
        }
    }

    // Legacy family (name ID 1) first, typographic family (ID 16) as fallback.
    fn family_name(data: &[u8], ttc_index: Option<u32>) -> Option<String> {
        let font = match ttc_index {
            Some(idx) => SkrifaFontRef::from_index(data, idx).ok()?,
            None => SkrifaFontRef::new(data).ok()?,
        };

        [StringId::FAMILY_NAME, StringId::TYPOGRAPHIC_FAMILY_NAME]
            .into_iter()
            .find_map(|id| {
                font.localized_strings(id)
                    .english_or_first()
                    .map(|name| name.to_string().trim().to_string())
                    .filter(|name| !name.is_empty())
            })
    }

    fn collect_features(font: &FontRef) -> Vec<String> {
        let mut tags: Vec<Tag> = Vec::new();
        if let Ok(gsub) = font.gsub() {
            if let Ok(list) = gsub.feature_list() {
                tags.extend(list.feature_records().iter().map(|rec| rec.feature_tag()));
            }
        }
        if let Ok(gpos) = font.gpos() {
            if let Ok(list) = gpos.feature_list() {
                tags.extend(list.feature_records().iter().map(|rec| rec.feature_tag()));
            }
        }

        let mut seen = HashSet::new();
        tags.into_iter()
            .filter(|tag| seen.insert(*tag))
            .map(tag_to_string)
            .collect()
    }

    fn tag_to_string(tag: Tag) -> String {
        String::from_utf8_lossy(&tag.to_be_bytes()).to_string()
    }

}
