//! OpenType feature catalog (made by FontLab https://www.fontlab.com/)
//!
//! Every font speaks in four-letter feature tags (`liga`, `smcp`, `ss03`...),
//! and nobody outside a type foundry remembers what half of them do. This
//! module keeps a static phrasebook from tag to a human-readable name and a
//! one-sentence description, plus the two numbered families (`ss01`-`ss20`
//! and `cv01`-`cv20`) that share a generic entry.
//!
//! The phrasebook is built once on first use and only ever read afterwards,
//! so it is safe to consult from any number of request handlers at once.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Human-readable label and explanation for a feature tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub name: Cow<'static, str>,
    pub description: Cow<'static, str>,
}

/// A raw feature tag reported by a font, paired with catalog info when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureTag {
    /// Older cached payloads stored the tag under `name`.
    #[serde(alias = "name")]
    pub tag: String,
    pub info: Option<FeatureInfo>,
}

impl FeatureTag {
    /// Look the tag up in the catalog and wrap the result.
    pub fn resolved(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let info = resolve(&tag).cloned();
        Self { tag, info }
    }
}

const STYLISTIC_SET_INFO: FeatureInfo = info(
    "Stylistic Set",
    "Enables a specific set of alternate glyphs designed to provide a unique stylistic variation for the font.",
);

const CHARACTER_VARIANT_INFO: FeatureInfo = info(
    "Character Variant",
    "Allows selection of alternate forms for specific characters, providing additional typographic options.",
);

/// Generic entry shared by `ss01` through `ss20`, also listed as `ss*`.
pub static STYLISTIC_SET: FeatureInfo = STYLISTIC_SET_INFO;

/// Generic entry shared by `cv01` through `cv20`, also listed as `cv*`.
pub static CHARACTER_VARIANT: FeatureInfo = CHARACTER_VARIANT_INFO;

static STYLISTIC_SET_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ss(0[1-9]|1[0-9]|20)$").expect("static pattern"));

static CHARACTER_VARIANT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^cv(0[1-9]|1[0-9]|20)$").expect("static pattern"));

static INDEX: LazyLock<HashMap<&'static str, &'static FeatureInfo>> =
    LazyLock::new(|| FEATURES.iter().map(|(tag, info)| (*tag, info)).collect());

/// Resolve a feature tag to its catalog entry.
///
/// Exact entries win, including the wildcard keys `ss*` and `cv*`; otherwise
/// `ss01`-`ss20` and `cv01`-`cv20` fall back to their shared family entry.
/// Anything else (including `ss00`, `cv21`, empty strings or garbage) is
/// simply unknown.
pub fn resolve(tag: &str) -> Option<&'static FeatureInfo> {
    if let Some(info) = INDEX.get(tag) {
        return Some(*info);
    }

    if STYLISTIC_SET_TAG.is_match(tag) {
        Some(&STYLISTIC_SET)
    } else if CHARACTER_VARIANT_TAG.is_match(tag) {
        Some(&CHARACTER_VARIANT)
    } else {
        None
    }
}

/// Attach catalog info to each raw tag, keeping the caller's order and any duplicates.
pub fn enrich<I, S>(tags: I) -> Vec<FeatureTag>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tags.into_iter().map(FeatureTag::resolved).collect()
}

/// Every exact entry in the catalog, in declaration order.
pub fn catalog() -> impl Iterator<Item = (&'static str, &'static FeatureInfo)> {
    FEATURES.iter().map(|(tag, info)| (*tag, info))
}

const fn info(name: &'static str, description: &'static str) -> FeatureInfo {
    FeatureInfo {
        name: Cow::Borrowed(name),
        description: Cow::Borrowed(description),
    }
}

const fn entry(
    tag: &'static str,
    name: &'static str,
    description: &'static str,
) -> (&'static str, FeatureInfo) {
    (tag, info(name, description))
}

static FEATURES: &[(&str, FeatureInfo)] = &[
    entry(
        "liga",
        "Standard Ligatures",
        "Replaces common letter combinations with single glyphs for improved readability.",
    ),
    entry(
        "dlig",
        "Discretionary Ligatures",
        "Optional ligatures that enhance the aesthetic of the text, often used in decorative contexts.",
    ),
    entry(
        "smcp",
        "Small Capitals",
        "Transforms lowercase letters into smaller uppercase letters for stylistic emphasis.",
    ),
    entry(
        "c2sc",
        "Caps to Small Caps",
        "Converts uppercase letters into small capitals for a uniform appearance.",
    ),
    entry(
        "onum",
        "Oldstyle Figures",
        "Numbers that have varying heights and alignments, blending better with lowercase text.",
    ),
    entry(
        "pnum",
        "Proportional Figures",
        "Numbers that have varying widths, designed to fit better in running text.",
    ),
    entry(
        "tnum",
        "Tabular Figures",
        "Numbers that have uniform widths, ideal for tables and columns.",
    ),
    entry(
        "swsh",
        "Swash",
        "Decorative flourishes added to letters, often used in calligraphic styles.",
    ),
    entry(
        "hist",
        "Historical Forms",
        "Alternative letterforms that reflect historical typographic styles.",
    ),
    entry(
        "salt",
        "Stylistic Alternates",
        "Alternative glyphs for certain characters, allowing for varied typographic expression.",
    ),
    entry(
        "aalt",
        "Access All Alternates",
        "Enables all available alternate glyphs for a font, providing maximum stylistic options.",
    ),
    entry(
        "calt",
        "Contextual Alternates",
        "Automatically substitutes glyphs based on the surrounding characters to improve text flow and appearance.",
    ),
    entry(
        "case",
        "Case-Sensitive Forms",
        "Adjusts punctuation and symbols to better align with uppercase text.",
    ),
    entry(
        "ccmp",
        "Glyph Composition/Decomposition",
        "Enables the combination or separation of glyphs for more complex character representations.",
    ),
    entry(
        "frac",
        "Fractions",
        "Formats numbers as fractions, improving readability in mathematical contexts.",
    ),
    entry(
        "ordn",
        "Ordinals",
        "Formats numbers with appropriate superscript letters for ordinal indicators (e.g., 1st, 2nd).",
    ),
    entry(
        "subs",
        "Subscript",
        "Renders characters slightly below the baseline, commonly used in chemical formulas and mathematical expressions.",
    ),
    entry(
        "sups",
        "Superscript",
        "Renders characters slightly above the baseline, often used for exponents and footnotes.",
    ),
    entry(
        "sinf",
        "Scientific Inferiors",
        "Renders characters in a smaller size below the baseline, typically used in scientific notation.",
    ),
    entry(
        "zero",
        "Slashed Zero",
        "Displays the numeral zero with a slash through it to distinguish it from the letter 'O'.",
    ),
    entry(
        "mark",
        "Mark Positioning",
        "Adjusts the placement of diacritical marks relative to base characters for improved legibility.",
    ),
    entry(
        "mkmk",
        "Mark to Mark Positioning",
        "Controls the positioning of multiple diacritical marks relative to each other.",
    ),
    ("ss*", STYLISTIC_SET_INFO),
    ("cv*", CHARACTER_VARIANT_INFO),
    entry(
        "abvf",
        "Above-base Forms",
        "Positions certain glyphs above the baseline, commonly used in scripts with diacritical marks.",
    ),
    entry(
        "blwf",
        "Below-base Forms",
        "Positions certain glyphs below the baseline, often used in scripts with diacritical marks.",
    ),
    entry(
        "abvm",
        "Above-base Mark Positioning",
        "Adjusts the placement of marks above base characters for better legibility in complex scripts.",
    ),
    entry(
        "blwm",
        "Below-base Mark Positioning",
        "Adjusts the placement of marks below base characters to enhance readability in various scripts.",
    ),
    entry(
        "abvs",
        "Above-base Substitutions",
        "Enables substitutions for glyphs positioned above the baseline, often used in scripts with diacritical marks.",
    ),
    entry(
        "blws",
        "Below-base Substitutions",
        "Enables substitutions for glyphs positioned below the baseline, commonly used in scripts with diacritical marks.",
    ),
    entry(
        "pref",
        "Pre-base Forms",
        "Replaces halant+consonant at the end of a consonant cluster with a glyph at the beginning. Used in scripts like Khmer, Myanmar, Malayalam, Telugu.",
    ),
    entry(
        "pres",
        "Pre-base Substitutions",
        "Ligates consonant combinations that occur before the base character. Used in scripts like Khmer and Gurmukhi.",
    ),
    entry(
        "psts",
        "Post-base Substitutions",
        "Ligates a final consonant+consonant cluster to a special form. Used in scripts like Khmer and Gurmukhi.",
    ),
    entry(
        "pstf",
        "Post-base Forms",
        "Replaces final halant+consonant with special form. Khmer and Gurmukhi, Malayalam",
    ),
    entry(
        "dist",
        "Distance",
        "Adjusts horizontal positioning between glyphs. (Always enabled, as opposed to 'kern'.)",
    ),
    entry(
        "akhn",
        "Akhands",
        "Akhands are special ligatures used in scripts like Devanagari to combine multiple consonants into a single glyph for better readability.",
    ),
    entry(
        "haln",
        "Halant Forms",
        "Halant forms are used in Indic scripts to represent consonants without an inherent vowel sound, allowing for the formation of consonant clusters.",
    ),
    entry(
        "half",
        "Half Forms",
        "Half forms are abbreviated versions of consonants used in Indic scripts to create consonant clusters, typically by removing the vertical stem of the consonant.",
    ),
    entry(
        "nukt",
        "Nukta Forms",
        "Nukta forms are diacritical marks used in Indic scripts to modify the pronunciation of consonants, often by adding a dot below the character.",
    ),
    entry(
        "rkrf",
        "Rakar Forms",
        "Rakar forms are special glyphs used in Indic scripts to represent the combination of a consonant with the vowel sound \"r\", often appearing as a subscript or modified form.",
    ),
    entry(
        "rphf",
        "Reph Forms",
        "Reph forms are special glyphs used in Indic scripts to represent the consonant \"r\" when it appears at the beginning of a syllable, often rendered as a superscript or modified form above the following consonant.",
    ),
    entry(
        "vatu",
        "Vattu Forms",
        "Vattu forms are special glyphs used in Indic scripts to represent consonants that are combined with the vowel sound \"u\", often appearing as a subscript or modified form below the consonant.",
    ),
    entry(
        "cjct",
        "Conjunct Forms",
        "Conjunct forms are special glyphs used in Indic scripts to represent combinations of consonants that are joined together to form a single syllable, often resulting in unique ligature shapes.",
    ),
    entry(
        "cfar",
        "Conjunct Form After Ro",
        "Conjunct Form After Ro is a specific typographic feature in Indic scripts that modifies the appearance of consonant clusters following the consonant \"Ro\", often resulting in unique ligature shapes for improved readability.",
    ),
    entry(
        "smpl",
        "Simplified Forms",
        "Simplified forms are alternative glyphs used in certain scripts to provide a more streamlined or modern appearance, often reducing the complexity of traditional letterforms for easier reading.",
    ),
    entry(
        "trad",
        "Traditional Forms",
        "Traditional forms are glyphs that adhere to classical or historical letterforms, preserving the original design and stylistic elements of a script for authenticity and cultural significance.",
    ),
    entry(
        "tnam",
        "Traditional Name Forms",
        "Traditional Name Forms are specific glyphs used in certain scripts to represent proper names in a manner that reflects historical or cultural conventions, often preserving unique stylistic elements associated with those names.",
    ),
    entry(
        "expt",
        "Expert Forms",
        "Expert forms are specialized glyphs designed for advanced typographic use, often incorporating intricate details and variations that cater to professional typesetting and design needs.",
    ),
    entry(
        "hojo",
        "Hojo Kanji Forms",
        "Hojo Kanji forms are specific glyphs used in Japanese typography to represent kanji characters in a manner that adheres to traditional or official standards, often used in formal documents and publications.",
    ),
    entry(
        "nlck",
        "NLC Kanji Forms",
        "NLC Kanji forms are specialized glyphs used in Japanese typography to represent kanji characters according to the standards set by the National Language Council, ensuring consistency and clarity in written communication.",
    ),
    entry(
        "jp78",
        "JIS78 Kanji Forms",
        "JIS78 Kanji forms are specific glyphs used in Japanese typography that conform to the 1978 standards established by the Japanese Industrial Standards (JIS) for kanji character representation.",
    ),
    entry(
        "jp83",
        "JIS83 Kanji Forms",
        "JIS83 Kanji forms are specific glyphs used in Japanese typography that conform to the 1983 standards established by the Japanese Industrial Standards (JIS) for kanji character representation.",
    ),
    entry(
        "jp90",
        "JIS90 Kanji Forms",
        "JIS90 Kanji forms are specific glyphs used in Japanese typography that conform to the 1990 standards established by the Japanese Industrial Standards (JIS) for kanji character representation.",
    ),
    entry(
        "jp04",
        "JIS04 Kanji Forms",
        "JIS04 Kanji forms are specific glyphs used in Japanese typography that conform to the 2004 standards established by the Japanese Industrial Standards (JIS) for kanji character representation.",
    ),
    entry(
        "hngl",
        "Hangul Forms",
        "Hangul forms are specific glyphs used in Korean typography to represent Hangul characters, ensuring proper representation and readability of the Korean script.",
    ),
    entry(
        "ljmo",
        "Leading Jamo Forms",
        "Leading Jamo forms are specific glyphs used in Korean typography to represent the initial consonant components of Hangul syllables, ensuring accurate representation and readability of the Korean script.",
    ),
    entry(
        "tjmo",
        "Trailing Jamo Forms",
        "Trailing Jamo forms are specific glyphs used in Korean typography to represent the final consonant components of Hangul syllables, ensuring accurate representation and readability of the Korean script.",
    ),
    entry(
        "vjmo",
        "Vowel Jamo Forms",
        "Vowel Jamo forms are specific glyphs used in Korean typography to represent the vowel components of Hangul syllables, ensuring accurate representation and readability of the Korean script.",
    ),
    entry(
        "fwid",
        "Full Widths",
        "Full Widths are glyphs that occupy the full width of a character cell, commonly used in East Asian typography to ensure proper alignment and spacing of characters.",
    ),
    entry(
        "hwid",
        "Half Widths",
        "Half Widths are glyphs that occupy half the width of a character cell, commonly used in East Asian typography to provide a more compact representation of characters.",
    ),
    entry(
        "halt",
        "Halant Alternates",
        "Halant Alternates are alternative glyphs used in Indic scripts to represent the halant character, providing different stylistic options for rendering consonant clusters.",
    ),
    entry(
        "twid",
        "Third Widths",
        "Third Widths are glyphs that occupy one-third the width of a character cell, offering an additional option for character spacing in East Asian typography.",
    ),
    entry(
        "qwid",
        "Quarter Widths",
        "Quarter Widths are glyphs that occupy one-quarter the width of a character cell, allowing for even more compact character representation in East Asian typography.",
    ),
    entry(
        "pwid",
        "Proportional Widths",
        "Proportional Widths are glyphs that have varying widths based on their design, allowing for more natural spacing and alignment in text layout.",
    ),
    entry(
        "palt",
        "Proportional Alternate Widths",
        "Proportional Alternate Widths are alternative glyphs with varying widths, providing additional options for natural spacing and alignment in text layout.",
    ),
    entry(
        "pkna",
        "Proportional Kana",
        "Proportional Kana are glyphs used in Japanese typography that have varying widths, allowing for more natural spacing and alignment of kana characters in text layout.",
    ),
    entry(
        "ruby",
        "Ruby Notation",
        "Ruby Notation are small annotations placed above or beside characters, commonly used in East Asian typography to provide pronunciation guides or additional information.",
    ),
    entry(
        "hkna",
        "Half-width Kana",
        "Half-width Kana are glyphs used in Japanese typography that occupy half the width of a character cell, providing a more compact representation of kana characters.",
    ),
    entry(
        "vkna",
        "Vertical Kana",
        "Vertical Kana are glyphs used in Japanese typography that are designed for vertical text layout, ensuring proper representation and readability of kana characters in vertical writing.",
    ),
    entry(
        "cpct",
        "Centered CJK Punctuation",
        "Centered CJK Punctuation are punctuation marks used in East Asian typography that are centered within the character cell, ensuring proper alignment and spacing in text layout.",
    ),
    entry(
        "curs",
        "Cursive Positioning",
        "Cursive Positioning adjusts the placement of glyphs to create a flowing, connected appearance, often used in scripts like Arabic for improved readability and aesthetics.",
    ),
    entry(
        "jalt",
        "Justification Alternates",
        "Justification Alternates provide alternative glyphs designed to improve text justification, ensuring even spacing and alignment in fully justified text layouts.",
    ),
    entry(
        "mset",
        "Mark Set",
        "Mark Set allows selection of specific sets of diacritical marks for use in complex scripts, providing enhanced typographic control and customization.",
    ),
    entry(
        "rclt",
        "Recalculated Ligatures",
        "Recalculated Ligatures dynamically adjust the formation of ligatures based on surrounding characters, enhancing text flow and appearance in various scripts.",
    ),
    entry(
        "rlig",
        "Required Ligatures",
        "Required Ligatures are essential ligature formations that must be applied in certain scripts to ensure correct representation and readability of text.",
    ),
    entry(
        "isol",
        "Isolated Forms",
        "Isolated Forms are specific glyphs used in scripts like Arabic to represent characters when they appear alone, ensuring proper representation and readability.",
    ),
    entry(
        "init",
        "Initial Forms",
        "Initial Forms are specific glyphs used in scripts like Arabic to represent characters when they appear at the beginning of a word, ensuring proper representation and readability.",
    ),
    entry(
        "medi",
        "Medial Forms",
        "Medial Forms are specific glyphs used in scripts like Arabic to represent characters when they appear in the middle of a word, ensuring proper representation and readability.",
    ),
    entry(
        "med2",
        "Medial Forms 2",
        "Medial Forms 2 are alternative glyphs used in scripts like Arabic to represent characters in the middle of a word, providing additional stylistic options for rendering text.",
    ),
    entry(
        "fina",
        "Final Forms",
        "Final Forms are specific glyphs used in scripts like Arabic to represent characters when they appear at the end of a word, ensuring proper representation and readability.",
    ),
    entry(
        "fin2",
        "Final Forms 2",
        "Final Forms 2 are alternative glyphs used in scripts like Arabic to represent characters at the end of a word, providing additional stylistic options for rendering text.",
    ),
    entry(
        "fin3",
        "Final Forms 3",
        "Final Forms 3 are additional alternative glyphs used in scripts like Arabic to represent characters at the end of a word, offering further stylistic variations for text rendering.",
    ),
    entry(
        "falt",
        "Final Alternate Forms",
        "Final Alternate Forms are special glyphs used in scripts like Arabic to provide unique stylistic variations for characters appearing at the end of a word, enhancing the visual appeal of the text.",
    ),
    entry(
        "stch",
        "Stretching Glyphs",
        "Stretching Glyphs are used in scripts like Arabic to elongate certain characters for aesthetic purposes, allowing for better text justification and visual harmony.",
    ),
    entry(
        "pcap",
        "Petite Capitals",
        "Transforms lowercase letters into petite capitals, which are slightly smaller than small capitals, for a refined typographic effect.",
    ),
    entry(
        "c2pc",
        "Caps to Petite Caps",
        "Converts uppercase letters into petite capitals, providing a subtle variation for typographic emphasis.",
    ),
    entry(
        "unic",
        "Unicase",
        "Transforms all letters into a single case style, blending characteristics of both uppercase and lowercase for a unique appearance.",
    ),
    entry(
        "cpsp",
        "Capital Spacing",
        "Increases the spacing between uppercase letters to enhance readability and visual impact.",
    ),
    entry(
        "ital",
        "Italics",
        "Applies an italic style to the text, slanting characters to the right for emphasis and stylistic effect.",
    ),
    entry(
        "valt",
        "Alternate Vertical Metrics",
        "Adjusts the vertical metrics of the font to provide an alternative line spacing option, improving readability in certain contexts.",
    ),
    entry(
        "vhal",
        "Alternate Vertical Half Metrics",
        "Modifies the vertical half metrics of the font to offer a different line spacing option, enhancing text appearance in specific scenarios.",
    ),
    entry(
        "vpal",
        "Proportional Alternate Vertical Metrics",
        "Adjusts the vertical metrics of the font proportionally to provide an alternative line spacing option, improving readability in various contexts.",
    ),
    entry(
        "vert",
        "Vertical Writing",
        "Enables vertical text layout, allowing characters to be arranged from top to bottom, commonly used in East Asian typography.",
    ),
    entry(
        "vrt2",
        "Vertical Writing Alternates",
        "Provides alternative glyphs optimized for vertical text layout, enhancing readability and aesthetics in vertical writing contexts.",
    ),
    entry(
        "vrtr",
        "Vertical Rotation",
        "Rotates glyphs for optimal display in vertical text layouts, ensuring proper orientation and readability.",
    ),
    entry(
        "vkrn",
        "Vertical Kerning",
        "Adjusts the spacing between glyphs in vertical text layouts to improve readability and visual harmony.",
    ),
    entry(
        "ltra",
        "Left-to-Right Alternates",
        "Provides alternative glyphs optimized for left-to-right text layouts, enhancing readability and aesthetics in such contexts.",
    ),
    entry(
        "ltrm",
        "Left-to-Right Metrics",
        "Adjusts the font metrics for left-to-right text layouts, ensuring proper alignment and spacing.",
    ),
    entry(
        "rtla",
        "Right-to-Left Alternates",
        "Provides alternative glyphs optimized for right-to-left text layouts, enhancing readability and aesthetics in such contexts.",
    ),
    entry(
        "rtlm",
        "Right-to-Left Metrics",
        "Adjusts the font metrics for right-to-left text layouts, ensuring proper alignment and spacing.",
    ),
    entry(
        "lnum",
        "Lining Figures",
        "Numbers that have uniform heights and alignments, designed to stand out in text for emphasis.",
    ),
    entry(
        "afrc",
        "Alternative Fractions",
        "Provides an alternative style for formatting numbers as fractions, enhancing visual appeal in mathematical contexts.",
    ),
    entry(
        "dnom",
        "Denominators",
        "Formats numbers to be used as denominators in fractions, ensuring proper alignment and readability.",
    ),
    entry(
        "numr",
        "Numerators",
        "Formats numbers to be used as numerators in fractions, ensuring proper alignment and readability.",
    ),
    entry(
        "mgrk",
        "Mathematical Greek",
        "Provides specialized glyphs for Greek letters used in mathematical contexts, ensuring clarity and distinction from standard Greek characters.",
    ),
    entry(
        "flac",
        "Flattened Accent",
        "Modifies accent marks to have a flattened appearance, enhancing readability and aesthetic appeal in certain typographic contexts.",
    ),
    entry(
        "dtls",
        "Dotless Forms",
        "Provides glyphs for characters that typically have dots, rendered without the dot for specific typographic needs.",
    ),
    entry(
        "ssty",
        "Script Style",
        "Applies a script style to the text, giving characters a handwritten or calligraphic appearance for decorative purposes.",
    ),
    entry(
        "cswh",
        "Contextual Swash",
        "Automatically applies swash flourishes to letters based on their context within a word, enhancing the decorative appearance of the text.",
    ),
    entry(
        "locl",
        "Localized Forms",
        "Substitutes glyphs with region-specific variants to better suit local typographic conventions and preferences.",
    ),
    entry(
        "rand",
        "Randomize",
        "Randomly selects from a set of alternate glyphs for certain characters, adding variety and a more organic feel to the text.",
    ),
    entry(
        "nalt",
        "Alternate Annotation Forms",
        "Provides alternative glyphs for annotation characters, allowing for varied typographic expression in footnotes and references.",
    ),
    entry(
        "titl",
        "Titling Alternates",
        "Provides specialized glyphs designed for use in titles and headings, enhancing their visual impact and readability.",
    ),
    entry(
        "rvrn",
        "Reversed Forms",
        "Provides glyphs that are mirrored or reversed versions of standard characters, offering unique stylistic options for text design.",
    ),
    entry(
        "clig",
        "Contextual Ligatures",
        "Automatically forms ligatures based on the context of surrounding characters to enhance text flow and appearance.",
    ),
    entry(
        "hlig",
        "Historical Ligatures",
        "Ligatures that were commonly used in historical typography, providing a classic and traditional appearance to the text.",
    ),
    entry(
        "kern",
        "Kerning",
        "Adjusts the spacing between specific pairs of characters to improve overall text appearance and readability.",
    ),
    entry(
        "opbd",
        "Optical Bounds",
        "Adjusts the positioning of glyphs to create optical margins, enhancing the visual alignment of text blocks.",
    ),
    entry(
        "lfbd",
        "Left Bounds",
        "Adjusts the left-side positioning of glyphs to create optical margins, improving the visual alignment of text blocks.",
    ),
    entry(
        "rtbd",
        "Right Bounds",
        "Adjusts the right-side positioning of glyphs to create optical margins, enhancing the visual alignment of text blocks.",
    ),
    entry(
        "size",
        "Optical Size",
        "Selects glyph variants optimized for different point sizes, improving readability and aesthetics across various text sizes.",
    ),
    entry(
        "ornm",
        "Ornament Sets",
        "Provides decorative glyphs and flourishes that can be used to enhance the visual appeal of text in ornamental contexts.",
    ),
];
