//! WOFF 1.0 unwrapping (made by FontLab https://www.fontlab.com/)
//!
//! read-fonts only understands bare sfnt data, so a `wOFF` container is
//! rebuilt into the sfnt it wraps before anyone looks at its tables. Each
//! table is either stored as-is or zlib-compressed; the rebuilt directory is
//! sorted by tag with every table padded to four bytes. Extended metadata and
//! private data blocks are dropped.
//!
//! WOFF2 needs brotli plus the glyf/loca/hmtx transforms and is reported as
//! malformed.

use std::borrow::Cow;
use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::ParseError;

const WOFF_SIGNATURE: &[u8; 4] = b"wOFF";
const WOFF2_SIGNATURE: &[u8; 4] = b"wOF2";
const HEADER_LEN: usize = 44;
const ENTRY_LEN: usize = 20;

/// Upper bound on the total size of a rebuilt sfnt.
pub const MAX_SFNT_BYTES: u64 = 64 * 1024 * 1024;

/// Return sfnt bytes for `data`, unwrapping a WOFF container when present.
///
/// Anything that is not WOFF or WOFF2 is passed through untouched.
pub fn unwrap_sfnt(data: &[u8]) -> Result<Cow<'_, [u8]>, ParseError> {
    match data.get(..4) {
        Some(sig) if sig == WOFF_SIGNATURE => decode_woff(data).map(Cow::Owned),
        Some(sig) if sig == WOFF2_SIGNATURE => Err(ParseError::Malformed(
            "WOFF2 containers are not supported".to_string(),
        )),
        _ => Ok(Cow::Borrowed(data)),
    }
}

struct TableEntry {
    tag: [u8; 4],
    offset: usize,
    comp_length: usize,
    orig_length: usize,
    checksum: u32,
}

fn decode_woff(data: &[u8]) -> Result<Vec<u8>, ParseError> {
    if data.len() < HEADER_LEN {
        return Err(malformed("truncated WOFF header"));
    }
    let flavor = read_u32(data, 4)?;
    let num_tables = read_u16(data, 12)? as usize;

    let mut entries = Vec::with_capacity(num_tables);
    let mut total: u64 = 0;
    for i in 0..num_tables {
        let at = HEADER_LEN + i * ENTRY_LEN;
        let entry = TableEntry {
            tag: read_tag(data, at)?,
            offset: read_u32(data, at + 4)? as usize,
            comp_length: read_u32(data, at + 8)? as usize,
            orig_length: read_u32(data, at + 12)? as usize,
            checksum: read_u32(data, at + 16)?,
        };
        if entry.comp_length > entry.orig_length {
            return Err(malformed(format!(
                "table {} is larger compressed than uncompressed",
                tag_name(&entry.tag)
            )));
        }
        total += padded(entry.orig_length) as u64;
        if total > MAX_SFNT_BYTES {
            return Err(malformed("WOFF tables exceed the sfnt size limit"));
        }
        entries.push(entry);
    }
    entries.sort_by(|a, b| a.tag.cmp(&b.tag));

    let (search_range, entry_selector, range_shift) = search_params(num_tables as u16);
    let mut out = Vec::with_capacity(12 + 16 * num_tables + total as usize);
    out.extend_from_slice(&flavor.to_be_bytes());
    out.extend_from_slice(&(num_tables as u16).to_be_bytes());
    out.extend_from_slice(&search_range.to_be_bytes());
    out.extend_from_slice(&entry_selector.to_be_bytes());
    out.extend_from_slice(&range_shift.to_be_bytes());

    let mut offset = 12 + 16 * num_tables;
    for entry in &entries {
        out.extend_from_slice(&entry.tag);
        out.extend_from_slice(&entry.checksum.to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(entry.orig_length as u32).to_be_bytes());
        offset += padded(entry.orig_length);
    }

    for entry in &entries {
        let stored = entry
            .offset
            .checked_add(entry.comp_length)
            .and_then(|end| data.get(entry.offset..end))
            .ok_or_else(|| {
                malformed(format!("table {} lies outside the file", tag_name(&entry.tag)))
            })?;

        if entry.comp_length == entry.orig_length {
            out.extend_from_slice(stored);
        } else {
            let start = out.len();
            ZlibDecoder::new(stored)
                .take(entry.orig_length as u64)
                .read_to_end(&mut out)
                .map_err(|err| {
                    malformed(format!("table {}: {err}", tag_name(&entry.tag)))
                })?;
            if out.len() - start != entry.orig_length {
                return Err(malformed(format!(
                    "table {} inflated to the wrong length",
                    tag_name(&entry.tag)
                )));
            }
        }
        out.resize(out.len() + padded(entry.orig_length) - entry.orig_length, 0);
    }

    Ok(out)
}

fn search_params(num_tables: u16) -> (u16, u16, u16) {
    if num_tables == 0 {
        return (0, 0, 0);
    }
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;
    (
        search_range,
        entry_selector,
        num_tables * 16 - search_range,
    )
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

fn read_tag(data: &[u8], at: usize) -> Result<[u8; 4], ParseError> {
    data.get(at..at + 4)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| malformed("truncated WOFF table directory"))
}

fn read_u32(data: &[u8], at: usize) -> Result<u32, ParseError> {
    read_tag(data, at).map(u32::from_be_bytes)
}

fn read_u16(data: &[u8], at: usize) -> Result<u16, ParseError> {
    data.get(at..at + 2)
        .map(|bytes| u16::from_be_bytes([bytes[0], bytes[1]]))
        .ok_or_else(|| malformed("truncated WOFF header"))
}

fn tag_name(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}

fn malformed(message: impl Into<String>) -> ParseError {
    ParseError::Malformed(message.into())
}
