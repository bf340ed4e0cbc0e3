//! Synthetic font binaries for tests (made by FontLab https://www.fontlab.com/)
//!
//! Just enough sfnt to satisfy an introspector: a `name` table carrying the
//! family name and a `GSUB` table whose feature list holds the requested
//! tags. No glyphs, no lookups, no checksums.
//!
//! Only compiled for this crate's own tests or with the `fixtures` feature.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

/// Shape of one synthetic face.
#[derive(Debug, Clone, Copy)]
pub struct FakeFace<'a> {
    pub family: Option<&'a str>,
    pub features: &'a [&'a str],
}

impl<'a> FakeFace<'a> {
    pub fn new(family: Option<&'a str>, features: &'a [&'a str]) -> Self {
        Self { family, features }
    }
}

/// A standalone TrueType-flavoured sfnt.
pub fn single_font(face: FakeFace<'_>) -> Vec<u8> {
    let mut out = Vec::new();
    write_face(&mut out, face);
    out
}

/// A `ttcf` collection; an empty slice produces a collection with no members.
pub fn collection(faces: &[FakeFace<'_>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"ttcf");
    push_u16(&mut out, 1);
    push_u16(&mut out, 0);
    push_u32(&mut out, faces.len() as u32);
    let offsets_at = out.len();
    out.resize(offsets_at + 4 * faces.len(), 0);

    for (i, face) in faces.iter().enumerate() {
        let offset = out.len() as u32;
        out[offsets_at + 4 * i..offsets_at + 4 * i + 4].copy_from_slice(&offset.to_be_bytes());
        write_face(&mut out, *face);
    }
    out
}

/// Wrap a standalone sfnt in a WOFF 1.0 container.
///
/// With `compress` set, each table is zlib-compressed when that makes it
/// smaller; otherwise every table is stored as-is.
pub fn woff(sfnt: &[u8], compress: bool) -> Vec<u8> {
    let num_tables = read_u16(sfnt, 4) as usize;
    let tables: Vec<([u8; 4], u32, Vec<u8>, usize)> = (0..num_tables)
        .map(|i| {
            let at = 12 + 16 * i;
            let mut tag = [0; 4];
            tag.copy_from_slice(&sfnt[at..at + 4]);
            let checksum = read_u32(sfnt, at + 4);
            let offset = read_u32(sfnt, at + 8) as usize;
            let length = read_u32(sfnt, at + 12) as usize;
            let raw = &sfnt[offset..offset + length];
            let stored = if compress {
                let zipped = zlib(raw);
                if zipped.len() < raw.len() {
                    zipped
                } else {
                    raw.to_vec()
                }
            } else {
                raw.to_vec()
            };
            (tag, checksum, stored, length)
        })
        .collect();

    let total_sfnt: usize = 12 + tables.iter().map(|t| 16 + padded(t.3)).sum::<usize>();
    let mut out = Vec::new();
    out.extend_from_slice(b"wOFF");
    out.extend_from_slice(&sfnt[0..4]); // flavor
    push_u32(&mut out, 0); // length, patched below
    push_u16(&mut out, num_tables as u16);
    push_u16(&mut out, 0);
    push_u32(&mut out, total_sfnt as u32);
    push_u16(&mut out, 1);
    push_u16(&mut out, 0);
    for _ in 0..5 {
        push_u32(&mut out, 0); // no metadata, no private block
    }

    let mut offset = out.len() + 20 * tables.len();
    for (tag, checksum, stored, length) in &tables {
        out.extend_from_slice(tag);
        push_u32(&mut out, offset as u32);
        push_u32(&mut out, stored.len() as u32);
        push_u32(&mut out, *length as u32);
        push_u32(&mut out, *checksum);
        offset += padded(stored.len());
    }
    for (_, _, stored, _) in &tables {
        out.extend_from_slice(stored);
        out.resize(out.len() + padded(stored.len()) - stored.len(), 0);
    }

    let len = out.len() as u32;
    out[8..12].copy_from_slice(&len.to_be_bytes());
    out
}

fn zlib(raw: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(raw).expect("zlib into memory");
    encoder.finish().expect("zlib into memory")
}

fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([data[at], data[at + 1]])
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn write_face(out: &mut Vec<u8>, face: FakeFace<'_>) {
    let mut tables: Vec<([u8; 4], Vec<u8>)> = vec![(*b"GSUB", gsub_table(face.features))];
    if let Some(family) = face.family {
        tables.push((*b"name", name_table(family)));
    }
    tables.sort_by(|a, b| a.0.cmp(&b.0));

    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;

    push_u32(out, 0x0001_0000);
    push_u16(out, num_tables);
    push_u16(out, search_range);
    push_u16(out, entry_selector);
    push_u16(out, num_tables * 16 - search_range);

    let mut offset = out.len() + 16 * tables.len();
    for (tag, data) in &tables {
        out.extend_from_slice(tag);
        push_u32(out, 0);
        push_u32(out, offset as u32);
        push_u32(out, data.len() as u32);
        offset += padded(data.len());
    }

    for (_, data) in &tables {
        out.extend_from_slice(data);
        out.resize(out.len() + padded(data.len()) - data.len(), 0);
    }
}

fn name_table(family: &str) -> Vec<u8> {
    let records: [(u16, &str); 2] = [(1, family), (2, "Regular")];
    let encoded: Vec<Vec<u8>> = records
        .iter()
        .map(|(_, text)| text.encode_utf16().flat_map(u16::to_be_bytes).collect())
        .collect();

    let mut table = Vec::new();
    push_u16(&mut table, 0);
    push_u16(&mut table, records.len() as u16);
    push_u16(&mut table, (6 + 12 * records.len()) as u16);

    let mut string_offset = 0u16;
    for ((name_id, _), bytes) in records.iter().zip(&encoded) {
        push_u16(&mut table, 3); // Windows
        push_u16(&mut table, 1); // Unicode BMP
        push_u16(&mut table, 0x0409); // en-US
        push_u16(&mut table, *name_id);
        push_u16(&mut table, bytes.len() as u16);
        push_u16(&mut table, string_offset);
        string_offset += bytes.len() as u16;
    }
    for bytes in &encoded {
        table.extend_from_slice(bytes);
    }
    table
}

fn gsub_table(features: &[&str]) -> Vec<u8> {
    let count = features.len();
    let feature_list_len = 2 + 6 * count + 4 * count;

    let mut table = Vec::new();
    push_u16(&mut table, 1);
    push_u16(&mut table, 0);
    push_u16(&mut table, 10); // ScriptList
    push_u16(&mut table, 12); // FeatureList
    push_u16(&mut table, (12 + feature_list_len) as u16); // LookupList

    push_u16(&mut table, 0); // no scripts

    push_u16(&mut table, count as u16);
    for (i, tag) in features.iter().enumerate() {
        let mut raw = [b' '; 4];
        for (slot, byte) in raw.iter_mut().zip(tag.bytes()) {
            *slot = byte;
        }
        table.extend_from_slice(&raw);
        push_u16(&mut table, (2 + 6 * count + 4 * i) as u16);
    }
    for _ in features {
        push_u16(&mut table, 0); // featureParams
        push_u16(&mut table, 0); // lookupIndexCount
    }

    push_u16(&mut table, 0); // no lookups
    table
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}
