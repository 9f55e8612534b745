// crates/rsck-core/src/table/candidate.rs

use std::collections::HashSet;

use super::{data_lines, line_err};
use crate::error::Result;
use crate::order::WORD_COUNT;

/// Hex digits per little-endian 32-bit chunk.
pub const CHUNK_HEX: usize = 8;
/// First chunk of the 12-word data block.
pub const DATA_CHUNK: usize = 8;
/// Chunks a payload must carry: header chunks plus the data block.
pub const MIN_CHUNKS: usize = DATA_CHUNK + WORD_COUNT;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateRecord {
    pub name: String,
    /// Group selector; `selector % 24` picks the order code.
    pub selector: u32,
    /// Data words, each already XORed with chunk 0 and chunk 1.
    pub words: [u32; WORD_COUNT],
}

/// Decode 8 hex digits stored little-endian ("78563412" -> 0x12345678).
pub fn decode_le_chunk(hex: &str) -> Option<u32> {
    if hex.len() != CHUNK_HEX || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(u32::swap_bytes)
}

/// Inverse of `decode_le_chunk`, lower-case.
pub fn encode_le_chunk(v: u32) -> String {
    format!("{:08x}", v.swap_bytes())
}

impl CandidateRecord {
    /// Build a record from a hex payload.
    ///
    /// Only the selector survives a round trip back to hex: every data word
    /// has chunks 0 and 1 folded into it and the originals are dropped.
    pub fn from_hex(name: &str, payload: &str) -> std::result::Result<Self, String> {
        let payload = payload.trim();
        let chunks = payload.len() / CHUNK_HEX;
        if chunks < MIN_CHUNKS {
            return Err(format!(
                "payload has {} hex digits, need at least {}",
                payload.len(),
                MIN_CHUNKS * CHUNK_HEX
            ));
        }

        let chunk = |i: usize| -> std::result::Result<u32, String> {
            let s = payload
                .get(i * CHUNK_HEX..(i + 1) * CHUNK_HEX)
                .ok_or_else(|| format!("chunk {i} is not valid text"))?;
            decode_le_chunk(s).ok_or_else(|| format!("chunk {i} is not hex: {s:?}"))
        };

        let selector = chunk(0)?;
        let otid = chunk(1)?;
        let mut words = [0u32; WORD_COUNT];
        for (i, w) in words.iter_mut().enumerate() {
            *w = chunk(DATA_CHUNK + i)? ^ selector ^ otid;
        }

        Ok(Self { name: name.to_string(), selector, words })
    }
}

/// Candidates in file order; names are unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateTable {
    records: Vec<CandidateRecord>,
}

impl CandidateTable {
    pub fn new(records: Vec<CandidateRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (i, r) in records.iter().enumerate() {
            if !seen.insert(r.name.as_str()) {
                return Err(line_err("candidate", i + 1, format!("duplicate name {:?}", r.name)));
            }
        }
        Ok(Self { records })
    }

    /// Parse `name,<hex payload>` lines.
    pub fn parse(text: &str) -> Result<Self> {
        let mut records = Vec::new();
        let mut seen = HashSet::new();

        for (line_no, line) in data_lines(text) {
            let (name, payload) = line
                .split_once(',')
                .ok_or_else(|| line_err("candidate", line_no, "missing ','"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(line_err("candidate", line_no, "empty name"));
            }
            if !seen.insert(name.to_string()) {
                return Err(line_err("candidate", line_no, format!("duplicate name {name:?}")));
            }
            let rec = CandidateRecord::from_hex(name, payload).map_err(|e| line_err("candidate", line_no, e))?;
            records.push(rec);
        }

        Ok(Self { records })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateRecord> {
        self.records.iter()
    }

    pub fn get(&self, name: &str) -> Option<&CandidateRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
