// crates/rsck-core/src/table/identity.rs

use super::{data_lines, line_err};
use crate::error::{Result, RsckError};
use crate::key::Identity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdentityRecord {
    pub advance: u32,
    pub id: Identity,
}

/// Identities indexed directly by advance (dense from 0).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentityTable {
    rows: Vec<IdentityRecord>,
}

impl IdentityTable {
    /// Build from rows already in advance order. Advances must be 0..n.
    pub fn new(rows: Vec<IdentityRecord>) -> Result<Self> {
        for (i, r) in rows.iter().enumerate() {
            if r.advance as usize != i {
                return Err(RsckError::TableFormat(format!(
                    "identity row {i} has advance {} (advances must be dense from 0)",
                    r.advance
                )));
            }
        }
        Ok(Self { rows })
    }

    /// Parse `advance,tid,sid` rows. The first non-blank line is a header.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();

        for (line_no, line) in data_lines(text).skip(1) {
            let mut fields = line.split(',').map(str::trim);
            let mut next = |what: &str| {
                fields
                    .next()
                    .filter(|f| !f.is_empty())
                    .ok_or_else(|| line_err("identity", line_no, format!("missing {what}")))
            };
            let advance = next("advance")?;
            let tid = next("tid")?;
            let sid = next("sid")?;

            let advance: u32 = advance
                .parse()
                .map_err(|e| line_err("identity", line_no, format!("advance {advance:?}: {e}")))?;
            let tid: u16 = tid
                .parse()
                .map_err(|e| line_err("identity", line_no, format!("tid {tid:?}: {e}")))?;
            let sid: u16 = sid
                .parse()
                .map_err(|e| line_err("identity", line_no, format!("sid {sid:?}: {e}")))?;

            if advance as usize != rows.len() {
                return Err(line_err(
                    "identity",
                    line_no,
                    format!("advance {advance} out of sequence, expected {}", rows.len()),
                ));
            }
            rows.push(IdentityRecord { advance, id: Identity::new(tid, sid) });
        }

        Ok(Self { rows })
    }

    pub fn get(&self, index: usize) -> Result<&IdentityRecord> {
        self.rows
            .get(index)
            .ok_or(RsckError::IdentityOutOfRange { index, len: self.rows.len() })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
