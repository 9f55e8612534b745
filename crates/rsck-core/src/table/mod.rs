// crates/rsck-core/src/table/mod.rs
//
// Flat-file lookup tables. Parsers take file contents, not paths;
// reading files is the caller's business.

pub mod candidate;
pub mod identity;
pub mod permutation;

pub use candidate::{CandidateRecord, CandidateTable};
pub use identity::{IdentityRecord, IdentityTable};

use crate::error::RsckError;

/// Non-blank lines with their 1-based line numbers.
pub(crate) fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
}

pub(crate) fn line_err(table: &str, line: usize, msg: impl std::fmt::Display) -> RsckError {
    RsckError::TableFormat(format!("{table} line {line}: {msg}"))
}
