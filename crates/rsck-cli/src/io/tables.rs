// crates/rsck-cli/src/io/tables.rs

use anyhow::{Context, Result};
use rsck_core::order::PermutationTable;
use rsck_core::table::{permutation, CandidateTable, IdentityTable};
use rsck_core::SearchTables;

fn read_text(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {path}"))
}

pub fn load_candidates(path: &str) -> Result<CandidateTable> {
    let text = read_text(path)?;
    CandidateTable::parse(&text).with_context(|| format!("parse candidate table {path}"))
}

pub fn load_identities(path: &str) -> Result<IdentityTable> {
    let text = read_text(path)?;
    IdentityTable::parse(&text).with_context(|| format!("parse identity table {path}"))
}

/// Permutation file if given, otherwise the built-in role table.
pub fn load_orders(path: Option<&str>) -> Result<PermutationTable> {
    match path {
        Some(p) => {
            let text = read_text(p)?;
            permutation::parse(&text).with_context(|| format!("parse permutation table {p}"))
        }
        None => Ok(PermutationTable::builtin()),
    }
}

pub fn load_all(candidates: &str, identities: &str, orders: Option<&str>) -> Result<SearchTables> {
    Ok(SearchTables {
        candidates: load_candidates(candidates)?,
        identities: load_identities(identities)?,
        orders: load_orders(orders)?,
    })
}
