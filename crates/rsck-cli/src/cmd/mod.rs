// crates/rsck-cli/src/cmd/mod.rs

pub mod combine;
pub mod search;
