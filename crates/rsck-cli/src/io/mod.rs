// crates/rsck-cli/src/io/mod.rs

pub mod combine;
pub mod sink;
pub mod tables;
