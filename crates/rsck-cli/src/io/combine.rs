// crates/rsck-cli/src/io/combine.rs
//
// Concatenate per-TID CSVs, ascending TID, under a single header.
// Must only run once every search task has finished.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rsck_core::checksum::crc32_reader;
use rsck_core::row::CSV_HEADER;
use tracing::{info, warn};

use super::sink::OutputLayout;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombineReport {
    pub files: usize,
    pub missing: usize,
    pub rows: u64,
    pub crc32: u32,
    pub bytes: u64,
}

pub fn combine_all(layout: &OutputLayout, tids: impl Iterator<Item = usize> + Clone) -> Result<(CombineReport, CombineReport)> {
    let m = concat(&layout.matches(), tids.clone().map(|t| layout.task_matches(t)))?;
    let s = concat(&layout.specials(), tids.map(|t| layout.task_specials(t)))?;

    info!(
        rows = m.rows,
        files = m.files,
        missing = m.missing,
        bytes = m.bytes,
        crc32 = %format!("{:08x}", m.crc32),
        "combined {}",
        layout.matches().display()
    );
    info!(
        rows = s.rows,
        files = s.files,
        missing = s.missing,
        bytes = s.bytes,
        crc32 = %format!("{:08x}", s.crc32),
        "combined {}",
        layout.specials().display()
    );
    Ok((m, s))
}

pub fn concat(out_path: &Path, inputs: impl Iterator<Item = PathBuf>) -> Result<CombineReport> {
    let f = File::create(out_path).with_context(|| format!("create {}", out_path.display()))?;
    let mut out = BufWriter::new(f);
    writeln!(out, "{CSV_HEADER}")?;

    let mut report = CombineReport::default();
    for path in inputs {
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "missing per-tid output, skipped");
                report.missing += 1;
                continue;
            }
            Err(e) => return Err(e).with_context(|| format!("open {}", path.display())),
        };

        // first line of every per-tid file is its own header
        for line in BufReader::new(file).lines().skip(1) {
            let line = line.with_context(|| format!("read {}", path.display()))?;
            if line.is_empty() {
                continue;
            }
            writeln!(out, "{line}")?;
            report.rows += 1;
        }
        report.files += 1;
    }
    out.flush().with_context(|| format!("flush {}", out_path.display()))?;
    drop(out);

    let f = File::open(out_path).with_context(|| format!("reopen {}", out_path.display()))?;
    let (crc, bytes) = crc32_reader(f).with_context(|| format!("fingerprint {}", out_path.display()))?;
    report.crc32 = crc;
    report.bytes = bytes;
    Ok(report)
}
