// crates/rsck-cli/src/io/sink.rs
//
// Output file layout and per-task CSV sinks.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rsck_core::row::CsvSink;

pub const MATCH_FILE: &str = "matches.csv";
pub const SPECIAL_FILE: &str = "specials.csv";
const TASK_DIR: &str = "tid";

pub type FileSink = CsvSink<BufWriter<File>>;

/// `<root>/matches.csv`, `<root>/specials.csv` and the per-TID files under
/// `<root>/tid/`.
#[derive(Clone, Debug)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn task_dir(&self) -> PathBuf {
        self.root.join(TASK_DIR)
    }

    pub fn task_matches(&self, tid: usize) -> PathBuf {
        self.task_dir().join(format!("matches_{tid}.csv"))
    }

    pub fn task_specials(&self, tid: usize) -> PathBuf {
        self.task_dir().join(format!("specials_{tid}.csv"))
    }

    pub fn matches(&self) -> PathBuf {
        self.root.join(MATCH_FILE)
    }

    pub fn specials(&self) -> PathBuf {
        self.root.join(SPECIAL_FILE)
    }

    /// Create directories and delete output left over from earlier runs, so
    /// a task that fails to write cannot leave stale rows to be combined.
    pub fn prepare(&self, tids: impl Iterator<Item = usize>) -> Result<()> {
        let dir = self.task_dir();
        std::fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

        remove_if_exists(&self.matches())?;
        remove_if_exists(&self.specials())?;
        for tid in tids {
            remove_if_exists(&self.task_matches(tid))?;
            remove_if_exists(&self.task_specials(tid))?;
        }
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("remove stale {}", path.display())),
    }
}

pub fn open_sink(path: &Path) -> Result<FileSink> {
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvSink::new(BufWriter::new(f)).with_context(|| format!("write header {}", path.display()))
}
