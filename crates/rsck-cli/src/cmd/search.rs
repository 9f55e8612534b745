// crates/rsck-cli/src/cmd/search.rs

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use rsck_core::config::{self, RawSearchConfig};
use rsck_core::search::run_task;
use rsck_core::{SearchTables, TaskSummary, WorkerPool};
use tracing::{debug, error, info, warn};

use crate::io::combine;
use crate::io::sink::{open_sink, OutputLayout};
use crate::io::tables;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// First TID (identity index) to search
    #[arg(long, default_value_t = config::DEFAULT_START, allow_negative_numbers = true)]
    pub start: i64,

    /// Last TID to search (inclusive)
    #[arg(long, default_value_t = config::DEFAULT_END, allow_negative_numbers = true)]
    pub end: i64,

    /// Frames (enemy identities) searched per TID
    #[arg(long, default_value_t = config::DEFAULT_FRAMES, allow_negative_numbers = true)]
    pub frames: i64,

    /// Worker threads (clamped to available parallelism)
    #[arg(long, default_value_t = config::DEFAULT_WORKERS, allow_negative_numbers = true)]
    pub workers: i64,

    /// Candidate table: `name,<hex payload>` per line
    #[arg(long, default_value = "enemyDataList.csv")]
    pub candidates: String,

    /// Identity table: header, then `advance,tid,sid`
    #[arg(long, default_value = "OTIDs.csv")]
    pub identities: String,

    /// Optional permutation table (`orderCode,i1..i12`); built-in table if omitted
    #[arg(long)]
    pub order_file: Option<String>,

    /// Output directory
    #[arg(long, default_value = ".")]
    pub out: String,

    /// Leave per-TID files only; skip writing the combined CSVs
    #[arg(long, default_value_t = false)]
    pub no_combine: bool,
}

/// One task: open this TID's sinks and search it.
fn search_tid(tables: &SearchTables, layout: &OutputLayout, tid: usize, frames: usize) -> Result<TaskSummary> {
    let mut matches = open_sink(&layout.task_matches(tid))?;
    let mut specials = open_sink(&layout.task_specials(tid))?;
    let summary = run_task(tables, tid, frames, &mut matches, &mut specials)
        .with_context(|| format!("search tid {tid}"))?;
    Ok(summary)
}

/// Totals over every TID in the run.
#[derive(Debug, Default, PartialEq, Eq)]
struct RunTotals {
    matches: u64,
    specials: u64,
    /// TIDs that reported an error or never reported at all.
    failed: Vec<usize>,
}

fn collect_outcomes(tids: RangeInclusive<usize>, rx: mpsc::Receiver<(usize, Option<TaskSummary>)>) -> RunTotals {
    let reported: BTreeMap<usize, Option<TaskSummary>> = rx.iter().collect();
    let mut totals = RunTotals::default();
    for tid in tids {
        match reported.get(&tid) {
            Some(Some(s)) => {
                totals.matches += s.matches;
                totals.specials += s.specials;
            }
            _ => totals.failed.push(tid),
        }
    }
    totals
}

pub fn run(args: SearchArgs) -> Result<()> {
    let started = Instant::now();

    let raw = RawSearchConfig {
        start: args.start,
        end: args.end,
        frames: args.frames,
        workers: args.workers,
    };
    let (cfg, clamps) = raw.clamped(config::available_cores());
    for c in &clamps {
        warn!("{c}");
    }

    let tables = Arc::new(tables::load_all(&args.candidates, &args.identities, args.order_file.as_deref())?);
    info!(
        candidates = tables.candidates.len(),
        identities = tables.identities.len(),
        orders = tables.orders.len(),
        "tables loaded"
    );

    let layout = OutputLayout::new(&args.out);
    layout.prepare(cfg.tids())?;

    info!(
        workers = cfg.workers,
        "executing with TIDs {} to {} (inclusive) and the first {} frames",
        cfg.start,
        cfg.end,
        cfg.frames
    );

    let pool = WorkerPool::new(cfg.workers).context("start worker pool")?;
    let (tx, rx) = mpsc::channel::<(usize, Option<TaskSummary>)>();

    for tid in cfg.tids() {
        let tables = Arc::clone(&tables);
        let layout = layout.clone();
        let tx = tx.clone();
        let frames = cfg.frames;
        pool.submit(move || {
            debug!(tid, "checking tid");
            let outcome = match search_tid(&tables, &layout, tid, frames) {
                Ok(s) => {
                    debug!(tid, matches = s.matches, specials = s.specials, "tid done");
                    Some(s)
                }
                Err(e) => {
                    error!(tid, "task failed: {e:#}");
                    None
                }
            };
            let _ = tx.send((tid, outcome));
        });
    }
    drop(tx);

    let report = pool.drain_and_join();

    let totals = collect_outcomes(cfg.tids(), rx);

    info!(
        workers = report.workers,
        tasks = report.executed,
        matches = totals.matches,
        specials = totals.specials,
        failed = totals.failed.len(),
        panicked = report.panicked,
        "search finished"
    );
    if !totals.failed.is_empty() {
        warn!("failed TIDs: {:?}", totals.failed);
    }

    if args.no_combine {
        info!("skipping combine (--no-combine)");
    } else {
        combine::combine_all(&layout, cfg.tids())?;
    }

    info!("time elapsed: {} seconds", started.elapsed().as_secs());
    Ok(())
}
