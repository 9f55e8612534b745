// crates/rsck-cli/src/cmd/combine.rs

use anyhow::Result;
use clap::Args;
use rsck_core::config::{self, RawSearchConfig};
use tracing::warn;

use crate::io::combine;
use crate::io::sink::OutputLayout;

#[derive(Args, Debug)]
pub struct CombineArgs {
    /// First TID whose files are combined
    #[arg(long, default_value_t = config::DEFAULT_START, allow_negative_numbers = true)]
    pub start: i64,

    /// Last TID whose files are combined (inclusive)
    #[arg(long, default_value_t = config::DEFAULT_END, allow_negative_numbers = true)]
    pub end: i64,

    /// Directory a previous `search` wrote into
    #[arg(long, default_value = ".")]
    pub out: String,
}

pub fn run(args: CombineArgs) -> Result<()> {
    let raw = RawSearchConfig { start: args.start, end: args.end, workers: 1, ..RawSearchConfig::default() };
    let (cfg, clamps) = raw.clamped(config::available_cores());
    for c in &clamps {
        warn!("{c}");
    }

    let layout = OutputLayout::new(&args.out);
    combine::combine_all(&layout, cfg.tids())?;
    Ok(())
}
