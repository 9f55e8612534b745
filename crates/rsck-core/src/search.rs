// crates/rsck-core/src/search.rs
//
// One search task: a fixed player identity against every frame, every
// candidate and every container index.

use tracing::debug;

use crate::error::{Result, RsckError};
use crate::matcher::{build_buffer, search_containers, WorkingBuffer};
use crate::order::PermutationTable;
use crate::row::{MatchRow, RowSink};
use crate::table::{CandidateTable, IdentityTable};

const PROGRESS_EVERY: usize = 500;

/// Read-only inputs shared by every task.
#[derive(Clone, Debug, Default)]
pub struct SearchTables {
    pub candidates: CandidateTable,
    pub identities: IdentityTable,
    pub orders: PermutationTable,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub tid: usize,
    pub matches: u64,
    pub specials: u64,
}

impl SearchTables {
    /// Working buffers before any container patch, in candidate order.
    /// They depend only on the candidate, so a task builds them once.
    pub fn base_buffers(&self) -> Result<Vec<(&str, WorkingBuffer)>> {
        let mut out = Vec::with_capacity(self.candidates.len());
        for c in self.candidates.iter() {
            let perm = self.orders.resolve(c.selector)?;
            out.push((c.name.as_str(), build_buffer(&c.words, perm)));
        }
        Ok(out)
    }
}

/// Search identity `tid` over the first `frames` frames.
///
/// Every match goes to `matches`; special matches also go to `specials`.
pub fn run_task(
    tables: &SearchTables,
    tid: usize,
    frames: usize,
    matches: &mut dyn RowSink,
    specials: &mut dyn RowSink,
) -> Result<TaskSummary> {
    let player = tables.identities.get(tid)?.id;
    let player_key = player.key();

    if frames > tables.identities.len() {
        return Err(RsckError::IdentityOutOfRange {
            index: frames - 1,
            len: tables.identities.len(),
        });
    }

    let bases = tables.base_buffers()?;
    let mut summary = TaskSummary { tid, ..TaskSummary::default() };

    for frame in 0..frames {
        if frame % PROGRESS_EVERY == 0 {
            debug!(tid, frame, "checking frame");
        }

        let enemy = tables.identities.get(frame)?.id.swapped();
        let enemy_key = enemy.key();

        for (name, base) in &bases {
            let mut buf = *base;
            let Some(hit) = search_containers(&mut buf, player_key, enemy_key) else {
                continue;
            };

            let row = MatchRow {
                player_frame: tid,
                enemy_frame: frame,
                player,
                enemy,
                hit,
                candidate: name,
            };
            matches.write_row(&row)?;
            summary.matches += 1;
            if hit.result.special {
                specials.write_row(&row)?;
                summary.specials += 1;
            }
        }
    }

    matches.flush()?;
    specials.flush()?;
    Ok(summary)
}
