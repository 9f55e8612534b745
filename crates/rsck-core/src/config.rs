// crates/rsck-core/src/config.rs
//
// Search range / worker settings and their clamping rules.

use std::fmt;

pub const ID_MAX: i64 = 100_000;
pub const FRAMES_MAX: i64 = 100_000;

pub const DEFAULT_START: i64 = 0;
pub const DEFAULT_END: i64 = 3575;
pub const DEFAULT_FRAMES: i64 = 4000;
pub const DEFAULT_WORKERS: i64 = 10;

/// Raw, unclamped settings as they arrive from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawSearchConfig {
    pub start: i64,
    pub end: i64,
    pub frames: i64,
    pub workers: i64,
}

impl Default for RawSearchConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
            frames: DEFAULT_FRAMES,
            workers: DEFAULT_WORKERS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// First identity index searched.
    pub start: usize,
    /// Last identity index searched (inclusive).
    pub end: usize,
    pub frames: usize,
    pub workers: usize,
}

impl SearchConfig {
    pub fn tids(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// One adjustment made while clamping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Clamp {
    StartBelowZero,
    StartAboveMax,
    EndBelowStart,
    EndAboveMax,
    FramesBelowOne,
    FramesAboveMax,
    WorkersBelowOne,
    WorkersAboveCores { cores: usize },
}

impl fmt::Display for Clamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clamp::StartBelowZero => write!(f, "TID lower bound exceeded, set to 0"),
            Clamp::StartAboveMax => write!(f, "TID upper bound exceeded, start set to {ID_MAX}"),
            Clamp::EndBelowStart => write!(f, "TID range error, upper bound set to lower bound"),
            Clamp::EndAboveMax => write!(f, "TID upper bound exceeded, end set to {ID_MAX}"),
            Clamp::FramesBelowOne => write!(f, "frame lower bound exceeded, set to 1"),
            Clamp::FramesAboveMax => write!(f, "frame upper bound exceeded, set to {FRAMES_MAX}"),
            Clamp::WorkersBelowOne => write!(f, "worker count below 1, set to 1"),
            Clamp::WorkersAboveCores { cores } => {
                write!(f, "worker count exceeds available parallelism, set to {cores}")
            }
        }
    }
}

impl RawSearchConfig {
    /// Clamp into range. Never fails; every change is reported.
    pub fn clamped(self, cores: usize) -> (SearchConfig, Vec<Clamp>) {
        let mut notes = Vec::new();
        let cores = i64::try_from(cores.max(1)).unwrap_or(i64::MAX);

        let mut start = self.start;
        if start < 0 {
            notes.push(Clamp::StartBelowZero);
            start = 0;
        }
        if start > ID_MAX {
            notes.push(Clamp::StartAboveMax);
            start = ID_MAX;
        }

        let mut end = self.end;
        if end < start {
            notes.push(Clamp::EndBelowStart);
            end = start;
        }
        if end > ID_MAX {
            notes.push(Clamp::EndAboveMax);
            end = ID_MAX;
        }

        let mut frames = self.frames;
        if frames < 1 {
            notes.push(Clamp::FramesBelowOne);
            frames = 1;
        }
        if frames > FRAMES_MAX {
            notes.push(Clamp::FramesAboveMax);
            frames = FRAMES_MAX;
        }

        let mut workers = self.workers;
        if workers < 1 {
            notes.push(Clamp::WorkersBelowOne);
            workers = 1;
        }
        if workers > cores {
            notes.push(Clamp::WorkersAboveCores { cores: cores as usize });
            workers = cores;
        }

        let cfg = SearchConfig {
            start: start as usize,
            end: end as usize,
            frames: frames as usize,
            workers: workers as usize,
        };
        (cfg, notes)
    }
}

/// Hardware threads available to this process (at least 1).
pub fn available_cores() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}
