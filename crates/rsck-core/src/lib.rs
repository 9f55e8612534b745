pub mod error;
pub mod config;

pub mod key;
pub mod order;
pub mod matcher;
pub mod table;
pub mod row;
pub mod search;
pub mod pool;
pub mod checksum;

pub use crate::error::{Result, RsckError};
pub use crate::matcher::{MatchResult, WorkingBuffer};
pub use crate::pool::WorkerPool;
pub use crate::search::{SearchTables, TaskSummary};
