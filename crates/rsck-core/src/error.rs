use thiserror::Error;

pub type Result<T> = std::result::Result<T, RsckError>;

#[derive(Debug, Error)]
pub enum RsckError {
    #[error("table format error: {0}")]
    TableFormat(String),

    #[error("no permutation for order code {code} (selector {selector})")]
    MissingOrderCode { code: &'static str, selector: u32 },

    #[error("identity index {index} out of range (table has {len} rows)")]
    IdentityOutOfRange { index: usize, len: usize },

    #[error("worker pool error: {0}")]
    Pool(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
