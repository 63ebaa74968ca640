// shared/src/lib.rs

use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("store unavailable: {0}")]
    Store(String),
    #[error("invalid key pattern: {0}")]
    Pattern(String),
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Time-to-live of a cache entry, in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TtlSecs(pub u64);

impl TtlSecs {
    /// Applied by the cache when a caller does not name a TTL.
    pub const DEFAULT: TtlSecs = TtlSecs(3600);

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for TtlSecs {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u64> for TtlSecs {
    fn from(secs: u64) -> Self {
        TtlSecs(secs)
    }
}

pub mod config;
