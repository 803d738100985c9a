//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the pure taxonomy core and the
//! outside world. Adapters implement them to connect to real storage.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::Taxonomy;
use crate::serialization::{ImportError, SerializationError};

/// Error type for taxonomy storage
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error("Taxonomy not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Port for loading and persisting a taxonomy
#[async_trait]
pub trait TaxonomyRepo: Send + Sync {
    /// Load, validate and normalize the stored taxonomy
    async fn load(&self) -> Result<Taxonomy, RepoError>;

    /// Replace the stored taxonomy
    async fn save(&self, taxonomy: &Taxonomy) -> Result<(), RepoError>;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: OffsetDateTime,
}

impl FixedClock {
    pub fn new(at: OffsetDateTime) -> Self {
        Self { at }
    }

    /// Out-of-range timestamps clamp to the unix epoch
    pub fn from_unix(seconds: i64) -> Self {
        Self::new(
            OffsetDateTime::from_unix_timestamp(seconds).unwrap_or(OffsetDateTime::UNIX_EPOCH),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.at
    }
}
