use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::domain::draft_session::{DraftKey, DraftSession};

pub mod draft;

#[cfg(test)]
pub mod mock;

/// Errors surfaced by the draft repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A thread panicked while holding the draft table.
    #[error("draft storage lock was poisoned")]
    Poisoned,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// How long a draft survives without being read or stored.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Upper bound on drafts held at once.
pub const DEFAULT_MAX_DRAFTS: usize = 10_000;

#[derive(Debug)]
struct StoredDraft {
    session: DraftSession,
    touched_at: Instant,
}

impl StoredDraft {
    fn is_idle(&self, ttl: Duration) -> bool {
        self.touched_at.elapsed() > ttl
    }
}

#[derive(Clone)]
/// Process-local holder of the drafts currently open in browser sessions.
///
/// Nothing outlives the process. A draft is dropped when its page is left,
/// when its submission has been followed, when it sits idle longer than the
/// idle TTL, or when room is needed and it is the least recently touched.
pub struct InMemoryRepository {
    drafts: Arc<Mutex<HashMap<DraftKey, StoredDraft>>>,
    idle_ttl: Duration,
    max_drafts: usize,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_TTL, DEFAULT_MAX_DRAFTS)
    }
}

impl InMemoryRepository {
    /// Create an empty repository with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty repository evicting drafts idle for longer than
    /// `idle_ttl` and holding at most `max_drafts` (at least one).
    pub fn with_limits(idle_ttl: Duration, max_drafts: usize) -> Self {
        Self {
            drafts: Arc::new(Mutex::new(HashMap::new())),
            idle_ttl,
            max_drafts: max_drafts.max(1),
        }
    }

    /// Number of drafts currently held.
    pub fn open_drafts(&self) -> RepositoryResult<usize> {
        Ok(self.drafts()?.len())
    }

    fn drafts(&self) -> RepositoryResult<MutexGuard<'_, HashMap<DraftKey, StoredDraft>>> {
        self.drafts.lock().map_err(|_| RepositoryError::Poisoned)
    }
}

/// Read-only operations over open drafts.
pub trait DraftReader {
    fn get_draft(&self, key: &DraftKey) -> RepositoryResult<Option<DraftSession>>;
}

/// Write operations over open drafts.
pub trait DraftWriter {
    /// Insert or replace the draft stored under `session.key`.
    fn store_draft(&self, session: &DraftSession) -> RepositoryResult<()>;
    /// Remove the draft, returning it when it existed.
    fn discard_draft(&self, key: &DraftKey) -> RepositoryResult<Option<DraftSession>>;
}
