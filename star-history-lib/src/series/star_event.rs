use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The moment an account starred the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StarEvent {
    pub starred_at: DateTime<Utc>,
}

impl StarEvent {
    #[must_use]
    pub const fn new(starred_at: DateTime<Utc>) -> Self {
        Self { starred_at }
    }
}
