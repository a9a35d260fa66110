//! Shared state for API handlers and constants

use storage::StorageReader;

/// Maximum `limit` accepted by the list endpoints.
pub const MAX_LIMIT: u64 = 10_000;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub(crate) client: StorageReader,
    default_limit: u64,
    transition_block: u64,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState").finish_non_exhaustive()
    }
}

impl ApiState {
    /// Create a new [`ApiState`].
    pub const fn new(client: StorageReader, default_limit: u64, transition_block: u64) -> Self {
        Self { client, default_limit, transition_block }
    }

    /// Limit applied when a request does not specify one.
    pub const fn default_limit(&self) -> u64 {
        self.default_limit
    }

    /// First block of the post-transition protocol era.
    pub const fn transition_block(&self) -> u64 {
        self.transition_block
    }
}
