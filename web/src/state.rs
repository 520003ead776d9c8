//! Application state shared across HTTP handlers.

use tnt_core::RankingPolicy;
use tnt_pipeline::PipelineQueue;
use tnt_store::Store;

/// State handed to every handler: the database, the job queue handle for
/// post-commit scheduling, and the ranking policy used to decorate tour
/// responses.
#[derive(Clone)]
pub struct AppState {
    /// Database access.
    pub store: Store,
    /// Sending half of the confirmation job queue.
    pub jobs: PipelineQueue,
    /// Popularity scoring for tour listings.
    pub ranking: RankingPolicy,
}

impl AppState {
    /// Assemble the state.
    #[must_use]
    pub const fn new(store: Store, jobs: PipelineQueue, ranking: RankingPolicy) -> Self {
        Self {
            store,
            jobs,
            ranking,
        }
    }
}
