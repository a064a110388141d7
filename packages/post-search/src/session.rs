//! The single active search session.
//!
//! One session owns the one in-flight run and its result set. `run_search`
//! takes `&mut self` and completes before returning, so a second submission
//! cannot start while a poll is in flight, and every new search replaces the
//! previous results wholesale.

use apify_client::poller::{poll_dataset, PollConfig};
use apify_client::{DatasetSource, JobSubmitter, ResultSet, SearchRequest};

/// Where a session currently stands. `Ready` and `Failed` are terminal for
/// one search; the next search starts the cycle over.
#[derive(Debug)]
pub enum SessionState {
    /// No search has run yet.
    Idle,
    /// Submission or polling in progress.
    Loading,
    /// Search finished. The set may be empty (poll budget exhausted).
    Ready(ResultSet),
    /// Submission failed; there are no results.
    Failed,
}

pub struct SearchSession<C> {
    client: C,
    poll: PollConfig,
    state: SessionState,
}

impl<C> SearchSession<C>
where
    C: JobSubmitter + DatasetSource + Sync,
{
    pub fn new(client: C) -> Self {
        Self::with_poll_config(client, PollConfig::default())
    }

    pub fn with_poll_config(client: C, poll: PollConfig) -> Self {
        Self {
            client,
            poll,
            state: SessionState::Idle,
        }
    }

    /// Run one search end to end: submit, poll, store the outcome.
    ///
    /// No error escapes this method. Submission failure is logged and leaves
    /// the session `Failed`; an exhausted poll budget leaves it `Ready` with
    /// an empty set.
    pub async fn run_search(&mut self, request: SearchRequest) -> &SessionState {
        // Discard the previous search's results before submitting.
        self.state = SessionState::Loading;

        let handle = match self.client.submit_search(&request).await {
            Ok(handle) => handle,
            Err(err) => {
                tracing::error!(query = %request.query, error = %err, "search submission failed");
                self.state = SessionState::Failed;
                return &self.state;
            }
        };

        let items = poll_dataset(&self.client, &handle, &self.poll).await;
        tracing::info!(run_id = %handle.run_id, count = items.len(), "search session finished");
        self.state = SessionState::Ready(items);
        &self.state
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    /// The current result set. `Some` only after a finished search, empty
    /// set included; callers decide what emptiness means for them.
    pub fn results(&self) -> Option<&ResultSet> {
        match &self.state {
            SessionState::Ready(items) => Some(items),
            _ => None,
        }
    }
}
