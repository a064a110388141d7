//! Bounded poll loop over a run's dataset items.
//!
//! Written as an explicit state machine rather than nested timers so the
//! attempt budget and interval are plain configuration, and so tests can
//! drive it under paused time.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ResultSet, RunHandle};

/// Wait between dataset reads.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Dataset reads before giving up on a run.
pub const MAX_POLL_ATTEMPTS: u32 = 10;

/// Poll loop tuning. Defaults match the service's documented cadence.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL,
            max_attempts: MAX_POLL_ATTEMPTS,
        }
    }
}

/// Where the poll loop is in its life cycle. `Success` and `Exhausted` are
/// terminal.
#[derive(Debug)]
pub enum PollState {
    Submitted,
    Polling { attempt: u32 },
    Success(ResultSet),
    Exhausted,
}

/// Anything the poll loop can read dataset items from. The seam for stub
/// sources in tests.
#[async_trait]
pub trait DatasetSource {
    async fn fetch_items(&self, handle: &RunHandle) -> Result<ResultSet>;
}

/// Poll a run's dataset until items show up or the attempt budget runs out.
///
/// Exhausting the budget is the documented degraded outcome, not an error:
/// the caller gets an empty [`ResultSet`] back. A failed read during an
/// attempt is not distinguishable from "run still processing" on this
/// endpoint, so it is logged and treated as an empty read. There is no
/// cancellation: once started, the loop runs to early success or budget.
///
/// No sleep happens after a successful read or after the final attempt.
pub async fn poll_dataset<S>(source: &S, handle: &RunHandle, config: &PollConfig) -> ResultSet
where
    S: DatasetSource + Sync + ?Sized,
{
    let mut state = PollState::Submitted;
    loop {
        state = match state {
            PollState::Submitted => PollState::Polling { attempt: 1 },
            PollState::Polling { attempt } => {
                tracing::debug!(run_id = %handle.run_id, attempt, "reading dataset items");
                let items = match source.fetch_items(handle).await {
                    Ok(items) => items,
                    Err(err) => {
                        tracing::debug!(
                            run_id = %handle.run_id,
                            attempt,
                            error = %err,
                            "dataset read failed, treating as not ready"
                        );
                        Vec::new()
                    }
                };
                if !items.is_empty() {
                    PollState::Success(items)
                } else if attempt >= config.max_attempts {
                    PollState::Exhausted
                } else {
                    tokio::time::sleep(config.interval).await;
                    PollState::Polling { attempt: attempt + 1 }
                }
            }
            PollState::Success(items) => {
                tracing::info!(run_id = %handle.run_id, count = items.len(), "dataset ready");
                return items;
            }
            PollState::Exhausted => {
                tracing::warn!(
                    run_id = %handle.run_id,
                    attempts = config.max_attempts,
                    "poll budget exhausted with no items"
                );
                return Vec::new();
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio::time::Instant;

    use super::*;
    use crate::error::ApifyError;
    use crate::types::Record;

    fn post(id: u32) -> Record {
        let mut record = Record::new();
        record.insert("post_id".to_string(), serde_json::json!(id));
        record
    }

    fn handle() -> RunHandle {
        RunHandle {
            run_id: "test-run".to_string(),
        }
    }

    fn config() -> PollConfig {
        PollConfig::default()
    }

    /// Empty until the nth read, then two items.
    struct ReadyOnAttempt {
        ready_on: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl DatasetSource for ReadyOnAttempt {
        async fn fetch_items(&self, _handle: &RunHandle) -> Result<ResultSet> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call >= self.ready_on {
                Ok(vec![post(1), post(2)])
            } else {
                Ok(Vec::new())
            }
        }
    }

    struct AlwaysEmpty {
        calls: AtomicU32,
    }

    #[async_trait]
    impl DatasetSource for AlwaysEmpty {
        async fn fetch_items(&self, _handle: &RunHandle) -> Result<ResultSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    struct AlwaysFails {
        calls: AtomicU32,
    }

    #[async_trait]
    impl DatasetSource for AlwaysFails {
        async fn fetch_items(&self, _handle: &RunHandle) -> Result<ResultSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ApifyError::MissingRunId)
        }
    }

    #[test]
    fn default_config_matches_service_cadence() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_millis(2000));
        assert_eq!(config.max_attempts, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_items_on_first_ready_attempt_without_further_reads() {
        let source = ReadyOnAttempt {
            ready_on: 3,
            calls: AtomicU32::new(0),
        };
        let started = Instant::now();

        let items = poll_dataset(&source, &handle(), &config()).await;

        assert_eq!(items, vec![post(1), post(2)]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        // Two sleeps before the third read, none after it.
        assert_eq!(started.elapsed(), POLL_INTERVAL * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_data_returns_without_sleeping() {
        let source = ReadyOnAttempt {
            ready_on: 1,
            calls: AtomicU32::new(0),
        };
        let started = Instant::now();

        let items = poll_dataset(&source, &handle(), &config()).await;

        assert_eq!(items.len(), 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_dataset_exhausts_budget_and_returns_empty_set() {
        let source = AlwaysEmpty {
            calls: AtomicU32::new(0),
        };
        let started = Instant::now();

        let items = poll_dataset(&source, &handle(), &config()).await;

        assert!(items.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 10);
        // Ten reads separated by nine intervals, no trailing sleep.
        assert_eq!(started.elapsed(), POLL_INTERVAL * 9);
    }

    #[tokio::test(start_paused = true)]
    async fn read_failures_count_as_empty_attempts() {
        let source = AlwaysFails {
            calls: AtomicU32::new(0),
        };

        let items = poll_dataset(&source, &handle(), &config()).await;

        assert!(items.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn respects_custom_attempt_budget() {
        let source = AlwaysEmpty {
            calls: AtomicU32::new(0),
        };
        let custom = PollConfig {
            interval: Duration::from_millis(50),
            max_attempts: 3,
        };

        let items = poll_dataset(&source, &handle(), &custom).await;

        assert!(items.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }
}
