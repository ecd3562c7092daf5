//! Quiet-period debounce for interactive search input.
//!
//! Terms are released only after `quiet` has passed with no newer input. Every
//! released term carries a generation number; [`SearchGate`] drops responses
//! whose generation has been superseded while the request was in flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub term: String,
}

/// Spawns the debounce task and returns the channel of released terms.
///
/// A term equal to the previously released one is not released again. When
/// the input closes, a pending term is flushed immediately.
pub fn debounce(quiet: Duration, mut input: mpsc::Receiver<String>) -> mpsc::Receiver<SearchRequest> {
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut pending: Option<String> = None;
        let mut last_released: Option<String> = None;
        let mut generation = 0u64;

        let timer = sleep(quiet);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                received = input.recv() => {
                    if let Some(term) = received {
                        pending = Some(term);
                        timer.as_mut().reset(Instant::now() + quiet);
                    } else {
                        if let Some(term) = pending.take()
                            && last_released.as_ref() != Some(&term)
                        {
                            generation += 1;
                            let _ = tx.send(SearchRequest { generation, term }).await;
                        }
                        break;
                    }
                }
                () = &mut timer, if pending.is_some() => {
                    let Some(term) = pending.take() else { continue };
                    if last_released.as_ref() == Some(&term) {
                        debug!(term = %term, "Debounced term unchanged, skipping");
                        continue;
                    }

                    generation += 1;
                    last_released = Some(term.clone());
                    if tx.send(SearchRequest { generation, term }).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    rx
}

/// Tracks the newest released generation.
#[derive(Debug, Clone, Default)]
pub struct SearchGate {
    latest: Arc<AtomicU64>,
}

impl SearchGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `generation` as issued; older generations become stale.
    pub fn observe(&self, generation: u64) {
        self.latest.fetch_max(generation, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }
}
