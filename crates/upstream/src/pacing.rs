//! Minimum spacing between outgoing requests.
//!
//! Each caller reserves the next free slot under the lock, then sleeps
//! until that slot with the lock released. Concurrent callers therefore queue up one
//! `min_interval` apart without blocking each other on the mutex.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Shared "time of the last issued request" marker.
pub struct Pacer {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Wait until this caller may issue a request, and record it.
    pub async fn wait_turn(&self) {
        let slot = {
            let mut last = self.last_request.lock().await;
            let now = Instant::now();
            let slot = match *last {
                Some(prev) => (prev + self.min_interval).max(now),
                None => now,
            };
            *last = Some(slot);
            slot
        };

        if slot > Instant::now() {
            tracing::trace!(
                wait_ms = (slot - Instant::now()).as_millis() as u64,
                "Pacing upstream request",
            );
            tokio::time::sleep_until(slot).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_request_is_not_delayed() {
        let pacer = Pacer::new(Duration::from_secs(2));
        let start = Instant::now();
        pacer.wait_turn().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_requests_are_spaced() {
        let pacer = Pacer::new(Duration::from_secs(2));
        let start = Instant::now();
        pacer.wait_turn().await;
        pacer.wait_turn().await;
        pacer.wait_turn().await;
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_time_counts_towards_spacing() {
        let pacer = Pacer::new(Duration::from_secs(2));
        pacer.wait_turn().await;
        tokio::time::sleep(Duration::from_secs(5)).await;

        let before = Instant::now();
        pacer.wait_turn().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_get_distinct_slots() {
        let pacer = Arc::new(Pacer::new(Duration::from_secs(2)));
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let pacer = Arc::clone(&pacer);
                tokio::spawn(async move {
                    pacer.wait_turn().await;
                    Instant::now()
                })
            })
            .collect();

        let mut times = Vec::new();
        for handle in handles {
            times.push(handle.await.unwrap() - start);
        }
        times.sort();
        assert_eq!(
            times,
            [0, 2, 4].map(Duration::from_secs).to_vec()
        );
    }
}
