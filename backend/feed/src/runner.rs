use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

use concierge_core::FeedUpdate;

use crate::state::{FeedState, TickOutcome};

/// Buffer size for the update broadcast channel.
const UPDATE_BUFFER_SIZE: usize = 64;

/// Static configuration for a log feed, supplied in-memory by the caller.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub lines: Vec<String>,
    /// Cadence between reveals.
    pub tick_interval: Duration,
    /// How many lines are visible before the first tick.
    pub initial_revealed: usize,
}

impl FeedConfig {
    pub fn new<I, S>(lines: I, tick_interval: Duration, initial_revealed: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            tick_interval,
            initial_revealed,
        }
    }
}

/// Interval-driven runner around [`FeedState`].
///
/// `start` spawns the ticker; `stop` freezes the prefix and cancels the
/// ticker. The stopped flag is flipped under the state lock before the task
/// is aborted, so a tick racing the cancellation observes the flag and
/// cannot mutate disposed state.
pub struct LogFeed {
    state: Arc<Mutex<FeedState>>,
    updates: broadcast::Sender<FeedUpdate>,
    tick_interval: Duration,
    ticker: StdMutex<Option<JoinHandle<()>>>,
}

impl LogFeed {
    pub fn new(config: FeedConfig) -> Self {
        let state = FeedState::new(config.lines, config.initial_revealed);
        let (updates, _) = broadcast::channel(UPDATE_BUFFER_SIZE);
        Self {
            state: Arc::new(Mutex::new(state)),
            updates,
            tick_interval: config.tick_interval,
            ticker: StdMutex::new(None),
        }
    }

    /// Begin ticking on the current runtime. Calling `start` on a feed that
    /// already started is a no-op.
    pub fn start(&self) {
        let mut ticker = match self.ticker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if ticker.is_some() {
            debug!("Feed already started, ignoring");
            return;
        }
        info!(interval_ms = self.tick_interval.as_millis() as u64, "Feed started");
        *ticker = Some(tokio::spawn(tick_loop(
            self.state.clone(),
            self.updates.clone(),
            self.tick_interval,
        )));
    }

    /// Freeze the revealed prefix and cancel the pending timer. Must be
    /// called on teardown; the prefix never grows afterwards.
    pub async fn stop(&self) {
        {
            let mut state = self.state.lock().await;
            if state.is_stopped() {
                return;
            }
            state.stop();
        }
        let handle = {
            let mut ticker = match self.ticker.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            ticker.take()
        };
        if let Some(handle) = handle {
            handle.abort();
        }
        info!("Feed stopped");
        let _ = self.updates.send(FeedUpdate::Stopped);
    }

    /// Snapshot of the currently visible prefix.
    pub async fn revealed(&self) -> Vec<String> {
        self.state.lock().await.revealed().to_vec()
    }

    pub async fn is_exhausted(&self) -> bool {
        self.state.lock().await.is_exhausted()
    }

    /// Subscribe to reveal updates.
    pub fn subscribe(&self) -> broadcast::Receiver<FeedUpdate> {
        self.updates.subscribe()
    }
}

impl Drop for LogFeed {
    fn drop(&mut self) {
        // Dropping the feed without stop() must not leave a timer mutating
        // a disposed feed.
        if let Ok(mut ticker) = self.ticker.lock() {
            if let Some(handle) = ticker.take() {
                handle.abort();
            }
        }
    }
}

enum LoopStep {
    Revealed {
        index: usize,
        text: String,
        exhausted: bool,
    },
    Exhausted,
    Stopped,
}

/// Reveals one line per interval until exhaustion or stop.
async fn tick_loop(
    state: Arc<Mutex<FeedState>>,
    updates: broadcast::Sender<FeedUpdate>,
    tick_interval: Duration,
) {
    let mut ticker = time::interval(tick_interval);
    // The first interval tick completes immediately; the first reveal
    // should come one full interval after start.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let step = {
            let mut state = state.lock().await;
            match state.tick() {
                TickOutcome::Revealed { index } => LoopStep::Revealed {
                    index,
                    text: state.line(index).unwrap_or_default().to_string(),
                    exhausted: state.is_exhausted(),
                },
                TickOutcome::Exhausted => LoopStep::Exhausted,
                TickOutcome::Stopped => LoopStep::Stopped,
            }
        };

        match step {
            LoopStep::Revealed {
                index,
                text,
                exhausted,
            } => {
                debug!(index, "Line revealed");
                let _ = updates.send(FeedUpdate::LineRevealed { index, text });
                if exhausted {
                    info!("Feed exhausted");
                    let _ = updates.send(FeedUpdate::Exhausted);
                    break;
                }
            }
            // A feed can start already exhausted (fully seeded prefix);
            // subscribers still need the terminal event.
            LoopStep::Exhausted => {
                info!("Feed exhausted");
                let _ = updates.send(FeedUpdate::Exhausted);
                break;
            }
            LoopStep::Stopped => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boot_config(interval_ms: u64, initial: usize) -> FeedConfig {
        FeedConfig::new(["init", "connect", "ready"], Duration::from_millis(interval_ms), initial)
    }

    async fn recv(rx: &mut broadcast::Receiver<FeedUpdate>) -> FeedUpdate {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for update")
            .expect("update channel closed")
    }

    #[tokio::test]
    async fn reveals_remaining_lines_then_stops_ticking() {
        let feed = LogFeed::new(boot_config(10, 1));
        let mut rx = feed.subscribe();
        assert_eq!(feed.revealed().await, vec!["init".to_string()]);

        feed.start();
        assert_eq!(
            recv(&mut rx).await,
            FeedUpdate::LineRevealed {
                index: 1,
                text: "connect".into()
            }
        );
        assert_eq!(
            recv(&mut rx).await,
            FeedUpdate::LineRevealed {
                index: 2,
                text: "ready".into()
            }
        );
        assert_eq!(recv(&mut rx).await, FeedUpdate::Exhausted);

        let revealed = feed.revealed().await;
        assert_eq!(revealed, vec!["init", "connect", "ready"]);
        assert!(feed.is_exhausted().await);

        // No further mutation after exhaustion.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(feed.revealed().await.len(), 3);
    }

    #[tokio::test]
    async fn start_is_idempotent() {
        let feed = LogFeed::new(boot_config(10, 0));
        let mut rx = feed.subscribe();
        feed.start();
        feed.start();
        feed.start();

        let mut revealed_events = 0;
        loop {
            match recv(&mut rx).await {
                FeedUpdate::LineRevealed { .. } => revealed_events += 1,
                FeedUpdate::Exhausted => break,
                FeedUpdate::Stopped => panic!("unexpected stop"),
            }
        }
        // A doubled ticker would have produced duplicate reveals.
        assert_eq!(revealed_events, 3);
    }

    #[tokio::test]
    async fn stop_freezes_prefix() {
        let feed = LogFeed::new(boot_config(10, 1));
        let mut rx = feed.subscribe();
        feed.start();

        // Let exactly one reveal land, then stop.
        assert!(matches!(
            recv(&mut rx).await,
            FeedUpdate::LineRevealed { index: 1, .. }
        ));
        feed.stop().await;
        assert_eq!(recv(&mut rx).await, FeedUpdate::Stopped);

        let frozen = feed.revealed().await;
        assert_eq!(frozen.len(), 2);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(feed.revealed().await, frozen);
    }

    #[tokio::test]
    async fn stop_twice_is_harmless() {
        let feed = LogFeed::new(boot_config(10, 0));
        feed.start();
        feed.stop().await;
        feed.stop().await;
        assert!(feed.revealed().await.len() <= 1);
    }

    #[tokio::test]
    async fn stop_before_start_prevents_any_reveal() {
        let feed = LogFeed::new(boot_config(5, 1));
        feed.stop().await;
        feed.start();
        tokio::time::sleep(Duration::from_millis(40)).await;
        // Ticks fire against a stopped state and never mutate it.
        assert_eq!(feed.revealed().await, vec!["init".to_string()]);
    }

    #[tokio::test]
    async fn oversized_seed_is_exhausted_without_ticking() {
        let feed = LogFeed::new(boot_config(10, 10));
        assert!(feed.is_exhausted().await);
        assert_eq!(feed.revealed().await.len(), 3);
    }

    #[tokio::test]
    async fn fully_seeded_feed_still_signals_exhausted() {
        let feed = LogFeed::new(boot_config(10, 10));
        let mut rx = feed.subscribe();
        feed.start();
        // No line is left to reveal, but subscribers waiting on a terminal
        // event must still get one.
        assert_eq!(recv(&mut rx).await, FeedUpdate::Exhausted);
        assert_eq!(feed.revealed().await.len(), 3);
    }
}
