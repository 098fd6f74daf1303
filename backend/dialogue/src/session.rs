use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use concierge_core::{DialogueScript, SessionUpdate, TranscriptEntry};

use crate::state::{SessionState, SubmitOutcome};

/// Buffer size for the update broadcast channel.
const UPDATE_BUFFER_SIZE: usize = 64;

/// Tuning for a dialogue session.
#[derive(Debug, Clone)]
pub struct DialogueConfig {
    /// Delay between an accepted submission and its agent reply.
    pub reply_delay: Duration,
    /// Optional system greeting seeded into the transcript.
    pub greeting: Option<String>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(800),
            greeting: None,
        }
    }
}

/// Timer-driven wrapper around [`SessionState`].
///
/// Accepted submissions append the user entry immediately and enqueue the
/// pre-increment step on a single reply worker. The worker sleeps the reply
/// delay, appends the agent entry, and broadcasts an update. One ordered
/// queue means replies always land in submission order, even when the
/// caller fires submissions faster than the delay.
pub struct DialogueSession {
    id: Uuid,
    state: Arc<Mutex<SessionState>>,
    updates: broadcast::Sender<SessionUpdate>,
    reply_tx: mpsc::UnboundedSender<usize>,
    worker: JoinHandle<()>,
}

impl DialogueSession {
    /// Create a session and start its reply worker on the current runtime.
    pub fn spawn(script: DialogueScript, config: DialogueConfig) -> Self {
        let id = Uuid::new_v4();
        let final_step = script.len().checked_sub(1);
        let state = match &config.greeting {
            Some(greeting) => SessionState::with_greeting(script, greeting.clone()),
            None => SessionState::new(script),
        };
        let state = Arc::new(Mutex::new(state));
        let (updates, _) = broadcast::channel(UPDATE_BUFFER_SIZE);
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();

        let worker = tokio::spawn(reply_worker(
            state.clone(),
            updates.clone(),
            reply_rx,
            config.reply_delay,
            final_step,
        ));
        info!(session_id = %id, "Dialogue session started");

        Self {
            id,
            state,
            updates,
            reply_tx,
            worker,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Offer user input. The user entry becomes visible immediately; the
    /// reply is scheduled for delivery after the configured delay.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let (outcome, stored) = {
            let mut state = self.state.lock().await;
            let outcome = state.submit(text);
            let stored = match outcome {
                SubmitOutcome::Accepted { .. } => {
                    state.transcript().last().map(|e| e.text.clone())
                }
                SubmitOutcome::Rejected(_) => None,
            };
            (outcome, stored)
        };

        if let SubmitOutcome::Accepted { step } = outcome {
            if let Some(text) = stored {
                let _ = self.updates.send(SessionUpdate::UserMessage { text });
            }
            if self.reply_tx.send(step).is_err() {
                warn!(session_id = %self.id, step, "Reply worker gone, reply dropped");
            }
        } else {
            debug!(session_id = %self.id, ?outcome, "Submission rejected");
        }
        outcome
    }

    /// True once every scripted step has been accepted.
    pub async fn is_terminal(&self) -> bool {
        self.state.lock().await.is_terminal()
    }

    pub async fn current_step(&self) -> usize {
        self.state.lock().await.current_step()
    }

    /// Read-only snapshot of the full transcript.
    pub async fn transcript(&self) -> Vec<TranscriptEntry> {
        self.state.lock().await.transcript().to_vec()
    }

    /// Subscribe to transcript updates. Late subscribers only see updates
    /// from the point of subscription; use [`transcript`](Self::transcript)
    /// for the backlog.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.updates.subscribe()
    }
}

impl Drop for DialogueSession {
    fn drop(&mut self) {
        // The session owns its timers; tear the worker down with it.
        self.worker.abort();
    }
}

/// Consumes scheduled steps in order, sleeping the reply delay before each
/// delivery. Exits after the final scripted reply.
async fn reply_worker(
    state: Arc<Mutex<SessionState>>,
    updates: broadcast::Sender<SessionUpdate>,
    mut reply_rx: mpsc::UnboundedReceiver<usize>,
    delay: Duration,
    final_step: Option<usize>,
) {
    while let Some(step) = reply_rx.recv().await {
        tokio::time::sleep(delay).await;

        let delivered = {
            let mut state = state.lock().await;
            state.deliver_reply(step).map(|e| e.text.clone())
        };

        match delivered {
            Some(text) => {
                debug!(step, "Agent reply delivered");
                let _ = updates.send(SessionUpdate::AgentReply { step, text });
                if Some(step) == final_step {
                    info!("Final reply delivered, session closed");
                    let _ = updates.send(SessionUpdate::SessionClosed);
                    break;
                }
            }
            None => warn!(step, "No scripted reply for step"),
        }
    }
}
