use concierge_core::{DialogueScript, Speaker, TranscriptEntry};

/// Why a submission was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Empty or whitespace-only input. Silently ignored by the UI.
    EmptyInput,
    /// Every scripted step has already been consumed.
    SessionClosed,
}

/// Result of offering a submission to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The user entry was appended; the reply for `step` should be
    /// scheduled.
    Accepted { step: usize },
    Rejected(RejectReason),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }
}

/// Pure dialogue state machine.
///
/// States are `0..=script.len()`; `submit` transitions while not terminal;
/// `script.len()` is terminal with no outgoing transitions. `current_step`
/// counts accepted submissions ("steps in flight") and never decreases; the
/// transcript only grows.
#[derive(Debug, Clone)]
pub struct SessionState {
    script: DialogueScript,
    transcript: Vec<TranscriptEntry>,
    current_step: usize,
}

impl SessionState {
    pub fn new(script: DialogueScript) -> Self {
        Self {
            script,
            transcript: Vec::new(),
            current_step: 0,
        }
    }

    /// Seed the transcript with a system greeting before any input.
    pub fn with_greeting(script: DialogueScript, greeting: impl Into<String>) -> Self {
        let mut state = Self::new(script);
        state
            .transcript
            .push(TranscriptEntry::now(Speaker::System, greeting));
        state
    }

    /// Offer user input. Accepted input appends a `User` entry immediately
    /// and advances `current_step`; the caller is responsible for
    /// scheduling delivery of the reply for the returned step.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::Rejected(RejectReason::EmptyInput);
        }
        if self.is_terminal() {
            return SubmitOutcome::Rejected(RejectReason::SessionClosed);
        }

        self.transcript
            .push(TranscriptEntry::now(Speaker::User, trimmed));
        let step = self.current_step;
        self.current_step += 1;
        SubmitOutcome::Accepted { step }
    }

    /// Append the agent reply for `step`. Returns the appended entry, or
    /// `None` if the script has no such step.
    pub fn deliver_reply(&mut self, step: usize) -> Option<&TranscriptEntry> {
        let text = self.script.reply(step)?.to_string();
        self.transcript
            .push(TranscriptEntry::now(Speaker::Agent, text));
        self.transcript.last()
    }

    /// True once every scripted step has been consumed. An empty script is
    /// terminal from the start.
    pub fn is_terminal(&self) -> bool {
        self.current_step >= self.script.len()
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn script(&self) -> &DialogueScript {
        &self.script
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }
}
