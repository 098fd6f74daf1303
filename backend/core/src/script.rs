use serde::{Deserialize, Serialize};

/// An ordered sequence of canned concierge replies.
///
/// Step `n` of a session is answered with `replies[n]`; the script is
/// exhausted (and the session terminal) once every reply has been scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueScript {
    /// Short identifier (e.g. "intake").
    pub name: String,
    pub replies: Vec<String>,
}

impl DialogueScript {
    pub fn new<I, S>(name: impl Into<String>, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            replies: replies.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of scripted steps.
    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    /// The canned reply for a given step, if the step exists.
    pub fn reply(&self, step: usize) -> Option<&str> {
        self.replies.get(step).map(String::as_str)
    }
}
