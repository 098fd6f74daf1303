/// Result of a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// `lines[index]` just became visible.
    Revealed { index: usize },
    /// Every line was already visible; nothing changed.
    Exhausted,
    /// The feed was stopped; nothing changed.
    Stopped,
}

/// Pure prefix-reveal state machine.
///
/// Invariant: the revealed lines are always a prefix of `lines`, growing by
/// exactly one element per effective tick. Once stopped, the prefix is
/// frozen permanently regardless of further ticks.
#[derive(Debug, Clone)]
pub struct FeedState {
    lines: Vec<String>,
    revealed_count: usize,
    stopped: bool,
}

impl FeedState {
    /// Seed the feed with an initial visible prefix. A seed larger than the
    /// line list clamps to the full list.
    pub fn new(lines: Vec<String>, initial_revealed: usize) -> Self {
        let revealed_count = initial_revealed.min(lines.len());
        Self {
            lines,
            revealed_count,
            stopped: false,
        }
    }

    /// Advance the prefix by one line if possible.
    pub fn tick(&mut self) -> TickOutcome {
        if self.stopped {
            return TickOutcome::Stopped;
        }
        if self.revealed_count >= self.lines.len() {
            return TickOutcome::Exhausted;
        }
        let index = self.revealed_count;
        self.revealed_count += 1;
        TickOutcome::Revealed { index }
    }

    /// Freeze the prefix. Subsequent ticks are no-ops.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// True once every line is visible.
    pub fn is_exhausted(&self) -> bool {
        self.revealed_count >= self.lines.len()
    }

    /// The currently visible prefix.
    pub fn revealed(&self) -> &[String] {
        &self.lines[..self.revealed_count]
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boot_lines() -> Vec<String> {
        ["init", "connect", "ready"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn reveals_one_line_per_tick_until_exhausted() {
        let mut feed = FeedState::new(boot_lines(), 1);
        assert_eq!(feed.revealed(), &["init".to_string()]);

        assert_eq!(feed.tick(), TickOutcome::Revealed { index: 1 });
        assert_eq!(feed.tick(), TickOutcome::Revealed { index: 2 });
        assert_eq!(feed.revealed(), boot_lines().as_slice());
        assert!(feed.is_exhausted());

        // Further ticks never mutate.
        assert_eq!(feed.tick(), TickOutcome::Exhausted);
        assert_eq!(feed.revealed().len(), 3);
    }

    #[test]
    fn stop_freezes_prefix_permanently() {
        let mut feed = FeedState::new(boot_lines(), 1);
        feed.tick();
        feed.stop();
        assert!(feed.is_stopped());
        assert_eq!(feed.tick(), TickOutcome::Stopped);
        assert_eq!(feed.tick(), TickOutcome::Stopped);
        assert_eq!(feed.revealed().len(), 2);
    }

    #[test]
    fn oversized_seed_clamps_to_full_list() {
        let feed = FeedState::new(boot_lines(), 10);
        assert_eq!(feed.revealed().len(), 3);
        assert!(feed.is_exhausted());
    }

    #[test]
    fn zero_seed_starts_hidden() {
        let feed = FeedState::new(boot_lines(), 0);
        assert!(feed.revealed().is_empty());
        assert!(!feed.is_exhausted());
    }

    #[test]
    fn empty_feed_is_exhausted_from_the_start() {
        let mut feed = FeedState::new(Vec::new(), 0);
        assert!(feed.is_exhausted());
        assert_eq!(feed.tick(), TickOutcome::Exhausted);
    }
}
