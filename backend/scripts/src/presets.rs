use std::time::Duration;

use concierge_core::DialogueScript;
use concierge_feed::FeedConfig;

/// Greeting seeded into the concierge terminal before any input.
pub const INTAKE_GREETING: &str = "AAS-AI concierge online. How can we help?";

/// The three-step intake conversation used by the concierge terminal.
pub fn intake_script() -> DialogueScript {
    DialogueScript::new(
        "intake",
        [
            "What's your challenge?",
            "What's your timeline?",
            "What's your email?",
        ],
    )
}

/// Boot/diagnostic feed shown by the system-stats modal. The first two
/// lines are visible on mount; the rest reveal at 600 ms.
pub fn system_stats_feed() -> FeedConfig {
    FeedConfig::new(
        [
            "Initializing root access...",
            "Connecting to cluster-01...",
            "Auth token verified.",
            "Mounting /mnt/secure_kernel...",
            "Allocating virtual memory: 128GB",
            "Ping response: 0.04ms from us-east-1",
            "CPU Temperature: 42°C",
            "Running heuristic diagnostic...",
            "SYSTEM STABLE: NO ANOMALIES DETECTED.",
        ],
        Duration::from_millis(600),
        2,
    )
}

/// Robotic-arm diagnostic feed shown by the kinematics modal. Two lines
/// pre-revealed, 800 ms cadence.
pub fn arm_kinematics_feed() -> FeedConfig {
    FeedConfig::new(
        [
            "Initializing kinematic solver...",
            "Calibrating Joint_01...",
            "Servo_01 Torque: 12.4Nm [NOMINAL]",
            "Servo_02 Torque: 8.1Nm [NOMINAL]",
            "Gripper Pressure: 45 PSI",
            "Path Planning: A* Algorithm Converged (4ms)",
            "Collision Detection: ACTIVE",
            "Payload Detected: 14.2kg",
            "Haptic Feedback loop: SYNCHRONIZED",
        ],
        Duration::from_millis(800),
        2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_script_has_three_steps() {
        let script = intake_script();
        assert_eq!(script.len(), 3);
        assert_eq!(script.reply(0), Some("What's your challenge?"));
        assert_eq!(script.reply(2), Some("What's your email?"));
    }

    #[test]
    fn system_stats_feed_shape() {
        let feed = system_stats_feed();
        assert_eq!(feed.lines.len(), 9);
        assert_eq!(feed.initial_revealed, 2);
        assert_eq!(feed.tick_interval, Duration::from_millis(600));
        assert_eq!(feed.lines[0], "Initializing root access...");
    }

    #[test]
    fn arm_kinematics_feed_shape() {
        let feed = arm_kinematics_feed();
        assert_eq!(feed.lines.len(), 9);
        assert_eq!(feed.tick_interval, Duration::from_millis(800));
    }
}
