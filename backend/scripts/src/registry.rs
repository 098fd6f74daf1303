use std::collections::HashMap;

use once_cell::sync::Lazy;

use concierge_core::DialogueScript;
use concierge_feed::FeedConfig;

use crate::presets::{arm_kinematics_feed, intake_script, system_stats_feed};

/// Name-keyed lookup of all built-in presets.
pub struct PresetRegistry {
    scripts: HashMap<String, DialogueScript>,
    feeds: HashMap<String, FeedConfig>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        let mut scripts = HashMap::new();
        scripts.insert("intake".to_string(), intake_script());

        let mut feeds = HashMap::new();
        feeds.insert("system-stats".to_string(), system_stats_feed());
        feeds.insert("arm-kinematics".to_string(), arm_kinematics_feed());

        Self { scripts, feeds }
    }

    /// Get a dialogue script by name, returning `None` if not found.
    pub fn script(&self, name: &str) -> Option<&DialogueScript> {
        self.scripts.get(name)
    }

    /// Get a feed preset by name, returning `None` if not found.
    pub fn feed(&self, name: &str) -> Option<&FeedConfig> {
        self.feeds.get(name)
    }

    pub fn script_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scripts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn feed_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.feeds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared process-wide registry instance.
pub fn registry() -> &'static PresetRegistry {
    static REGISTRY: Lazy<PresetRegistry> = Lazy::new(PresetRegistry::new);
    &REGISTRY
}
