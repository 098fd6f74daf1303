//! Built-in presets for the landing-page widgets.
//!
//! The site variants ship their scripts and feed content inline; this crate
//! is their single home. Presets are plain in-memory values looked up by
//! name; nothing here is read from configuration.

mod presets;
mod registry;

pub use presets::{arm_kinematics_feed, intake_script, system_stats_feed, INTAKE_GREETING};
pub use registry::{registry, PresetRegistry};
