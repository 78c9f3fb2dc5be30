//! Relocator configuration
//!
//! Loaded from TOML, for example:
//!
//! ```toml
//! overlap = "queue"
//! elevation = 1000
//! duration_ms = 250
//! easing = "ease-in-out"
//! ```

use std::path::Path;
use std::time::Duration;

use glide_animation::{Easing, Timing};
use serde::{Deserialize, Serialize};

use crate::error::{RelocateError, Result};

/// What to do when an element is relocated while already in flight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Fail the new request with `RelocationInProgress`
    #[default]
    Reject,
    /// Start the new request once the current one lands
    Queue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelocatorConfig {
    pub overlap: OverlapPolicy,
    /// z-index applied to the element while it travels
    pub elevation: i32,
    /// Transition duration when the request leaves it unset
    pub duration_ms: u64,
    /// Easing when the request leaves it unset
    pub easing: Easing,
}

impl Default for RelocatorConfig {
    fn default() -> Self {
        Self {
            overlap: OverlapPolicy::Reject,
            elevation: 99999,
            duration_ms: 400,
            easing: Easing::Swing,
        }
    }
}

impl RelocatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn elevation(mut self, elevation: i32) -> Self {
        self.elevation = elevation;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn default_timing(&self) -> Timing {
        Timing::new(Duration::from_millis(self.duration_ms), self.easing)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| RelocateError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| RelocateError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RelocateError::Config(e.to_string()))
    }
}
