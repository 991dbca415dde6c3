//! Session state and configuration
//!
//! Defines the session phase machine and the fixed recording policy.

use crate::permissions::ApiLevel;
use crate::pipeline::CameraSelector;
use serde::{Deserialize, Serialize};

/// Hard cap on clip length
pub const MAX_DURATION_MS: u64 = 30_000;

/// Period of elapsed-time updates
pub const TICK_INTERVAL_MS: u64 = 500;

/// Outcome of a finalized session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionOutcome {
    Success,
    Error,
}

/// Current phase of the recording session
///
/// `Finalized` is reached from `Recording` only via `Stopping`; the
/// controller resets to `Idle` before accepting the next start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No recording in progress
    Idle,
    /// Start requested, waiting for the pipeline to confirm
    Starting,
    /// Frames are flowing and the ticker is live
    Recording,
    /// Finalize requested, waiting for the terminal pipeline event
    Stopping,
    /// Terminal phase, immediately reset to `Idle`
    Finalized(SessionOutcome),
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Why a recording left the `Recording` phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// User-initiated stop
    User,
    /// The elapsed-time cap was reached
    Timeout,
}

/// Fixed policy for a capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Hard cap on clip length in milliseconds
    pub max_duration_ms: u64,

    /// Elapsed-time update period in milliseconds
    pub tick_interval_ms: u64,

    /// Camera to bind
    pub camera: CameraSelector,

    /// Destination path under the platform media root
    pub relative_path: Option<String>,

    /// Platform API level, gates legacy storage and relative paths
    pub api_level: ApiLevel,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_duration_ms: MAX_DURATION_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
            camera: CameraSelector::Front,
            relative_path: Some("Movies/ClipCap".to_string()),
            api_level: ApiLevel(33),
        }
    }
}

impl SessionConfig {
    /// Relative path to stamp on output descriptors
    ///
    /// Platforms without scoped storage ignore relative paths, so none is
    /// emitted there.
    pub fn output_relative_path(&self) -> Option<String> {
        if self.api_level.supports_scoped_storage() {
            self.relative_path.clone()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let config = SessionConfig::default();
        assert_eq!(config.max_duration_ms, 30_000);
        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.camera, CameraSelector::Front);
    }

    #[test]
    fn test_relative_path_gated_by_api_level() {
        let mut config = SessionConfig::default();
        assert_eq!(config.output_relative_path().as_deref(), Some("Movies/ClipCap"));

        config.api_level = ApiLevel(28);
        assert_eq!(config.output_relative_path(), None);
    }
}
