//! Session events
//!
//! Events broadcast to UI collaborators while a session runs. One-shot
//! notices (`MaxDurationReached`, capture outcome, permission denial) appear
//! exactly once per occurrence; `TimerTick` repeats while recording.

use crate::output::MediaUri;

/// Events emitted during a capture session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The pipeline confirmed the recording; frames are flowing
    Started,
    /// Elapsed-time update for the timer display
    TimerTick { text: String, elapsed_ms: u64 },
    /// The duration cap was hit; a stop is in flight
    MaxDurationReached,
    /// The clip was persisted
    CaptureSucceeded { uri: MediaUri },
    /// The clip was discarded; detail is for the log, not the user
    CaptureFailed { detail: String },
    /// A required permission was not granted
    PermissionDenied,
}
