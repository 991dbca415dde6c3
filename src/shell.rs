//! UI collaborator surface
//!
//! Thin rendering model for whatever front end hosts the engine: the
//! record-button label, the timer text, and one-shot notices. `UiModel`
//! folds session events into a snapshot the host can poll or serialize;
//! `run_shell` is a ready-made renderer that applies events from a
//! subscription and logs notices (the toast/log analog).

use crate::session::events::SessionEvent;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Label the record button should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonLabel {
    Start,
    Stop,
}

/// Renderable UI snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub button_label: ButtonLabel,
    pub timer_text: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            button_label: ButtonLabel::Start,
            timer_text: "00:00".to_string(),
        }
    }
}

/// Shared UI model fed by session events
#[derive(Default)]
pub struct UiModel {
    state: RwLock<UiState>,
}

impl UiModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot for rendering
    pub fn snapshot(&self) -> UiState {
        self.state.read().clone()
    }

    /// Fold one event into the snapshot, returning any one-shot notice text
    pub fn apply(&self, event: &SessionEvent) -> Option<String> {
        let mut state = self.state.write();
        match event {
            SessionEvent::Started => {
                state.button_label = ButtonLabel::Stop;
                None
            }
            SessionEvent::TimerTick { text, .. } => {
                state.timer_text = text.clone();
                None
            }
            SessionEvent::MaxDurationReached => {
                Some("Maximum recording time reached (30 seconds)".to_string())
            }
            SessionEvent::CaptureSucceeded { uri } => {
                state.button_label = ButtonLabel::Start;
                Some(format!("Video capture succeeded: {uri}"))
            }
            SessionEvent::CaptureFailed { .. } => {
                state.button_label = ButtonLabel::Start;
                // Detail stays in the log; the user gets a generic notice
                Some("Video capture failed".to_string())
            }
            SessionEvent::PermissionDenied => Some("Permission request denied".to_string()),
        }
    }
}

/// Drive a `UiModel` from a session event subscription, logging notices.
///
/// Runs until the session controller goes away. A lagged receiver skips
/// ahead rather than terminating; the next tick repairs the timer text.
pub async fn run_shell(model: Arc<UiModel>, mut events: broadcast::Receiver<SessionEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if let Some(notice) = model.apply(&event) {
                    tracing::info!(%notice, "session notice");
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "shell lagged behind session events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
