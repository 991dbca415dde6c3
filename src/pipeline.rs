//! Camera pipeline contract
//!
//! Platform-agnostic trait for the live capture pipeline: binding a camera
//! to its preview and recording sinks and driving one recording at a time.
//! Encoding and storage live behind this seam; the session controller only
//! observes the event stream a recording emits.

use crate::error::CaptureResult;
use crate::output::{MediaUri, OutputDescriptor};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Which camera to bind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraSelector {
    #[default]
    Front,
    Back,
}

/// Events emitted by an in-flight recording
///
/// Exactly one `Start` is followed by exactly one `Finalize`; the stream
/// closes afterwards. A stream that closes without `Finalize` means the
/// pipeline died and the clip is lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordEvent {
    /// The recorder accepted the request and frames are flowing
    Start,
    /// Terminal event: the clip was persisted (with its URI) or discarded
    Finalize(Result<MediaUri, String>),
}

/// Live capture pipeline
///
/// Implementations may do frame and encoding work on background threads,
/// but must surface all events through the returned channel so the session
/// controller observes them from its own task.
#[async_trait]
pub trait CameraPipeline: Send {
    /// Bind the selected camera to the preview and recording sinks.
    ///
    /// Rebinding must unbind all prior use first, so retries after a
    /// permission grant never accumulate stale bindings.
    async fn bind(&mut self, selector: CameraSelector) -> CaptureResult<()>;

    /// Whether a camera is currently bound and ready to record
    fn is_bound(&self) -> bool;

    /// Begin a recording into the described destination.
    ///
    /// `audio_enabled` is decided by the caller at start time; a recording
    /// without audio produces video-only output rather than failing.
    async fn start_recording(
        &mut self,
        output: OutputDescriptor,
        audio_enabled: bool,
    ) -> CaptureResult<mpsc::Receiver<RecordEvent>>;

    /// Request finalize of the in-flight recording, if any.
    ///
    /// The outcome arrives as `RecordEvent::Finalize` on the stream.
    async fn stop_recording(&mut self);

    /// Release the camera and any background workers on teardown
    async fn shutdown(&mut self);
}
