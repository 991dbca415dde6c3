//! Session controller
//!
//! Owns the recording session state machine and orchestrates the camera
//! pipeline. Commands, pipeline events, and ticker ticks are all merged
//! into one `tokio::select!` loop, so session state is only ever touched
//! from a single task and the ticker can be cancelled synchronously by
//! dropping it.

use crate::error::{CaptureError, CaptureResult};
use crate::output::{MediaUri, OutputDescriptor};
use crate::permissions::{Capability, PermissionGate};
use crate::pipeline::{CameraPipeline, RecordEvent};
use crate::session::events::SessionEvent;
use crate::session::state::{SessionConfig, SessionOutcome, SessionPhase, StopReason};
use crate::session::ticker::{ElapsedTicker, TickUpdate};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

const COMMAND_CAPACITY: usize = 16;
const EVENT_CAPACITY: usize = 256;

enum Command {
    Bind { reply: oneshot::Sender<CaptureResult<()>> },
    Start { reply: oneshot::Sender<CaptureResult<()>> },
    Stop { reply: oneshot::Sender<()> },
    Shutdown,
}

/// Handle for driving a running session controller
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Gate permissions and bind the camera pipeline
    pub async fn bind(&self) -> CaptureResult<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Bind { reply }).await?;
        rx.await.map_err(|_| CaptureError::ControllerClosed)?
    }

    /// Start a recording session
    pub async fn start(&self) -> CaptureResult<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Start { reply }).await?;
        rx.await.map_err(|_| CaptureError::ControllerClosed)?
    }

    /// Stop the active recording, if any. Idempotent.
    pub async fn stop(&self) -> CaptureResult<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Stop { reply }).await?;
        rx.await.map_err(|_| CaptureError::ControllerClosed)
    }

    /// Tear the controller down, releasing the camera
    pub async fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown).await;
    }

    async fn send(&self, command: Command) -> CaptureResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CaptureError::ControllerClosed)
    }
}

/// Recording session state machine
///
/// At most one session is active at a time; a new `start` while any session
/// is underway is rejected with `AlreadyRecording`.
pub struct SessionController {
    pipeline: Box<dyn CameraPipeline>,
    gate: PermissionGate,
    config: SessionConfig,
    phase: SessionPhase,
    session_id: Option<Uuid>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionController {
    /// Spawn a controller onto the runtime, returning its handle
    pub fn spawn(
        pipeline: Box<dyn CameraPipeline>,
        gate: PermissionGate,
        config: SessionConfig,
    ) -> (SessionHandle, JoinHandle<()>) {
        let (commands, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let controller = Self {
            pipeline,
            gate,
            config,
            phase: SessionPhase::Idle,
            session_id: None,
            events: events.clone(),
        };
        let task = tokio::spawn(controller.run(command_rx));

        (SessionHandle { commands, events }, task)
    }

    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let mut record_events: Option<mpsc::Receiver<RecordEvent>> = None;
        let mut ticker: Option<ElapsedTicker> = None;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Bind { reply }) => {
                        let _ = reply.send(self.bind_pipeline().await);
                    }
                    Some(Command::Start { reply }) => match self.begin_recording().await {
                        Ok(rx) => {
                            record_events = Some(rx);
                            let _ = reply.send(Ok(()));
                        }
                        Err(e) => {
                            let _ = reply.send(Err(e));
                        }
                    },
                    Some(Command::Stop { reply }) => {
                        self.request_stop(StopReason::User, &mut ticker).await;
                        let _ = reply.send(());
                    }
                    Some(Command::Shutdown) | None => break,
                },
                event = next_record_event(&mut record_events) => match event {
                    Some(RecordEvent::Start) => {
                        ticker = Some(self.on_recording_started());
                    }
                    Some(RecordEvent::Finalize(result)) => {
                        record_events = None;
                        ticker = None;
                        self.on_finalized(result);
                    }
                    None => {
                        record_events = None;
                        ticker = None;
                        self.on_stream_closed();
                    }
                },
                update = next_tick(&mut ticker) => {
                    let _ = self.events.send(SessionEvent::TimerTick {
                        text: update.text,
                        elapsed_ms: update.elapsed_ms,
                    });
                    if update.timed_out {
                        tracing::info!(session = ?self.session_id, "maximum recording time reached");
                        let _ = self.events.send(SessionEvent::MaxDurationReached);
                        self.request_stop(StopReason::Timeout, &mut ticker).await;
                    }
                }
            }
        }

        self.pipeline.shutdown().await;
        tracing::info!("session controller shut down");
    }

    /// Gate permissions, then bind the camera
    async fn bind_pipeline(&mut self) -> CaptureResult<()> {
        if !self.gate.all_granted() {
            self.gate.request_missing().await;
        }

        // Microphone denial does not block the camera; recordings started
        // without it come out video-only.
        let blocked: Vec<Capability> = self
            .gate
            .missing()
            .into_iter()
            .filter(|c| *c != Capability::Microphone)
            .collect();
        if !blocked.is_empty() {
            tracing::warn!(?blocked, "permissions denied, camera stays unbound");
            let _ = self.events.send(SessionEvent::PermissionDenied);
            return Err(CaptureError::PermissionDenied);
        }

        match self.pipeline.bind(self.config.camera).await {
            Ok(()) => {
                tracing::info!(camera = ?self.config.camera, "camera pipeline bound");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "camera pipeline bind failed");
                Err(e)
            }
        }
    }

    /// `Idle -> Starting`, handing the output descriptor to the pipeline
    async fn begin_recording(&mut self) -> CaptureResult<mpsc::Receiver<RecordEvent>> {
        if self.phase != SessionPhase::Idle {
            tracing::warn!(phase = ?self.phase, "start rejected, session already active");
            return Err(CaptureError::AlreadyRecording);
        }
        if !self.pipeline.is_bound() {
            return Err(CaptureError::NotReady);
        }

        // Checked at start time, not bind time: a microphone revoked or
        // denied by now silently yields a video-only clip.
        let audio_enabled = self.gate.is_granted(Capability::Microphone);
        let output = OutputDescriptor::new(self.config.output_relative_path());
        let session_id = Uuid::new_v4();

        tracing::info!(
            session = %session_id,
            name = %output.display_name,
            audio_enabled,
            "starting recording"
        );

        let events = self.pipeline.start_recording(output, audio_enabled).await?;
        self.session_id = Some(session_id);
        self.phase = SessionPhase::Starting;
        Ok(events)
    }

    /// `Starting -> Recording`: the pipeline confirmed, the clock starts now
    fn on_recording_started(&mut self) -> ElapsedTicker {
        let started_at = Instant::now();
        self.phase = SessionPhase::Recording;
        tracing::info!(session = ?self.session_id, "recording started");
        let _ = self.events.send(SessionEvent::Started);
        ElapsedTicker::new(
            started_at,
            self.config.tick_interval_ms,
            self.config.max_duration_ms,
        )
    }

    /// `Recording -> Stopping`. No-op in any other phase.
    async fn request_stop(&mut self, reason: StopReason, ticker: &mut Option<ElapsedTicker>) {
        if self.phase != SessionPhase::Recording {
            tracing::debug!(phase = ?self.phase, "stop ignored");
            return;
        }

        // Dropped before the stop request goes out; no further tick can fire.
        *ticker = None;
        self.phase = SessionPhase::Stopping;
        tracing::info!(session = ?self.session_id, ?reason, "stopping recording");
        self.pipeline.stop_recording().await;
    }

    /// Terminal pipeline event; resets to `Idle` either way
    fn on_finalized(&mut self, result: Result<MediaUri, String>) {
        let outcome = match result {
            Ok(uri) => {
                tracing::info!(session = ?self.session_id, uri = %uri, "video capture succeeded");
                let _ = self.events.send(SessionEvent::CaptureSucceeded { uri });
                SessionOutcome::Success
            }
            Err(detail) => {
                tracing::error!(session = ?self.session_id, detail = %detail, "video capture failed");
                let _ = self.events.send(SessionEvent::CaptureFailed { detail });
                SessionOutcome::Error
            }
        };

        self.phase = SessionPhase::Finalized(outcome);
        self.reset();
    }

    /// The pipeline dropped its stream without a finalize; the clip is lost
    fn on_stream_closed(&mut self) {
        if self.phase == SessionPhase::Idle {
            return;
        }
        tracing::error!(session = ?self.session_id, "recording event stream closed without finalize");
        self.on_finalized(Err("recording event stream closed".to_string()));
    }

    fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.session_id = None;
    }
}

async fn next_record_event(rx: &mut Option<mpsc::Receiver<RecordEvent>>) -> Option<RecordEvent> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

async fn next_tick(ticker: &mut Option<ElapsedTicker>) -> TickUpdate {
    match ticker {
        Some(ticker) => ticker.tick().await,
        None => std::future::pending().await,
    }
}
