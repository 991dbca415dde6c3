//! clipcap - bounded front-camera clip capture.
//!
//! A capture engine for short selfie video clips with a hard 30-second
//! cap. The session controller owns the start/stop state machine, the
//! elapsed-time ticker, and the enforced cutoff; cameras, encoding, and
//! storage live behind the [`pipeline::CameraPipeline`] seam, and UI
//! hosts observe the session through broadcast events.

pub mod error;
pub mod output;
pub mod permissions;
pub mod pipeline;
pub mod session;
pub mod shell;

pub use error::{CaptureError, CaptureResult};
pub use output::{MediaUri, OutputDescriptor};
pub use permissions::{ApiLevel, Capability, PermissionBroker, PermissionGate};
pub use pipeline::{CameraPipeline, CameraSelector, RecordEvent};
pub use session::{SessionConfig, SessionController, SessionEvent, SessionHandle};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for hosts that have no subscriber of their own
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clipcap=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
