//! Recording session module
//!
//! The core of the capture engine:
//! - session phase state machine and configuration
//! - ElapsedTicker driving timer updates and the duration cutoff
//! - SessionController orchestrating the pipeline over a command loop

pub mod controller;
pub mod events;
pub mod state;
pub mod ticker;

pub use controller::{SessionController, SessionHandle};
pub use events::SessionEvent;
pub use state::{SessionConfig, SessionOutcome, SessionPhase, StopReason};
pub use ticker::{format_elapsed, ElapsedTicker};
