//! Error types and handling
//!
//! Common error types used across the capture engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capture-engine error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("required permission denied")]
    PermissionDenied,

    #[error("camera pipeline bind failed: {0}")]
    PipelineBind(String),

    #[error("recording finalize failed: {0}")]
    RecordingFinalize(String),

    #[error("a recording session is already active")]
    AlreadyRecording,

    #[error("camera pipeline is not bound")]
    NotReady,

    #[error("session controller is no longer running")]
    ControllerClosed,
}

/// Error response for UI collaborators
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<CaptureError> for ErrorResponse {
    fn from(error: CaptureError) -> Self {
        let code = match &error {
            CaptureError::PermissionDenied => "PERMISSION_DENIED",
            CaptureError::PipelineBind(_) => "PIPELINE_BIND_FAILED",
            CaptureError::RecordingFinalize(_) => "FINALIZE_FAILED",
            CaptureError::AlreadyRecording => "ALREADY_RECORDING",
            CaptureError::NotReady => "NOT_READY",
            CaptureError::ControllerClosed => "CONTROLLER_CLOSED",
        };

        ErrorResponse {
            code: code.to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type alias using CaptureError
pub type CaptureResult<T> = Result<T, CaptureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_codes() {
        let resp: ErrorResponse = CaptureError::NotReady.into();
        assert_eq!(resp.code, "NOT_READY");
        assert_eq!(resp.message, "camera pipeline is not bound");

        let resp: ErrorResponse = CaptureError::PipelineBind("no camera".into()).into();
        assert_eq!(resp.code, "PIPELINE_BIND_FAILED");
        assert!(resp.message.contains("no camera"));
    }
}
