//! Output descriptors
//!
//! Metadata identifying where and how a finished clip is persisted. The
//! descriptor is generated once at recording start and handed by value to
//! the camera pipeline, which resolves it to an opaque media URI on
//! finalize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock format used for display names.
///
/// Millisecond precision makes names unique and lexicographically sortable
/// across sessions on the same device.
pub const FILENAME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S-%3f";

/// MIME type of finished clips
pub const CLIP_MIME_TYPE: &str = "video/mp4";

/// Opaque URI returned by the storage layer for a finished clip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaUri(pub String);

impl std::fmt::Display for MediaUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Destination metadata for one recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDescriptor {
    /// Timestamp-formatted display name
    pub display_name: String,

    /// Always `video/mp4`
    pub mime_type: String,

    /// Relative path under the platform media root, when scoped storage
    /// is available
    pub relative_path: Option<String>,
}

impl OutputDescriptor {
    /// Create a descriptor named after the current wall-clock time
    pub fn new(relative_path: Option<String>) -> Self {
        Self::at(Utc::now(), relative_path)
    }

    /// Create a descriptor named after an explicit timestamp
    pub fn at(timestamp: DateTime<Utc>, relative_path: Option<String>) -> Self {
        Self {
            display_name: timestamp.format(FILENAME_FORMAT).to_string(),
            mime_type: CLIP_MIME_TYPE.to_string(),
            relative_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_name_format() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap()
            + chrono::Duration::milliseconds(42);
        let desc = OutputDescriptor::at(ts, None);
        assert_eq!(desc.display_name, "2024-03-07-09-05-01-042");
        assert_eq!(desc.mime_type, "video/mp4");
        assert!(desc.relative_path.is_none());
    }

    #[test]
    fn test_names_unique_per_millisecond() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        let a = OutputDescriptor::at(ts, None);
        let b = OutputDescriptor::at(ts + chrono::Duration::milliseconds(1), None);
        assert_ne!(a.display_name, b.display_name);
    }

    #[test]
    fn test_names_sort_chronologically() {
        let base = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let earlier = OutputDescriptor::at(base, None);
        // Rolls over into the next year
        let later = OutputDescriptor::at(base + chrono::Duration::milliseconds(1500), None);
        assert!(earlier.display_name < later.display_name);
    }

    #[test]
    fn test_relative_path_carried() {
        let desc = OutputDescriptor::new(Some("Movies/ClipCap".to_string()));
        assert_eq!(desc.relative_path.as_deref(), Some("Movies/ClipCap"));
    }
}
