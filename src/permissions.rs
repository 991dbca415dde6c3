//! Permission gating
//!
//! Determines whether the capabilities the capture engine needs are granted
//! and requests the missing ones through a platform broker. The gate itself
//! is a pure predicate over a fixed requirement set computed once at
//! construction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Highest platform API level that still requires a broad storage-write
/// grant. Newer levels use scoped storage and need no explicit capability.
pub const LEGACY_STORAGE_MAX_API: u32 = 28;

/// Platform API level of the device the engine runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
    /// Whether this platform resolves relative paths via scoped storage
    pub fn supports_scoped_storage(self) -> bool {
        self.0 > LEGACY_STORAGE_MAX_API
    }
}

/// A capability the engine may need granted at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Camera,
    Microphone,
    StorageWrite,
}

/// Platform permission broker
///
/// `check` reflects the current grant state; `request` raises the platform
/// permission dialog for the given capabilities and reports the outcome.
#[async_trait]
pub trait PermissionBroker: Send + Sync {
    fn check(&self, capability: Capability) -> bool;

    async fn request(&self, capabilities: &[Capability]) -> HashMap<Capability, bool>;
}

/// Gate over the fixed set of required capabilities
pub struct PermissionGate {
    required: Vec<Capability>,
    broker: Arc<dyn PermissionBroker>,
}

impl PermissionGate {
    pub fn new(broker: Arc<dyn PermissionBroker>, api_level: ApiLevel) -> Self {
        Self {
            required: required_capabilities(api_level),
            broker,
        }
    }

    /// The capabilities this gate requires
    pub fn required(&self) -> &[Capability] {
        &self.required
    }

    /// Whether every required capability is currently granted
    pub fn all_granted(&self) -> bool {
        self.required.iter().all(|c| self.broker.check(*c))
    }

    /// Required capabilities that are not currently granted
    pub fn missing(&self) -> Vec<Capability> {
        self.required
            .iter()
            .copied()
            .filter(|c| !self.broker.check(*c))
            .collect()
    }

    /// Current grant state of a single capability
    ///
    /// Used for the microphone check at recording start, which is
    /// deliberately later than the gate check at bind time.
    pub fn is_granted(&self, capability: Capability) -> bool {
        self.broker.check(capability)
    }

    /// Request any missing capabilities from the broker
    ///
    /// Returns true once everything required is granted.
    pub async fn request_missing(&self) -> bool {
        let missing = self.missing();
        if missing.is_empty() {
            return true;
        }

        tracing::info!(?missing, "requesting permissions");
        let results = self.broker.request(&missing).await;

        let granted = missing
            .iter()
            .all(|c| results.get(c).copied().unwrap_or(false));
        if !granted {
            tracing::warn!("permission request denied");
        }
        granted
    }
}

/// Capabilities required on a given platform version
pub fn required_capabilities(api_level: ApiLevel) -> Vec<Capability> {
    let mut required = vec![Capability::Camera, Capability::Microphone];
    if !api_level.supports_scoped_storage() {
        required.push(Capability::StorageWrite);
    }
    required
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Broker with a fixed grant table; records what was requested
    struct StaticBroker {
        granted: Vec<Capability>,
        grant_on_request: bool,
        requested: Mutex<Vec<Capability>>,
    }

    impl StaticBroker {
        fn new(granted: Vec<Capability>, grant_on_request: bool) -> Arc<Self> {
            Arc::new(Self {
                granted,
                grant_on_request,
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PermissionBroker for StaticBroker {
        fn check(&self, capability: Capability) -> bool {
            self.granted.contains(&capability)
                || (self.grant_on_request && self.requested.lock().contains(&capability))
        }

        async fn request(&self, capabilities: &[Capability]) -> HashMap<Capability, bool> {
            self.requested.lock().extend_from_slice(capabilities);
            capabilities
                .iter()
                .map(|c| (*c, self.grant_on_request))
                .collect()
        }
    }

    #[test]
    fn test_legacy_platform_requires_storage() {
        let required = required_capabilities(ApiLevel(28));
        assert!(required.contains(&Capability::StorageWrite));

        let required = required_capabilities(ApiLevel(29));
        assert!(!required.contains(&Capability::StorageWrite));
        assert_eq!(required, vec![Capability::Camera, Capability::Microphone]);
    }

    #[tokio::test]
    async fn test_missing_and_request() {
        let broker = StaticBroker::new(vec![Capability::Camera], true);
        let gate = PermissionGate::new(broker.clone(), ApiLevel(33));

        assert!(!gate.all_granted());
        assert_eq!(gate.missing(), vec![Capability::Microphone]);

        assert!(gate.request_missing().await);
        assert!(gate.all_granted());
        assert_eq!(*broker.requested.lock(), vec![Capability::Microphone]);
    }

    #[tokio::test]
    async fn test_request_denied() {
        let broker = StaticBroker::new(vec![], false);
        let gate = PermissionGate::new(broker, ApiLevel(33));

        assert!(!gate.request_missing().await);
        assert!(!gate.all_granted());
    }

    #[tokio::test]
    async fn test_request_skipped_when_all_granted() {
        let broker = StaticBroker::new(vec![Capability::Camera, Capability::Microphone], false);
        let gate = PermissionGate::new(broker.clone(), ApiLevel(33));

        assert!(gate.request_missing().await);
        assert!(broker.requested.lock().is_empty());
    }
}
