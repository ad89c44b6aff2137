//! Host-bundle model and storage backend selection shared by runtime composition.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{KeyValueStore, TimerService};

/// Storage backend selected once at startup for draft persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    /// Browser `localStorage` (web builds).
    #[default]
    Browser,
    /// Process-local map; drafts survive window close but not a reload.
    Memory,
    /// Persistence disabled; every read is empty.
    Disabled,
}

impl StorageBackend {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Memory => "memory",
            Self::Disabled => "disabled",
        }
    }
}

/// Runtime-selected host service bundle injected into the window runtime.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `window_runtime`, which keeps the runtime and form crates decoupled from adapter details.
#[derive(Clone)]
pub struct HostServices {
    /// Key/value storage used for form drafts.
    pub kv_store: Rc<dyn KeyValueStore>,
    /// One-shot timers used for debounced auto-save and transient notices.
    pub timers: Rc<dyn TimerService>,
    /// Backend the storage service was built for.
    pub storage_backend: StorageBackend,
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("storage_backend", &self.storage_backend)
            .finish_non_exhaustive()
    }
}

impl HostServices {
    /// Builds a bundle from explicit services.
    pub fn new(
        kv_store: Rc<dyn KeyValueStore>,
        timers: Rc<dyn TimerService>,
        storage_backend: StorageBackend,
    ) -> Self {
        Self {
            kv_store,
            timers,
            storage_backend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_uses_kebab_case_tokens() {
        assert_eq!(
            serde_json::to_string(&StorageBackend::Disabled).expect("serialize"),
            "\"disabled\""
        );
        let parsed: StorageBackend = serde_json::from_str("\"memory\"").expect("parse");
        assert_eq!(parsed, StorageBackend::Memory);
        assert_eq!(StorageBackend::default().as_str(), "browser");
    }
}
