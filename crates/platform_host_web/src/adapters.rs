use std::rc::Rc;

use platform_host::{
    HostServices, KeyValueStore, KeyValueStoreFuture, MemoryKeyValueStore, NoopKeyValueStore,
    StorageBackend,
};

use crate::{BrowserTimerService, WebLocalStore};

/// Adapter enum that erases the concrete key/value backend behind [`KeyValueStore`].
#[derive(Debug, Clone)]
pub enum KeyValueStoreAdapter {
    /// Browser `localStorage` persistence.
    Browser(WebLocalStore),
    /// Process-local persistence.
    Memory(MemoryKeyValueStore),
    /// Persistence switched off.
    Disabled(NoopKeyValueStore),
}

impl KeyValueStore for KeyValueStoreAdapter {
    fn get_item<'a>(
        &'a self,
        key: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.get_item(key),
            Self::Memory(store) => store.get_item(key),
            Self::Disabled(store) => store.get_item(key),
        }
    }

    fn set_item<'a>(
        &'a self,
        key: &'a str,
        value: &'a str,
    ) -> KeyValueStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.set_item(key, value),
            Self::Memory(store) => store.set_item(key, value),
            Self::Disabled(store) => store.set_item(key, value),
        }
    }

    fn remove_item<'a>(&'a self, key: &'a str) -> KeyValueStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.remove_item(key),
            Self::Memory(store) => store.remove_item(key),
            Self::Disabled(store) => store.remove_item(key),
        }
    }
}

/// Builds the key/value adapter for an explicitly configured backend.
pub fn key_value_store(backend: StorageBackend) -> KeyValueStoreAdapter {
    match backend {
        StorageBackend::Browser => KeyValueStoreAdapter::Browser(WebLocalStore),
        StorageBackend::Memory => KeyValueStoreAdapter::Memory(MemoryKeyValueStore::default()),
        StorageBackend::Disabled => KeyValueStoreAdapter::Disabled(NoopKeyValueStore),
    }
}

/// Builds the browser timer service.
pub fn timer_service() -> BrowserTimerService {
    BrowserTimerService::default()
}

/// Assembles the host bundle injected into the window runtime.
pub fn build_host_services(backend: StorageBackend) -> HostServices {
    HostServices::new(
        Rc::new(key_value_store(backend)),
        Rc::new(timer_service()),
        backend,
    )
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_backend_round_trips_through_adapter() {
        let store = key_value_store(StorageBackend::Memory);
        assert!(matches!(store, KeyValueStoreAdapter::Memory(_)));
        block_on(store.set_item("k", "v")).expect("set");
        assert_eq!(
            block_on(store.get_item("k")).expect("get"),
            Some("v".to_string())
        );
        block_on(store.remove_item("k")).expect("remove");
        assert_eq!(block_on(store.get_item("k")).expect("get"), None);
    }

    #[test]
    fn disabled_backend_drops_writes() {
        let store = key_value_store(StorageBackend::Disabled);
        block_on(store.set_item("k", "v")).expect("set");
        assert_eq!(block_on(store.get_item("k")).expect("get"), None);
    }

    #[test]
    fn host_bundle_records_selected_backend() {
        let services = build_host_services(StorageBackend::Memory);
        assert_eq!(services.storage_backend, StorageBackend::Memory);
        block_on(services.kv_store.set_item("draft", "{}")).expect("set");
        assert_eq!(
            block_on(services.kv_store.get_item("draft")).expect("get"),
            Some("{}".to_string())
        );
    }
}
