//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring layer for key/value storage and timers. The
//! storage backend is chosen from configuration through [`adapters::key_value_store`]; call
//! sites only ever see the [`platform_host::KeyValueStore`] trait.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Configuration-driven adapter factories for runtime wiring.
pub mod adapters;
pub mod storage;
pub mod timer;

pub use adapters::{build_host_services, key_value_store, timer_service, KeyValueStoreAdapter};
pub use storage::local_kv::WebLocalStore;
pub use timer::BrowserTimerService;
