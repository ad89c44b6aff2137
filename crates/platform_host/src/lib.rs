//! Typed host-domain contracts used across the window runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the key/value storage
//! port, the one-shot timer port, time helpers, and the host service bundle, while concrete
//! browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod storage;
pub mod time;
pub mod timer;

pub use host::{HostServices, StorageBackend};
pub use storage::kv::{KeyValueStore, KeyValueStoreFuture, MemoryKeyValueStore, NoopKeyValueStore};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
pub use timer::{ManualTimerService, TimerHandle, TimerService, TimerTask, TimerTaskFuture};
