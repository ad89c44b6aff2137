//! Local draft persistence for in-progress form windows.
//!
//! A draft is a JSON snapshot of a form keyed by the id of the window that edits it. Drafts are
//! written through the [`platform_host::KeyValueStore`] port, so the same store runs against
//! browser `localStorage`, an in-memory map, or nothing at all.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use form_drafts::{DraftKeys, DraftStore};
//! use platform_host::MemoryKeyValueStore;
//!
//! let store = DraftStore::new(Rc::new(MemoryKeyValueStore::default()), DraftKeys::default());
//! futures::executor::block_on(async {
//!     store.save_draft("customer-1", &serde_json::json!({"name": "Ann"})).await;
//!     assert_eq!(store.get_all_draft_ids().await, vec!["customer-1".to_string()]);
//! });
//! ```

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod record;
mod store;

pub use record::{DraftKeys, DraftRecord, DEFAULT_DRAFT_INDEX_KEY, DEFAULT_DRAFT_KEY_PREFIX};
pub use store::DraftStore;
