//! Multi-window manager for editable CRM forms.
//!
//! [`WindowRegistry`] owns window records and their `Normal`/`Minimized`/`Maximized` state
//! machine. The Leptos layer ([`WindowManagerProvider`], [`WindowManagerSurface`]) renders
//! windows as overlays with a minimized tray and hands form content the shared draft store and
//! timer service.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod components;
pub mod config;
mod content;
pub mod ids;
pub mod layout;
pub mod model;
pub mod reducer;
pub mod registry;
pub mod runtime_context;

pub use components::WindowManagerSurface;
pub use config::WindowManagerConfig;
pub use content::WindowContent;
pub use ids::generate_window_id;
pub use layout::{window_frame_rect, FrameRect, FrameSizing, Viewport};
pub use model::*;
pub use reducer::{reduce_windows, ReducerError, RegistryEffect, WindowAction};
pub use registry::{RegistryListener, SubscriptionId, WindowRegistry};
pub use runtime_context::{use_window_manager, WindowManagerContext, WindowManagerProvider};
