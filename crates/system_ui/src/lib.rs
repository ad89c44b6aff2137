//! Shared UI primitive library for the window manager and CRM forms.
//!
//! The crate owns reusable Leptos primitives and the stable `data-ui-*` DOM contract consumed
//! by the stylesheet. Window content should compose these primitives instead of emitting ad hoc
//! control markup.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod primitives;

pub use primitives::{
    Button, ButtonSize, ButtonVariant, Cluster, FieldGroup, FieldSet, FieldVariant, LayoutGap,
    Modal, Notice, SelectField, Stack, TextArea, TextField, TextTone, TrayChip, TrayList,
    WindowBody, WindowControlButton, WindowControls, WindowFrame, WindowLayer, WindowTitle,
    WindowTitleBar,
};

/// Convenience imports for window content crates.
pub mod prelude {
    pub use crate::{
        Button, ButtonSize, ButtonVariant, Cluster, FieldGroup, FieldSet, FieldVariant, LayoutGap,
        Modal, Notice, SelectField, Stack, TextArea, TextField, TextTone,
    };
}
