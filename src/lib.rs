//! Domain model for merch inventory label printing.
//!
//! This crate owns the engine's inputs: the read-only inventory item
//! contract, the attribute catalog used to resolve coded fields into human
//! text, and the dialog-session settings with their reducer-style update
//! path. Layout derivation lives in `label-press-render`; document output
//! lives in `label-press-render-html`.

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod catalog;
mod item;
mod params;
mod settings;

pub use catalog::{AttributeCatalog, AttributeType, AttributeValue};
pub use item::InventoryItem;
pub use params::{resolve_params, visible_count, ResolvedParam, ResolvedParams};
pub use settings::{
    Alignment, ContentField, LabelContentSettings, LabelDimensions, LabelUiState, LayoutStyle,
    PaperSize, SettingsAction, SettingsState, MAX_CUSTOM_MM, MIN_CUSTOM_MM,
};
