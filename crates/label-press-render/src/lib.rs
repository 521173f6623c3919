//! Layout engine for `label-press`.
//!
//! Pure derivation: an inventory item, its attribute catalog and the dialog
//! settings go in; a self-contained [`LabelPlan`] comes out. Backends render
//! plans without ever reaching back into the inputs.

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

mod density;
mod geometry;
mod plan;
mod viewport;

pub use density::{
    content_density, qr_density_factor, DensityInputs, DensityWeights, FontScales, ScaleTierTable,
};
pub use geometry::{
    base_scale, format_mm, oriented_size, padding_mm, page_size_directive, size_dimensions, SizeMm,
    MM_TO_PX,
};
pub use plan::{LabelJob, LabelPlan, LayoutEngine, LayoutOptions, PriceLine};
pub use viewport::{PreviewViewport, FALLBACK_PREVIEW_SCALE, PREVIEW_PADDING_PX};
