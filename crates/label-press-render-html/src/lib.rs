//! HTML output backend for `label-press-render`.
//!
//! Turns a [`LabelPlan`](label_press_render::LabelPlan) into on-screen
//! preview markup and a print-ready document sized to the chosen physical
//! format, tiled to the requested quantity.

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

mod markup;
mod print;
mod qr;

pub use markup::{build_preview_document, label_css, preview_container_style, render_label_body};
pub use print::{
    build_print_document, print_labels, BlockedPrintTarget, FilePrintTarget, PrintError,
    PrintTarget,
};
pub use qr::{qr_svg, QrRenderError};
