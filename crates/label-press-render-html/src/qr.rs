use core::fmt;

use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

/// QR encoding failure. Never fatal for label rendering: callers skip the
/// code and keep the rest of the label.
#[derive(Debug)]
pub struct QrRenderError(qrcode::types::QrError);

impl fmt::Display for QrRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "qr encode failed: {:?}", self.0)
    }
}

impl std::error::Error for QrRenderError {}

/// Render `payload` as an inline SVG QR code with side length `side_px`.
///
/// Error correction level M, black on white, no quiet zone; the label's
/// own padding provides the margin.
pub fn qr_svg(payload: &str, side_px: u32) -> Result<String, QrRenderError> {
    let code = QrCode::with_error_correction_level(payload, EcLevel::M).map_err(QrRenderError)?;
    let rendered = code
        .render::<svg::Color<'_>>()
        .min_dimensions(side_px, side_px)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .quiet_zone(false)
        .build();
    // The renderer prefixes an XML declaration; inline SVG must start at the
    // root element.
    let start = rendered.find("<svg").unwrap_or(0);
    Ok(rendered[start..].to_owned())
}
