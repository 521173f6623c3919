use crate::geometry::SizeMm;

/// Outer padding reserved around the preview inside its container.
pub const PREVIEW_PADDING_PX: f64 = 120.0;

/// Scale reported before the container has ever been measured.
pub const FALLBACK_PREVIEW_SCALE: f64 = 0.5;

/// Tracks the preview container's size and fits the label into it.
///
/// Resize notifications arrive in bursts; `observe` only records the latest
/// pending size and `commit` applies it, so any number of observations
/// between frames collapses into a single recompute. Single-owner, no
/// threads involved.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreviewViewport {
    current: Option<(f64, f64)>,
    pending: Option<(f64, f64)>,
}

impl PreviewViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a container-size notification. Takes effect at `commit`.
    pub fn observe(&mut self, width: f64, height: f64) {
        self.pending = Some((width, height));
    }

    /// Apply the latest pending observation. Returns true when the committed
    /// size changed and the preview scale should be re-derived.
    pub fn commit(&mut self) -> bool {
        match self.pending.take() {
            Some(size) if self.current != Some(size) => {
                self.current = Some(size);
                true
            }
            _ => false,
        }
    }

    /// Committed container size, if any.
    pub fn container_size(&self) -> Option<(f64, f64)> {
        self.current
    }

    /// Fit `label` (oriented, in mm) into the container, preserving aspect
    /// ratio: `min(availW / pxW, availH / pxH)` with the fixed padding
    /// subtracted. Falls back to [`FALLBACK_PREVIEW_SCALE`] before the first
    /// commit and floors at zero for degenerate containers.
    pub fn preview_scale(&self, label: SizeMm) -> f64 {
        let Some((cw, ch)) = self.current else {
            return FALLBACK_PREVIEW_SCALE;
        };
        if cw <= 0.0 || ch <= 0.0 {
            return FALLBACK_PREVIEW_SCALE;
        }
        let (px_w, px_h) = label.to_px();
        if px_w <= 0.0 || px_h <= 0.0 {
            return FALLBACK_PREVIEW_SCALE;
        }
        let avail_w = cw - PREVIEW_PADDING_PX;
        let avail_h = ch - PREVIEW_PADDING_PX;
        (avail_w / px_w).min(avail_h / px_h).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmeasured_container_reports_fallback() {
        let viewport = PreviewViewport::new();
        assert_eq!(
            viewport.preview_scale(SizeMm::new(58.0, 40.0)),
            FALLBACK_PREVIEW_SCALE
        );
    }

    #[test]
    fn observations_coalesce_until_commit() {
        let mut viewport = PreviewViewport::new();
        viewport.observe(500.0, 400.0);
        viewport.observe(800.0, 600.0);
        assert!(viewport.commit());
        assert_eq!(viewport.container_size(), Some((800.0, 600.0)));
        // Nothing pending: commit is a no-op.
        assert!(!viewport.commit());
        // Same size again: no recompute signalled.
        viewport.observe(800.0, 600.0);
        assert!(!viewport.commit());
    }

    #[test]
    fn scale_fits_both_axes() {
        let mut viewport = PreviewViewport::new();
        viewport.observe(800.0, 600.0);
        viewport.commit();
        let label = SizeMm::new(58.0, 40.0);
        let (px_w, px_h) = label.to_px();
        let expected = ((800.0 - PREVIEW_PADDING_PX) / px_w).min((600.0 - PREVIEW_PADDING_PX) / px_h);
        assert!((viewport.preview_scale(label) - expected).abs() < 1e-12);
    }

    #[test]
    fn orientation_change_recomputes_scale() {
        let mut viewport = PreviewViewport::new();
        viewport.observe(1000.0, 400.0);
        viewport.commit();
        let portrait = SizeMm::new(58.0, 40.0);
        let landscape = portrait.oriented(true);
        let a = viewport.preview_scale(portrait);
        let b = viewport.preview_scale(landscape);
        assert!(a > b, "wide container favours the wide orientation");
    }

    #[test]
    fn tiny_containers_floor_at_zero() {
        let mut viewport = PreviewViewport::new();
        viewport.observe(60.0, 60.0);
        viewport.commit();
        assert_eq!(viewport.preview_scale(SizeMm::new(58.0, 40.0)), 0.0);
    }
}
