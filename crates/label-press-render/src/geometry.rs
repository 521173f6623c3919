use label_press::{LabelDimensions, PaperSize};
use serde::{Deserialize, Serialize};

/// CSS reference pixel ratio used for preview sizing.
pub const MM_TO_PX: f64 = 3.78;

/// Physical size in millimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeMm {
    pub width: f64,
    pub height: f64,
}

impl SizeMm {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Effective size after applying orientation. Landscape swaps the axes;
    /// the stored values are untouched, so the swap is trivially reversible.
    pub fn oriented(self, landscape: bool) -> Self {
        if landscape {
            Self {
                width: self.height,
                height: self.width,
            }
        } else {
            self
        }
    }

    /// Preview pixel size at [`MM_TO_PX`].
    pub fn to_px(self) -> (f64, f64) {
        (self.width * MM_TO_PX, self.height * MM_TO_PX)
    }
}

/// Physical dimensions for a paper selection. Deterministic for every fixed
/// format; `Custom` reads the user-entered pair.
pub fn size_dimensions(dims: &LabelDimensions) -> SizeMm {
    match dims.paper_size {
        PaperSize::S58x40 => SizeMm::new(58.0, 40.0),
        PaperSize::S58x60 => SizeMm::new(58.0, 60.0),
        PaperSize::S75x120 => SizeMm::new(75.0, 120.0),
        PaperSize::A4 => SizeMm::new(210.0, 297.0),
        PaperSize::Custom => SizeMm::new(dims.custom_width_mm, dims.custom_height_mm),
    }
}

/// Effective (oriented) size for preview and print.
pub fn oriented_size(dims: &LabelDimensions) -> SizeMm {
    size_dimensions(dims).oriented(dims.is_landscape)
}

/// Inner padding of the label container.
pub fn padding_mm(paper: PaperSize) -> f64 {
    match paper {
        PaperSize::A4 => 12.0,
        PaperSize::S75x120 => 6.0,
        _ => 4.0,
    }
}

/// Baseline font multiplier per paper format.
pub fn base_scale(paper: PaperSize) -> f64 {
    match paper {
        PaperSize::S58x40 => 1.0,
        PaperSize::S58x60 => 1.4,
        PaperSize::S75x120 => 2.4,
        PaperSize::A4 => 5.5,
        PaperSize::Custom => 1.0,
    }
}

/// Millimeter value formatted for CSS, dropping a redundant fraction.
pub fn format_mm(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// `@page size` directive for the chosen format and orientation.
///
/// A4 keeps its named form (`A4` / `A4 landscape`); other formats emit the
/// oriented millimeter pair.
pub fn page_size_directive(dims: &LabelDimensions) -> String {
    if dims.paper_size == PaperSize::A4 {
        return if dims.is_landscape {
            "A4 landscape".to_owned()
        } else {
            "A4".to_owned()
        };
    }
    let size = oriented_size(dims);
    format!("{}mm {}mm", format_mm(size.width), format_mm(size.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(paper: PaperSize) -> LabelDimensions {
        LabelDimensions {
            paper_size: paper,
            ..LabelDimensions::default()
        }
    }

    #[test]
    fn fixed_formats_are_deterministic() {
        assert_eq!(size_dimensions(&dims(PaperSize::S58x40)), SizeMm::new(58.0, 40.0));
        assert_eq!(size_dimensions(&dims(PaperSize::S58x60)), SizeMm::new(58.0, 60.0));
        assert_eq!(size_dimensions(&dims(PaperSize::S75x120)), SizeMm::new(75.0, 120.0));
        assert_eq!(size_dimensions(&dims(PaperSize::A4)), SizeMm::new(210.0, 297.0));
    }

    #[test]
    fn custom_reads_stored_pair() {
        let d = LabelDimensions {
            paper_size: PaperSize::Custom,
            custom_width_mm: 90.0,
            custom_height_mm: 45.0,
            is_landscape: false,
        };
        assert_eq!(size_dimensions(&d), SizeMm::new(90.0, 45.0));
    }

    #[test]
    fn landscape_swap_is_reversible() {
        let portrait = SizeMm::new(58.0, 40.0);
        let landscape = portrait.oriented(true);
        assert_eq!(landscape, SizeMm::new(40.0, 58.0));
        assert_eq!(landscape.oriented(true), portrait);
        assert_eq!(portrait.oriented(false), portrait);
    }

    #[test]
    fn page_directive_swaps_for_landscape() {
        let mut d = dims(PaperSize::S58x40);
        assert_eq!(page_size_directive(&d), "58mm 40mm");
        d.is_landscape = true;
        assert_eq!(page_size_directive(&d), "40mm 58mm");

        let mut a4 = dims(PaperSize::A4);
        assert_eq!(page_size_directive(&a4), "A4");
        a4.is_landscape = true;
        assert_eq!(page_size_directive(&a4), "A4 landscape");
    }

    #[test]
    fn format_mm_drops_whole_fractions() {
        assert_eq!(format_mm(58.0), "58");
        assert_eq!(format_mm(58.5), "58.5");
    }
}
