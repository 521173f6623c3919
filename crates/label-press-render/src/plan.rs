use label_press::{
    resolve_params, visible_count, AttributeCatalog, InventoryItem, LabelDimensions, LabelUiState,
    LayoutStyle, PaperSize, ResolvedParams, SettingsState,
};
use serde::{Deserialize, Serialize};

use crate::density::{
    content_density, qr_density_factor, DensityInputs, DensityWeights, FontScales, ScaleTierTable,
};
use crate::geometry::{base_scale, oriented_size, padding_mm, size_dimensions, SizeMm};

/// Tuning surface of the layout engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub weights: DensityWeights,
    pub tiers: ScaleTierTable,
    /// Currency symbol appended to the price line. Supplied by the shell's
    /// branding; rouble by default.
    pub currency_symbol: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            weights: DensityWeights::default(),
            tiers: ScaleTierTable::default(),
            currency_symbol: "₽".to_owned(),
        }
    }
}

/// Inputs for one label derivation. All references are read-only; the engine
/// never mutates its inputs.
#[derive(Clone, Copy, Debug)]
pub struct LabelJob<'a> {
    pub item: &'a InventoryItem,
    pub catalog: &'a AttributeCatalog,
    pub settings: &'a SettingsState,
}

/// Price line, already formatted for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceLine {
    /// Grouped amount, e.g. `12 990`.
    pub amount: String,
    pub currency: String,
}

/// Self-contained render plan for one label.
///
/// Everything a backend needs is resolved here: geometry, typography scales,
/// visibility decisions, and display-ready text. Backends never reach back
/// into the item or settings.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlan {
    /// The paper selection the plan was derived from.
    pub dimensions: LabelDimensions,
    /// Physical size before orientation.
    pub size_mm: SizeMm,
    /// Effective size after orientation.
    pub oriented_mm: SizeMm,
    pub padding_mm: f64,
    /// Baseline font multiplier for the paper format.
    pub base_scale: f64,
    /// Content-density scalar the tier selection used.
    pub density: f64,
    /// Final font scales, dampening included.
    pub scales: FontScales,
    pub qr_factor: f64,
    /// QR side length in preview pixels; zero when no QR is shown.
    pub qr_px: u32,
    pub two_columns: bool,
    pub ui: LabelUiState,
    /// Every resolved parameter, visibility flags included.
    pub params: ResolvedParams,
    /// Count of parameters that are actually shown.
    pub visible_params: usize,
    /// Category caption, already gated by its toggle and layout style.
    pub category: Option<String>,
    pub name: String,
    /// Article text, gated by its toggle and layout style.
    pub article: Option<String>,
    /// Resolved size label for the minimal layout's badge.
    pub size_badge: Option<String>,
    /// `name percent%, …` line, gated by the composition toggle.
    pub composition_line: Option<String>,
    pub custom_text: Option<String>,
    pub price: Option<PriceLine>,
    /// QR payload when the barcode is shown (always shown on minimal).
    pub qr_payload: Option<String>,
}

/// Pure, synchronous layout derivation.
///
/// A plan is cheap to compute and idempotent for identical inputs, so
/// callers simply re-derive whenever settings change.
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
    opts: LayoutOptions,
}

impl LayoutEngine {
    pub fn new(opts: LayoutOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.opts
    }

    /// Derive the render plan for one label.
    pub fn plan(&self, job: &LabelJob<'_>) -> LabelPlan {
        let item = job.item;
        let settings = job.settings;
        let content = &settings.content;
        let dims = settings.dimensions;
        let style = settings.ui.layout_style;

        let params = resolve_params(item, job.catalog, settings);
        let visible = visible_count(&params);
        let has_composition = content.show_composition && item.has_composition();

        let density = content_density(
            &DensityInputs {
                visible_params: visible,
                has_composition,
                name_chars: item.name.chars().count(),
                has_custom_text: !content.custom_text.is_empty(),
                show_article: content.show_article,
                show_category: content.show_category,
            },
            &self.opts.weights,
        );
        let scales = self
            .opts
            .tiers
            .final_scales(density, dims.paper_size.is_vertical_format());
        let qr_factor = qr_density_factor(density);

        let size_mm = size_dimensions(&dims);
        let oriented_mm = oriented_size(&dims);

        let two_columns = (size_mm.width >= 120.0 && visible >= 4)
            || style == LayoutStyle::SideBySide
            || (oriented_mm.width > oriented_mm.height && visible >= 3);

        let show_qr = content.show_barcode || style == LayoutStyle::Minimal;
        let qr_px = if show_qr {
            (qr_base_px(&dims, style, size_mm, oriented_mm) * qr_factor).round() as u32
        } else {
            0
        };

        log::debug!(
            "label plan: density={density:.2} name_scale={:.2} qr_px={qr_px} two_columns={two_columns}",
            scales.name
        );

        let minimal = style == LayoutStyle::Minimal;
        let category = if content.show_category && !minimal {
            item.category.clone().filter(|c| !c.is_empty())
        } else {
            None
        };
        let article = if content.show_article && !minimal {
            item.sku.clone().filter(|s| !s.is_empty())
        } else {
            None
        };
        let size_badge = if minimal {
            item.size_code
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|code| job.catalog.value_label("size", code))
                .filter(|v| !v.is_empty())
        } else {
            None
        };
        let composition_line = if has_composition {
            Some(composition_line(item))
        } else {
            None
        };
        let custom_text = if content.custom_text.is_empty() {
            None
        } else {
            Some(content.custom_text.clone())
        };
        let price = if content.show_price && !minimal {
            item.selling_price.map(|value| PriceLine {
                amount: format_grouped(value),
                currency: self.opts.currency_symbol.clone(),
            })
        } else {
            None
        };
        let qr_payload = show_qr.then(|| item.qr_payload().to_owned());

        LabelPlan {
            dimensions: dims,
            size_mm,
            oriented_mm,
            padding_mm: padding_mm(dims.paper_size),
            base_scale: base_scale(dims.paper_size),
            density,
            scales,
            qr_factor,
            qr_px,
            two_columns,
            ui: settings.ui,
            params,
            visible_params: visible,
            category,
            name: item.name.clone(),
            article,
            size_badge,
            composition_line,
            custom_text,
            price,
            qr_payload,
        }
    }
}

/// Base QR side length in preview pixels, before the density factor.
///
/// The table mirrors shipped label output: minimal layouts size the code off
/// the vertical extent, everything else off the paper format and layout
/// style.
fn qr_base_px(
    dims: &LabelDimensions,
    style: LayoutStyle,
    size_mm: SizeMm,
    oriented_mm: SizeMm,
) -> f64 {
    if style == LayoutStyle::Minimal {
        let tall_side = if dims.is_landscape {
            size_mm.width
        } else {
            size_mm.height
        };
        return if tall_side >= 110.0 {
            160.0
        } else if tall_side >= 80.0 {
            120.0
        } else if tall_side >= 55.0 {
            90.0
        } else {
            75.0
        };
    }

    let portraitish = oriented_mm.height > oriented_mm.width;
    match dims.paper_size {
        PaperSize::A4 => 160.0,
        PaperSize::S75x120 => 85.0,
        PaperSize::S58x60 => 40.0,
        PaperSize::S58x40 => {
            let compact = matches!(style, LayoutStyle::SideBySide | LayoutStyle::Inline);
            match (compact, portraitish) {
                (true, true) => 38.0,
                (true, false) => 22.0,
                (false, true) => 45.0,
                (false, false) => 28.0,
            }
        }
        PaperSize::Custom => {
            if portraitish {
                45.0
            } else {
                32.0
            }
        }
    }
}

/// `name percent%, …` in map order.
fn composition_line(item: &InventoryItem) -> String {
    let mut line = String::new();
    for (name, percent) in &item.material_composition {
        if !line.is_empty() {
            line.push_str(", ");
        }
        line.push_str(name);
        line.push(' ');
        line.push_str(&format_percent(*percent));
        line.push('%');
    }
    line
}

fn format_percent(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Group an amount with non-breaking thin spaces and a comma decimal,
/// trimming trailing zeroes: `1234567.5` → `1 234 567,5`.
fn format_grouped(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (rounded.as_str(), ""),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if value < 0.0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('\u{00A0}');
        }
        grouped.push(*ch);
    }
    if !frac_part.is_empty() {
        grouped.push(',');
        grouped.push_str(frac_part);
    }
    grouped
}
