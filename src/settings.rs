use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Custom label dimensions are clamped to this physical range (mm).
pub const MIN_CUSTOM_MM: f64 = 10.0;
pub const MAX_CUSTOM_MM: f64 = 2000.0;

/// Supported physical label/page formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    #[serde(rename = "58x40")]
    S58x40,
    #[serde(rename = "58x60")]
    S58x60,
    #[serde(rename = "75x120")]
    S75x120,
    #[serde(rename = "a4")]
    A4,
    #[serde(rename = "custom")]
    Custom,
}

impl PaperSize {
    /// Tall roll formats get a font boost at low content density.
    pub fn is_vertical_format(self) -> bool {
        matches!(self, Self::S58x60 | Self::S75x120)
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::S58x40 => "58x40",
            Self::S58x60 => "58x60",
            Self::S75x120 => "75x120",
            Self::A4 => "a4",
            Self::Custom => "custom",
        };
        f.write_str(text)
    }
}

/// Arrangement of the label's middle (parameter) section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStyle {
    Standard,
    #[default]
    SideBySide,
    Inline,
    Minimal,
}

/// Horizontal content alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Center,
    Left,
}

impl Alignment {
    /// CSS `text-align` value.
    pub fn css(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Left => "left",
        }
    }
}

/// Physical page selection.
///
/// `custom_*` hold the user-entered size and are only consulted when
/// `paper_size` is [`PaperSize::Custom`]. Landscape never mutates the stored
/// values; orientation is applied when effective dimensions are derived.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDimensions {
    pub paper_size: PaperSize,
    pub custom_width_mm: f64,
    pub custom_height_mm: f64,
    pub is_landscape: bool,
}

impl Default for LabelDimensions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::S58x40,
            custom_width_mm: 100.0,
            custom_height_mm: 100.0,
            is_landscape: false,
        }
    }
}

/// Optional-field toggles plus the free-text line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelContentSettings {
    pub show_article: bool,
    pub show_price: bool,
    pub show_barcode: bool,
    pub show_composition: bool,
    pub show_brand: bool,
    pub show_size: bool,
    pub show_material: bool,
    pub show_color: bool,
    pub show_quality: bool,
    pub show_category: bool,
    pub custom_text: String,
}

impl Default for LabelContentSettings {
    fn default() -> Self {
        Self {
            show_article: true,
            show_price: true,
            show_barcode: true,
            show_composition: true,
            show_brand: false,
            show_size: true,
            show_material: false,
            show_color: true,
            show_quality: false,
            show_category: false,
            custom_text: String::new(),
        }
    }
}

/// Toggleable content fields addressed by [`SettingsAction::SetShow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentField {
    Article,
    Price,
    Barcode,
    Composition,
    Brand,
    Size,
    Material,
    Color,
    Quality,
    Category,
}

/// Presentation state owned by the print dialog.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelUiState {
    pub alignment: Alignment,
    pub layout_style: LayoutStyle,
    pub quantity: u32,
}

impl Default for LabelUiState {
    fn default() -> Self {
        Self {
            alignment: Alignment::Center,
            layout_style: LayoutStyle::SideBySide,
            quantity: 1,
        }
    }
}

/// All mutations flow through [`SettingsState::apply`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingsAction {
    /// Dialog (re)opened: quantity resets to 1, everything else survives.
    DialogOpened,
    SetPaperSize(PaperSize),
    SetCustomSize { width_mm: f64, height_mm: f64 },
    SetLandscape(bool),
    SetAlignment(Alignment),
    SetLayoutStyle(LayoutStyle),
    SetQuantity(u32),
    SetShow { field: ContentField, on: bool },
    SetCustomText(String),
    /// Visibility override for a dynamic attribute slug.
    SetExtraToggle { slug: String, on: bool },
}

/// Complete dialog-session settings.
///
/// Lifetime is one dialog session: construct with `default()` on open,
/// discard on close. Nothing here is persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsState {
    pub dimensions: LabelDimensions,
    pub content: LabelContentSettings,
    pub ui: LabelUiState,
    /// Per-slug visibility for dynamic attributes; absent slugs are visible.
    pub extra_toggles: BTreeMap<String, bool>,
}

fn clamp_custom_mm(value: f64) -> f64 {
    if !value.is_finite() {
        return MIN_CUSTOM_MM;
    }
    value.clamp(MIN_CUSTOM_MM, MAX_CUSTOM_MM)
}

impl SettingsState {
    /// Apply one action, enforcing invariants centrally: quantity stays >= 1
    /// and custom dimensions stay within the sane physical range.
    pub fn apply(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::DialogOpened => {
                self.ui.quantity = 1;
            }
            SettingsAction::SetPaperSize(size) => {
                self.dimensions.paper_size = size;
            }
            SettingsAction::SetCustomSize {
                width_mm,
                height_mm,
            } => {
                self.dimensions.custom_width_mm = clamp_custom_mm(width_mm);
                self.dimensions.custom_height_mm = clamp_custom_mm(height_mm);
            }
            SettingsAction::SetLandscape(on) => {
                self.dimensions.is_landscape = on;
            }
            SettingsAction::SetAlignment(alignment) => {
                self.ui.alignment = alignment;
            }
            SettingsAction::SetLayoutStyle(style) => {
                self.ui.layout_style = style;
            }
            SettingsAction::SetQuantity(quantity) => {
                self.ui.quantity = quantity.max(1);
            }
            SettingsAction::SetShow { field, on } => {
                let slot = match field {
                    ContentField::Article => &mut self.content.show_article,
                    ContentField::Price => &mut self.content.show_price,
                    ContentField::Barcode => &mut self.content.show_barcode,
                    ContentField::Composition => &mut self.content.show_composition,
                    ContentField::Brand => &mut self.content.show_brand,
                    ContentField::Size => &mut self.content.show_size,
                    ContentField::Material => &mut self.content.show_material,
                    ContentField::Color => &mut self.content.show_color,
                    ContentField::Quality => &mut self.content.show_quality,
                    ContentField::Category => &mut self.content.show_category,
                };
                *slot = on;
            }
            SettingsAction::SetCustomText(text) => {
                self.content.custom_text = text;
            }
            SettingsAction::SetExtraToggle { slug, on } => {
                self.extra_toggles.insert(slug, on);
            }
        }
    }
}
