use serde::{Deserialize, Serialize};

/// Font multipliers for the three label text groups.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontScales {
    pub name: f64,
    pub attr: f64,
    pub price: f64,
}

impl FontScales {
    pub const fn new(name: f64, attr: f64, price: f64) -> Self {
        Self { name, attr, price }
    }

    fn dampened(self, factor: f64) -> Self {
        Self {
            name: self.name * factor,
            attr: self.attr * factor,
            price: self.price * factor,
        }
    }
}

/// Weights of the content-density heuristic.
///
/// These are empirically tuned against real label output, not derived from a
/// formula. Treat them as product constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityWeights {
    /// Contribution of each visible parameter row.
    pub per_param: f64,
    /// Flat cost of a composition line.
    pub composition: f64,
    /// Item-name length is divided by this.
    pub name_len_divisor: f64,
    /// Flat cost of a non-empty custom text line.
    pub custom_text: f64,
    /// Flat cost of the article row toggle.
    pub article: f64,
    /// Flat cost of the category row toggle.
    pub category: f64,
}

impl Default for DensityWeights {
    fn default() -> Self {
        Self {
            per_param: 2.0,
            composition: 8.0,
            name_len_divisor: 8.0,
            custom_text: 5.0,
            article: 2.0,
            category: 2.0,
        }
    }
}

/// Everything the density heuristic looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DensityInputs {
    pub visible_params: usize,
    pub has_composition: bool,
    pub name_chars: usize,
    pub has_custom_text: bool,
    pub show_article: bool,
    pub show_category: bool,
}

/// Scalar estimate of how much content must fit on the label.
pub fn content_density(inputs: &DensityInputs, weights: &DensityWeights) -> f64 {
    let mut density = inputs.visible_params as f64 * weights.per_param;
    if inputs.has_composition {
        density += weights.composition;
    }
    density += inputs.name_chars as f64 / weights.name_len_divisor;
    if inputs.has_custom_text {
        density += weights.custom_text;
    }
    if inputs.show_article {
        density += weights.article;
    }
    if inputs.show_category {
        density += weights.category;
    }
    density
}

/// Discrete scale tiers selected by descending density bands.
///
/// Bands are checked densest-first; the sparse bands apply an extra boost on
/// tall roll formats where vertical space is plentiful. Selection is
/// monotonic: higher density never yields a larger tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleTierTable {
    /// `(exclusive lower bound, scales)`, densest band first.
    pub dense_bands: [(f64, FontScales); 5],
    /// `(exclusive upper bound, flat scales, tall-format scales)`, airiest
    /// band first.
    pub sparse_bands: [(f64, FontScales, FontScales); 2],
    /// Applied between the dense and sparse bands.
    pub baseline: FontScales,
    /// Density above which the global dampening factor kicks in.
    pub dampen_above: f64,
    pub dampen_factor: f64,
}

impl Default for ScaleTierTable {
    fn default() -> Self {
        Self {
            dense_bands: [
                (28.0, FontScales::new(0.4, 0.35, 0.6)),
                (22.0, FontScales::new(0.5, 0.45, 0.7)),
                (16.0, FontScales::new(0.65, 0.6, 0.8)),
                (10.0, FontScales::new(0.8, 0.75, 0.9)),
                (8.0, FontScales::new(1.05, 1.0, 1.05)),
            ],
            sparse_bands: [
                (
                    4.0,
                    FontScales::new(2.0, 1.9, 2.0),
                    FontScales::new(2.4, 2.2, 2.0),
                ),
                (
                    7.0,
                    FontScales::new(1.6, 1.45, 1.6),
                    FontScales::new(1.8, 1.6, 1.6),
                ),
            ],
            baseline: FontScales::new(1.4, 1.3, 1.4),
            dampen_above: 25.0,
            dampen_factor: 0.8,
        }
    }
}

impl ScaleTierTable {
    /// Raw tier for a density value. `tall_format` selects the boosted
    /// sparse-band scales.
    pub fn select(&self, density: f64, tall_format: bool) -> FontScales {
        for (bound, scales) in &self.dense_bands {
            if density > *bound {
                return *scales;
            }
        }
        for (bound, flat, tall) in &self.sparse_bands {
            if density < *bound {
                return if tall_format { *tall } else { *flat };
            }
        }
        self.baseline
    }

    /// Global dampening multiplier for very dense labels.
    pub fn dampening(&self, density: f64) -> f64 {
        if density > self.dampen_above {
            self.dampen_factor
        } else {
            1.0
        }
    }

    /// Tier with dampening applied; the scales the renderer uses.
    pub fn final_scales(&self, density: f64, tall_format: bool) -> FontScales {
        self.select(density, tall_format)
            .dampened(self.dampening(density))
    }
}

/// Multiplier applied to the QR module size so codes stay legible: sparse
/// labels grow the code slightly, dense labels shrink it.
pub fn qr_density_factor(density: f64) -> f64 {
    if density < 5.0 {
        1.1
    } else if density < 8.0 {
        1.0
    } else {
        0.85
    }
}
