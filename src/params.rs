use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::catalog::AttributeCatalog;
use crate::item::InventoryItem;
use crate::settings::SettingsState;

/// Slugs backed by the coded SKU fields; excluded from the dynamic sweep.
const TECHNICAL_SLUGS: [&str; 5] = ["quality", "brand", "material", "size", "color"];

/// Upstream-internal key inside the free-form attributes map.
const THUMBNAIL_SETTINGS_KEY: &str = "thumbnailSettings";

/// Fallback captions for the core slots when the catalog does not name the
/// type. These match the product copy on shipped labels.
fn core_caption(slug: &str) -> &'static str {
    match slug {
        "brand" => "Бренд",
        "quality" => "Качество",
        "material" => "Материал",
        "size" => "Размер",
        "color" => "Цвет",
        _ => "",
    }
}

/// One attribute slot paired with its human label and resolved value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParam {
    /// Caption shown before the value.
    pub label: String,
    /// Attribute type slug.
    pub slug: String,
    /// Raw code the value was resolved from.
    pub code: String,
    /// Whether the corresponding toggle keeps this entry visible.
    pub show: bool,
    /// Human-readable value; never empty (empty resolutions are dropped).
    pub value: String,
}

/// Resolved parameter list. Labels rarely carry more than a handful.
pub type ResolvedParams = SmallVec<[ResolvedParam; 8]>;

/// Non-empty scalar code text for a free-form attribute value.
///
/// Objects, arrays, nulls, empty strings, `false` and `0` all resolve to
/// `None` and drop the entry, matching the upstream record's semantics.
fn scalar_code(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                None
            } else {
                Some(n.to_string())
            }
        }
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    }
}

/// Derive the label's parameter list from an item, the attribute catalog and
/// the current settings.
///
/// Core slots (brand, quality, material, size, color) come first in fixed
/// order, followed by dynamic attributes in map order. Every entry's value
/// is resolved through the catalog with the raw code as fallback; entries
/// whose resolved value is empty are dropped.
pub fn resolve_params(
    item: &InventoryItem,
    catalog: &AttributeCatalog,
    settings: &SettingsState,
) -> ResolvedParams {
    let content = &settings.content;
    let core: [(&str, Option<&String>, bool); 5] = [
        ("brand", item.brand_code.as_ref(), content.show_brand),
        ("quality", item.quality_code.as_ref(), content.show_quality),
        ("material", item.material_code.as_ref(), content.show_material),
        ("size", item.size_code.as_ref(), content.show_size),
        ("color", item.color_code.as_ref(), content.show_color),
    ];

    let mut params = ResolvedParams::new();
    for (slug, code, show) in core {
        let Some(code) = code.filter(|c| !c.is_empty()) else {
            continue;
        };
        let value = catalog.value_label(slug, code);
        if value.is_empty() {
            continue;
        }
        let label = catalog
            .type_name(slug)
            .unwrap_or_else(|| core_caption(slug))
            .to_owned();
        params.push(ResolvedParam {
            label,
            slug: slug.to_owned(),
            code: code.clone(),
            show,
            value,
        });
    }

    for (key, raw) in &item.attributes {
        if key == THUMBNAIL_SETTINGS_KEY {
            continue;
        }
        let Some(code) = scalar_code(raw) else {
            log::debug!("label params: skipping non-scalar attribute {key:?}");
            continue;
        };
        if TECHNICAL_SLUGS.contains(&key.as_str()) {
            continue;
        }
        // A dynamic key may address its type by slug or by display name.
        if let Some(slug) = catalog.canonical_slug(key) {
            if TECHNICAL_SLUGS.contains(&slug) {
                continue;
            }
        }
        let value = catalog.value_label(key, &code);
        if value.is_empty() {
            continue;
        }
        let label = catalog.type_name(key).unwrap_or(key.as_str()).to_owned();
        let show = settings.extra_toggles.get(key).copied().unwrap_or(true);
        params.push(ResolvedParam {
            label,
            slug: key.clone(),
            code,
            show,
            value,
        });
    }

    params
}

/// Count of parameters whose toggles keep them visible.
pub fn visible_count(params: &[ResolvedParam]) -> usize {
    params.iter().filter(|p| p.show).count()
}
