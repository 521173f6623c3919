use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Attribute type definition: a slug plus its human display name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeType {
    pub slug: String,
    pub name: String,
    /// System types back the coded SKU fields and are excluded from the
    /// dynamic attribute sweep.
    pub is_system: bool,
}

/// Attribute value definition: `(type, value)` plus its display name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeValue {
    pub type_slug: String,
    pub value: String,
    pub name: String,
}

/// Build-once lookup over attribute type/value definitions.
///
/// Values are keyed by `(type_slug, value)` so repeated resolution during
/// layout derivation stays O(1) instead of rescanning the definition lists.
#[derive(Clone, Debug, Default)]
pub struct AttributeCatalog {
    type_names: HashMap<String, String>,
    type_slugs_by_name: HashMap<String, String>,
    value_names: HashMap<(String, String), String>,
}

impl AttributeCatalog {
    /// Index the supplied definition lists.
    pub fn new(types: &[AttributeType], values: &[AttributeValue]) -> Self {
        let mut type_names = HashMap::with_capacity(types.len());
        let mut type_slugs_by_name = HashMap::with_capacity(types.len());
        for t in types {
            type_names.insert(t.slug.clone(), t.name.clone());
            type_slugs_by_name.insert(t.name.clone(), t.slug.clone());
        }
        let mut value_names = HashMap::with_capacity(values.len());
        for v in values {
            value_names.insert((v.type_slug.clone(), v.value.clone()), v.name.clone());
        }
        Self {
            type_names,
            type_slugs_by_name,
            value_names,
        }
    }

    /// Display name for an attribute type slug.
    pub fn type_name(&self, slug: &str) -> Option<&str> {
        self.type_names.get(slug).map(String::as_str)
    }

    /// Resolve a key that may be either a type slug or a type display name
    /// back to its canonical slug.
    pub fn canonical_slug(&self, key: &str) -> Option<&str> {
        if let Some((slug, _)) = self.type_names.get_key_value(key) {
            return Some(slug.as_str());
        }
        self.type_slugs_by_name.get(key).map(String::as_str)
    }

    /// Human label for `(slug, code)`.
    ///
    /// Empty codes resolve to an empty string; codes without a catalog entry
    /// fall back to the raw code text. Never fails.
    pub fn value_label(&self, slug: &str, code: &str) -> String {
        if code.is_empty() {
            return String::new();
        }
        self.value_names
            .get(&(slug.to_owned(), code.to_owned()))
            .cloned()
            .unwrap_or_else(|| code.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> AttributeCatalog {
        AttributeCatalog::new(
            &[
                AttributeType {
                    slug: "size".into(),
                    name: "Размер".into(),
                    is_system: true,
                },
                AttributeType {
                    slug: "season".into(),
                    name: "Сезон".into(),
                    is_system: false,
                },
            ],
            &[AttributeValue {
                type_slug: "size".into(),
                value: "m".into(),
                name: "M (46-48)".into(),
            }],
        )
    }

    #[test]
    fn value_label_resolves_and_falls_back() {
        let c = catalog();
        assert_eq!(c.value_label("size", "m"), "M (46-48)");
        assert_eq!(c.value_label("size", "xl"), "xl");
        assert_eq!(c.value_label("size", ""), "");
        assert_eq!(c.value_label("unknown", "raw"), "raw");
    }

    #[test]
    fn canonical_slug_accepts_slug_or_display_name() {
        let c = catalog();
        assert_eq!(c.canonical_slug("season"), Some("season"));
        assert_eq!(c.canonical_slug("Сезон"), Some("season"));
        assert_eq!(c.canonical_slug("nonexistent"), None);
    }
}
