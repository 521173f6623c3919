//! Shared builders for integration tests and benches.

use label_press::{AttributeCatalog, AttributeType, AttributeValue, InventoryItem};

/// Catalog covering the demo item's coded fields and dynamic attributes.
pub fn demo_catalog() -> AttributeCatalog {
    let types = vec![
        AttributeType {
            slug: "size".into(),
            name: "Размер".into(),
            is_system: true,
        },
        AttributeType {
            slug: "color".into(),
            name: "Цвет".into(),
            is_system: true,
        },
        AttributeType {
            slug: "season".into(),
            name: "Сезон".into(),
            is_system: false,
        },
    ];
    let values = vec![
        AttributeValue {
            type_slug: "size".into(),
            value: "m".into(),
            name: "M (46-48)".into(),
        },
        AttributeValue {
            type_slug: "color".into(),
            value: "black".into(),
            name: "Чёрный".into(),
        },
        AttributeValue {
            type_slug: "season".into(),
            value: "ss".into(),
            name: "Весна-Лето".into(),
        },
    ];
    AttributeCatalog::new(&types, &values)
}

/// A representative merch item: coded fields, one dynamic attribute, a
/// composition map and a price.
pub fn demo_item() -> InventoryItem {
    let mut item = InventoryItem {
        id: "itm-42".into(),
        name: "Футболка Promo Classic".into(),
        sku: Some("TS-PROMO-001".into()),
        size_code: Some("m".into()),
        color_code: Some("black".into()),
        selling_price: Some(1290.0),
        category: Some("Одежда".into()),
        ..InventoryItem::default()
    };
    item.attributes
        .insert("season".into(), serde_json::json!("ss"));
    item.material_composition.insert("Хлопок".into(), 95.0);
    item.material_composition.insert("Эластан".into(), 5.0);
    item
}
