use label_press::{
    AttributeCatalog, AttributeType, AttributeValue, ContentField, InventoryItem, PaperSize,
    SettingsAction, SettingsState,
};
use label_press_render::{LabelJob, LayoutEngine, LayoutOptions};

fn catalog_with_values(count: usize) -> AttributeCatalog {
    let mut types = Vec::new();
    let mut values = Vec::new();
    for idx in 0..count {
        let slug = format!("extra{idx}");
        types.push(AttributeType {
            slug: slug.clone(),
            name: format!("Параметр {idx}"),
            is_system: false,
        });
        values.push(AttributeValue {
            type_slug: slug,
            value: format!("v{idx}"),
            name: format!("Значение {idx}"),
        });
    }
    AttributeCatalog::new(&types, &values)
}

fn item_with_extras(name: &str, extras: usize) -> InventoryItem {
    let mut item = InventoryItem {
        id: "itm-1".into(),
        name: name.into(),
        sku: Some("SKU-1".into()),
        selling_price: Some(990.0),
        ..InventoryItem::default()
    };
    for idx in 0..extras {
        item.attributes
            .insert(format!("extra{idx}"), serde_json::json!(format!("v{idx}")));
    }
    item
}

fn bare_settings(paper: PaperSize) -> SettingsState {
    // Strip the default toggles down to nothing so tests control every
    // density input explicitly.
    let mut settings = SettingsState::default();
    for field in [
        ContentField::Article,
        ContentField::Composition,
        ContentField::Category,
        ContentField::Size,
        ContentField::Color,
    ] {
        settings.apply(SettingsAction::SetShow { field, on: false });
    }
    settings.apply(SettingsAction::SetPaperSize(paper));
    settings
}

fn plan_scales(paper: PaperSize, extras: usize, name: &str) -> (f64, f64) {
    let catalog = catalog_with_values(extras);
    let item = item_with_extras(name, extras);
    let settings = bare_settings(paper);
    let plan = LayoutEngine::default().plan(&LabelJob {
        item: &item,
        catalog: &catalog,
        settings: &settings,
    });
    (plan.density, plan.scales.name)
}

#[test]
fn sparse_small_label_gets_a_large_tier() {
    // 58x40, two visible attributes, no composition, short name.
    let (density, name_scale) = plan_scales(PaperSize::S58x40, 2, "Кружка");
    assert!(density < 8.0, "density {density} should stay below 8");
    assert!(
        name_scale >= 1.0,
        "sparse labels keep a large name scale, got {name_scale}"
    );
}

#[test]
fn dense_a4_label_hits_smallest_tier_with_dampening() {
    let catalog = catalog_with_values(10);
    let mut item = item_with_extras(
        "Толстовка оверсайз с капюшоном и вышитым логотипом коллекции",
        10,
    );
    item.material_composition.insert("Хлопок".into(), 80.0);
    item.material_composition.insert("Полиэстер".into(), 20.0);

    let mut settings = bare_settings(PaperSize::A4);
    settings.apply(SettingsAction::SetShow {
        field: ContentField::Composition,
        on: true,
    });

    let plan = LayoutEngine::default().plan(&LabelJob {
        item: &item,
        catalog: &catalog,
        settings: &settings,
    });
    assert!(plan.density > 28.0, "density {} should exceed 28", plan.density);
    // Smallest tier (0.4) with the global 0.8 dampening applied.
    assert!(
        (plan.scales.name - 0.32).abs() < 1e-9,
        "expected dampened smallest tier, got {}",
        plan.scales.name
    );
    assert!(plan.scales.name <= 0.4);
}

#[test]
fn more_visible_params_never_grow_the_scale() {
    let mut last = f64::INFINITY;
    for extras in 0..12 {
        let (_, name_scale) = plan_scales(PaperSize::S58x40, extras, "Кружка");
        assert!(
            name_scale <= last + 1e-9,
            "name scale grew from {last} to {name_scale} at {extras} params"
        );
        last = name_scale;
    }
}

#[test]
fn vertical_formats_boost_sparse_labels_only() {
    let (_, flat) = plan_scales(PaperSize::S58x40, 0, "Чехол");
    let (_, tall) = plan_scales(PaperSize::S58x60, 0, "Чехол");
    assert!(tall > flat, "58x60 should boost sparse labels");

    let (_, flat_dense) = plan_scales(PaperSize::S58x40, 12, "Чехол");
    let (_, tall_dense) = plan_scales(PaperSize::S58x60, 12, "Чехол");
    assert_eq!(flat_dense, tall_dense, "dense bands ignore the format");
}

#[test]
fn qr_factor_tracks_density_bands() {
    let catalog = catalog_with_values(0);
    let item = item_with_extras("Чехол", 0);
    let settings = bare_settings(PaperSize::S58x40);
    let plan = LayoutEngine::default().plan(&LabelJob {
        item: &item,
        catalog: &catalog,
        settings: &settings,
    });
    assert!(plan.density < 5.0);
    assert_eq!(plan.qr_factor, 1.1);

    let catalog = catalog_with_values(12);
    let item = item_with_extras("Чехол", 12);
    let plan = LayoutEngine::default().plan(&LabelJob {
        item: &item,
        catalog: &catalog,
        settings: &settings,
    });
    assert_eq!(plan.qr_factor, 0.85);
}

#[test]
fn custom_currency_symbol_flows_into_the_price_line() {
    let opts = LayoutOptions {
        currency_symbol: "₸".into(),
        ..LayoutOptions::default()
    };
    let catalog = catalog_with_values(0);
    let item = item_with_extras("Чехол", 0);
    let settings = SettingsState::default();
    let plan = LayoutEngine::new(opts).plan(&LabelJob {
        item: &item,
        catalog: &catalog,
        settings: &settings,
    });
    let price = plan.price.expect("price line");
    assert_eq!(price.currency, "₸");
    assert_eq!(price.amount, "990");
}

#[test]
fn two_column_triggers_fire_independently() {
    let catalog = catalog_with_values(4);

    // Wide paper (>= 120mm) with at least four visible params.
    let item = item_with_extras("Плакат", 4);
    let mut settings = bare_settings(PaperSize::Custom);
    settings.apply(SettingsAction::SetCustomSize {
        width_mm: 120.0,
        height_mm: 80.0,
    });
    settings.apply(SettingsAction::SetLayoutStyle(
        label_press::LayoutStyle::Standard,
    ));
    let plan = LayoutEngine::default().plan(&LabelJob {
        item: &item,
        catalog: &catalog,
        settings: &settings,
    });
    assert!(plan.two_columns, "wide paper with 4 params should split");

    // Same paper, too few params: single column.
    let sparse_item = item_with_extras("Плакат", 2);
    let sparse_catalog = catalog_with_values(2);
    let plan = LayoutEngine::default().plan(&LabelJob {
        item: &sparse_item,
        catalog: &sparse_catalog,
        settings: &settings,
    });
    assert!(!plan.two_columns);

    // Side-by-side forces two columns regardless of size.
    let mut side = bare_settings(PaperSize::S58x40);
    side.apply(SettingsAction::SetLayoutStyle(
        label_press::LayoutStyle::SideBySide,
    ));
    let plan = LayoutEngine::default().plan(&LabelJob {
        item: &sparse_item,
        catalog: &sparse_catalog,
        settings: &side,
    });
    assert!(plan.two_columns);

    // Wider-than-tall label with at least three visible params.
    let item3 = item_with_extras("Плакат", 3);
    let catalog3 = catalog_with_values(3);
    let mut flat = bare_settings(PaperSize::Custom);
    flat.apply(SettingsAction::SetCustomSize {
        width_mm: 100.0,
        height_mm: 50.0,
    });
    flat.apply(SettingsAction::SetLayoutStyle(
        label_press::LayoutStyle::Standard,
    ));
    let plan = LayoutEngine::default().plan(&LabelJob {
        item: &item3,
        catalog: &catalog3,
        settings: &flat,
    });
    assert!(plan.two_columns, "landscape-shaped label with 3 params splits");
}
