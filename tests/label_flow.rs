//! End-to-end flow: dialog settings through the layout engine into the
//! generated print document.

mod common;

use common::fixtures::{demo_catalog, demo_item};
use label_press::{
    Alignment, LayoutStyle, PaperSize, SettingsAction, SettingsState,
};
use label_press_render::{LabelJob, LayoutEngine, PreviewViewport};
use label_press_render_html::{
    build_print_document, print_labels, BlockedPrintTarget, FilePrintTarget, PrintError,
};

fn plan_for(settings: &SettingsState) -> label_press_render::LabelPlan {
    let item = demo_item();
    let catalog = demo_catalog();
    LayoutEngine::default().plan(&LabelJob {
        item: &item,
        catalog: &catalog,
        settings,
    })
}

#[test]
fn dialog_session_resets_quantity_but_keeps_choices() {
    let mut settings = SettingsState::default();
    settings.apply(SettingsAction::SetQuantity(5));
    settings.apply(SettingsAction::SetPaperSize(PaperSize::S58x60));
    settings.apply(SettingsAction::SetAlignment(Alignment::Left));

    settings.apply(SettingsAction::DialogOpened);
    assert_eq!(settings.ui.quantity, 1);
    assert_eq!(settings.dimensions.paper_size, PaperSize::S58x60);
    assert_eq!(settings.ui.alignment, Alignment::Left);
}

#[test]
fn landscape_round_trip_restores_preview_and_print_sizing() {
    let mut settings = SettingsState::default();
    let portrait = plan_for(&settings);

    settings.apply(SettingsAction::SetLandscape(true));
    let landscape = plan_for(&settings);
    assert_eq!(landscape.oriented_mm.width, portrait.oriented_mm.height);
    assert_eq!(landscape.oriented_mm.height, portrait.oriented_mm.width);
    assert!(build_print_document(&landscape).contains("size: 40mm 58mm"));

    settings.apply(SettingsAction::SetLandscape(false));
    let restored = plan_for(&settings);
    assert_eq!(restored.oriented_mm, portrait.oriented_mm);

    let mut viewport = PreviewViewport::new();
    viewport.observe(900.0, 700.0);
    viewport.commit();
    let a = viewport.preview_scale(portrait.oriented_mm);
    let b = viewport.preview_scale(restored.oriented_mm);
    assert_eq!(a, b, "preview scale must survive a landscape round trip");
}

#[test]
fn print_document_tiles_requested_quantity() {
    let mut settings = SettingsState::default();
    settings.apply(SettingsAction::SetQuantity(3));
    let doc = build_print_document(&plan_for(&settings));
    assert_eq!(doc.matches("class=\"label-container\"").count(), 3);
    assert!(doc.contains("Печать этикеток - Футболка Promo Classic"));
}

#[test]
fn blocked_target_aborts_without_output() {
    let settings = SettingsState::default();
    let plan = plan_for(&settings);
    let mut blocked = BlockedPrintTarget;
    assert!(matches!(
        print_labels(&plan, &mut blocked),
        Err(PrintError::TargetUnavailable)
    ));
}

#[test]
fn file_target_receives_the_full_document() {
    let settings = SettingsState::default();
    let plan = plan_for(&settings);
    let path = std::env::temp_dir().join("label-press-flow-test.html");
    let mut target = FilePrintTarget::new(&path);
    print_labels(&plan, &mut target).expect("print to file");

    let written = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(written, build_print_document(&plan));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn resolved_values_reach_the_document_with_catalog_labels() {
    let settings = SettingsState::default();
    let plan = plan_for(&settings);
    assert!(plan.params.iter().all(|p| !p.value.is_empty()));

    let mut settings = settings;
    settings.apply(SettingsAction::SetLayoutStyle(LayoutStyle::Standard));
    let doc = build_print_document(&plan_for(&settings));
    assert!(doc.contains("Чёрный"), "catalog-resolved color missing");
    assert!(doc.contains("Весна-Лето"), "dynamic attribute missing");
    assert!(doc.contains("Хлопок 95%, Эластан 5%"), "composition missing");
    assert!(doc.contains("1\u{00A0}290"), "grouped price missing");
}
