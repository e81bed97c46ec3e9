use std::path::PathBuf;

fn demo(rel: &str) -> PathBuf {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root");
    root.join("demos").join(rel)
}

#[test]
fn yaml_demo_loads_in_order() {
    let catalog = lc_catalog::load(&demo("presets.yaml")).unwrap();
    let names: Vec<&str> = catalog.names().collect();
    assert_eq!(names, vec!["ply3mm", "acrylic5mm", "mdf6mm"]);

    let mdf = catalog.get("mdf6mm").unwrap().values();
    assert_eq!(mdf.joints.tab.clearance, 0.0);
    assert_eq!(mdf.style, lc_core::DEFAULT_STYLE);
    assert!(mdf.notes.is_empty());
}

#[test]
fn csv_demo_skips_unreadable_rows() {
    let import = lc_catalog::load_csv(&demo("presets.csv")).unwrap();
    let names: Vec<&str> = import.catalog.names().collect();
    assert_eq!(names, vec!["ply3mm", "acrylic5mm", "felt"]);

    let skipped: Vec<(usize, Option<&str>)> = import
        .skipped
        .iter()
        .map(|s| (s.line, s.name.as_deref()))
        .collect();
    assert_eq!(skipped, vec![(4, Some("cardboard")), (5, Some("ply3mm"))]);

    let ply = import.catalog.get("ply3mm").unwrap().values();
    assert_eq!(ply.notes, "Baltic birch, 3 mm");
    assert_eq!(ply.kerf, 0.1);

    let acrylic = import.catalog.get("acrylic5mm").unwrap().values();
    assert!(acrylic.joints.slot.length.is_nan());
}

#[test]
fn csv_and_yaml_demos_agree_on_ply() {
    let yaml = lc_catalog::load(&demo("presets.yaml")).unwrap();
    let csv = lc_catalog::load(&demo("presets.csv")).unwrap();

    let from_yaml = yaml.get("ply3mm").unwrap().values();
    let from_csv = csv.get("ply3mm").unwrap().values();
    assert_eq!(from_yaml.joints, from_csv.joints);
    assert_eq!(from_yaml.style, from_csv.style);
    assert_eq!(from_yaml.sheet_height, from_csv.sheet_height);
}

#[test]
fn unknown_extension_is_rejected() {
    let err = lc_catalog::load(&demo("presets.txt")).unwrap_err();
    assert!(matches!(
        err,
        lc_catalog::CatalogError::UnsupportedFormat { .. }
    ));
}
