use lc_catalog::PresetCatalog;
use lc_core::CUSTOM;

/// Entries offered by the preset picker: `custom` first, then every catalog
/// preset in catalog order.
pub fn build_choices(catalog: &PresetCatalog) -> Vec<String> {
    std::iter::once(CUSTOM)
        .chain(catalog.names())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_core::{Preset, PresetValues};

    #[test]
    fn custom_leads_catalog_names() {
        let catalog = PresetCatalog::new(vec![
            Preset::new("mdf6mm", PresetValues::default()),
            Preset::new("ply3mm", PresetValues::default()),
        ])
        .unwrap();
        assert_eq!(build_choices(&catalog), vec!["custom", "mdf6mm", "ply3mm"]);
        assert_eq!(build_choices(&catalog), build_choices(&catalog.clone()));
    }

    #[test]
    fn empty_catalog_offers_only_custom() {
        assert_eq!(build_choices(&PresetCatalog::empty()), vec!["custom"]);
    }
}
