use lc_core::Preset;

use crate::validate::{ValidationError, validate_presets};

/// Ordered, read-only collection of presets with unique names.
///
/// Order matters: the first entry is the default selection whenever a
/// catalog is loaded into a panel. Owners replace a catalog wholesale; there
/// is no way to edit one in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn new(presets: Vec<Preset>) -> Result<Self, ValidationError> {
        validate_presets(&presets)?;
        Ok(Self { presets })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn first(&self) -> Option<&Preset> {
        self.presets.first()
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Preset names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Preset> {
        self.presets.iter()
    }

    pub fn into_presets(self) -> Vec<Preset> {
        self.presets
    }
}

impl<'a> IntoIterator for &'a PresetCatalog {
    type Item = &'a Preset;
    type IntoIter = std::slice::Iter<'a, Preset>;

    fn into_iter(self) -> Self::IntoIter {
        self.presets.iter()
    }
}

impl TryFrom<Vec<Preset>> for PresetCatalog {
    type Error = ValidationError;

    fn try_from(presets: Vec<Preset>) -> Result<Self, Self::Error> {
        Self::new(presets)
    }
}
