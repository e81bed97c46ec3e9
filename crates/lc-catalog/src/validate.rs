//! Catalog validation logic.

use lc_core::{CUSTOM, Preset};
use std::collections::HashSet;

use crate::schema::{CatalogFile, LATEST_VERSION};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate preset name: {name}")]
    DuplicateName { name: String },

    #[error("Preset at position {index} has an empty name")]
    EmptyName { index: usize },

    #[error("Preset name '{name}' is reserved for unbound parameters")]
    ReservedName { name: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_file(file: &CatalogFile) -> Result<(), ValidationError> {
    if file.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }
    validate_presets(&file.presets)
}

/// Names must be non-empty, unique, and distinct from the `custom` sentinel.
pub fn validate_presets(presets: &[Preset]) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    for (index, preset) in presets.iter().enumerate() {
        validate_name(index, preset.name())?;
        if !names.insert(preset.name()) {
            return Err(ValidationError::DuplicateName {
                name: preset.name().to_string(),
            });
        }
    }
    Ok(())
}

pub(crate) fn validate_name(index: usize, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName { index });
    }
    if name == CUSTOM {
        return Err(ValidationError::ReservedName {
            name: name.to_string(),
        });
    }
    Ok(())
}
