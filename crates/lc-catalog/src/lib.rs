//! lc-catalog: preset catalogs and their file formats.

pub mod catalog;
pub mod csv;
pub mod schema;
pub mod validate;

pub use catalog::PresetCatalog;
pub use csv::{CsvImport, SkippedRow, parse_presets_csv};
pub use schema::{CatalogFile, LATEST_VERSION};
pub use validate::{ValidationError, validate_file, validate_presets};

use std::path::{Path, PathBuf};

use tracing::debug;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("CSV error at line {line}: {what}")]
    Csv { line: usize, what: String },

    #[error("Unsupported catalog format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk catalog encodings, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Yaml,
    Json,
    Csv,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(CatalogFormat::Yaml),
            Some("json") => Ok(CatalogFormat::Json),
            Some("csv") => Ok(CatalogFormat::Csv),
            _ => Err(CatalogError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn into_catalog(file: CatalogFile) -> CatalogResult<PresetCatalog> {
    validate_file(&file)?;
    Ok(PresetCatalog::new(file.presets)?)
}

fn to_file(catalog: &PresetCatalog) -> CatalogFile {
    CatalogFile {
        version: LATEST_VERSION,
        presets: catalog.iter().cloned().collect(),
    }
}

pub fn from_yaml_str(content: &str) -> CatalogResult<PresetCatalog> {
    into_catalog(serde_yaml::from_str(content)?)
}

pub fn from_json_str(content: &str) -> CatalogResult<PresetCatalog> {
    into_catalog(serde_json::from_str(content)?)
}

pub fn load_yaml(path: &Path) -> CatalogResult<PresetCatalog> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &Path, catalog: &PresetCatalog) -> CatalogResult<()> {
    let content = serde_yaml::to_string(&to_file(catalog))?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> CatalogResult<PresetCatalog> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

pub fn save_json(path: &Path, catalog: &PresetCatalog) -> CatalogResult<()> {
    let content = serde_json::to_string_pretty(&to_file(catalog))?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_csv(path: &Path) -> CatalogResult<CsvImport> {
    let content = std::fs::read_to_string(path)?;
    parse_presets_csv(&content)
}

/// Load a catalog in whichever format the extension names. Skipped CSV rows
/// are logged by the importer and otherwise dropped.
pub fn load(path: &Path) -> CatalogResult<PresetCatalog> {
    let catalog = match CatalogFormat::from_path(path)? {
        CatalogFormat::Yaml => load_yaml(path)?,
        CatalogFormat::Json => load_json(path)?,
        CatalogFormat::Csv => load_csv(path)?.catalog,
    };
    debug!(path = %path.display(), presets = catalog.len(), "loaded preset catalog");
    Ok(catalog)
}

/// Write a catalog as YAML or JSON depending on the extension.
pub fn save(path: &Path, catalog: &PresetCatalog) -> CatalogResult<()> {
    match CatalogFormat::from_path(path)? {
        CatalogFormat::Yaml => save_yaml(path, catalog),
        CatalogFormat::Json => save_json(path, catalog),
        CatalogFormat::Csv => Err(CatalogError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
