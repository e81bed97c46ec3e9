//! Panel configuration.

use std::path::Path;

use lc_core::ParameterSet;
use serde::{Deserialize, Serialize};

use crate::error::{PanelError, PanelResult};

/// What a manual edit does to a preset binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetachPolicy {
    /// Any edit of a preset attribute switches the selection to `custom`.
    #[default]
    AnyEdit,
    /// Stay bound while the values still equal the selected preset exactly.
    OnDivergence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub detach_policy: DetachPolicy,
    /// Live parameters before any preset is applied. A `defaults` block must
    /// list every dimension; its selection is ignored.
    pub defaults: ParameterSet,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            detach_policy: DetachPolicy::default(),
            defaults: ParameterSet::default(),
        }
    }
}

impl PanelConfig {
    pub fn from_yaml_str(content: &str) -> PanelResult<Self> {
        serde_yaml::from_str(content).map_err(|e| PanelError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> PanelResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PanelError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = PanelConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, PanelConfig::default());
        assert_eq!(config.detach_policy, DetachPolicy::AnyEdit);
        assert_eq!(config.defaults.scale, 1.0);
    }

    #[test]
    fn reads_policy_and_defaults() {
        let yaml = r#"
detach_policy: on_divergence
defaults:
  thickness: 3
  sheetWidth: 300
  sheetHeight: 200
  kerf: 0.12
  scale: 0.5
"#;
        let config = PanelConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.detach_policy, DetachPolicy::OnDivergence);
        assert_eq!(config.defaults.values.kerf, 0.12);
        assert_eq!(config.defaults.scale, 0.5);
        assert_eq!(config.defaults.values.style, lc_core::DEFAULT_STYLE);
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        let err = PanelConfig::from_yaml_str("detach_policy: sometimes").unwrap_err();
        assert!(matches!(err, PanelError::Config(_)));
    }
}
