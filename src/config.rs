use crate::error::{InspectorError, Result};
use crate::page::OverlayStyle;
use crate::tree::IslandConvention;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inspector settings, every field optional in the JSON form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InspectorConfig {
    pub convention: IslandConvention,
    pub overlay: OverlayStyle,
}

impl InspectorConfig {
    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| InspectorError::ConfigFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| InspectorError::ConfigFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(InspectorConfig::from_json("{}").unwrap(), InspectorConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = InspectorConfig::from_json(r##"{"overlay": {"color": "#00ff88"}}"##).unwrap();
        assert_eq!(config.overlay.color, "#00ff88");
        assert_eq!(config.convention.island_tag, "astro-island");
    }

    #[test]
    fn test_invalid_config() {
        let err = InspectorConfig::from_json("{\"overlay\": 3}").unwrap_err();
        assert!(matches!(err, InspectorError::ConfigFailed(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = InspectorConfig::load("/nonexistent/island-inspector.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/island-inspector.json"));
    }
}
