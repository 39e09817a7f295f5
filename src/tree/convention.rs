use serde::{Deserialize, Serialize};

/// Tag and attribute names Astro uses for hydration islands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IslandConvention {
    /// Custom element marking an island
    pub island_tag: String,

    /// Hydration directive attribute (`load`, `idle`, `visible`, `media`, `only`)
    pub directive_attribute: String,

    /// Directive assumed when the attribute is missing
    pub default_directive: String,

    /// JSON options attribute, carries the component display name under `name`
    pub options_attribute: String,

    pub component_url_attribute: String,

    /// JSON props attribute
    pub props_attribute: String,

    /// Literal value of the props attribute when there are no props
    pub empty_props: String,

    pub renderer_url_attribute: String,

    /// Framework identifiers matched against the renderer URL, first match wins
    pub frameworks: Vec<String>,

    /// Component name used when nothing better can be derived
    pub placeholder_name: String,
}

impl Default for IslandConvention {
    fn default() -> Self {
        Self {
            island_tag: "astro-island".to_string(),
            directive_attribute: "client".to_string(),
            default_directive: "load".to_string(),
            options_attribute: "opts".to_string(),
            component_url_attribute: "component-url".to_string(),
            props_attribute: "props".to_string(),
            empty_props: "{}".to_string(),
            renderer_url_attribute: "renderer-url".to_string(),
            // preact must be tried before react
            frameworks: ["preact", "react", "vue", "svelte", "solid", "lit", "alpine"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            placeholder_name: "Unknown".to_string(),
        }
    }
}

impl IslandConvention {
    /// Check whether a (case-insensitive) tag name is the island marker
    pub fn is_island_tag(&self, tag_name: &str) -> bool {
        tag_name.eq_ignore_ascii_case(&self.island_tag)
    }

    /// First known framework whose identifier occurs in the renderer URL
    pub fn detect_framework(&self, renderer_url: &str) -> Option<&str> {
        self.frameworks
            .iter()
            .find(|framework| renderer_url.contains(framework.as_str()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_island_tag() {
        let convention = IslandConvention::default();
        assert!(convention.is_island_tag("astro-island"));
        assert!(convention.is_island_tag("ASTRO-ISLAND"));
        assert!(!convention.is_island_tag("astro-slot"));
    }

    #[test]
    fn test_detect_framework_precedence() {
        let convention = IslandConvention::default();
        assert_eq!(convention.detect_framework("/@id/@astrojs/preact/client.js"), Some("preact"));
        assert_eq!(convention.detect_framework("/@id/@astrojs/react/client.js"), Some("react"));
        assert_eq!(convention.detect_framework("/_astro/client.svelte.abc.js"), Some("svelte"));
        assert_eq!(convention.detect_framework("/_astro/client.abc.js"), None);
    }

    #[test]
    fn test_partial_config() {
        let convention: IslandConvention =
            serde_json::from_str(r#"{"placeholder_name": "Anonymous"}"#).unwrap();
        assert_eq!(convention.placeholder_name, "Anonymous");
        assert_eq!(convention.island_tag, "astro-island");
    }
}
