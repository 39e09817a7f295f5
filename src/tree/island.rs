//! Reading hydration metadata off island elements
//!
//! Every attribute here is authored by the page, so every parse has a fallback and none of them
//! can fail the traversal.

use crate::dom::RawElement;
use crate::tree::convention::IslandConvention;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Hydration metadata of one island element
#[derive(Debug, Clone, PartialEq)]
pub struct IslandMetadata {
    pub component_name: String,
    pub client_directive: String,
    pub framework: Option<String>,
    pub props: Option<IndexMap<String, Value>>,
}

#[derive(Deserialize)]
struct IslandOptions {
    name: Option<String>,
}

impl IslandMetadata {
    /// Read the metadata of an element already classified as an island
    pub fn read(element: &RawElement, convention: &IslandConvention) -> Self {
        let client_directive = element
            .attribute(&convention.directive_attribute)
            .unwrap_or(convention.default_directive.as_str())
            .to_string();

        let component_name = declared_component_name(element, convention)
            .or_else(|| {
                element
                    .attribute(&convention.component_url_attribute)
                    .and_then(component_name_from_url)
            })
            .unwrap_or_else(|| convention.placeholder_name.clone());

        let props = element
            .attribute(&convention.props_attribute)
            .and_then(|raw| parse_props(raw, &convention.empty_props));

        let framework = element
            .attribute(&convention.renderer_url_attribute)
            .and_then(|url| convention.detect_framework(url))
            .map(str::to_string);

        Self {
            component_name,
            client_directive,
            framework,
            props,
        }
    }
}

/// Component name declared in the options attribute, if it parses
pub fn declared_component_name(element: &RawElement, convention: &IslandConvention) -> Option<String> {
    let raw = element.attribute(&convention.options_attribute)?;
    match serde_json::from_str::<IslandOptions>(raw) {
        Ok(options) => options.name,
        Err(e) => {
            log::debug!("Ignoring malformed island options {:?}: {}", raw, e);
            None
        }
    }
}

/// Last path segment of a component URL without its extension
///
/// `/src/components/Counter.tsx` becomes `Counter`.
pub fn component_name_from_url(url: &str) -> Option<String> {
    let segment = url.rsplit('/').next()?;
    let stem = match segment.rfind('.') {
        Some(dot) if dot > 0 => &segment[..dot],
        _ => segment,
    };
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

fn parse_props(raw: &str, empty: &str) -> Option<IndexMap<String, Value>> {
    if raw == empty {
        return None;
    }
    match serde_json::from_str::<IndexMap<String, Value>>(raw) {
        Ok(props) if !props.is_empty() => Some(props),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Ignoring malformed island props: {}", e);
            None
        }
    }
}
