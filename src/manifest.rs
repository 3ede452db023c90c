use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-component configuration filename, excluded from auto-discovery.
pub const CONFIG_FILE: &str = "config.json";
/// Entry-point filename every published package must contain.
pub const INDEX_FILE: &str = "index.ts";
/// Default static registry filename, looked up next to the components.
pub const STATIC_REGISTRY_FILE: &str = "registry.json";
/// Extension of component implementation files.
pub const COMPONENT_EXT: &str = "vue";
/// Classification tag applied to packages and files unless overridden.
pub const DEFAULT_PACKAGE_TYPE: &str = "registry:ui";

/// Optional `config.json` inside a component directory. Every field may be
/// absent; an empty `files` list means "auto-discover".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentConfig {
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default, rename = "type")]
    pub package_type: Option<String>,
}

/// Static registry file declaring components centrally instead of via
/// per-directory `config.json` entries.
#[derive(Debug, Default, Deserialize)]
pub struct StaticRegistry {
    #[serde(default)]
    pub components: BTreeMap<String, ComponentConfig>,
}

/// One published package, serialized as `<output>/<name>.json`.
///
/// Field order is the wire order; installer clients rely on the shape, and
/// the build's byte-identical re-run guarantee relies on it staying stable.
#[derive(Debug, Serialize)]
pub struct RegistryPackage {
    pub name: String,
    #[serde(rename = "type")]
    pub package_type: String,
    pub dependencies: Vec<String>,
    pub files: Vec<RegistryFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistryFile {
    /// `<component-name>/<filename>`, the path the installer writes to.
    pub path: String,
    pub content: String,
    #[serde(rename = "type")]
    pub file_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_config_fills_missing_fields() {
        let config: ComponentConfig =
            serde_json::from_str(r#"{"dependencies": ["vue-sonner"]}"#).unwrap();
        assert_eq!(config.dependencies, vec!["vue-sonner"]);
        assert!(config.files.is_empty());
        assert!(config.package_type.is_none());
    }

    #[test]
    fn component_config_reads_type_key() {
        let config: ComponentConfig =
            serde_json::from_str(r#"{"type": "registry:block", "files": ["A.vue"]}"#).unwrap();
        assert_eq!(config.package_type.as_deref(), Some("registry:block"));
        assert_eq!(config.files, vec!["A.vue"]);
    }

    #[test]
    fn static_registry_parses_component_map() {
        let registry: StaticRegistry = serde_json::from_str(
            r#"{"components": {"toast": {"files": ["Toast.vue"], "dependencies": ["vue-sonner"]}}}"#,
        )
        .unwrap();
        let toast = registry.components.get("toast").unwrap();
        assert_eq!(toast.files, vec!["Toast.vue"]);
        assert_eq!(toast.dependencies, vec!["vue-sonner"]);
    }

    #[test]
    fn package_serializes_in_wire_order() {
        let package = RegistryPackage {
            name: "alpha".into(),
            package_type: DEFAULT_PACKAGE_TYPE.into(),
            dependencies: Vec::new(),
            files: vec![RegistryFile {
                path: "alpha/Alpha.vue".into(),
                content: "<template />\n".into(),
                file_type: DEFAULT_PACKAGE_TYPE.into(),
            }],
        };
        let json = serde_json::to_string(&package).unwrap();
        let name_at = json.find("\"name\"").unwrap();
        let type_at = json.find("\"type\"").unwrap();
        let deps_at = json.find("\"dependencies\"").unwrap();
        let files_at = json.find("\"files\"").unwrap();
        assert!(name_at < type_at && type_at < deps_at && deps_at < files_at);
    }
}
