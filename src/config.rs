use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct DevConfig {
    #[serde(default)]
    pub registry: RegistrySection,
}

#[derive(Debug, Deserialize)]
pub struct RegistrySection {
    /// Component source root, one subdirectory per component.
    #[serde(default = "default_components_dir")]
    pub components_dir: PathBuf,
    /// Publish directory for built registry packages.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Static registry file; relative paths resolve against components_dir.
    #[serde(default)]
    pub static_registry: Option<PathBuf>,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            components_dir: default_components_dir(),
            output_dir: default_output_dir(),
            static_registry: None,
        }
    }
}

fn default_components_dir() -> PathBuf {
    PathBuf::from("app/components/ui")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("public/registry")
}

pub fn load() -> Result<DevConfig> {
    let path_override = std::env::var("ENZOUI_DEV_CONFIG").ok();
    load_from(path_override.as_deref())
}

pub fn load_from(path_override: Option<&str>) -> Result<DevConfig> {
    let Some(path) = config_path_override(path_override) else {
        return Ok(DevConfig::default());
    };

    if !path.exists() {
        return Ok(DevConfig::default());
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    let config: DevConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config at {}", path.display()))?;
    Ok(config)
}

fn config_path_override(path_override: Option<&str>) -> Option<PathBuf> {
    if let Some(raw) = path_override {
        return Some(PathBuf::from(raw));
    }
    config_path()
}

pub fn config_path() -> Option<PathBuf> {
    // Prefer the XDG-style path, but fall back to a project-local file.
    if let Some(mut dir) = dirs::config_dir() {
        dir.push("enzoui-dev");
        dir.push("config.toml");
        if dir.exists() {
            return Some(dir);
        }
    }
    Some(PathBuf::from("enzoui-dev.toml"))
}
