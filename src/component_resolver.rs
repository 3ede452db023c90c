use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::manifest::{
    CONFIG_FILE, ComponentConfig, DEFAULT_PACKAGE_TYPE, STATIC_REGISTRY_FILE, StaticRegistry,
};

/// One component after configuration and file-set resolution, before any
/// file content has been read.
#[derive(Debug, Clone)]
pub struct ResolvedComponent {
    pub name: String,
    pub package_type: String,
    pub dependencies: Vec<String>,
    /// Resolved file names relative to the component directory. Declared
    /// names pass through verbatim and may not exist on disk.
    pub files: Vec<String>,
    pub config_warning: Option<String>,
}

/// Outcome of reading one resolved file.
#[derive(Debug)]
pub enum FileStatus {
    Readable(String),
    Missing,
    Unreadable(std::io::Error),
}

pub struct ComponentResolver {
    root: PathBuf,
    static_registry: StaticRegistry,
}

/// Build a resolver, loading the static registry next to the component root
/// unless an explicit path overrides it. Returns a warning instead of
/// failing when the registry file is unusable; a build must not abort for
/// one bad declaration file.
pub fn resolver_with_static(
    components_dir: &Path,
    static_override: Option<&Path>,
) -> (ComponentResolver, Option<String>) {
    let (path, explicit) = match static_override {
        Some(path) => (path.to_path_buf(), true),
        None => (components_dir.join(STATIC_REGISTRY_FILE), false),
    };
    let (static_registry, warning) = load_static_registry(&path, explicit);
    (
        ComponentResolver::new(components_dir, static_registry),
        warning,
    )
}

fn load_static_registry(path: &Path, explicit: bool) -> (StaticRegistry, Option<String>) {
    if !path.exists() {
        let warning = explicit
            .then(|| format!("static registry {} not found, ignoring", path.display()));
        return (StaticRegistry::default(), warning);
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            let warning = format!("failed to read static registry {}: {err}", path.display());
            return (StaticRegistry::default(), Some(warning));
        }
    };
    match serde_json::from_str(&raw) {
        Ok(registry) => (registry, None),
        Err(err) => {
            let warning = format!("invalid static registry {}: {err}", path.display());
            (StaticRegistry::default(), Some(warning))
        }
    }
}

impl ComponentResolver {
    pub fn new(root: impl Into<PathBuf>, static_registry: StaticRegistry) -> Self {
        Self {
            root: root.into(),
            static_registry,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn component_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Immediate subdirectories of the component root, sorted by name so
    /// processing order (and therefore output) is stable across runs.
    pub fn component_names(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to read component root {}", self.root.display()))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("failed to read entry in {}", self.root.display()))?;
            let file_type = entry.file_type().with_context(|| {
                format!("failed to stat {}", entry.path().display())
            })?;
            if file_type.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Resolve one component's configuration and file set.
    ///
    /// Configuration comes from the component's `config.json` when present,
    /// else from the static registry, else defaults. A malformed
    /// `config.json` is downgraded to a warning and defaults apply.
    pub fn resolve(&self, name: &str) -> Result<ResolvedComponent> {
        let dir = self.component_dir(name);
        let (config, config_warning) = self.resolve_config(name, &dir);

        let files = if config.files.is_empty() {
            self.discover_files(&dir)?
        } else {
            config.files.clone()
        };

        debug!(component = name, files = files.len(), "resolved component");

        Ok(ResolvedComponent {
            name: name.to_string(),
            package_type: config
                .package_type
                .unwrap_or_else(|| DEFAULT_PACKAGE_TYPE.to_string()),
            dependencies: config.dependencies,
            files,
            config_warning,
        })
    }

    fn resolve_config(&self, name: &str, dir: &Path) -> (ComponentConfig, Option<String>) {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return match fs::read_to_string(&config_path)
                .map_err(|err| err.to_string())
                .and_then(|raw| serde_json::from_str(&raw).map_err(|err| err.to_string()))
            {
                Ok(config) => (config, None),
                Err(err) => (
                    ComponentConfig::default(),
                    Some(format!("invalid {CONFIG_FILE} for {name}: {err}")),
                ),
            };
        }
        if let Some(entry) = self.static_registry.components.get(name) {
            return (entry.clone(), None);
        }
        (ComponentConfig::default(), None)
    }

    /// Every direct entry in the component directory except the config file
    /// and hidden (dot-prefixed) names, sorted.
    fn discover_files(&self, dir: &Path) -> Result<Vec<String>> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("failed to read component directory {}", dir.display()))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry =
                entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name == CONFIG_FILE || file_name.starts_with('.') {
                continue;
            }
            files.push(file_name);
        }
        files.sort();
        Ok(files)
    }
}

/// Read one resolved file, distinguishing "not there" (recoverable, the
/// caller skips it) from "there but unreadable" (fatal for a build).
pub fn read_component_file(path: &Path) -> FileStatus {
    if !path.exists() {
        return FileStatus::Missing;
    }
    match fs::read_to_string(path) {
        Ok(content) => FileStatus::Readable(content),
        Err(err) => FileStatus::Unreadable(err),
    }
}
