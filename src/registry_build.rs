use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::component_resolver::{
    ComponentResolver, FileStatus, read_component_file, resolver_with_static,
};
use crate::entrypoint::synthesize_index;
use crate::manifest::{DEFAULT_PACKAGE_TYPE, INDEX_FILE, RegistryFile, RegistryPackage};

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub components_dir: PathBuf,
    pub output_dir: PathBuf,
    pub static_registry: Option<PathBuf>,
    pub prune: bool,
}

pub fn run(options: &BuildOptions) -> Result<()> {
    build_once(options)?;
    if strict_mode_enabled() {
        verify_determinism(options)?;
    }
    Ok(())
}

fn build_once(options: &BuildOptions) -> Result<Vec<String>> {
    fs::create_dir_all(&options.output_dir)
        .with_context(|| format!("failed to create {}", options.output_dir.display()))?;

    let (resolver, registry_warning) =
        resolver_with_static(&options.components_dir, options.static_registry.as_deref());
    if let Some(warning) = registry_warning {
        eprintln!("⚠ {warning}");
    }

    let names = resolver.component_names()?;
    println!(
        "Found {} components in {}",
        names.len(),
        resolver.root().display()
    );

    for name in &names {
        let package = build_component(&resolver, name)?;
        let out_path = options.output_dir.join(format!("{name}.json"));
        let rendered = serde_json::to_string_pretty(&package)
            .with_context(|| format!("failed to serialize package for {name}"))?;
        fs::write(&out_path, rendered)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        println!("✓ Registry built: {name}");
    }

    if options.prune {
        prune_stale(&options.output_dir, &names)?;
    }

    Ok(names)
}

fn build_component(resolver: &ComponentResolver, name: &str) -> Result<RegistryPackage> {
    let resolved = resolver.resolve(name)?;
    if let Some(warning) = &resolved.config_warning {
        eprintln!("⚠ {warning}");
    }

    let dir = resolver.component_dir(name);
    let mut files = Vec::new();
    for file_name in &resolved.files {
        let path = dir.join(file_name);
        match read_component_file(&path) {
            FileStatus::Readable(content) => files.push(RegistryFile {
                path: format!("{name}/{file_name}"),
                content,
                file_type: DEFAULT_PACKAGE_TYPE.to_string(),
            }),
            FileStatus::Missing => {
                // index.ts gets synthesized below, so its absence is expected.
                if file_name != INDEX_FILE {
                    eprintln!("⚠ missing file {file_name} in {name}, skipping");
                }
            }
            FileStatus::Unreadable(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read {} for component {name}", path.display())
                });
            }
        }
    }

    let index_path = format!("{name}/{INDEX_FILE}");
    if !files.iter().any(|file| file.path == index_path) {
        debug!(component = name, "synthesizing entry-point");
        files.push(RegistryFile {
            path: index_path,
            content: synthesize_index(name, &resolved.files),
            file_type: DEFAULT_PACKAGE_TYPE.to_string(),
        });
    }

    Ok(RegistryPackage {
        name: resolved.name,
        package_type: resolved.package_type,
        dependencies: resolved.dependencies,
        files,
    })
}

/// Remove published packages whose source component no longer exists. Only
/// runs behind `--prune`; the default build leaves stale output in place.
fn prune_stale(output_dir: &Path, names: &[String]) -> Result<()> {
    let keep: BTreeSet<&str> = names.iter().map(String::as_str).collect();
    let entries = fs::read_dir(output_dir)
        .with_context(|| format!("failed to read {}", output_dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", output_dir.display()))?;
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if !keep.contains(stem) {
            fs::remove_file(&path)
                .with_context(|| format!("failed to prune {}", path.display()))?;
            println!("✓ Pruned stale package: {stem}");
        }
    }
    Ok(())
}

fn strict_mode_enabled() -> bool {
    matches!(
        std::env::var("ENZOUI_DEV_STRICT").unwrap_or_default().as_str(),
        "1" | "true" | "TRUE"
    )
}

/// Rebuild into a scratch directory and byte-compare every package against
/// the primary output. Static hosting and installer update checks rely on
/// unchanged trees producing identical bytes.
fn verify_determinism(options: &BuildOptions) -> Result<()> {
    let temp_dir =
        tempfile::tempdir().context("failed to create tempdir for determinism check")?;
    let check_options = BuildOptions {
        components_dir: options.components_dir.clone(),
        output_dir: temp_dir.path().to_path_buf(),
        static_registry: options.static_registry.clone(),
        prune: false,
    };
    let names = build_once(&check_options).context("determinism build failed")?;
    for name in &names {
        let primary = options.output_dir.join(format!("{name}.json"));
        let check = temp_dir.path().join(format!("{name}.json"));
        let expected = fs::read(&primary)
            .with_context(|| format!("failed to read {} for determinism", primary.display()))?;
        let actual = fs::read(&check)
            .with_context(|| format!("failed to read {} for determinism", check.display()))?;
        if expected != actual {
            bail!("ENZOUI_DEV_STRICT detected non-deterministic output for {name}");
        }
    }
    println!("ENZOUI_DEV_STRICT verified deterministic registry output");
    Ok(())
}
