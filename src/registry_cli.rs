use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::component_resolver::{
    ComponentResolver, FileStatus, read_component_file, resolver_with_static,
};
use crate::entrypoint::synthesize_index;
use crate::manifest::INDEX_FILE;

#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub components_dir: PathBuf,
    pub static_registry: Option<PathBuf>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ListEntry {
    name: String,
    #[serde(rename = "type")]
    package_type: String,
    dependencies: Vec<String>,
    files: Vec<String>,
}

pub fn run_list(options: &InspectOptions) -> Result<()> {
    let (resolver, registry_warning) =
        resolver_with_static(&options.components_dir, options.static_registry.as_deref());
    if let Some(warning) = registry_warning {
        eprintln!("⚠ {warning}");
    }

    let mut entries = Vec::new();
    for name in resolver.component_names()? {
        let resolved = resolver.resolve(&name)?;
        if let Some(warning) = &resolved.config_warning {
            eprintln!("⚠ {warning}");
        }
        entries.push(ListEntry {
            name: resolved.name,
            package_type: resolved.package_type,
            dependencies: resolved.dependencies,
            files: resolved.files,
        });
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        println!("{} ({} files)", entry.name, entry.files.len());
        if !entry.dependencies.is_empty() {
            println!("  dependencies: {}", entry.dependencies.join(", "));
        }
    }
    println!("{} components", entries.len());
    Ok(())
}

#[derive(Debug, Serialize)]
struct Finding {
    severity: Severity,
    message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Serialize)]
struct ComponentReport {
    name: String,
    findings: Vec<Finding>,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    components: Vec<ComponentReport>,
    warnings: usize,
    errors: usize,
}

/// Dry-run the resolution pipeline and report what a build would warn about
/// or abort on, without writing anything.
pub fn run_doctor(options: &InspectOptions) -> Result<()> {
    let (resolver, registry_warning) =
        resolver_with_static(&options.components_dir, options.static_registry.as_deref());
    if let Some(warning) = registry_warning {
        eprintln!("⚠ {warning}");
    }

    let mut components = Vec::new();
    for name in resolver.component_names()? {
        components.push(check_component(&resolver, &name)?);
    }

    let warnings = count_findings(&components, Severity::Warning);
    let errors = count_findings(&components, Severity::Error);
    let report = DoctorReport {
        components,
        warnings,
        errors,
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.errors > 0 {
        bail!("registry doctor found {} fatal problem(s)", report.errors);
    }
    Ok(())
}

fn check_component(resolver: &ComponentResolver, name: &str) -> Result<ComponentReport> {
    let resolved = resolver.resolve(name)?;
    let mut findings = Vec::new();
    if let Some(warning) = &resolved.config_warning {
        findings.push(Finding {
            severity: Severity::Warning,
            message: warning.clone(),
        });
    }

    let dir = resolver.component_dir(name);
    let mut has_index = false;
    for file_name in &resolved.files {
        let path = dir.join(file_name);
        match read_component_file(&path) {
            FileStatus::Readable(_) => {
                if file_name == INDEX_FILE {
                    has_index = true;
                }
            }
            FileStatus::Missing => {
                if file_name != INDEX_FILE {
                    findings.push(Finding {
                        severity: Severity::Warning,
                        message: format!("declared file {file_name} is missing"),
                    });
                }
            }
            FileStatus::Unreadable(err) => findings.push(Finding {
                severity: Severity::Error,
                message: format!("unreadable file {file_name}: {err} (build would abort)"),
            }),
        }
    }

    if !has_index && synthesize_index(name, &resolved.files).starts_with("// Warning:") {
        findings.push(Finding {
            severity: Severity::Warning,
            message: "no entry-point derivable, build would emit a placeholder".to_string(),
        });
    }

    Ok(ComponentReport {
        name: name.to_string(),
        findings,
    })
}

fn count_findings(components: &[ComponentReport], severity: Severity) -> usize {
    components
        .iter()
        .flat_map(|component| &component.findings)
        .filter(|finding| finding.severity == severity)
        .count()
}

fn print_report(report: &DoctorReport) {
    for component in &report.components {
        if component.findings.is_empty() {
            continue;
        }
        println!("{}:", component.name);
        for finding in &component.findings {
            let marker = match finding.severity {
                Severity::Warning => "⚠",
                Severity::Error => "✗",
            };
            println!("  {marker} {}", finding.message);
        }
    }
    println!(
        "✓ {} components checked, {} warning(s), {} error(s)",
        report.components.len(),
        report.warnings,
        report.errors
    );
}
