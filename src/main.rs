use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use enzoui_dev::cli::{Cli, Command, RegistryCommand};
use enzoui_dev::config;
use enzoui_dev::registry_build::{self, BuildOptions};
use enzoui_dev::registry_cli::{self, InspectOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .try_init();
    }

    match cli.command {
        Command::Registry(command) => match command {
            RegistryCommand::Build(args) => {
                let registry = config::load()?.registry;
                let components_dir = args.components.unwrap_or(registry.components_dir);
                let static_registry =
                    static_registry_path(args.registry, registry.static_registry, &components_dir);
                registry_build::run(&BuildOptions {
                    components_dir,
                    output_dir: args.out.unwrap_or(registry.output_dir),
                    static_registry,
                    prune: args.prune,
                })
            }
            RegistryCommand::Doctor(args) => {
                let registry = config::load()?.registry;
                let components_dir = args.components.unwrap_or(registry.components_dir);
                let static_registry =
                    static_registry_path(args.registry, registry.static_registry, &components_dir);
                registry_cli::run_doctor(&InspectOptions {
                    components_dir,
                    static_registry,
                    json: args.json,
                })
            }
            RegistryCommand::List(args) => {
                let registry = config::load()?.registry;
                let components_dir = args.components.unwrap_or(registry.components_dir);
                let static_registry =
                    static_registry_path(args.registry, registry.static_registry, &components_dir);
                registry_cli::run_list(&InspectOptions {
                    components_dir,
                    static_registry,
                    json: args.json,
                })
            }
        },
    }
}

/// CLI flag wins as given; a configured path resolves against the component
/// root (absolute configured paths pass through untouched).
fn static_registry_path(
    flag: Option<PathBuf>,
    configured: Option<PathBuf>,
    components_dir: &Path,
) -> Option<PathBuf> {
    flag.or_else(|| configured.map(|path| components_dir.join(path)))
}
