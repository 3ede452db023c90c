use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "enzoui-dev")]
#[command(version)]
#[command(about = "EnzOUi registry developer tooling")]
pub struct Cli {
    /// Emit verbose diagnostics while commands run
    #[arg(long = "verbose", global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Registry tooling (build, inspect, validate component packages)
    #[command(subcommand)]
    Registry(RegistryCommand),
}

#[derive(Subcommand, Debug)]
pub enum RegistryCommand {
    /// Build one JSON package per component into the publish directory
    Build(RegistryBuildArgs),
    /// Check component sources without writing any output
    Doctor(RegistryDoctorArgs),
    /// List discovered components and their resolved file sets
    List(RegistryListArgs),
}

#[derive(Args, Debug)]
pub struct RegistryBuildArgs {
    /// Component source root (default: configured components_dir)
    #[arg(long = "components")]
    pub components: Option<PathBuf>,
    /// Publish directory for the built packages (default: configured output_dir)
    #[arg(long = "out")]
    pub out: Option<PathBuf>,
    /// Static registry file consulted for components without a config.json
    #[arg(long = "registry")]
    pub registry: Option<PathBuf>,
    /// Remove published packages whose source component no longer exists
    #[arg(long = "prune")]
    pub prune: bool,
}

#[derive(Args, Debug)]
pub struct RegistryDoctorArgs {
    /// Component source root (default: configured components_dir)
    #[arg(long = "components")]
    pub components: Option<PathBuf>,
    /// Static registry file consulted for components without a config.json
    #[arg(long = "registry")]
    pub registry: Option<PathBuf>,
    /// Emit a machine-readable JSON report
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RegistryListArgs {
    /// Component source root (default: configured components_dir)
    #[arg(long = "components")]
    pub components: Option<PathBuf>,
    /// Static registry file consulted for components without a config.json
    #[arg(long = "registry")]
    pub registry: Option<PathBuf>,
    /// Emit JSON instead of the table view
    #[arg(long = "json")]
    pub json: bool,
}
