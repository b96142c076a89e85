//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use serpent_projects::types::DevFeature;

/// Serpent - Python project scaffolding and dependency management
#[derive(Parser, Debug)]
#[command(name = "serpent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "PATH")]
    pub directory: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project in the current directory
    #[command(visible_alias = "create")]
    New(NewArgs),

    /// Run the project
    Run(RunArgs),

    /// Dependency management
    #[command(subcommand, visible_aliases = ["dep", "dependency", "dependencies"])]
    Deps(DepsCommands),

    /// Template management
    #[command(subcommand, visible_aliases = ["templates", "templ"])]
    Template(TemplateCommands),
}

// New command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Template to create the project from (see `serpent template list`)
    pub template: String,

    /// Development feature to enable (globalcode)
    #[arg(long = "development-feature", value_name = "FEATURE")]
    pub development_feature: Option<DevFeature>,
}

// Run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Arguments passed to the program
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

// Deps commands
#[derive(Subcommand, Debug)]
pub enum DepsCommands {
    /// Install dependencies and add them to the project
    Add(PackageArgs),

    /// Uninstall dependencies and remove them from the project
    Remove(PackageArgs),

    /// Upgrade dependencies (all manifest dependencies when none are given)
    Upgrade(UpgradeArgs),

    /// List the project's dependencies
    List,
}

#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Package names or paths to local projects
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Package names
    pub names: Vec<String>,
}

// Template commands
#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// Install template packs by name or from a local path
    Install(TemplateArgs),

    /// Remove installed template packs
    Remove(TemplateArgs),

    /// List available templates
    List,
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Template names or paths to local template projects
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_new_with_dev_feature() {
        let cli = Cli::parse_from(["serpent", "create", "console", "--development-feature", "globalcode"]);
        match cli.command {
            Commands::New(args) => {
                assert_eq!(args.template, "console");
                assert_eq!(args.development_feature, Some(DevFeature::GlobalCode));
            }
            other => panic!("Expected New, got: {:?}", other),
        }
    }

    #[test]
    fn test_run_passes_hyphenated_args() {
        let cli = Cli::parse_from(["serpent", "run", "input.txt", "--port", "8080", "-v"]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.args, vec!["input.txt", "--port", "8080", "-v"])
            }
            other => panic!("Expected Run, got: {:?}", other),
        }
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::parse_from(["serpent", "dependencies", "list"]);
        assert!(matches!(cli.command, Commands::Deps(DepsCommands::List)));

        let cli = Cli::parse_from(["serpent", "templ", "install", "flask"]);
        assert!(matches!(
            cli.command,
            Commands::Template(TemplateCommands::Install(_))
        ));
    }

    #[test]
    fn test_directory_flag() {
        let cli = Cli::parse_from(["serpent", "-C", "/work/app", "deps", "list"]);
        assert_eq!(cli.directory, Some(Utf8PathBuf::from("/work/app")));
    }
}
