//! tchain cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Change the work directory
    ///
    /// Can be specified multiple times. Note that all
    /// paths on the way to the final path must exist.
    #[clap(short = 'C', long = "directory", global(true))]
    pub directory: Vec<PathBuf>,

    /// Layer configuration file
    #[clap(short = 'c', long = "config", global(true), default_value = "tchain.hcl")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the template chain of a template, most specific first
    Resolve(ResolveCommand),

    /// Print the template overridden by a fully-qualified template
    Parent(ParentCommand),

    /// Print the source of the most specific template
    Show(ShowCommand),

    /// Print debug information for development
    Dev(DevCommand),
}

#[derive(Parser, Debug)]
pub struct ResolveCommand {
    #[clap(flatten)]
    pub output: OutputArgs,

    /// Fail when no layer provides the template
    #[clap(short = 'r', long = "require")]
    pub require: bool,

    /// Template name, e.g. page/checkout.html
    pub template: String,
}

#[derive(Parser, Debug)]
pub struct ParentCommand {
    #[clap(flatten)]
    pub output: OutputArgs,

    /// Fully-qualified template name, e.g. @shop/page/checkout.html
    pub template: String,
}

#[derive(Parser, Debug)]
pub struct ShowCommand {
    /// Template name
    pub template: String,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

#[derive(Parser, Debug)]
pub struct DevCommand {
    #[command(subcommand)]
    pub command: DevSubCommand,
}

#[derive(Subcommand, Debug)]
pub enum DevSubCommand {
    /// Loaded layer configuration
    Config,
    /// Directories of each layer in lookup order
    Layers,
}
