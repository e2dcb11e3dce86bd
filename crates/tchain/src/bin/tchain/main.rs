mod cli;

use tchain::config::LayerConfig;
use tchain::fs::OsFileSystem;
use tchain::loader::TemplateLoader;
use tchain::{ChainResolver, NavigationError, TemplateChain, TemplateType};

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("TCHAIN_LOG"))
        .with_writer(std::io::stderr)
        .init();

    for new_path in cli.directory.iter() {
        match new_path.canonicalize() {
            Err(e) => {
                eprintln!(
                    "Failed to resolve path for -C/--directory {}\n{}",
                    new_path.display(),
                    e
                );
                std::process::exit(1);
            }
            Ok(cwd) => {
                if let Err(err) = std::env::set_current_dir(&cwd) {
                    eprintln!("Failed to set work directory to {}\n{}", cwd.display(), err,);
                    std::process::exit(1);
                }

                tracing::info!(directory=%cwd.display(), "Changed working directory");
            }
        }
    }

    let command_result = match cli.command {
        cli::Command::Resolve(resolve_cli) => resolve(&cli.config, resolve_cli),
        cli::Command::Parent(parent_cli) => parent(&cli.config, parent_cli),
        cli::Command::Show(show_cli) => show(&cli.config, show_cli),
        cli::Command::Dev(dev_cli) => dev(&cli.config, dev_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn resolve(config: &std::path::Path, cli: cli::ResolveCommand) -> anyhow::Result<()> {
    let resolver = load(config)?;

    let chain = if cli.require {
        resolver.require(&cli.template)?
    } else {
        resolver.resolve(&cli.template)?
    };

    output(&cli.output, &chain)
}

pub fn parent(config: &std::path::Path, cli: cli::ParentCommand) -> anyhow::Result<()> {
    let resolver = load(config)?;
    let chain = resolver.require(&cli.template)?;

    let current = entry(&chain, &cli.template)?;

    output(&cli.output, chain.parent(current)?)
}

/// Entry for a fully-qualified name as typed on the command line
fn entry<'c>(chain: &'c TemplateChain, name: &str) -> Result<&'c TemplateType, NavigationError> {
    chain
        .get(name.trim())
        .ok_or_else(|| NavigationError::NotInChain {
            name: name.to_owned(),
        })
}

pub fn show(config: &std::path::Path, cli: cli::ShowCommand) -> anyhow::Result<()> {
    let loader = TemplateLoader::new(load(config)?);
    let loaded = loader.load(&cli.template)?;

    tracing::info!(template=%loaded.template, path=%loaded.template.path().display(), "showing");
    print!("{}", loaded.source);
    Ok(())
}

fn load(config: &std::path::Path) -> anyhow::Result<ChainResolver> {
    let config = LayerConfig::from_file(config)?;
    Ok(ChainResolver::from_config(&config, OsFileSystem)?)
}

fn output<T: serde::Serialize>(output: &cli::OutputArgs, value: &T) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), value)?,
        cli::OutputFormat::Json => serde_json::to_writer_pretty(std::io::stdout(), value)?,
    };

    Ok(())
}

/// (tchain-)developer utilities
///
/// A quick way to expose internal structures for debugging purposes
pub fn dev(config: &std::path::Path, cli: cli::DevCommand) -> anyhow::Result<()> {
    use cli::DevSubCommand::*;

    let layer_config = LayerConfig::from_file(config)?;

    match cli.command {
        Config => serde_yaml::to_writer(std::io::stdout(), &layer_config)?,
        Layers => {
            let resolver = ChainResolver::from_config(&layer_config, OsFileSystem)?;
            for provider in resolver.providers() {
                println!("{}", provider.layer());
                for directory in provider.template_directories() {
                    println!("  {}", directory.display());
                }
            }
        }
    }

    Ok(())
}
