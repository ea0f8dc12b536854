#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::cast_possible_truncation)]

mod commands;
mod config;
mod logging;

use clap::Parser;
use config::Config;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "behaviors")]
#[command(author, version, about = "Register Drupal behavior modules on window.Drupal.behaviors", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Loader options shared by the transforming commands.
#[derive(clap::Args, Debug)]
struct LoaderArgs {
    /// Append hot module replacement glue (same as --options '{"enableHmr":true}')
    #[arg(long, conflicts_with = "options")]
    enable_hmr: bool,

    /// Raw loader options as JSON, validated like bundler loader options
    #[arg(long, value_name = "JSON")]
    options: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Transform a single behavior module
    Transform {
        /// The behavior file (e.g. js/menu.behavior.js)
        file: PathBuf,

        /// Write output here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        outfile: Option<PathBuf>,

        #[command(flatten)]
        loader: LoaderArgs,
    },

    /// Transform every *.behavior.* module under a directory
    Build {
        /// Directory to scan for behavior modules
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output directory; files keep their path relative to the root
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,

        #[command(flatten)]
        loader: LoaderArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json(cli.json);

    if matches!(cli.command, Commands::Version) {
        return commands::version::run(config.json);
    }

    logging::init(config.verbosity, config.json);

    match cli.command {
        Commands::Version => Ok(()),
        Commands::Transform {
            file,
            outfile,
            loader,
        } => {
            let options = commands::loader_options(loader.enable_hmr, loader.options.as_deref());
            commands::transform::run(
                &config,
                commands::transform::TransformAction {
                    file: config.resolve(&file),
                    outfile: outfile.map(|p| config.resolve(&p)),
                    options,
                },
            )
        }
        Commands::Build {
            root,
            out_dir,
            loader,
        } => {
            let options = commands::loader_options(loader.enable_hmr, loader.options.as_deref());
            commands::build::run(
                &config,
                commands::build::BuildAction {
                    root: config.resolve(&root),
                    out_dir: config.resolve(&out_dir),
                    options,
                },
            )
        }
    }
}
