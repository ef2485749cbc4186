//! # libprobe CLI Entry Point
//!
//! Parses arguments with clap and routes commands to the handlers in
//! [`libprobe::commands`]. Library tools add their own options to the
//! `configure` subcommand before parsing.

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use libprobe::commands;
use libprobe::commands::configure::ConfigureArgs;
use libprobe::config::ProbeConfig;
use libprobe::options::{OptionSchema, OptionValues};
use libprobe::probe;

#[derive(Parser)]
#[command(name = "libprobe")]
#[command(about = "Configure-time probes for header-only C++ libraries", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe every registered library and save the results
    Configure {
        /// Output directory for the cache and config.log [default: build]
        #[arg(long)]
        out: Option<PathBuf>,
        /// Include paths pre-resolved by a dependency manager (TOML)
        #[arg(long)]
        resolved: Option<PathBuf>,
        /// C++ compiler to probe with (clang, gcc, or a command)
        #[arg(long)]
        compiler: Option<String>,
        /// Do not fail when a library is missing
        #[arg(long)]
        optional: bool,
        /// Show compiler command lines
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show the recorded uselibs of the last configure run
    Status {
        /// Output directory of the configure run [default: build]
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn command(schema: &OptionSchema) -> clap::Command {
    Cli::command().mut_subcommand("configure", |c| schema.augment(c))
}

fn main() -> Result<()> {
    let schema = probe::registered_options()?;
    let matches = command(&schema).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let cwd = std::env::current_dir().context("Could not determine current directory")?;

    match cli.command {
        Some(Commands::Configure {
            out,
            resolved,
            compiler,
            optional,
            verbose,
        }) => {
            let options = matches
                .subcommand_matches("configure")
                .map(|m| OptionValues::from_matches(&schema, m))
                .unwrap_or_else(|| OptionValues::defaults(&schema));
            let args = ConfigureArgs {
                out,
                resolved,
                compiler,
                optional,
                verbose,
            };
            commands::configure::run_configure(&cwd, &args, options)
        }

        Some(Commands::Status { out, json }) => {
            let out = match out {
                Some(out) => out,
                None => ProbeConfig::load(&cwd)?.out_dir(),
            };
            commands::status::run_status(&cwd.join(out), json)
        }

        Some(Commands::Completion { shell }) => {
            let mut cmd = command(&schema);
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }

        None => {
            command(&schema).print_help()?;
            Ok(())
        }
    }
}
