//! `libprobe configure`
//!
//! Loads `libprobe.toml`, merges pre-resolved dependencies, runs every
//! registered tool and saves the environment to `<out>/c4che/_cache.toml`.

use anyhow::{Context, Result, bail};
use colored::*;
use std::path::{Path, PathBuf};

use crate::config::ProbeConfig;
use crate::configure::{ConfigContext, ConfigLog, ConsoleStatus, Tone};
use crate::env::ConfigEnv;
use crate::options::OptionValues;
use crate::probe::{CheckVerdict, CompileProbe, HeaderCheck, TOOLS};
use crate::resolved::ResolvedDeps;
use crate::toolchain::{self, CompilerPreference, ToolchainProbe};

#[derive(Debug, Clone, Default)]
pub struct ConfigureArgs {
    /// Output directory; falls back to `libprobe.toml`, then `build`
    pub out: Option<PathBuf>,
    /// TOML file with include paths from a dependency manager
    pub resolved: Option<PathBuf>,
    /// Compiler override
    pub compiler: Option<String>,
    /// Report missing libraries without failing
    pub optional: bool,
    pub verbose: bool,
}

/// Stand-in used when every library was resolved externally.
struct NoCompiler;

impl CompileProbe for NoCompiler {
    fn check_header(&mut self, _check: &HeaderCheck, log: &mut ConfigLog) -> CheckVerdict {
        log.line("no C++ compiler was configured");
        CheckVerdict::Failed
    }
}

/// Run `libprobe configure` in `project_dir`.
pub fn run_configure(
    project_dir: &Path,
    args: &ConfigureArgs,
    options: OptionValues,
) -> Result<()> {
    let config = ProbeConfig::load(project_dir)?;
    let out = project_dir.join(args.out.clone().unwrap_or_else(|| config.out_dir()));

    let mut status = ConsoleStatus;
    let env = initial_env(&config, args.resolved.as_deref())?;
    let log = ConfigLog::create(&out, args.verbose)?;
    let mut ctx = ConfigContext::new(env, options, log, &mut status);

    ctx.start_msg("Setting top to");
    ctx.end_msg(&project_dir.display().to_string(), Tone::Good);
    ctx.start_msg("Setting out to");
    ctx.end_msg(&out.display().to_string(), Tone::Good);

    let needs_compiler = TOOLS
        .iter()
        .any(|t| ctx.env.include_paths(t.spec.uselib).is_empty());
    let mut compiler: Box<dyn CompileProbe> = if needs_compiler {
        let preference = args
            .compiler
            .as_deref()
            .or(config.compiler())
            .map(CompilerPreference::parse);
        ctx.start_msg("Checking for C++ compiler");
        match toolchain::detect_toolchain(preference.as_ref()) {
            Ok(tc) => {
                ctx.end_msg(
                    &format!("{} ({})", tc.cxx_path.display(), tc.version),
                    Tone::Good,
                );
                Box::new(ToolchainProbe::new(tc, &out, project_dir))
            }
            Err(e) => {
                ctx.end_msg("not found", Tone::Warn);
                return Err(e).context("A C++ compiler is required to probe libraries");
            }
        }
    } else {
        Box::new(NoCompiler)
    };

    let mut missing = Vec::new();
    for tool in TOOLS {
        let result = (tool.configure)(&mut ctx, &mut *compiler)?;
        if !result.is_available() {
            missing.push(tool.spec);
        }
    }

    let log_path = ctx.log.path().map(Path::to_path_buf);
    let env = ctx.into_env();
    env.save(&out)?;

    for spec in &missing {
        let marker = if args.optional { "!".yellow() } else { "x".red() };
        println!(
            "{} Library {} not found (pass {} to point at its installation)",
            marker,
            spec.name.bold(),
            format!("--{}", spec.root_flag).cyan()
        );
    }
    if !missing.is_empty() && !args.optional {
        if let Some(path) = log_path {
            println!("   {} See {} for details", "💡".yellow(), path.display());
        }
        bail!(
            "configuration failed: {} required librar{} not found",
            missing.len(),
            if missing.len() == 1 { "y" } else { "ies" }
        );
    }

    println!("{} 'configure' finished successfully", "✓".green());
    Ok(())
}

/// Fresh environment for a run: project flags plus resolved dependencies.
fn initial_env(config: &ProbeConfig, resolved: Option<&Path>) -> Result<ConfigEnv> {
    let mut env = ConfigEnv {
        cxx_flags: config.flags().to_vec(),
        ..ConfigEnv::default()
    };
    if let Some(path) = resolved {
        ResolvedDeps::load(path)?.apply(&mut env);
    }
    Ok(env)
}
