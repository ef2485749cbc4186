use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const LOG_FILE: &str = "config.log";

/// Plain-text record of a configure run (`<out>/config.log`).
///
/// Writes are best effort: a log that cannot be written never fails a probe.
#[derive(Debug, Default)]
pub struct ConfigLog {
    file: Option<File>,
    path: Option<PathBuf>,
    verbose: bool,
}

impl ConfigLog {
    /// Log that discards everything
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn create(out_dir: &Path, verbose: bool) -> Result<Self> {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create {}", out_dir.display()))?;
        let path = out_dir.join(LOG_FILE);
        let mut file =
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        writeln!(file, "# libprobe {} configure log", env!("CARGO_PKG_VERSION"))?;
        writeln!(file, "# cwd: {}", std::env::current_dir()?.display())?;
        Ok(Self {
            file: Some(file),
            path: Some(path),
            verbose,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn line(&mut self, text: &str) {
        if let Some(file) = self.file.as_mut() {
            let _ = writeln!(file, "{}", text);
        }
    }

    /// Record a command line; echoed to the terminal in verbose mode.
    pub fn command(&mut self, argv: &[String]) {
        let joined = argv.join(" ");
        if self.verbose {
            println!("\n   $ {}", joined);
        }
        self.line(&format!("==>\n{}", joined));
    }

    pub fn output(&mut self, stdout: &str, stderr: &str) {
        if !stdout.trim().is_empty() {
            self.line(&format!("out: {}", stdout.trim_end()));
        }
        if !stderr.trim().is_empty() {
            self.line(&format!("err: {}", stderr.trim_end()));
        }
    }
}
