use super::Toolchain;
use crate::configure::ConfigLog;
use crate::error::ProbeError;
use crate::probe::{CheckVerdict, CompileProbe, HeaderCheck};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const SOURCE_NAME: &str = "test.cpp";
const OBJECT_NAME: &str = "test.o";

/// Runs header checks by compiling a fragment with a real compiler.
///
/// Each check gets a scratch directory `<out>/.conf_check_<hash>` that is
/// removed once the compiler returns. Relative include dirs are taken
/// relative to `base_dir`, the directory configure was started from.
pub struct ToolchainProbe {
    toolchain: Toolchain,
    out_dir: PathBuf,
    base_dir: PathBuf,
}

impl ToolchainProbe {
    pub fn new(toolchain: Toolchain, out_dir: &Path, base_dir: &Path) -> Self {
        Self {
            toolchain,
            out_dir: out_dir.to_path_buf(),
            base_dir: base_dir.to_path_buf(),
        }
    }

    fn scratch_dir(&self, check: &HeaderCheck) -> PathBuf {
        self.out_dir.join(format!(".conf_check_{}", check_hash(check)))
    }

    /// Create the scratch directory and write the test fragment into it.
    fn prepare_scratch(&self, check: &HeaderCheck) -> Result<PathBuf, ProbeError> {
        let scratch = self.scratch_dir(check);
        fs::create_dir_all(&scratch)?;
        fs::write(scratch.join(SOURCE_NAME), check.fragment())?;
        Ok(scratch)
    }

    /// Compiler command line for a check, run from the scratch directory.
    pub fn command_line(&self, check: &HeaderCheck) -> Vec<String> {
        let mut argv = vec![self.toolchain.cxx_path.to_string_lossy().to_string()];
        argv.extend(check.flags.iter().cloned());
        argv.extend(check.include_dirs.iter().map(|d| {
            let dir = Path::new(d);
            if dir.is_relative() {
                format!("-I{}", self.base_dir.join(dir).display())
            } else {
                format!("-I{}", d)
            }
        }));
        argv.extend(
            ["-c", SOURCE_NAME, "-o", OBJECT_NAME]
                .iter()
                .map(|s| s.to_string()),
        );
        argv
    }
}

impl CompileProbe for ToolchainProbe {
    fn check_header(&mut self, check: &HeaderCheck, log: &mut ConfigLog) -> CheckVerdict {
        let scratch = match self.prepare_scratch(check) {
            Ok(scratch) => scratch,
            Err(e) => {
                log.line(&format!(
                    "could not prepare {}: {}",
                    self.scratch_dir(check).display(),
                    e
                ));
                return CheckVerdict::Failed;
            }
        };

        let argv = self.command_line(check);
        log.command(&argv);

        let verdict = match Command::new(&argv[0])
            .args(&argv[1..])
            .current_dir(&scratch)
            .output()
        {
            Ok(output) => {
                log.output(
                    &String::from_utf8_lossy(&output.stdout),
                    &String::from_utf8_lossy(&output.stderr),
                );
                if output.status.success() {
                    CheckVerdict::Passed
                } else {
                    log.line(&format!("compiler exited with {}", output.status));
                    CheckVerdict::Failed
                }
            }
            Err(e) => {
                log.line(&format!("could not run {}: {}", argv[0], e));
                CheckVerdict::Failed
            }
        };

        let _ = fs::remove_dir_all(&scratch);
        verdict
    }
}

/// First 16 hex digits of SHA-256 over everything that affects the check.
fn check_hash(check: &HeaderCheck) -> String {
    let mut hasher = Sha256::new();
    hasher.update(check.fragment().as_bytes());
    for dir in &check.include_dirs {
        hasher.update(b"\0I");
        hasher.update(dir.as_bytes());
    }
    for flag in &check.flags {
        hasher.update(b"\0F");
        hasher.update(flag.as_bytes());
    }
    hasher
        .finalize()
        .iter()
        .take(8)
        .map(|b| format!("{:02x}", b))
        .collect()
}
