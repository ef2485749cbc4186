//! Toolchain discovery and compile checks
//!
//! Finds a C++ compiler on PATH (clang++ first, then g++) unless the user
//! named one, and runs header checks with it.

mod check;
pub mod types;

pub use check::ToolchainProbe;
pub use types::{CompilerPreference, CompilerType, Toolchain, ToolchainError};

use std::path::{Path, PathBuf};
use std::process::Command;

/// Detect the C++ compiler to probe with
pub fn detect_toolchain(
    preferred: Option<&CompilerPreference>,
) -> Result<Toolchain, ToolchainError> {
    let candidates = match preferred {
        Some(CompilerPreference::Command(cmd)) => {
            return from_command(cmd).ok_or_else(|| {
                ToolchainError::NotFound(format!("'{}' is not an executable compiler", cmd))
            });
        }
        Some(CompilerPreference::Family(CompilerType::GCC)) => {
            [CompilerType::GCC, CompilerType::Clang]
        }
        _ => [CompilerType::Clang, CompilerType::GCC],
    };

    for compiler_type in candidates {
        if let Some(cxx_path) = find_compiler(compiler_type.cxx_command()) {
            return Ok(Toolchain {
                compiler_type: Some(compiler_type),
                version: version_of(&cxx_path).unwrap_or_else(|| "unknown".to_string()),
                cxx_path,
            });
        }
    }

    Err(ToolchainError::NotFound(
        "No C++ compiler found. Please install clang or gcc.".to_string(),
    ))
}

fn from_command(cmd: &str) -> Option<Toolchain> {
    let cxx_path = find_compiler(cmd)?;
    let version = version_of(&cxx_path)?;
    let lower = version.to_lowercase();
    let compiler_type = if lower.contains("clang") {
        Some(CompilerType::Clang)
    } else if lower.contains("g++") || lower.contains("gcc") {
        Some(CompilerType::GCC)
    } else {
        None
    };
    Some(Toolchain {
        compiler_type,
        cxx_path,
        version,
    })
}

/// PATH lookup, falling back to running the bare command when no `which`
/// is installed.
fn find_compiler(cmd: &str) -> Option<PathBuf> {
    locate(cmd).or_else(|| version_of(Path::new(cmd)).map(|_| PathBuf::from(cmd)))
}

/// Resolve a command on PATH
fn locate(cmd: &str) -> Option<PathBuf> {
    let finder = if cfg!(windows) { "where" } else { "which" };
    let output = Command::new(finder).arg(cmd).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let path_str = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()?
        .trim()
        .to_string();
    if path_str.is_empty() {
        None
    } else {
        Some(PathBuf::from(path_str))
    }
}

fn version_of(cxx_path: &Path) -> Option<String> {
    let output = Command::new(cxx_path).arg("--version").output().ok()?;
    Some(
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("unknown")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_command_is_not_found() {
        let pref = CompilerPreference::Command("libprobe-no-such-compiler".to_string());
        let err = detect_toolchain(Some(&pref)).unwrap_err();
        assert!(matches!(err, ToolchainError::NotFound(_)));
        assert!(err.to_string().contains("libprobe-no-such-compiler"));
    }
}
