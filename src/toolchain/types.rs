use std::path::PathBuf;

/// Supported compiler families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum CompilerType {
    /// Clang/LLVM (clang++)
    Clang,
    /// GNU Compiler Collection (g++)
    GCC,
}

impl CompilerType {
    pub fn cxx_command(self) -> &'static str {
        match self {
            CompilerType::Clang => "clang++",
            CompilerType::GCC => "g++",
        }
    }
}

/// Which compiler the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilerPreference {
    Family(CompilerType),
    /// A command name or path used as-is (`g++-13`, `/opt/llvm/bin/clang++`)
    Command(String),
}

impl CompilerPreference {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "clang" | "clang++" => CompilerPreference::Family(CompilerType::Clang),
            "gcc" | "g++" => CompilerPreference::Family(CompilerType::GCC),
            _ => CompilerPreference::Command(value.to_string()),
        }
    }
}

/// A C++ compiler able to run header checks
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// `None` for compilers given by command that do not identify themselves
    pub compiler_type: Option<CompilerType>,
    /// Absolute path (or command name) of the C++ compiler
    pub cxx_path: PathBuf,
    /// First line of `--version`
    pub version: String,
}

/// Error type for toolchain operations
#[derive(Debug)]
pub enum ToolchainError {
    /// No suitable toolchain found
    NotFound(String),
}

impl std::fmt::Display for ToolchainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolchainError::NotFound(msg) => write!(f, "Toolchain not found: {}", msg),
        }
    }
}

impl std::error::Error for ToolchainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preference() {
        assert_eq!(
            CompilerPreference::parse("Clang++"),
            CompilerPreference::Family(CompilerType::Clang)
        );
        assert_eq!(
            CompilerPreference::parse("gcc"),
            CompilerPreference::Family(CompilerType::GCC)
        );
        assert_eq!(
            CompilerPreference::parse("g++-13"),
            CompilerPreference::Command("g++-13".to_string())
        );
    }
}
