use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "libprobe.toml";

/// Optional project file (`libprobe.toml`)
#[derive(Deserialize, Debug, Default)]
pub struct ProbeConfig {
    pub build: Option<BuildConfig>,
    pub configure: Option<ConfigureConfig>,
}

#[derive(Deserialize, Debug, Default)]
pub struct BuildConfig {
    pub compiler: Option<String>,
    pub flags: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ConfigureConfig {
    pub out: Option<PathBuf>,
}

impl ProbeConfig {
    /// Load `libprobe.toml` from `dir`; a missing file means defaults.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {} - check file permissions", CONFIG_FILE))?;
        toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse {} - check for syntax errors (missing quotes, brackets)",
                CONFIG_FILE
            )
        })
    }

    pub fn compiler(&self) -> Option<&str> {
        self.build.as_ref()?.compiler.as_deref()
    }

    pub fn flags(&self) -> &[String] {
        self.build
            .as_ref()
            .and_then(|b| b.flags.as_deref())
            .unwrap_or(&[])
    }

    pub fn out_dir(&self) -> PathBuf {
        self.configure
            .as_ref()
            .and_then(|c| c.out.clone())
            .unwrap_or_else(default_out_dir)
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("build")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProbeConfig::load(dir.path()).unwrap();
        assert!(config.compiler().is_none());
        assert!(config.flags().is_empty());
        assert_eq!(config.out_dir(), PathBuf::from("build"));
    }

    #[test]
    fn test_parse_full_config() {
        let config: ProbeConfig = toml::from_str(
            r#"
[build]
compiler = "clang++"
flags = ["-std=c++17", "-Wall"]

[configure]
out = "out/conf"
"#,
        )
        .unwrap();
        assert_eq!(config.compiler(), Some("clang++"));
        assert_eq!(config.flags(), ["-std=c++17", "-Wall"]);
        assert_eq!(config.out_dir(), PathBuf::from("out/conf"));
    }

    #[test]
    fn test_syntax_error_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[build\ncompiler = ").unwrap();
        let err = ProbeConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse libprobe.toml"));
    }
}
