use crate::error::ProbeError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CACHE_DIR: &str = "c4che";
const CACHE_FILE: &str = "_cache.toml";

/// How a uselib became (un)available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// An external resolver supplied the include paths
    AlreadySatisfied,
    /// The header compiled against the configured root
    Found,
    /// The compile check failed
    NotFound,
}

impl Outcome {
    pub fn is_available(self) -> bool {
        !matches!(self, Outcome::NotFound)
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::AlreadySatisfied => "already satisfied",
            Outcome::Found => "found",
            Outcome::NotFound => "not found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UselibRecord {
    pub outcome: Outcome,
    /// Resolver that satisfied the uselib, for `AlreadySatisfied`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Include directories the outcome was obtained with
    #[serde(default)]
    pub includes: Vec<String>,
}

/// Configuration environment of one configure run.
///
/// Passed by `&mut` into every probe; saved under `<out>/c4che/` so later
/// build steps can query uselibs without probing again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEnv {
    /// Dependency manager that pre-resolved include paths, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolver: Option<String>,
    #[serde(default)]
    pub cxx_flags: Vec<String>,
    #[serde(default)]
    pub defines: BTreeMap<String, String>,
    #[serde(default)]
    pub includes: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub uselibs: BTreeMap<String, UselibRecord>,
}

impl ConfigEnv {
    pub fn cache_path(out_dir: &Path) -> PathBuf {
        out_dir.join(CACHE_DIR).join(CACHE_FILE)
    }

    /// Load the saved environment, or an empty one if nothing was saved yet.
    pub fn load(out_dir: &Path) -> Result<Self> {
        let path = Self::cache_path(out_dir);
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, out_dir: &Path) -> Result<PathBuf> {
        let path = Self::cache_path(out_dir);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Include paths known for a uselib; empty when none were registered.
    pub fn include_paths(&self, uselib: &str) -> &[String] {
        self.includes.get(uselib).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add_include(&mut self, uselib: &str, dir: &str) {
        let paths = self.includes.entry(uselib.to_string()).or_default();
        if !paths.iter().any(|p| p == dir) {
            paths.push(dir.to_string());
        }
    }

    pub fn define(&mut self, name: &str, value: &str) {
        self.defines.insert(name.to_string(), value.to_string());
    }

    /// Store the outcome of a probe. A uselib is recorded at most once per run.
    pub fn record(&mut self, uselib: &str, record: UselibRecord) -> Result<(), ProbeError> {
        if self.uselibs.contains_key(uselib) {
            return Err(ProbeError::AlreadyRecorded(uselib.to_string()));
        }
        self.uselibs.insert(uselib.to_string(), record);
        Ok(())
    }

    pub fn uselib(&self, name: &str) -> Option<&UselibRecord> {
        self.uselibs.get(name)
    }

    pub fn is_available(&self, uselib: &str) -> bool {
        self.uselib(uselib)
            .is_some_and(|r| r.outcome.is_available())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(dir: &str) -> UselibRecord {
        UselibRecord {
            outcome: Outcome::Found,
            source: None,
            includes: vec![dir.to_string()],
        }
    }

    #[test]
    fn test_record_once_per_uselib() {
        let mut env = ConfigEnv::default();
        env.record("jsonformoderncpp", found("/usr/include")).unwrap();
        let err = env
            .record("jsonformoderncpp", found("/opt/include"))
            .unwrap_err();
        assert!(matches!(err, ProbeError::AlreadyRecorded(_)));
        assert_eq!(
            env.uselib("jsonformoderncpp").unwrap().includes,
            vec!["/usr/include".to_string()]
        );
    }

    #[test]
    fn test_is_available() {
        let mut env = ConfigEnv::default();
        assert!(!env.is_available("jsonformoderncpp"));
        env.record(
            "jsonformoderncpp",
            UselibRecord {
                outcome: Outcome::NotFound,
                source: None,
                includes: vec![],
            },
        )
        .unwrap();
        assert!(!env.is_available("jsonformoderncpp"));

        env.record(
            "fmt",
            UselibRecord {
                outcome: Outcome::AlreadySatisfied,
                source: Some("conan".to_string()),
                includes: vec![],
            },
        )
        .unwrap();
        assert!(env.is_available("fmt"));
    }

    #[test]
    fn test_add_include_skips_duplicates() {
        let mut env = ConfigEnv::default();
        env.add_include("jsonformoderncpp", "/usr/include");
        env.add_include("jsonformoderncpp", "/usr/include");
        assert_eq!(env.include_paths("jsonformoderncpp").len(), 1);
        assert!(env.include_paths("fmt").is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = ConfigEnv::default();
        env.cxx_flags.push("-std=c++17".to_string());
        env.define("HAVE_NLOHMANN_JSON_HPP", "1");
        env.add_include("jsonformoderncpp", "/opt/json/include");
        env.record("jsonformoderncpp", found("/opt/json/include"))
            .unwrap();

        let path = env.save(dir.path()).unwrap();
        assert!(path.ends_with("c4che/_cache.toml"));

        let loaded = ConfigEnv::load(dir.path()).unwrap();
        assert_eq!(loaded, env);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let env = ConfigEnv::load(dir.path()).unwrap();
        assert!(env.uselibs.is_empty());
    }

    #[test]
    fn test_parse_saved_cache() {
        let toml_str = r#"
cxx_flags = []

[includes]
jsonformoderncpp = ["/home/u/.conan/data/json/include"]

[uselibs.jsonformoderncpp]
outcome = "already_satisfied"
source = "conan"
"#;
        let env: ConfigEnv = toml::from_str(toml_str).unwrap();
        let record = env.uselib("jsonformoderncpp").unwrap();
        assert_eq!(record.outcome, Outcome::AlreadySatisfied);
        assert_eq!(record.source.as_deref(), Some("conan"));
        assert!(record.includes.is_empty());
    }
}
