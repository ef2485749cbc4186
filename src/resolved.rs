//! Include paths handed over by an external dependency manager.
//!
//! ```toml
//! generator = "conan"
//!
//! [includes]
//! jsonformoderncpp = ["/home/me/.conan/data/nlohmann_json/3.11.2/_/_/package/abc/include"]
//! ```

use crate::env::ConfigEnv;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug, Default)]
pub struct ResolvedDeps {
    #[serde(default = "default_generator")]
    pub generator: String,
    #[serde(default)]
    pub includes: BTreeMap<String, Vec<String>>,
}

fn default_generator() -> String {
    "conan".to_string()
}

impl ResolvedDeps {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read resolved dependencies {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse resolved dependencies {}", path.display()))
    }

    /// Copy every non-empty include list into the environment.
    pub fn apply(&self, env: &mut ConfigEnv) {
        env.resolver = Some(self.generator.clone());
        for (uselib, paths) in &self.includes {
            for path in paths.iter().filter(|p| !p.is_empty()) {
                env.add_include(uselib, path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_defaults_to_conan() {
        let deps: ResolvedDeps = toml::from_str("[includes]\nfmt = [\"/x/include\"]\n").unwrap();
        assert_eq!(deps.generator, "conan");
        assert_eq!(deps.includes["fmt"], vec!["/x/include".to_string()]);
    }

    #[test]
    fn test_apply_skips_empty_entries() {
        let deps: ResolvedDeps = toml::from_str(
            r#"
[includes]
jsonformoderncpp = ["", "/conan/json/include"]
fmt = []
"#,
        )
        .unwrap();
        let mut env = ConfigEnv::default();
        deps.apply(&mut env);
        assert_eq!(env.resolver.as_deref(), Some("conan"));
        assert_eq!(
            env.include_paths("jsonformoderncpp"),
            ["/conan/json/include".to_string()]
        );
        assert!(env.include_paths("fmt").is_empty());
    }
}
