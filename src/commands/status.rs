//! `libprobe status`
//!
//! Reads the saved environment and shows what every uselib resolved to.

use anyhow::{Result, bail};
use colored::*;
use std::path::Path;

use crate::env::{ConfigEnv, Outcome, UselibRecord};
use crate::ui;

pub fn run_status(out_dir: &Path, json: bool) -> Result<()> {
    if !ConfigEnv::cache_path(out_dir).exists() {
        bail!(
            "No configuration found in {}.\n\n\
            💡 Tip: Run 'libprobe configure' first.",
            out_dir.display()
        );
    }
    let env = ConfigEnv::load(out_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&env.uselibs)?);
        return Ok(());
    }

    if env.uselibs.is_empty() {
        println!("{} No libraries were probed.", "ℹ".blue());
        return Ok(());
    }

    let mut table = ui::Table::new(&["Uselib", "Outcome", "Includes"]);
    for (name, record) in &env.uselibs {
        table.add_row(vec![name.clone(), outcome_cell(record), record.includes.join(", ")]);
    }
    table.print();
    Ok(())
}

fn outcome_cell(record: &UselibRecord) -> String {
    match (record.outcome, &record.source) {
        (Outcome::AlreadySatisfied, Some(source)) => {
            format!("{} (by {})", record.outcome.label(), source)
                .green()
                .to_string()
        }
        (Outcome::NotFound, _) => record.outcome.label().yellow().to_string(),
        _ => record.outcome.label().green().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_cell_names_source() {
        colored::control::set_override(false);
        let record = UselibRecord {
            outcome: Outcome::AlreadySatisfied,
            source: Some("conan".to_string()),
            includes: vec![],
        };
        assert_eq!(outcome_cell(&record), "already satisfied (by conan)");
    }

    #[test]
    fn test_status_without_cache_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_status(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("libprobe configure"));
    }
}
