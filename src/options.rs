//! Option registration.
//!
//! Library tools declare their command-line options here before the host
//! parses arguments. The schema is append-only; each entry becomes a long
//! flag on the `configure` command and a value in [`OptionValues`].

use crate::error::ProbeError;
use clap::{Arg, ArgMatches, Command};
use std::collections::BTreeMap;

/// Help heading the options of library tools are listed under
pub const CONFIGURATION_GROUP: &str = "Configuration options";

/// One registered option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Long flag without leading dashes, e.g. `nlohmann-json-root`
    pub flag: String,
    /// Key under which the value is stored, e.g. `nlohmann_json_root`
    pub dest: String,
    pub default: String,
    pub help: String,
    pub group: String,
}

impl OptionSpec {
    pub fn new(flag: &str, default: &str, help: &str) -> Self {
        let flag = flag.trim_start_matches('-').to_string();
        Self {
            dest: flag.replace('-', "_"),
            flag,
            default: default.to_string(),
            help: help.to_string(),
            group: CONFIGURATION_GROUP.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct OptionSchema {
    specs: Vec<OptionSpec>,
}

impl OptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_option(&mut self, spec: OptionSpec) -> Result<(), ProbeError> {
        if self.get(&spec.dest).is_some() {
            return Err(ProbeError::DuplicateOption(spec.dest));
        }
        self.specs.push(spec);
        Ok(())
    }

    pub fn get(&self, dest: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|s| s.dest == dest)
    }

    pub fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    /// Add every registered option to a clap command.
    pub fn augment(&self, mut cmd: Command) -> Command {
        for spec in &self.specs {
            cmd = cmd.arg(
                Arg::new(spec.dest.clone())
                    .long(spec.flag.clone())
                    .value_name("PATH")
                    .default_value(spec.default.clone())
                    .help(spec.help.clone())
                    .help_heading(spec.group.clone()),
            );
        }
        cmd
    }
}

/// Values of the registered options for one configuration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValues {
    values: BTreeMap<String, String>,
}

impl OptionValues {
    /// Every option at its default.
    pub fn defaults(schema: &OptionSchema) -> Self {
        let values = schema
            .specs()
            .iter()
            .map(|s| (s.dest.clone(), s.default.clone()))
            .collect();
        Self { values }
    }

    /// Read values from matches produced by a command built with
    /// [`OptionSchema::augment`]. Options missing from the matches keep
    /// their defaults.
    pub fn from_matches(schema: &OptionSchema, matches: &ArgMatches) -> Self {
        let mut values = Self::defaults(schema);
        for spec in schema.specs() {
            if let Ok(Some(v)) = matches.try_get_one::<String>(&spec.dest) {
                values.values.insert(spec.dest.clone(), v.clone());
            }
        }
        values
    }

    pub fn get(&self, dest: &str) -> Option<&str> {
        self.values.get(dest).map(|s| s.as_str())
    }

    pub fn set(&mut self, dest: &str, value: &str) {
        self.values.insert(dest.to_string(), value.to_string());
    }
}
