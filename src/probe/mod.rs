//! Library availability probes.
//!
//! A probe answers one question per configure run: can the library's public
//! header be found and compiled? The answer is recorded as a uselib in the
//! [`ConfigEnv`](crate::env::ConfigEnv) so build rules can query it later.
//!
//! ## Order of checks
//!
//! 1. Include paths already supplied by a dependency manager win outright,
//!    and no compiler is run.
//! 2. Otherwise the header is compiled once with `<root>/include` added to
//!    the search path, using the injected [`CompileProbe`].

pub mod nlohmann_json;

use crate::configure::{ConfigContext, ConfigLog, Tone};
use crate::env::{Outcome, UselibRecord};
use crate::error::ProbeError;
use crate::options::{OptionSchema, OptionSpec};

/// A library tool: its option hook and its configure hook
pub struct Tool {
    pub spec: &'static LibrarySpec,
    pub options: fn(&mut OptionSchema) -> Result<(), ProbeError>,
    pub configure:
        fn(&mut ConfigContext<'_>, &mut dyn CompileProbe) -> Result<ProbeResult, ProbeError>,
}

/// Tools run by `libprobe configure`, in order
pub const TOOLS: &[Tool] = &[Tool {
    spec: &nlohmann_json::NLOHMANN_JSON,
    options: nlohmann_json::options,
    configure: nlohmann_json::configure,
}];

/// Schema holding the options of every tool.
pub fn registered_options() -> Result<OptionSchema, ProbeError> {
    let mut schema = OptionSchema::new();
    for tool in TOOLS {
        (tool.options)(&mut schema)?;
    }
    Ok(schema)
}

/// A "does this header compile" request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCheck {
    pub header: String,
    pub include_dirs: Vec<String>,
    pub flags: Vec<String>,
}

impl HeaderCheck {
    /// Translation unit that only includes the header.
    pub fn fragment(&self) -> String {
        format!("#include <{}>\n\nint main() {{\n\treturn 0;\n}}\n", self.header)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckVerdict {
    Passed,
    Failed,
}

/// Capability to compile a header check.
///
/// The real implementation drives a C++ compiler
/// ([`ToolchainProbe`](crate::toolchain::ToolchainProbe)); tests inject fakes.
pub trait CompileProbe {
    fn check_header(&mut self, check: &HeaderCheck, log: &mut ConfigLog) -> CheckVerdict;
}

/// Static description of a header-only library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibrarySpec {
    /// Name shown in status messages, e.g. `nlohmann/json`
    pub name: &'static str,
    /// Key of the recorded uselib
    pub uselib: &'static str,
    /// Canonical public header
    pub header: &'static str,
    /// Long flag of the root option, without dashes
    pub root_flag: &'static str,
    pub default_root: &'static str,
    /// Resolver named when include paths were supplied externally and the
    /// environment does not say which one
    pub resolver: &'static str,
}

impl LibrarySpec {
    pub fn root_option(&self) -> OptionSpec {
        OptionSpec::new(
            self.root_flag,
            self.default_root,
            &format!("root directory of the installation of {}", self.name),
        )
    }

    pub fn register_options(&self, schema: &mut OptionSchema) -> Result<(), ProbeError> {
        schema.add_option(self.root_option())
    }

    pub fn message(&self) -> String {
        format!("Checking for library {}", self.name)
    }

    /// `HAVE_<HEADER>` define set when the header compiles.
    pub fn define_name(&self) -> String {
        let mangled: String = self
            .header
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("HAVE_{}", mangled)
    }
}

/// Candidate include directory below a search root.
pub fn include_dir(root: &str) -> String {
    format!("{}/include", root)
}

/// Result of one probe run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    AlreadySatisfied { source: String },
    Found { include_dir: String },
    NotFound { include_dir: String },
}

impl ProbeResult {
    pub fn outcome(&self) -> Outcome {
        match self {
            ProbeResult::AlreadySatisfied { .. } => Outcome::AlreadySatisfied,
            ProbeResult::Found { .. } => Outcome::Found,
            ProbeResult::NotFound { .. } => Outcome::NotFound,
        }
    }

    pub fn is_available(&self) -> bool {
        self.outcome().is_available()
    }
}

/// Probe a library and record the outcome under its uselib name.
///
/// `NotFound` is a normal return value; the caller decides whether it stops
/// the configure run.
pub fn probe_library(
    spec: &LibrarySpec,
    ctx: &mut ConfigContext<'_>,
    compiler: &mut dyn CompileProbe,
) -> Result<ProbeResult, ProbeError> {
    if ctx.env.uselib(spec.uselib).is_some() {
        return Err(ProbeError::AlreadyRecorded(spec.uselib.to_string()));
    }

    let resolved = ctx.env.include_paths(spec.uselib).to_vec();
    if !resolved.is_empty() {
        let source = ctx
            .env
            .resolver
            .clone()
            .unwrap_or_else(|| spec.resolver.to_string());
        ctx.start_msg(&spec.message());
        ctx.end_msg(&format!("yes (by {})", source), Tone::Good);
        ctx.env.record(
            spec.uselib,
            UselibRecord {
                outcome: Outcome::AlreadySatisfied,
                source: Some(source.clone()),
                includes: resolved,
            },
        )?;
        return Ok(ProbeResult::AlreadySatisfied { source });
    }

    let dest = spec.root_option().dest;
    let root = ctx
        .options
        .get(&dest)
        .ok_or(ProbeError::MissingOption(dest.clone()))?
        .to_string();
    let dir = include_dir(&root);

    let check = HeaderCheck {
        header: spec.header.to_string(),
        include_dirs: vec![dir.clone()],
        flags: ctx.env.cxx_flags.clone(),
    };

    ctx.start_msg(&spec.message());
    let outcome = match compiler.check_header(&check, &mut ctx.log) {
        CheckVerdict::Passed => {
            ctx.end_msg("yes", Tone::Good);
            ctx.env.add_include(spec.uselib, &dir);
            ctx.env.define(&spec.define_name(), "1");
            Outcome::Found
        }
        CheckVerdict::Failed => {
            ctx.end_msg("not found", Tone::Warn);
            Outcome::NotFound
        }
    };

    ctx.env.record(
        spec.uselib,
        UselibRecord {
            outcome,
            source: None,
            includes: vec![dir.clone()],
        },
    )?;

    Ok(match outcome {
        Outcome::Found => ProbeResult::Found { include_dir: dir },
        _ => ProbeResult::NotFound { include_dir: dir },
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::path::Path;

    /// Passes when the header exists below one of the include dirs.
    #[derive(Default)]
    pub struct FakeCompiler {
        pub calls: Vec<HeaderCheck>,
    }

    impl CompileProbe for FakeCompiler {
        fn check_header(&mut self, check: &HeaderCheck, _log: &mut ConfigLog) -> CheckVerdict {
            self.calls.push(check.clone());
            let present = check
                .include_dirs
                .iter()
                .any(|d| Path::new(d).join(&check.header).is_file());
            if present {
                CheckVerdict::Passed
            } else {
                CheckVerdict::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeCompiler;
    use super::*;
    use crate::configure::{BufferedStatus, ConfigLog};
    use crate::env::ConfigEnv;
    use crate::options::OptionValues;

    const SPEC: LibrarySpec = LibrarySpec {
        name: "fmt",
        uselib: "fmt",
        header: "fmt/core.h",
        root_flag: "fmt-root",
        default_root: "/usr",
        resolver: "conan",
    };

    fn values(root: Option<&str>) -> OptionValues {
        let mut schema = OptionSchema::new();
        SPEC.register_options(&mut schema).unwrap();
        let mut values = OptionValues::defaults(&schema);
        if let Some(root) = root {
            values.set("fmt_root", root);
        }
        values
    }

    #[test]
    fn test_registered_options_cover_every_tool() {
        let schema = registered_options().unwrap();
        for tool in TOOLS {
            assert!(schema.get(&tool.spec.root_option().dest).is_some());
        }
    }

    #[test]
    fn test_define_name() {
        assert_eq!(SPEC.define_name(), "HAVE_FMT_CORE_H");
    }

    #[test]
    fn test_fragment_includes_only_header() {
        let check = HeaderCheck {
            header: "fmt/core.h".to_string(),
            include_dirs: vec![],
            flags: vec![],
        };
        let fragment = check.fragment();
        assert!(fragment.starts_with("#include <fmt/core.h>\n"));
        assert_eq!(fragment.matches("#include").count(), 1);
        assert!(fragment.contains("int main()"));
    }

    #[test]
    fn test_missing_option_is_error() {
        let mut status = BufferedStatus::default();
        let mut ctx = ConfigContext::new(
            ConfigEnv::default(),
            OptionValues::default(),
            ConfigLog::disabled(),
            &mut status,
        );
        let mut compiler = FakeCompiler::default();
        let err = probe_library(&SPEC, &mut ctx, &mut compiler).unwrap_err();
        assert!(matches!(err, ProbeError::MissingOption(ref d) if d == "fmt_root"));
        assert!(compiler.calls.is_empty());
    }

    #[test]
    fn test_flags_forwarded_to_check() {
        let mut env = ConfigEnv::default();
        env.cxx_flags = vec!["-std=c++17".to_string()];
        let mut status = BufferedStatus::default();
        let mut ctx = ConfigContext::new(
            env,
            values(Some("/nowhere")),
            ConfigLog::disabled(),
            &mut status,
        );
        let mut compiler = FakeCompiler::default();
        probe_library(&SPEC, &mut ctx, &mut compiler).unwrap();
        assert_eq!(compiler.calls[0].flags, vec!["-std=c++17".to_string()]);
    }

    #[test]
    fn test_environment_resolver_named_in_message() {
        let mut env = ConfigEnv::default();
        env.resolver = Some("vcpkg".to_string());
        env.add_include("fmt", "/vcpkg/installed/include");
        let mut status = BufferedStatus::default();
        let result = {
            let mut ctx =
                ConfigContext::new(env, values(None), ConfigLog::disabled(), &mut status);
            probe_library(&SPEC, &mut ctx, &mut FakeCompiler::default()).unwrap()
        };
        assert_eq!(
            result,
            ProbeResult::AlreadySatisfied {
                source: "vcpkg".to_string()
            }
        );
        assert_eq!(status.lines, vec!["Checking for library fmt : yes (by vcpkg)"]);
    }
}
