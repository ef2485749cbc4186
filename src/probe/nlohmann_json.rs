//! nlohmann/json ("JSON for Modern C++").
//!
//! Adds `--nlohmann-json-root` (default `/usr`) and records the uselib
//! `jsonformoderncpp`. Conan's waf generator names the package that way, so
//! builds that get the library from conan find their include paths under the
//! same key.

use super::{CompileProbe, LibrarySpec, ProbeResult, probe_library};
use crate::configure::ConfigContext;
use crate::error::ProbeError;
use crate::options::OptionSchema;

pub const NLOHMANN_JSON: LibrarySpec = LibrarySpec {
    name: "nlohmann/json",
    uselib: "jsonformoderncpp",
    header: "nlohmann/json.hpp",
    root_flag: "nlohmann-json-root",
    default_root: "/usr",
    resolver: "conan",
};

pub fn options(schema: &mut OptionSchema) -> Result<(), ProbeError> {
    NLOHMANN_JSON.register_options(schema)
}

pub fn configure(
    ctx: &mut ConfigContext<'_>,
    compiler: &mut dyn CompileProbe,
) -> Result<ProbeResult, ProbeError> {
    probe_library(&NLOHMANN_JSON, ctx, compiler)
}
