//! # libprobe - configure-time probes for header-only C++ libraries
//!
//! A library tool does two things for a configure run:
//!
//! - registers a `--<library>-root` option (default `/usr`), and
//! - checks that the library's public header compiles, recording the
//!   answer as a named uselib that later build rules can query.
//!
//! Include paths already supplied by a dependency manager (e.g. conan)
//! short-circuit the check; no compiler is run in that case.
//!
//! ## Quick Start
//!
//! ```bash
//! libprobe configure --nlohmann-json-root=/opt/json
//! libprobe status
//! ```
//!
//! ## Module Organization
//!
//! - [`options`] - Option schema and parsed values
//! - [`probe`] - Availability probes and library tools
//! - [`configure`] - Configure-run context, status lines, `config.log`
//! - [`env`] - Configuration environment and its cache file
//! - [`toolchain`] - Compiler detection and compile checks
//! - [`commands`] - CLI command handlers

/// CLI command handlers.
pub mod commands;

/// Project file parsing (`libprobe.toml`).
pub mod config;

/// Configure-run context.
pub mod configure;

/// Configuration environment and uselib records.
pub mod env;

/// Error type shared by options and probes.
pub mod error;

/// Option registration.
pub mod options;

/// Library availability probes.
pub mod probe;

/// Include paths from external dependency managers.
pub mod resolved;

/// Toolchain detection and compile checks.
pub mod toolchain;

/// Terminal UI utilities (tables).
pub mod ui;
