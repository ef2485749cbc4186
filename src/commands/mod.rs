//! CLI command handlers
//!
//! The host side of a configure run: everything between argument parsing
//! and the library probes themselves.

pub mod configure;
pub mod status;
