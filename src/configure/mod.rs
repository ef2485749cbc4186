//! Configure-run context.
//!
//! Everything a probe may read or write during one configure run lives in
//! [`ConfigContext`]; nothing is process-global, so independent runs can
//! proceed side by side.

mod log;
mod status;

pub use log::ConfigLog;
pub use status::{BufferedStatus, ConsoleStatus, StatusSink, Tone};

use crate::env::ConfigEnv;
use crate::options::OptionValues;

pub struct ConfigContext<'a> {
    pub env: ConfigEnv,
    pub options: OptionValues,
    pub log: ConfigLog,
    status: &'a mut dyn StatusSink,
}

impl<'a> ConfigContext<'a> {
    pub fn new(
        env: ConfigEnv,
        options: OptionValues,
        log: ConfigLog,
        status: &'a mut dyn StatusSink,
    ) -> Self {
        Self {
            env,
            options,
            log,
            status,
        }
    }

    pub fn start_msg(&mut self, msg: &str) {
        self.log.line(msg);
        self.status.start_msg(msg);
    }

    pub fn end_msg(&mut self, result: &str, tone: Tone) {
        self.log.line(&format!("-> {}", result));
        self.status.end_msg(result, tone);
    }

    /// Hand the environment back once the run is over.
    pub fn into_env(self) -> ConfigEnv {
        self.env
    }
}
