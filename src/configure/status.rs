use colored::*;
use std::io::Write;

/// Width the start message is padded to, so results line up in a column
const MESSAGE_WIDTH: usize = 40;

/// Tone of an end message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Warn,
}

/// Receiver of the two status lines each check emits
pub trait StatusSink {
    fn start_msg(&mut self, msg: &str);
    fn end_msg(&mut self, result: &str, tone: Tone);
}

/// Prints `Checking for ... : yes` lines to stdout
#[derive(Debug, Default)]
pub struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn start_msg(&mut self, msg: &str) {
        print!("{:<width$}: ", msg, width = MESSAGE_WIDTH);
        let _ = std::io::stdout().flush();
    }

    fn end_msg(&mut self, result: &str, tone: Tone) {
        match tone {
            Tone::Good => println!("{}", result.green()),
            Tone::Warn => println!("{}", result.yellow()),
        }
    }
}

/// Keeps the messages in memory, for embedding hosts and tests
#[derive(Debug, Default)]
pub struct BufferedStatus {
    pub lines: Vec<String>,
    pending: Option<String>,
}

impl StatusSink for BufferedStatus {
    fn start_msg(&mut self, msg: &str) {
        self.pending = Some(msg.to_string());
    }

    fn end_msg(&mut self, result: &str, _tone: Tone) {
        let msg = self.pending.take().unwrap_or_default();
        self.lines.push(format!("{} : {}", msg, result));
    }
}
