//! Destinations for the `print` builtin.
//!
//! `print` always writes whole lines. The CLI sends them to stdout; tests
//! and embedding hosts capture them with [`buffer_handler`].

use std::sync::Arc;

use parking_lot::Mutex;

pub enum PrintHandler {
    Stdout,
    /// Captured lines, without their newlines.
    Buffer(Mutex<Vec<String>>),
    Silent,
}

impl PrintHandler {
    pub fn print_line(&self, line: &str) {
        match self {
            PrintHandler::Stdout => println!("{line}"),
            PrintHandler::Buffer(lines) => lines.lock().push(line.to_owned()),
            PrintHandler::Silent => {}
        }
    }

    /// Everything captured so far, one `\n` after each line.
    pub fn output(&self) -> String {
        self.lines().iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            PrintHandler::Buffer(lines) => lines.lock().clone(),
            PrintHandler::Stdout | PrintHandler::Silent => Vec::new(),
        }
    }

    /// Drain the captured lines, for hosts that render between runs.
    pub fn take_output(&self) -> String {
        let output = self.output();
        if let PrintHandler::Buffer(lines) = self {
            lines.lock().clear();
        }
        output
    }
}

pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(Vec::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}
