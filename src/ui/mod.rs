use colored::*;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy)]
pub enum Level {
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

// Global debug state
static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_debug_mode(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::Relaxed);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_MODE.load(Ordering::Relaxed)
}

fn colorize(level: Level, s: &str) -> String {
    match level {
        Level::Info => s.normal().to_string(),
        Level::Success => s.green().bold().to_string(),
        Level::Warn => s.yellow().bold().to_string(),
        Level::Error => s.red().bold().to_string(),
        Level::Debug => s.cyan().to_string(),
    }
}

/// Emit a user-facing event. The `code` names the event for grepping output;
/// warnings and errors go to stderr, everything else to stdout.
pub fn emit(level: Level, code: &str, message: &str) {
    if matches!(level, Level::Debug) && !is_debug_enabled() {
        return;
    }
    let line = if is_debug_enabled() {
        format!("[{}] {}", code, colorize(level, message))
    } else {
        colorize(level, message)
    };
    let mut out: Box<dyn Write> = match level {
        Level::Error | Level::Warn => Box::new(io::stderr()),
        _ => Box::new(io::stdout()),
    };
    let _ = writeln!(out, "{}", line);
}

pub mod prelude {
    pub use super::{Level, emit};
}
