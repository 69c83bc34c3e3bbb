//! CLI output formatting

use console::Emoji;
use std::fmt::Display;
use std::io::{self, Write};

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Progress line for a step that passed
pub fn log_success(w: &mut impl Write, stage: impl Display, message: &str) -> io::Result<()> {
    log_line(w, CHECK, stage, message)
}

/// Progress line for a step that failed
pub fn log_fail(w: &mut impl Write, stage: impl Display, message: &str) -> io::Result<()> {
    log_line(w, CROSS, stage, message)
}

/// Progress line for a step that is starting
pub fn log_info(w: &mut impl Write, stage: impl Display, message: &str) -> io::Result<()> {
    log_line(w, INFO, stage, message)
}

/// Final error line of a failed run; the full chain goes with it
pub fn log_error(w: &mut impl Write, error: &anyhow::Error) -> io::Result<()> {
    writeln!(w, "{}{}", CROSS, style(format!("{:#}", error)).red())
}

// Empty messages print nothing
fn log_line(
    w: &mut impl Write,
    icon: Emoji<'_, '_>,
    stage: impl Display,
    message: &str,
) -> io::Result<()> {
    if message.is_empty() {
        return Ok(());
    }
    writeln!(w, "{}| {} | {}", icon, style(stage).bold(), message)
}
