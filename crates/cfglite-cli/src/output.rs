//! Console output for the CLI.
//!
//! User-facing lines go to stdout; diagnostics from `tracing` go to stderr.
//! Only the status labels are colored, so message text is stable for
//! scripts regardless of terminal support.

use colored::Colorize;

/// `ERROR: <message>` in red.
pub fn error(message: &str) {
    println!("{} {}", "ERROR:".red().bold(), message);
}

/// A green success line.
pub fn success(message: &str) {
    println!("{}", message.green());
}

/// A green label followed by plain text, e.g. `Bundle written to <path>`.
pub fn success_with(label: &str, detail: impl std::fmt::Display) {
    println!("{} {}", label.green(), detail);
}

/// A yellow informational line.
pub fn notice(message: &str) {
    println!("{}", message.yellow());
}

/// A cyan header line.
pub fn header(message: &str) {
    println!("{}", message.cyan());
}

/// The base-schema failure block: a red heading, then the validator's message.
pub fn schema_failure(message: &str) {
    println!("{}", "Configuration validation failed:".red());
    println!("{message}");
}

/// Print a JSON value as 2-space-indented text.
pub fn json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}
