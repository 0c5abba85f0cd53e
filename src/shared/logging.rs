//! Step logging in the GitHub workflow-command format.
//!
//! Every line goes to stdout, where the runner picks up `::command::` lines
//! and shows the rest verbatim.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
}

impl LogLevel {
    fn command(self) -> Option<&'static str> {
        match self {
            LogLevel::Debug => Some("debug"),
            LogLevel::Info => None,
            LogLevel::Notice => Some("notice"),
            LogLevel::Warning => Some("warning"),
            LogLevel::Error => Some("error"),
        }
    }
}

pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

pub fn workflow_command(command: &str, properties: &[(&str, &str)], message: &str) -> String {
    let props = properties
        .iter()
        .map(|(key, value)| format!("{key}={}", escape_property(value)))
        .collect::<Vec<_>>()
        .join(",");
    if props.is_empty() {
        format!("::{command}::{}", escape_data(message))
    } else {
        format!("::{command} {props}::{}", escape_data(message))
    }
}

pub fn render_log_line(level: LogLevel, event: &str, message: &str) -> String {
    let text = format!("[{event}] {message}");
    match level.command() {
        Some(command) => workflow_command(command, &[], &text),
        None => text,
    }
}

pub fn log_event(level: LogLevel, event: &str, message: &str) {
    println!("{}", render_log_line(level, event, message));
}

pub fn log_debug_detail(event: &str, detail: &Value) {
    let Ok(rendered) = serde_json::to_string(detail) else {
        return;
    };
    log_event(LogLevel::Debug, event, &rendered);
}

/// Lines to emit so the runner redacts `secret` from all later output.
/// Multi-line values are registered line by line.
pub fn mask_commands(secret: &str) -> Vec<String> {
    let mut lines: Vec<&str> = Vec::new();
    if !secret.trim().is_empty() {
        lines.push(secret);
    }
    if secret.contains('\n') {
        lines.extend(
            secret
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.trim().is_empty()),
        );
    }
    lines
        .into_iter()
        .map(|line| workflow_command("add-mask", &[], line))
        .collect()
}

pub fn mask_value(secret: &str) {
    for line in mask_commands(secret) {
        println!("{line}");
    }
}
