// file: src/utils/logging.rs
// description: Tracing subscriber initialization and colored cli output helpers

use crate::models::Document;
use crate::utils::Validator;
use chrono::{DateTime, Local};
use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logs go to stderr so command output on stdout stays pipeable.
/// `RUST_LOG` overrides the level picked by `verbose`.
pub fn init_logger(colored_output: bool, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), msg)
}

const SNIPPET_CHARS: usize = 40;

/// One row of `list` output: id, title, last update time and the start of
/// the first non-blank body line.
pub fn format_document_row(doc: &Document) -> String {
    let first_line = doc
        .content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    format!(
        "{}  {}  {}  {}",
        doc.id.dimmed(),
        doc.display_title().bold(),
        format_timestamp(doc.updated_at).cyan(),
        Validator::truncate_text(first_line, SNIPPET_CHARS).dimmed()
    )
}

pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
