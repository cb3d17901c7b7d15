//! Timestamped stdout log lines: `[YY/MM/DD HH:MM:SS] message`.
//!
//! There are no levels; errors and the final success line are only colored
//! (see `color`), never reworded.

use std::io::Write;

use time::macros::format_description;
use time::OffsetDateTime;

/// `YY/MM/DD HH:MM:SS` for `ts`.
pub fn format_stamp(ts: OffsetDateTime) -> String {
    let fmt = format_description!("[year repr:last_two]/[month]/[day] [hour]:[minute]:[second]");
    ts.format(fmt)
        .unwrap_or_else(|_| ts.unix_timestamp().to_string())
}

pub fn format_line(ts: OffsetDateTime, message: &str) -> String {
    format!("[{}] {}", format_stamp(ts), message)
}

fn now() -> OffsetDateTime {
    // The local offset is unavailable on some platforms once threads exist; fall back to UTC.
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn emit(line: String) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let _ = writeln!(out, "{line}");
    let _ = out.flush();
}

/// Print `message` with the current timestamp and flush immediately.
pub fn log_line(message: &str) {
    emit(format_line(now(), message));
}

pub fn log_error(message: &str) {
    let line = format_line(now(), message);
    emit(crate::paint(crate::color_enabled_stdout(), crate::color::RED_BOLD, &line));
}

pub fn log_success(message: &str) {
    let line = format_line(now(), message);
    emit(crate::paint(crate::color_enabled_stdout(), crate::color::GREEN_BOLD, &line));
}
