//! Builds the persisted form of formatted payloads.
//!
//! Non-JSON lines carry a millisecond timestamp, the bracketed severity code,
//! the composed tag, and the payload. JSON entries timestamp only the header;
//! body lines and the end marker go to disk verbatim.

use chrono::Local;

use crate::fmt::FormattedJson;
use crate::severity::Severity;

/// Timestamp prefix format for persisted lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// One persisted line per payload, all sharing the batch timestamp.
#[must_use]
pub fn build_lines(severity: Severity, tag: &str, payloads: &[String]) -> Vec<String> {
    let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    payloads
        .iter()
        .map(|payload| format!("{stamp} [{}] {tag} : {payload}", severity.code()))
        .collect()
}

/// Timestamped header, verbatim body lines, closing marker.
#[must_use]
pub fn build_json_lines(tag: &str, json: &FormattedJson) -> Vec<String> {
    let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let mut lines = Vec::with_capacity(json.body_lines.len() + 2);
    lines.push(format!(
        "{stamp} [{}] {tag} : {}",
        Severity::Json.code(),
        json.header
    ));
    lines.extend(json.body_lines.iter().cloned());
    lines.push(json.end_marker.to_string());
    lines
}
