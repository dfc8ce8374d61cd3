//! Pure rendering functions, one per output mode, sharing the
//! `(file:line).method` location primitive.

mod json;

pub use json::{JSON_INDENT_STEP, pretty_lines};

use crate::frame::{StackFrame, StackFrames};
use crate::severity::Severity;

/// End-of-body marker closing every JSON entry, in console and file output alike.
pub const JSON_END_MARKER: &str = "[End]";

/// One rendered record, handed to sinks and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord {
    pub tag: String,
    pub message: String,
    pub severity: Severity,
}

/// Rendered JSON-mode output: a header line, pretty-printed body lines, and
/// the closing marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedJson {
    pub header: String,
    pub body_lines: Vec<String>,
    pub end_marker: &'static str,
}

impl FormattedJson {
    /// Console sinks want the whole entry as one multi-line message.
    #[must_use]
    pub fn to_console_message(&self) -> String {
        let mut out = self.header.clone();
        for line in &self.body_lines {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out.push_str(self.end_marker);
        out
    }
}

/// `"(file:line).method"`, optionally followed by `" - "` and the payload.
///
/// `has_message` false means the call carried no payload at all, so nothing is
/// appended. A `None` payload with `has_message` true renders the literal
/// `null`; the two cases stay distinguishable in output.
#[must_use]
pub fn format_basic(frame: &StackFrame, msg: Option<&str>, has_message: bool) -> String {
    let mut out = frame.location();
    if has_message {
        out.push_str(" - ");
        out.push_str(msg.unwrap_or("null"));
    }
    out
}

/// Two lines: the parent frame without a payload suffix, then the current
/// frame with the suffix per the basic rule.
#[must_use]
pub fn format_parent(frames: &StackFrames, msg: Option<&str>, has_message: bool) -> [String; 2] {
    let parent_line = frames.parent.as_ref().map_or_else(
        || "\u{250c}[PARENT]".to_string(),
        |parent| format!("\u{250c}[PARENT] {}", parent.location()),
    );

    let mut current_line = format!("\u{2514}[PARENT] {}", frames.current.location());
    if has_message {
        current_line.push_str(" - ");
        current_line.push_str(msg.unwrap_or("null"));
    }

    [parent_line, current_line]
}

/// Basic rendering with a `[TID = N]` marker after the location segment.
#[must_use]
pub fn format_thread(
    frame: &StackFrame,
    thread_id: u64,
    msg: Option<&str>,
    has_message: bool,
) -> String {
    let mut out = format!("{}[TID = {thread_id}]", frame.location());
    if has_message {
        out.push_str(" - ");
        out.push_str(msg.unwrap_or("null"));
    }
    out
}

/// Header plus pretty-printed body. Input that does not parse as JSON falls
/// back to a single trimmed raw line, never a failure.
#[must_use]
pub fn format_json(frame: &StackFrame, raw: &str) -> FormattedJson {
    FormattedJson {
        header: format!("[JSON]{} -", frame.location()),
        body_lines: pretty_lines(raw),
        end_marker: JSON_END_MARKER,
    }
}

/// `"{app}[{tag}]{mode_suffix}"`. Parent markers live in the message lines,
/// not the tag, so parent mode carries no suffix here.
#[must_use]
pub fn compose_tag(app_name: &str, tag: Option<&str>, severity: Severity) -> String {
    let suffix = match severity {
        Severity::Json => "[JSON]",
        Severity::ThreadId => "[T]",
        _ => "",
    };
    tag.map_or_else(
        || format!("{app_name}{suffix}"),
        |tag| format!("{app_name}[{tag}]{suffix}"),
    )
}
