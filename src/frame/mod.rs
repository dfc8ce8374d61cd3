//! Call-stack frame model and the caller-resolution heuristics.
//!
//! The runtime hands us an opaque ordered sequence of [`RawFrame`]s; everything
//! downstream of [`capture`] is pure sequence filtering, independent of any
//! particular backtrace representation.

mod capture;
mod resolver;
mod start;

pub use capture::capture;
pub use resolver::{extract, resolve_at};
pub use start::{DEFAULT_START_INDEX, StartIndexResolver};

use std::sync::atomic::AtomicBool;

use crate::internal;

/// Placeholder used when neither the runtime nor the symbol path yields a file name.
pub const UNKNOWN_FILE_NAME: &str = "Unknown";

static WARNED_MISSING_FILE: AtomicBool = AtomicBool::new(false);

/// One raw entry of a captured call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// Full symbol path, `module::Type::method`.
    pub symbol: String,
    /// Source file name, when the runtime metadata carries one.
    pub file: Option<String>,
    /// 1-based line number; 0 means unknown.
    pub line: u32,
}

impl RawFrame {
    /// Test and capture helper.
    #[must_use]
    pub fn new(symbol: impl Into<String>, file: Option<&str>, line: u32) -> Self {
        Self {
            symbol: symbol.into(),
            file: file.map(ToString::to_string),
            line,
        }
    }
}

/// The resolved logical caller of a log call. Immutable, produced once per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Source file name, possibly derived from the symbol path.
    pub file_name: String,
    /// 1-based line number; 0 means unknown.
    pub line: u32,
    /// Method name, the last segment of the symbol path.
    pub method: String,
    /// Enclosing module/type path, everything before the method segment.
    pub type_name: String,
}

impl StackFrame {
    /// Converts a raw entry, deriving a file name from the symbol path when
    /// the runtime metadata lacks one.
    #[must_use]
    pub fn from_raw(raw: &RawFrame) -> Self {
        let (type_name, method) = split_symbol(&raw.symbol);
        let file_name = raw
            .file
            .clone()
            .unwrap_or_else(|| derive_file_name(&type_name));
        Self {
            file_name,
            line: raw.line,
            method,
            type_name,
        }
    }

    /// Used when the stack is empty or no candidate frame survives filtering.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            file_name: UNKNOWN_FILE_NAME.to_string(),
            line: 0,
            method: "unknown".to_string(),
            type_name: "unknown".to_string(),
        }
    }

    /// The `(file:line).method` location segment shared by every formatter.
    #[must_use]
    pub fn location(&self) -> String {
        format!("({}:{}).{}", self.file_name, self.line, self.method)
    }
}

/// Current frame plus, for parent-mode output, the frame one level above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrames {
    pub current: StackFrame,
    pub parent: Option<StackFrame>,
}

fn split_symbol(symbol: &str) -> (String, String) {
    symbol.rfind("::").map_or_else(
        || (symbol.to_string(), symbol.to_string()),
        |idx| (symbol[..idx].to_string(), symbol[idx + 2..].to_string()),
    )
}

/// Derives a display file name from a symbol path: the simple name of the
/// innermost type with generic and closure suffixes stripped.
fn derive_file_name(type_name: &str) -> String {
    let simple = type_name.rsplit("::").next().unwrap_or(type_name);
    let trimmed = simple
        .split(['<', '$'])
        .next()
        .unwrap_or(simple)
        .trim_matches(['{', '}'])
        .trim();

    if trimmed.is_empty() {
        internal::warn_once(
            &WARNED_MISSING_FILE,
            "FRAME",
            "no file name in runtime metadata, substituting Unknown",
        );
        UNKNOWN_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_symbol_separates_method() {
        let (ty, method) = split_symbol("app::net::Client::connect");
        assert_eq!(ty, "app::net::Client");
        assert_eq!(method, "connect");
    }

    #[test]
    fn derive_file_name_strips_generics() {
        assert_eq!(derive_file_name("app::store::Cache<K, V>"), "Cache");
    }

    #[test]
    fn derive_file_name_falls_back_to_unknown() {
        assert_eq!(derive_file_name("{{}}"), UNKNOWN_FILE_NAME);
    }

    #[test]
    fn from_raw_prefers_runtime_file() {
        let frame = StackFrame::from_raw(&RawFrame::new(
            "app::main::run",
            Some("main.rs"),
            42,
        ));
        assert_eq!(frame.file_name, "main.rs");
        assert_eq!(frame.location(), "(main.rs:42).run");
    }
}
