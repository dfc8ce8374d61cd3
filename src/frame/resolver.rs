//! Scan heuristics that pick the logical caller out of a raw stack.
//!
//! Compiler-inserted shims and async-executor trampolines sit between the
//! logging entry point and the code that actually called it; both scans here
//! step over them without ever touching the capture machinery.

use super::start::StartIndexResolver;
use super::{RawFrame, StackFrame, StackFrames};
use crate::error::Error;
use crate::internal;

/// Symbol fragments that mark compiler-generated bridge frames.
const SYNTHETIC_MARKERS: [&str; 3] = [
    "__rust_",
    "core::ops::function::",
    "{{vtable.shim}}",
];

/// Namespaces whose frames forward a call without being the logical caller.
const RELAY_PREFIXES: [&str; 5] = [
    "tokio::runtime",
    "tokio::task",
    "futures_util::",
    "core::future::",
    "std::future::",
];

fn is_synthetic(frame: &RawFrame) -> bool {
    SYNTHETIC_MARKERS
        .iter()
        .any(|marker| frame.symbol.contains(marker))
}

fn is_relay(frame: &RawFrame) -> bool {
    RELAY_PREFIXES
        .iter()
        .any(|prefix| frame.symbol.starts_with(prefix))
}

fn is_skipped(frame: &RawFrame, skip_prefixes: &std::collections::HashSet<String>) -> bool {
    skip_prefixes
        .iter()
        .any(|prefix| frame.symbol.starts_with(prefix.as_str()))
}

/// Resolves the first acceptable frame at or above `start_level`.
///
/// Synthetic frames are stepped over. A relay-namespace frame marks the scan
/// as inside a trampoline; the frame immediately following a relay run is the
/// trampoline's own re-entry and is stepped over as well, so the frame after
/// that is the one accepted. An exhausted scan falls back to the frame at
/// `start_level` with a diagnostic.
///
/// # Errors
/// `StartLevelOutOfRange` when `start_level` is not a valid index. That means
/// an entry-point wrapper miscounted its own depth, so it fails loudly instead
/// of fabricating a frame.
pub fn resolve_at(stack: &[RawFrame], start_level: usize) -> Result<StackFrame, Error> {
    if start_level >= stack.len() {
        internal::error(
            "FRAME",
            &format!(
                "stack scan start level {start_level} exceeds stack depth {}",
                stack.len()
            ),
        );
        return Err(Error::StartLevelOutOfRange {
            level: start_level,
            depth: stack.len(),
        });
    }

    let mut inside_relay = false;
    for raw in &stack[start_level..] {
        if is_synthetic(raw) {
            continue;
        }
        if is_relay(raw) {
            inside_relay = true;
            continue;
        }
        if inside_relay {
            inside_relay = false;
            continue;
        }
        return Ok(StackFrame::from_raw(raw));
    }

    let fallback = &stack[start_level];
    internal::warn(
        "FRAME",
        &format!(
            "no acceptable caller frame found, using fallback: {}",
            fallback.symbol
        ),
    );
    Ok(StackFrame::from_raw(fallback))
}

/// Extracts the current and parent caller frames for a log call.
///
/// The start index comes from [`StartIndexResolver`], then the first two
/// frames that are neither synthetic nor in a skip-listed namespace become
/// current and parent. Never fails: an empty or fully-filtered stack yields
/// the fallback frame.
#[must_use]
pub fn extract(
    stack: &[RawFrame],
    skip_prefixes: &std::collections::HashSet<String>,
) -> StackFrames {
    if stack.is_empty() {
        return StackFrames {
            current: StackFrame::fallback(),
            parent: None,
        };
    }

    let search_start = StartIndexResolver::with_custom(skip_prefixes).resolve(stack);

    let mut current: Option<&RawFrame> = None;
    let mut parent: Option<&RawFrame> = None;

    for raw in stack.iter().skip(search_start) {
        if is_skipped(raw, skip_prefixes) || is_synthetic(raw) {
            continue;
        }
        if current.is_none() {
            current = Some(raw);
        } else {
            parent = Some(raw);
            break;
        }
    }

    if current.is_none() {
        internal::warn("FRAME", "no caller frame survived filtering, using fallback");
    }
    let fallback = current.or_else(|| stack.get(search_start)).or_else(|| stack.first());

    StackFrames {
        current: fallback.map_or_else(StackFrame::fallback, StackFrame::from_raw),
        parent: parent.map(StackFrame::from_raw),
    }
}
