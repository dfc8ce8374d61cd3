//! Computes where the caller scan should begin.
//!
//! Every entry point and wrapper adds one frame, so a hardcoded start index
//! breaks whenever the call shape changes. Instead the resolver finds the last
//! frame still inside the engine's own namespace and starts just past it.

use super::RawFrame;

/// Fixed start index used when no engine-namespace frame is present at all.
pub const DEFAULT_START_INDEX: usize = 4;

/// The engine's own symbol prefixes, always treated as internal.
const ENGINE_PREFIXES: [&str; 1] = ["sitelog"];

/// Skip prefixes that name platform namespaces rather than caller wrappers;
/// these never extend the internal block.
const START_PREFIX_EXCLUDES: [&str; 6] = ["std", "core", "alloc", "tokio", "futures", "backtrace"];

/// Resolves the scan start index for a captured stack.
#[derive(Debug, Clone, Default)]
pub struct StartIndexResolver {
    additional_prefixes: Vec<String>,
}

impl StartIndexResolver {
    /// Engine namespaces only.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            additional_prefixes: Vec::new(),
        }
    }

    /// Extends the internal block with caller-registered wrapper prefixes,
    /// ignoring entries that name well-known platform namespaces.
    #[must_use]
    pub fn with_custom<'a>(prefixes: impl IntoIterator<Item = &'a String>) -> Self {
        let additional_prefixes = prefixes
            .into_iter()
            .filter(|p| Self::is_custom_prefix(p))
            .cloned()
            .collect();
        Self {
            additional_prefixes,
        }
    }

    fn is_custom_prefix(prefix: &str) -> bool {
        if prefix.trim().is_empty() {
            return false;
        }
        !START_PREFIX_EXCLUDES
            .iter()
            .any(|excluded| prefix.starts_with(excluded))
    }

    fn is_internal(&self, frame: &RawFrame) -> bool {
        ENGINE_PREFIXES
            .iter()
            .any(|p| frame.symbol.starts_with(p))
            || self
                .additional_prefixes
                .iter()
                .any(|p| frame.symbol.starts_with(p.as_str()))
    }

    /// Returns the index immediately after the last internal frame, or
    /// [`DEFAULT_START_INDEX`] when the stack contains no internal frame.
    #[must_use]
    pub fn resolve(&self, stack: &[RawFrame]) -> usize {
        let mut last_internal = None;
        for (i, frame) in stack.iter().enumerate() {
            if self.is_internal(frame) {
                last_internal = Some(i);
            }
        }
        last_internal.map_or(DEFAULT_START_INDEX, |i| i + 1)
    }
}
