//! Capture boundary between the runtime backtrace and the pure resolvers.

use backtrace::Backtrace;

use super::RawFrame;

/// Snapshots the current call stack as an ordered frame sequence, innermost
/// first. Symbols come demangled with their trailing hash suffix stripped so
/// the resolvers see stable `module::Type::method` paths.
#[must_use]
pub fn capture() -> Vec<RawFrame> {
    let backtrace = Backtrace::new();
    let mut frames = Vec::new();

    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            let name = symbol
                .name()
                .map_or_else(|| "unknown".to_string(), |n| n.to_string());
            frames.push(RawFrame {
                symbol: strip_hash_suffix(name),
                file: symbol
                    .filename()
                    .and_then(std::path::Path::file_name)
                    .map(|f| f.to_string_lossy().into_owned()),
                line: symbol.lineno().unwrap_or(0),
            });
        }
    }

    frames
}

/// Drops the `::h0123456789abcdef` disambiguation suffix the compiler appends
/// to monomorphized symbols.
fn strip_hash_suffix(mut symbol: String) -> String {
    if let Some(idx) = symbol.rfind("::h") {
        let tail = &symbol[idx + 3..];
        if tail.len() == 16 && tail.chars().all(|c| c.is_ascii_hexdigit()) {
            symbol.truncate(idx);
        }
    }
    symbol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_hash_suffix() {
        assert_eq!(
            strip_hash_suffix("app::run::h0123456789abcdef".to_string()),
            "app::run"
        );
    }

    #[test]
    fn keeps_non_hash_tail() {
        assert_eq!(
            strip_hash_suffix("app::run::helper".to_string()),
            "app::run::helper"
        );
    }
}
