//! Line-oriented JSON pretty-printer for the JSON log mode.
//!
//! Renders one key or element per line with a fixed indent step per nesting
//! level and commas on all but the last entry at each level. Key order is the
//! input's own order.

use serde_json::Value;

/// Spaces added per nesting level.
pub const JSON_INDENT_STEP: usize = 2;

/// Splits a raw JSON-looking string into pretty-printed lines.
///
/// Unparseable input degrades to a single trimmed raw line.
#[must_use]
pub fn pretty_lines(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return vec![trimmed.to_string()];
    }

    serde_json::from_str::<Value>(trimmed).map_or_else(
        |_| vec![trimmed.to_string()],
        |value| {
            let mut lines = Vec::new();
            render(&value, 0, "", "", &mut lines);
            lines
        },
    )
}

/// Emits `value` into `lines`. `prefix` carries a pending `"key": ` label and
/// `suffix` the comma owed to the enclosing container.
fn render(value: &Value, level: usize, prefix: &str, suffix: &str, lines: &mut Vec<String>) {
    let pad = " ".repeat(level * JSON_INDENT_STEP);
    match value {
        Value::Object(map) if !map.is_empty() => {
            lines.push(format!("{pad}{prefix}{{"));
            let last = map.len() - 1;
            for (i, (key, entry)) in map.iter().enumerate() {
                let comma = if i == last { "" } else { "," };
                render(entry, level + 1, &format!("\"{key}\": "), comma, lines);
            }
            lines.push(format!("{pad}}}{suffix}"));
        }
        Value::Object(_) => lines.push(format!("{pad}{prefix}{{}}{suffix}")),
        Value::Array(items) if !items.is_empty() => {
            lines.push(format!("{pad}{prefix}["));
            let last = items.len() - 1;
            for (i, item) in items.iter().enumerate() {
                let comma = if i == last { "" } else { "," };
                render(item, level + 1, "", comma, lines);
            }
            lines.push(format!("{pad}]{suffix}"));
        }
        Value::Array(_) => lines.push(format!("{pad}{prefix}[]{suffix}")),
        // Scalar Display is compact JSON text, strings quoted and escaped.
        scalar => lines.push(format!("{pad}{prefix}{scalar}{suffix}")),
    }
}
