use serde_json::Value;

/// Format JSON as plain text (no colors)
pub fn pretty(v: &Value) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| "{}".to_string())
}

/// Format JSON with truncation for massive payloads.
///
/// Raw block JSON can run to megabytes when a block carries many
/// transactions; output is capped at `max_bytes` with a footer noting what
/// was cut, ending on a complete line.
pub fn pretty_safe(v: &Value, max_bytes: usize) -> String {
    let formatted = pretty(v);

    if formatted.len() > max_bytes {
        let mut cut = max_bytes;
        while !formatted.is_char_boundary(cut) {
            cut -= 1;
        }
        let truncated = &formatted[..cut];
        let last_newline = truncated.rfind('\n').unwrap_or(cut);
        let clean_truncate = &formatted[..last_newline];

        format!(
            "{}\n\n... (truncated - {} total bytes, showing first {} KB)\n",
            clean_truncate,
            formatted.len(),
            max_bytes / 1024
        )
    } else {
        formatted
    }
}
