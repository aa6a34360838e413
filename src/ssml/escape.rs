/*!
 * Escaping of text and attribute values for SSML output.
 */

/// Marker emitted for every line break that is not trailing
pub const STRONG_BREAK: &str = "<break strength='x-strong'/>";

/// Escape a text run for SSML.
///
/// Markup characters become entities, trailing line breaks are dropped and
/// every remaining line break becomes a strong pause.
pub fn escape_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = normalized.trim_end_matches('\n');

    let mut escaped = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\n' => escaped.push_str(STRONG_BREAK),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Escape a value placed inside a quoted tag attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}
