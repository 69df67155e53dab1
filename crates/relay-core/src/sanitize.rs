//! Output sanitization for text captured from the assistant process.
//!
//! The CLI may emit colorized output or cursor control sequences that make no
//! sense in a chat message, so everything relayed to a chat passes through here.

/// Remove ANSI/VT terminal escape sequences.
///
/// Idempotent: stripping already-clean text returns it unchanged.
pub fn strip_ansi(text: &str) -> String {
    console::strip_ansi_codes(text).into_owned()
}

/// Truncate to at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Short single-line preview of a prompt or reply for log lines.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    let cut = truncate_chars(&flat, max_chars);
    if cut.len() < flat.len() {
        format!("{cut}...")
    } else {
        flat
    }
}
