//! Shared helpers for channel implementations.

/// Split a long message into chunks of at most `max_units` UTF-16 code units,
/// the unit Telegram counts message length in (an emoji usually takes two).
///
/// Prefers breaking after the last newline inside each window and otherwise
/// cuts on a character boundary. Empty input yields no chunks.
pub(crate) fn split_message(text: &str, max_units: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(window_end) = window_end(rest, max_units) else {
            chunks.push(rest);
            break;
        };
        let break_at = rest[..window_end]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(window_end);
        chunks.push(&rest[..break_at]);
        rest = &rest[break_at..];
    }

    chunks
}

/// Byte index where `text` first exceeds `max_units`, or `None` if it fits.
/// Always at least one character in, so splitting makes progress.
fn window_end(text: &str, max_units: usize) -> Option<usize> {
    let mut units = 0;
    for (idx, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max_units {
            return Some(if idx == 0 { c.len_utf8() } else { idx });
        }
    }
    None
}
