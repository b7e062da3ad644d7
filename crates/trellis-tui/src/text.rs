//! Display-width and UTF-8 boundary helpers shared by the renderer, the
//! input engine and selection mapping.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal columns occupied by `c`. Control characters count as zero.
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Largest char boundary `<= index`, clamped to `s.len()`.
pub fn floor_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Boundary of the code point preceding `index`, or `None` at the start.
pub fn prev_boundary(s: &str, index: usize) -> Option<usize> {
    let index = floor_boundary(s, index);
    s[..index].char_indices().next_back().map(|(i, _)| i)
}

/// Boundary after the code point starting at `index`, or `None` at the end.
pub fn next_boundary(s: &str, index: usize) -> Option<usize> {
    let index = floor_boundary(s, index);
    s[index..].chars().next().map(|c| index + c.len_utf8())
}

/// Decode one code point from raw bytes at `index`.
///
/// Returns the decoded char (U+FFFD for a malformed sequence) and the number
/// of bytes consumed, which is always at least one so that scanning loops
/// terminate on garbage input.
pub fn decode_at(bytes: &[u8], index: usize) -> (char, usize) {
    let rest = &bytes[index.min(bytes.len())..];
    if rest.is_empty() {
        return (char::REPLACEMENT_CHARACTER, 1);
    }
    let expected = match rest[0] {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return (char::REPLACEMENT_CHARACTER, 1),
    };
    let take = expected.min(rest.len());
    match std::str::from_utf8(&rest[..take]) {
        Ok(s) => match s.chars().next() {
            Some(c) => (c, take),
            None => (char::REPLACEMENT_CHARACTER, 1),
        },
        Err(err) => (
            char::REPLACEMENT_CHARACTER,
            err.error_len().unwrap_or(take).max(1),
        ),
    }
}

/// Lossily decode a byte stream using [`decode_at`].
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let (c, used) = decode_at(bytes, i);
        out.push(c);
        i += used;
    }
    out
}

/// Prefix of `s` that fits in `max_width` columns. A double-width glyph that
/// would straddle the limit is dropped.
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = char_width(c);
        if used + w > max_width {
            return &s[..i];
        }
        used += w;
    }
    s
}

/// Skip the first `columns` display columns of `s`. Returns the remaining
/// suffix and how many columns of the first kept glyph were cut (a wide glyph
/// split by the scroll edge is dropped entirely and reported as padding).
pub fn skip_width(s: &str, columns: usize) -> (&str, usize) {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        if used >= columns {
            return (&s[i..], used - columns);
        }
        used += char_width(c);
    }
    ("", used.saturating_sub(columns))
}

/// Word characters for word motion, word deletion and word selection.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
