//! Byte-offset helpers shared by the analyzers.
//!
//! Every offset here is a UTF-8 byte offset that lands on a char boundary,
//! so slices taken from it are always valid and verbatim.

/// Byte spans of the sentences in `text`, trimmed of surrounding whitespace.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace (or end of
/// text), or at a newline. Blank spans are skipped.
pub fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let boundary = match c {
            '\n' => Some(i),
            '.' | '!' | '?' => match chars.peek() {
                None => Some(i + c.len_utf8()),
                Some((_, next)) if next.is_whitespace() => Some(i + c.len_utf8()),
                _ => None,
            },
            _ => None,
        };
        if let Some(end) = boundary {
            push_trimmed(text, start, end, &mut spans);
            start = if c == '\n' { i + 1 } else { end };
        }
    }
    push_trimmed(text, start, text.len(), &mut spans);
    spans
}

fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<(usize, usize)>) {
    if let Some((s, e)) = trim_span(text, start, end) {
        spans.push((s, e));
    }
}

/// Shrink `[start, end)` to exclude leading and trailing whitespace.
/// Returns `None` for blank spans.
pub fn trim_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = text.get(start..end)?;
    let leading = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    let s = start + leading;
    Some((s, s + trimmed.len()))
}

/// The sentence span containing byte offset `at`, if any.
pub fn sentence_containing(text: &str, at: usize) -> Option<(usize, usize)> {
    sentence_spans(text)
        .into_iter()
        .find(|&(s, e)| s <= at && at < e)
}

/// Byte range reaching `radius` characters before `start` and after `end`,
/// clamped to the text.
pub fn char_window(text: &str, start: usize, end: usize, radius: usize) -> (usize, usize) {
    let lo = if radius == 0 {
        start
    } else {
        text[..start]
            .char_indices()
            .rev()
            .nth(radius - 1)
            .map(|(i, _)| i)
            .unwrap_or(0)
    };
    let hi = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    (lo, hi)
}

/// Byte length of the first `max_chars` characters of `s`.
pub fn clip_len(s: &str, max_chars: usize) -> usize {
    s.char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_spans_basic() {
        let text = "Crime rose. Police said so!\nNext line here";
        let spans: Vec<&str> = sentence_spans(text)
            .into_iter()
            .map(|(s, e)| &text[s..e])
            .collect();
        assert_eq!(spans, vec!["Crime rose.", "Police said so!", "Next line here"]);
    }

    #[test]
    fn test_sentence_spans_keep_decimal_numbers() {
        let text = "Prices rose 2.5 percent. Then fell.";
        let spans = sentence_spans(text);
        assert_eq!(&text[spans[0].0..spans[0].1], "Prices rose 2.5 percent.");
    }

    #[test]
    fn test_sentence_containing() {
        let text = "One. Two three. Four.";
        let at = text.find("three").unwrap();
        let (s, e) = sentence_containing(text, at).unwrap();
        assert_eq!(&text[s..e], "Two three.");
    }

    #[test]
    fn test_char_window_respects_multibyte() {
        let text = "ééééé surge ééééé";
        let start = text.find("surge").unwrap();
        let (lo, hi) = char_window(text, start, start + 5, 3);
        assert_eq!(&text[lo..hi], "éé surge éé");
    }

    #[test]
    fn test_char_window_clamps() {
        let text = "a surge b";
        let (lo, hi) = char_window(text, 2, 7, 250);
        assert_eq!((lo, hi), (0, text.len()));
    }

    #[test]
    fn test_clip_len() {
        assert_eq!(clip_len("héllo", 2), "hé".len());
        assert_eq!(clip_len("hi", 10), 2);
    }

    #[test]
    fn test_trim_span_blank() {
        assert_eq!(trim_span("   ", 0, 3), None);
        assert_eq!(trim_span(" ab ", 0, 4), Some((1, 3)));
    }
}
