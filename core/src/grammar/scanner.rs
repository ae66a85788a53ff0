/// Locates the first well-nested span delimited by an `open`/`close` pair.
///
/// Malformed bounds never fail: when the first `close` precedes the first
/// `open`, when no `close` follows, or when the text ends before the depth
/// returns to zero, no span is reported and the characters stay literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketScanner {
    open: char,
    close: char,
}

impl BracketScanner {
    pub fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    pub fn open(&self) -> char {
        self.open
    }

    pub fn close(&self) -> char {
        self.close
    }

    /// Returns the inclusive byte offsets of the opening and closing bound.
    pub fn find_span(&self, text: &str) -> Option<(usize, usize)> {
        let start = text.find(self.open)?;
        let first_close = text.find(self.close)?;
        if first_close < start {
            return None;
        }

        let body_start = start + self.open.len_utf8();
        let mut depth = 1usize;
        for (offset, c) in text[body_start..].char_indices() {
            if c == self.open {
                depth += 1;
            } else if c == self.close {
                depth -= 1;
                if depth == 0 {
                    return Some((start, body_start + offset));
                }
            }
        }
        None
    }

    /// Splits `text` around its first span into `(before, interior, after)`.
    pub fn split_span<'a>(&self, text: &'a str) -> Option<(&'a str, &'a str, &'a str)> {
        let (start, end) = self.find_span(text)?;
        Some((
            &text[..start],
            &text[start + self.open.len_utf8()..end],
            &text[end + self.close.len_utf8()..],
        ))
    }

    /// The first span including both bounds, or `None`.
    pub fn first_span<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.find_span(text)
            .map(|(start, end)| &text[start..end + self.close.len_utf8()])
    }
}
