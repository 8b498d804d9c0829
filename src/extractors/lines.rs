// src/extractors/lines.rs

/// A single forward-only cursor over the anthology's lines, shared by both
/// extraction phases.
///
/// The title pass stops by *peeking* at the repeated headline, so the
/// segmenter resumes on that very line. Line numbers are 1-based and count
/// consumed lines only.
pub struct LineCursor<I: Iterator<Item = String>> {
    lines: I,
    peeked: Option<String>,
    consumed: usize,
}

impl<I: Iterator<Item = String>> LineCursor<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            peeked: None,
            consumed: 0,
        }
    }

    /// Returns the next line without consuming it.
    pub fn peek(&mut self) -> Option<&str> {
        if self.peeked.is_none() {
            self.peeked = self.lines.next();
        }
        self.peeked.as_deref()
    }

    /// Number of lines handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Line number the next call to `next` will return.
    pub fn next_line_number(&self) -> usize {
        self.consumed + 1
    }
}

impl<I: Iterator<Item = String>> Iterator for LineCursor<I> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let line = self.peeked.take().or_else(|| self.lines.next())?;
        self.consumed += 1;
        Some(line)
    }
}

#[cfg(test)]
pub fn cursor_from_str(text: &str) -> LineCursor<std::vec::IntoIter<String>> {
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    LineCursor::new(lines.into_iter())
}
