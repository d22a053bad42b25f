/// Forward-only token reader over one record line.
///
/// A token is either the text between a leading `"` and the next `"`, or a
/// run of non-whitespace characters.
#[derive(Debug, Clone)]
pub(crate) struct Record<'a> {
    rest: &'a str,
}

impl<'a> Record<'a> {
    pub(crate) fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    /// Takes the next token, or `None` when the line is used up.
    pub(crate) fn next_token(&mut self) -> Option<&'a str> {
        let rest = self.rest.trim_start();
        if rest.is_empty() {
            self.rest = rest;
            return None;
        }

        if let Some(quoted) = rest.strip_prefix('"') {
            let (token, after) = match quoted.find('"') {
                Some(end) => (&quoted[..end], &quoted[end + 1..]),
                None => (quoted, ""),
            };
            self.rest = after;
            return Some(token);
        }

        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.rest = &rest[end..];
        Some(&rest[..end])
    }
}

/// Returns `true` for lines that carry no record: blank lines and `#` comments.
pub(crate) fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// The first token of a line, upper-cased.
pub(crate) fn keyword(line: &str) -> Option<String> {
    Record::new(line).next_token().map(str::to_ascii_uppercase)
}
