//! Line-level lexing: comment stripping and statement splitting.

/// Remove a trailing `//` or `#` comment from a line.
pub fn strip_line_comments(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'#' {
            return &line[..i];
        }
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'/') {
            return &line[..i];
        }
        i += 1;
    }
    line
}

/// How a statement was terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// `;` ends a field declaration.
    Semicolon,
    /// `{` opens a message or group body.
    Open,
    /// `}` closes the innermost body.
    Close,
}

/// One statement of schema text, with the line it starts on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub line: usize,
    pub text: String,
    pub terminator: Terminator,
}

/// Split schema text into statements terminated by `;`, `{` or `}`.
///
/// Returns the statements and any trailing text that was not terminated,
/// together with its starting line.
pub fn split_statements(input: &str) -> (Vec<Statement>, Option<(usize, String)>) {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut start_line = 0usize;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        for ch in strip_line_comments(raw).chars() {
            let terminator = match ch {
                ';' => Some(Terminator::Semicolon),
                '{' => Some(Terminator::Open),
                '}' => Some(Terminator::Close),
                _ => None,
            };
            match terminator {
                Some(terminator) => {
                    let line = if current.trim().is_empty() {
                        line_no
                    } else {
                        start_line
                    };
                    out.push(Statement {
                        line,
                        text: current.trim().to_string(),
                        terminator,
                    });
                    current.clear();
                }
                None => {
                    if current.trim().is_empty() && !ch.is_whitespace() {
                        start_line = line_no;
                    }
                    current.push(ch);
                }
            }
        }
        current.push(' ');
    }

    let rest = current.trim();
    let trailing = (!rest.is_empty()).then(|| (start_line, rest.to_string()));
    (out, trailing)
}
