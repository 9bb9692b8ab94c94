//! Separator validation and brace matching

/// Trimmed text allowed between the keyword and its opening brace
const SEPARATORS: [&str; 5] = ["", "=", ":", "={", ":{"];

/// Offset of the first `{` at or after `from`
pub(super) fn find_open_brace(text: &str, from: usize) -> Option<usize> {
    text[from..].find('{').map(|i| from + i)
}

/// Whether the text between keyword and brace is an accepted separator
pub(super) fn is_valid_separator(between: &str) -> bool {
    SEPARATORS.contains(&between.trim())
}

/// Offset of the `}` that balances the `{` at `open`
///
/// Braces inside string and template literals are ignored. A delimiter
/// preceded by a backslash does not close its literal. Returns `None` when
/// the text ends before the depth returns to zero.
///
/// Works on bytes: every delimiter is ASCII and never appears inside a
/// multi-byte UTF-8 sequence.
pub(super) fn find_closing_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut quote: Option<u8> = None;

    for i in open + 1..bytes.len() {
        let b = bytes[i];
        match quote {
            Some(delimiter) => {
                if b == delimiter && bytes[i - 1] != b'\\' {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' | b'`' => quote = Some(b),
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
    }

    None
}
