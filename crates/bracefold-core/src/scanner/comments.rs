//! Comment detection for keyword candidates

use std::ops::Range;

/// Whether `//` appears on the same line before `offset`
pub(super) fn in_line_comment(text: &str, offset: usize) -> bool {
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    text[line_start..offset].contains("//")
}

/// Sorted block comment interiors of one text
///
/// Each span covers the offsets at which the `/* ... */` state, scanned
/// from the start of the text, is open: from just after `/*` up to and
/// including the offset of the closing `/`. An unterminated comment runs to
/// the end of the text. Delimiters are matched textually, string literals
/// are not taken into account.
#[derive(Debug, Clone, Default)]
pub(super) struct CommentIndex {
    spans: Vec<Range<usize>>,
}

impl CommentIndex {
    pub(super) fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut spans = Vec::new();
        let mut open: Option<usize> = None;
        let mut i = 0;

        while i + 1 < bytes.len() {
            match (open, bytes[i], bytes[i + 1]) {
                (None, b'/', b'*') => {
                    open = Some(i + 2);
                    i += 2;
                }
                (Some(start), b'*', b'/') => {
                    spans.push(start..i + 2);
                    open = None;
                    i += 2;
                }
                _ => i += 1,
            }
        }

        if let Some(start) = open {
            spans.push(start..usize::MAX);
        }

        Self { spans }
    }

    /// Whether the block comment state is open at `offset`
    pub(super) fn in_block_comment(&self, offset: usize) -> bool {
        let idx = self.spans.partition_point(|span| span.end <= offset);
        self.spans
            .get(idx)
            .is_some_and(|span| span.start <= offset)
    }
}
