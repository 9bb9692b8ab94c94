//! Keyword-anchored brace block scanner
//!
//! Finds every whole-word occurrence of a keyword that is followed by a
//! separator and a balanced object literal:
//!
//! ```text
//! sx={{ color: "red" }}     sx = { ... }     sx: { ... }     sx { ... }
//! ```
//!
//! The scan runs in one left-to-right pass over the text:
//! - Keyword discovery (word boundaries, case sensitive)
//! - Optional comment exclusion (`//` earlier on the line, or inside `/* */`)
//! - Separator validation between the keyword and the next `{`
//! - Brace matching that ignores braces inside `"`, `'` and `` ` `` literals
//!
//! Candidates that fail any step are dropped silently. Half-typed source is
//! the normal case in an editor, so the scanner never reports content errors.

mod braces;
mod comments;


use std::ops::{Range, RangeInclusive};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, ScanError};
use braces::{find_closing_brace, find_open_brace, is_valid_separator};
use comments::{in_line_comment, CommentIndex};

/// Options applied to every scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Drop keyword occurrences found inside line or block comments
    pub ignore_keyword_in_comments: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignore_keyword_in_comments: true,
        }
    }
}

/// One keyword occurrence followed by a balanced brace block
///
/// All offsets are byte offsets into the scanned text. `brace_end` is
/// inclusive: it points at the matching `}` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Match<'t> {
    /// Offset of the first keyword character
    pub keyword_start: usize,
    /// Offset just past the keyword
    pub keyword_end: usize,
    /// Offset of the opening `{`
    pub brace_start: usize,
    /// Offset of the matching `}`
    pub brace_end: usize,
    /// Text from `brace_start` to `brace_end`, both braces included
    pub raw_content: &'t str,
}

impl Match<'_> {
    /// Byte range covered by the keyword
    pub fn keyword_range(&self) -> Range<usize> {
        self.keyword_start..self.keyword_end
    }

    /// Byte range covered by the brace block, closing brace included
    pub fn brace_range(&self) -> RangeInclusive<usize> {
        self.brace_start..=self.brace_end
    }
}

/// Keyword scanned for when none is configured
pub const DEFAULT_KEYWORD: &str = "sx";

/// Reusable scanner for a single keyword
///
/// Holds no per-text state: every call to [`Scanner::scan`] starts a fresh
/// pass, so one scanner can serve any number of documents concurrently.
#[derive(Debug, Clone)]
pub struct Scanner {
    keyword: String,
    pattern: Regex,
    options: ScanOptions,
}

impl Scanner {
    /// Build a scanner for `keyword`
    pub fn new(keyword: &str, options: ScanOptions) -> Result<Self> {
        if keyword.is_empty() {
            return Err(ScanError::EmptyKeyword);
        }

        let pattern = Regex::new(&keyword_pattern(keyword))?;

        Ok(Self {
            keyword: keyword.to_string(),
            pattern,
            options,
        })
    }

    /// The keyword this scanner looks for
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The options applied to each scan
    pub fn options(&self) -> ScanOptions {
        self.options
    }

    /// Lazily scan `text`, yielding matches in order of `keyword_start`
    pub fn scan<'s, 't>(&'s self, text: &'t str) -> Matches<'s, 't> {
        let comments = self
            .options
            .ignore_keyword_in_comments
            .then(|| CommentIndex::new(text));

        Matches {
            text,
            keywords: self.pattern.find_iter(text),
            comments,
        }
    }

    /// Scan `text` to completion
    pub fn collect<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        self.scan(text).collect()
    }
}

impl Default for Scanner {
    /// Scanner for [`DEFAULT_KEYWORD`] with default options
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.to_string(),
            pattern: Regex::new(&keyword_pattern(DEFAULT_KEYWORD))
                .expect("default keyword is a valid pattern"),
            options: ScanOptions::default(),
        }
    }
}

/// Scan `text` once for `keyword`
///
/// Convenience wrapper around [`Scanner`] for one-off scans.
pub fn scan<'t>(text: &'t str, keyword: &str, options: ScanOptions) -> Result<Vec<Match<'t>>> {
    Ok(Scanner::new(keyword, options)?.collect(text))
}

/// Iterator over the matches of one text
///
/// Created by [`Scanner::scan`].
#[derive(Debug)]
pub struct Matches<'s, 't> {
    text: &'t str,
    keywords: regex::Matches<'s, 't>,
    comments: Option<CommentIndex>,
}

impl<'t> Iterator for Matches<'_, 't> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        for found in self.keywords.by_ref() {
            let resolved = resolve(self.text, self.comments.as_ref(), found.start(), found.end());
            if resolved.is_some() {
                return resolved;
            }
        }
        None
    }
}

/// Turn one keyword occurrence into a match, or drop it
fn resolve<'t>(
    text: &'t str,
    comments: Option<&CommentIndex>,
    keyword_start: usize,
    keyword_end: usize,
) -> Option<Match<'t>> {
    if let Some(comments) = comments {
        if in_line_comment(text, keyword_start) || comments.in_block_comment(keyword_start) {
            trace!(offset = keyword_start, reason = "in_comment", "dropping candidate");
            return None;
        }
    }

    let Some(brace_start) = find_open_brace(text, keyword_end) else {
        trace!(offset = keyword_start, reason = "no_open_brace", "dropping candidate");
        return None;
    };

    if !is_valid_separator(&text[keyword_end..brace_start]) {
        trace!(offset = keyword_start, reason = "invalid_separator", "dropping candidate");
        return None;
    }

    let Some(brace_end) = find_closing_brace(text, brace_start) else {
        trace!(offset = keyword_start, reason = "unbalanced", "dropping candidate");
        return None;
    };

    Some(Match {
        keyword_start,
        keyword_end,
        brace_start,
        brace_end,
        raw_content: &text[brace_start..=brace_end],
    })
}

/// Regex source for a whole-word keyword
///
/// Word boundaries are only asserted on sides where the keyword itself
/// starts or ends with an identifier character, so keywords such as `$css`
/// still match.
fn keyword_pattern(keyword: &str) -> String {
    let boundary = |c: Option<char>| match c {
        Some(c) if is_identifier_char(c) => r"\b",
        _ => "",
    };

    format!(
        "{}{}{}",
        boundary(keyword.chars().next()),
        regex::escape(keyword),
        boundary(keyword.chars().last())
    )
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
