/*! Balanced delimiter removal.

Templates (`{{ ... }}`) and tables (`{| ... |}`) can nest arbitrarily,
which regular expressions alone can't express. [NestedBlockStripper] scans delimiter matches
left to right with a nesting counter and removes every outermost balanced block.
!*/
use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Templates and parser functions.
    pub static ref TEMPLATES: NestedBlockStripper =
        NestedBlockStripper::new(Regex::new(r"\{\{").unwrap(), Regex::new(r"\}\}").unwrap());

    /// Wiki tables.
    pub static ref TABLES: NestedBlockStripper =
        NestedBlockStripper::new(Regex::new(r"\{\|").unwrap(), Regex::new(r"\|\}").unwrap());
}

/// Remover for blocks delimited by an open/close pattern pair.
///
/// Neither pattern may match the empty string.
pub struct NestedBlockStripper {
    open: Regex,
    close: Regex,
}

impl NestedBlockStripper {
    pub fn new(open: Regex, close: Regex) -> Self {
        Self { open, close }
    }

    /// Byte ranges of the outermost balanced blocks of `text`, in order.
    ///
    /// A closer that has no pending opener is not part of any block.
    /// If the text ends with openers still pending, the outermost block ends at the last closer
    /// found after it (if any).
    pub fn spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut depth = 0usize;
        let mut block_start = 0;
        let mut last_close: Option<usize> = None;
        let mut pos = 0;

        let mut next_open = self.open.find_at(text, 0);
        let mut next_close = self.close.find_at(text, 0);

        loop {
            // cached matches starting before `pos` overlap a consumed delimiter
            if next_open.map_or(false, |m| m.start() < pos) {
                next_open = self.open.find_at(text, pos);
            }
            if next_close.map_or(false, |m| m.start() < pos) {
                next_close = self.close.find_at(text, pos);
            }

            match (next_open, next_close) {
                (Some(open), Some(close)) if open.start() <= close.start() => {
                    debug_assert!(open.end() > open.start());
                    if depth == 0 {
                        block_start = open.start();
                        last_close = None;
                    }
                    depth += 1;
                    pos = open.end();
                }
                (_, Some(close)) => {
                    debug_assert!(close.end() > close.start());
                    if depth > 0 {
                        depth -= 1;
                        last_close = Some(close.end());
                        if depth == 0 {
                            spans.push(block_start..close.end());
                        }
                    }
                    pos = close.end();
                }
                // no closer left, pending openers can't be balanced anymore
                (Some(_), None) | (None, None) => break,
            }
        }

        if depth > 0 {
            if let Some(end) = last_close {
                spans.push(block_start..end);
            }
        }

        spans
    }

    /// Returns `text` without its balanced blocks.
    pub fn strip(&self, text: &str) -> String {
        drop_spans(text, self.spans(text))
    }
}

/// Removes the provided byte ranges from `text`.
///
/// Ranges may be unordered and may overlap.
pub fn drop_spans(text: &str, mut spans: Vec<Range<usize>>) -> String {
    if spans.is_empty() {
        return text.to_string();
    }
    spans.sort_by_key(|span| (span.start, span.end));

    let mut kept = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        if span.start > cursor {
            kept.push_str(&text[cursor..span.start]);
        }
        cursor = cursor.max(span.end);
    }
    kept.push_str(&text[cursor.min(text.len())..]);
    kept
}
