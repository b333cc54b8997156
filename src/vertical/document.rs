/*! In-memory vertical document.

A vertical document is a sequence of lines that are either structural tags
(starting with `<`) or tab-separated tokens.

While parsing, explicit terms (`<term wuri="...">` ... `</term>`) are collected
into the document's own [TermTrie], keyed by the lemmas of their tokens.
!*/
use std::collections::VecDeque;
use std::fmt;

use log::warn;

use super::tag::{Tag, TagKind};
use super::{Tagset, Token};
use crate::terms::TermTrie;

/// Tagger artifact: an empty sentence (`<g/>`, `.`, `</s>`) followed by this tag.
const HACK_TAG: &str = "<s hack";

/// Number of previously emitted lines dropped by a [HACK_TAG].
const HACK_LOOKBACK: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Tag(Tag),
    Token(Token),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Tag(tag) => fmt::Display::fmt(tag, f),
            Line::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

/// Append-only line sink that keeps the last few lines retractable.
#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line>,
    recent: VecDeque<Line>,
}

impl LineBuilder {
    /// Position of the next pushed line.
    fn len(&self) -> usize {
        self.lines.len() + self.recent.len()
    }

    fn push(&mut self, line: Line) {
        if self.recent.len() == HACK_LOOKBACK {
            if let Some(oldest) = self.recent.pop_front() {
                self.lines.push(oldest);
            }
        }
        self.recent.push_back(line);
    }

    /// Drops the (at most [HACK_LOOKBACK]) retractable lines.
    ///
    /// Returns the position of the first dropped line.
    fn discard_recent(&mut self) -> usize {
        self.recent.clear();
        self.lines.len()
    }

    fn finish(mut self) -> Vec<Line> {
        self.lines.extend(self.recent);
        self.lines
    }
}

/// Explicit term being read.
struct OpenTerm {
    wuri: String,
    uncertain: bool,
    /// position of the opening tag
    opened_at: usize,
    /// (position, lemma, word) of each token
    tokens: Vec<(usize, String, String)>,
}

/// Positions of the tags of the last closed term.
struct ClosedTerm {
    opened_at: usize,
    closed_at: usize,
}

#[derive(Debug, Clone)]
pub struct VerticalDocument {
    lines: Vec<Line>,
    terms: TermTrie,
}

impl VerticalDocument {
    /// Parses a vertical document.
    ///
    /// Malformed term markup (a `</term>` without an opened term, or a term opened inside another one)
    /// is kept as a literal, word-only token.
    pub fn parse(text: &str, tagset: Tagset) -> Self {
        let mut builder = LineBuilder::default();
        let mut terms = TermTrie::default();
        let mut term: Option<OpenTerm> = None;
        let mut closed: Option<ClosedTerm> = None;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if !trimmed.starts_with('<') {
                let token = Token::parse(line.trim_matches(' '), tagset);
                if let Some(open) = term.as_mut() {
                    open.tokens.push((
                        builder.len(),
                        token.lemma_or_word().to_string(),
                        token.word().to_string(),
                    ));
                }
                builder.push(Line::Token(token));
                continue;
            }

            if trimmed.starts_with(HACK_TAG) {
                let from = builder.discard_recent();
                if matches!(&term, Some(open) if open.opened_at >= from) {
                    if let Some(open) = term.take() {
                        warn!("term {:?} dropped along with an empty sentence", open.wuri);
                    }
                } else if let Some(open) = term.as_mut() {
                    open.tokens.retain(|(position, _, _)| *position < from);
                }
                // keep the closing tag of a term that is still opened in the output
                if let Some(last) = closed.as_mut() {
                    if last.closed_at >= from && last.opened_at < from {
                        last.closed_at = builder.len();
                        builder.push(Line::Tag(Tag::term_close()));
                    }
                }
                continue;
            }

            let tag = Tag::parse(trimmed);
            if term.is_some() && tag.is_sentence() {
                continue;
            }

            match tag.kind() {
                TagKind::TermOpen { wuri, uncertain } => {
                    if let Some(open) = &term {
                        warn!("term {:?} opened inside term {:?}", wuri, open.wuri);
                        builder.push(Line::Token(Token::word_only(trimmed)));
                        continue;
                    }
                    term = Some(OpenTerm {
                        wuri: wuri.clone(),
                        uncertain: *uncertain,
                        opened_at: builder.len(),
                        tokens: Vec::new(),
                    });
                }
                TagKind::TermClose => match term.take() {
                    Some(open) => {
                        if !open.uncertain {
                            let (lemmas, words): (Vec<String>, Vec<String>) = open
                                .tokens
                                .into_iter()
                                .map(|(_, lemma, word)| (lemma, word))
                                .unzip();
                            terms.insert(&lemmas, open.wuri, words.join(" "));
                        }
                        closed = Some(ClosedTerm {
                            opened_at: open.opened_at,
                            closed_at: builder.len(),
                        });
                    }
                    None => {
                        warn!("closing a term that was never opened");
                        builder.push(Line::Token(Token::word_only(trimmed)));
                        continue;
                    }
                },
                _ => (),
            }
            builder.push(Line::Tag(tag));
        }

        if let Some(open) = term {
            warn!("term {:?} is never closed", open.wuri);
        }

        Self {
            lines: builder.finish(),
            terms,
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn set_lines(&mut self, lines: Vec<Line>) {
        self.lines = lines;
    }

    /// Explicit terms of the document.
    pub fn terms(&self) -> &TermTrie {
        &self.terms
    }

    pub fn into_terms(self) -> TermTrie {
        self.terms
    }
}

/// One line per record, each followed by a newline.
impl fmt::Display for VerticalDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Line, VerticalDocument};
    use crate::vertical::Tagset;

    #[test]
    fn round_trip() {
        let text = "<doc id=\"1\" url=\"u\" title=\"t\">\n<p>\n<s>\nDogs\tNNS\tdog\nbark\tVBP\tbark\n</s>\n</p>\n</doc>\n";
        let doc = VerticalDocument::parse(text, Tagset::TreeTagger);
        assert_eq!(doc.lines().len(), 8);
        assert_eq!(doc.to_string(), text);
    }

    #[test]
    fn blank_lines_and_spaces() {
        let doc = VerticalDocument::parse("\n  <p>  \n\nword\n\n</p>\n", Tagset::Basic);
        assert_eq!(doc.to_string(), "<p>\nword\n</p>\n");
    }

    #[test]
    fn explicit_terms_collected() {
        let text = "<p>\n<term wuri=\"New_York\">\nNew\tNNP\tnew\nYork\tNNP\tYork\n</term>\n</p>";
        let doc = VerticalDocument::parse(text, Tagset::TreeTagger);
        let entry = doc.terms().get(&["new", "york"]).unwrap();
        assert_eq!(entry.id, "New_York");
        assert_eq!(entry.canonical_form, "New York");
    }

    #[test]
    fn inferred_terms_not_collected() {
        let text = "<term wuri=\"A\" uncertainty=\"1\">\na\n</term>\n<term wuri=\"B\">\nb\n</term>";
        let doc = VerticalDocument::parse(text, Tagset::Basic);
        assert_eq!(doc.terms().len(), 1);
        assert!(doc.terms().get(&["b"]).is_some());
        assert_eq!(doc.lines().len(), 6);
    }

    #[test]
    fn sentence_tags_dropped_inside_terms() {
        let text = "<s>\n<term wuri=\"X\">\nx\n</s>\n<s>\ny\n</term>\n</s>";
        let doc = VerticalDocument::parse(text, Tagset::Basic);
        assert_eq!(doc.to_string(), "<s>\n<term wuri=\"X\">\nx\ny\n</term>\n</s>\n");
        assert_eq!(doc.terms().get(&["x", "y"]).unwrap().id, "X");
    }

    #[test]
    fn hack_removes_three_lines() {
        let text = "<s>\nword\n</s>\n<s>\n<g/>\n.\n</s>\n<s hack=\"1\">\nnext\n</s>";
        let doc = VerticalDocument::parse(text, Tagset::Basic);
        assert_eq!(doc.to_string(), "<s>\nword\n</s>\n<s>\nnext\n</s>\n");
    }

    #[test]
    fn repeated_hack_is_bounded() {
        let text = "a\nb\nc\nd\ne\n<s hack>\n<s hack>";
        let doc = VerticalDocument::parse(text, Tagset::Basic);
        assert_eq!(doc.to_string(), "a\nb\n");
    }

    #[test]
    fn malformed_terms_kept_as_literals() {
        let text = "</term>\n<term wuri=\"A\">\na\n<term wuri=\"B\">\n</term>";
        let doc = VerticalDocument::parse(text, Tagset::Desamb);
        assert!(matches!(&doc.lines()[0], Line::Token(t) if t.word() == "</term>"));
        assert!(matches!(&doc.lines()[3], Line::Token(t) if t.word() == "<term wuri=\"B\">"));
        assert_eq!(
            doc.to_string(),
            "</term>\n<term wuri=\"A\">\na\n<term wuri=\"B\">\n</term>\n"
        );
        assert_eq!(doc.terms().get(&["a"]).unwrap().id, "A");
    }

    #[test]
    fn tokens_rendered_unchanged() {
        let text = "<p>\nPraha\t\tk1gInSc1\nje\tbýt\tk5\n1848\t#num#\tk4\nalone\n</p>\n";
        let doc = VerticalDocument::parse(text, Tagset::Desamb);
        assert_eq!(doc.to_string(), text);
    }

    #[test]
    fn hack_drops_term_opening() {
        let text = "<p>\n<term wuri=\"X\">\n<g/>\n.\n<s hack=\"1\">\nx\n</term>\n</p>\n";
        let doc = VerticalDocument::parse(text, Tagset::Basic);
        assert!(doc.terms().is_empty());
        assert!(matches!(&doc.lines()[2], Line::Token(t) if t.word() == "</term>"));
        assert_eq!(doc.to_string(), "<p>\nx\n</term>\n</p>\n");
    }

    #[test]
    fn hack_drops_term_tokens() {
        let text = "<term wuri=\"X\">\na\nb\n<g/>\nc\n<s hack>\nd\n</term>";
        let doc = VerticalDocument::parse(text, Tagset::Basic);
        assert_eq!(doc.to_string(), "<term wuri=\"X\">\na\nd\n</term>\n");
        assert_eq!(doc.terms().get(&["a", "d"]).unwrap().canonical_form, "a d");
        assert_eq!(doc.terms().len(), 1);
    }

    #[test]
    fn hack_keeps_closing_tag() {
        let text = "<term wuri=\"X\">\na\nb\n</term>\n<g/>\n.\n<s hack>\nc";
        let doc = VerticalDocument::parse(text, Tagset::Basic);
        assert_eq!(doc.to_string(), "<term wuri=\"X\">\na\nb\n</term>\nc\n");
    }

    #[test]
    fn desamb_empty_lemma_in_term() {
        let text = "<term wuri=\"Praha\">\nPraha\t\tk1\n</term>";
        let doc = VerticalDocument::parse(text, Tagset::Desamb);
        assert_eq!(doc.terms().get(&["praha"]).unwrap().id, "Praha");
    }
}
