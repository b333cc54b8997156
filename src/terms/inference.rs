/*! Term occurrence inference.

Wraps every occurrence of a known term in `<term wuri="..." uncertainty="1">`...`</term>`,
using longest match over the lemmas of the document tokens.

The scan is linear: a search starting at a token stops as soon as no trie edge matches,
and tokens covered by a match are never searched again.

Searches stop at paragraph ends (`</p>`) and before existing terms. Other tags are skipped
and don't count in the length of a match.
!*/
use std::sync::Arc;

use log::debug;

use super::{Annotate, TermEntry, TermTrie};
use crate::vertical::{Line, Tag, TagKind, VerticalDocument};

/// Inference options.
#[derive(Debug, Clone)]
pub struct InferenceOptions {
    /// Also look for the explicit terms of the document itself.
    pub use_document_terms: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            use_document_terms: true,
        }
    }
}

/// Term occurrence annotator.
///
/// Uses the document's own terms and/or a shared external term list.
/// When both match at the same position, the longest match wins, the document
/// terms winning ties.
#[derive(Debug, Clone, Default)]
pub struct TermOccurrenceInferer {
    external: Option<Arc<TermTrie>>,
    options: InferenceOptions,
}

impl TermOccurrenceInferer {
    pub fn new(external: Option<Arc<TermTrie>>, options: InferenceOptions) -> Self {
        Self { external, options }
    }

    /// Longest match starting at `lines[pos]`, as (number of tokens, term).
    fn longest_match<'t>(
        tries: &[&'t TermTrie],
        lines: &[Line],
        pos: usize,
    ) -> Option<(usize, &'t TermEntry)> {
        let mut best: Option<(usize, &'t TermEntry)> = None;

        for trie in tries.iter().copied() {
            let mut cursor = trie.cursor();
            for line in &lines[pos..] {
                match line {
                    Line::Tag(tag) => match tag.kind() {
                        TagKind::ParagraphClose | TagKind::TermOpen { .. } => break,
                        _ => continue,
                    },
                    Line::Token(token) => {
                        if !cursor.feed(token.lemma_or_word()) {
                            break;
                        }
                    }
                }
            }

            if let Some((length, entry)) = cursor.longest() {
                if best.map_or(true, |(best_length, _)| length > best_length) {
                    best = Some((length, entry));
                }
            }
        }

        best
    }

    /// Annotated lines of `doc`.
    pub fn infer(&self, doc: &VerticalDocument) -> Vec<Line> {
        let mut tries: Vec<&TermTrie> = Vec::with_capacity(2);
        if self.options.use_document_terms {
            tries.push(doc.terms());
        }
        if let Some(external) = &self.external {
            tries.push(external.as_ref());
        }

        let lines = doc.lines();
        let mut annotated = Vec::with_capacity(lines.len());
        // inside an existing term
        let mut in_term = false;
        // tokens left in the current inferred term
        let mut remaining = 0usize;
        let mut inferred = 0usize;

        for (pos, line) in lines.iter().enumerate() {
            match line {
                Line::Tag(tag) => {
                    if remaining > 0 && tag.is_sentence() {
                        continue;
                    }
                    match tag.kind() {
                        TagKind::TermOpen { .. } => in_term = true,
                        TagKind::TermClose => in_term = false,
                        _ => (),
                    }
                    annotated.push(line.clone());
                }
                Line::Token(_) => {
                    if remaining == 0 && !in_term && !tries.is_empty() {
                        if let Some((length, entry)) = Self::longest_match(&tries, lines, pos) {
                            annotated.push(Line::Tag(Tag::inferred_term(&entry.id)));
                            remaining = length;
                            inferred += 1;
                        }
                    }
                    annotated.push(line.clone());
                    if remaining > 0 {
                        remaining -= 1;
                        if remaining == 0 {
                            annotated.push(Line::Tag(Tag::term_close()));
                        }
                    }
                }
            }
        }

        debug!("inferred {} term occurrences", inferred);
        annotated
    }
}

impl Annotate for TermOccurrenceInferer {
    fn annotate(&self, doc: &mut VerticalDocument) {
        let lines = self.infer(doc);
        doc.set_lines(lines);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{InferenceOptions, TermOccurrenceInferer};
    use crate::terms::{Annotate, TermTrie};
    use crate::vertical::{Line, TagKind, Tagset, VerticalDocument};

    fn new_york() -> Arc<TermTrie> {
        let mut trie = TermTrie::default();
        trie.insert(&["new", "york"], "wiki/New_York", "New York");
        trie.insert(&["new", "york", "city"], "wiki/New_York_City", "New York City");
        Arc::new(trie)
    }

    fn external_only(trie: Arc<TermTrie>) -> TermOccurrenceInferer {
        TermOccurrenceInferer::new(
            Some(trie),
            InferenceOptions {
                use_document_terms: false,
            },
        )
    }

    fn annotate(text: &str, tagset: Tagset, inferer: &TermOccurrenceInferer) -> String {
        let mut doc = VerticalDocument::parse(text, tagset);
        inferer.annotate(&mut doc);
        doc.to_string()
    }

    /// checks that term spans are balanced and never nested
    fn assert_no_overlap(doc: &VerticalDocument) {
        let mut open = false;
        for line in doc.lines() {
            if let Line::Tag(tag) = line {
                match tag.kind() {
                    TagKind::TermOpen { .. } => {
                        assert!(!open, "nested term");
                        open = true;
                    }
                    TagKind::TermClose => {
                        assert!(open, "unbalanced term");
                        open = false;
                    }
                    _ => (),
                }
            }
        }
        assert!(!open);
    }

    #[test]
    fn treetagger_longest_match() {
        let text = "New\tNNP\tnew\nYork\tNNP\tyork\nCity\tNNP\tcity";
        let result = annotate(text, Tagset::TreeTagger, &external_only(new_york()));
        assert_eq!(
            result,
            "<term wuri=\"wiki/New_York_City\" uncertainty=\"1\">\nNew\tNNP\tnew\nYork\tNNP\tyork\nCity\tNNP\tcity\n</term>\n"
        );
    }

    #[test]
    fn desamb_longest_match() {
        let text = "New\tnew\tNNP\nYork\tyork\tNNP\nCity\tcity\tNNP";
        let mut doc = VerticalDocument::parse(text, Tagset::Desamb);
        external_only(new_york()).annotate(&mut doc);
        let opened: Vec<&Line> = doc
            .lines()
            .iter()
            .filter(|line| matches!(line, Line::Tag(tag) if tag.opens_term()))
            .collect();
        assert_eq!(opened.len(), 1);
        assert_eq!(
            opened[0].to_string(),
            "<term wuri=\"wiki/New_York_City\" uncertainty=\"1\">"
        );
        assert_eq!(doc.lines().len(), 5);
    }

    #[test]
    fn token_lines_kept_as_is() {
        let text = "<p>\nPraha\t\tk1gInSc1\nje\tbýt\tk5\n</p>\n";
        let mut doc = VerticalDocument::parse(text, Tagset::Desamb);
        TermOccurrenceInferer::default().annotate(&mut doc);
        assert_eq!(doc.to_string(), text);

        let mut trie = TermTrie::default();
        trie.insert(&["praha"], "Praha", "Praha");
        let result = annotate(text, Tagset::Desamb, &external_only(Arc::new(trie)));
        assert_eq!(
            result,
            "<p>\n<term wuri=\"Praha\" uncertainty=\"1\">\nPraha\t\tk1gInSc1\n</term>\nje\tbýt\tk5\n</p>\n"
        );
    }

    #[test]
    fn shorter_term_when_longer_fails() {
        let text = "<p>\nNew\tNNP\tnew\nYork\tNNP\tyork\nstate\tNN\tstate\n</p>";
        let result = annotate(text, Tagset::TreeTagger, &external_only(new_york()));
        assert_eq!(
            result,
            "<p>\n<term wuri=\"wiki/New_York\" uncertainty=\"1\">\nNew\tNNP\tnew\nYork\tNNP\tyork\n</term>\nstate\tNN\tstate\n</p>\n"
        );
    }

    #[test]
    fn paragraph_end_aborts_search() {
        let text = "<p>\nNew\nYork\n</p>\n<p>\nCity\n</p>";
        let result = annotate(text, Tagset::Basic, &external_only(new_york()));
        assert_eq!(
            result,
            "<p>\n<term wuri=\"wiki/New_York\" uncertainty=\"1\">\nNew\nYork\n</term>\n</p>\n<p>\nCity\n</p>\n"
        );
    }

    #[test]
    fn no_match_across_paragraphs() {
        let text = "<p>\nNew\n</p>\n<p>\nYork\n</p>";
        let result = annotate(text, Tagset::Basic, &external_only(new_york()));
        assert_eq!(result, "<p>\nNew\n</p>\n<p>\nYork\n</p>\n");
    }

    #[test]
    fn tags_skipped_and_sentences_suppressed() {
        let text = "<s>\nNew\n<g/>\nYork\n</s>\n<s>\nCity\n</s>";
        let result = annotate(text, Tagset::Basic, &external_only(new_york()));
        assert_eq!(
            result,
            "<s>\n<term wuri=\"wiki/New_York_City\" uncertainty=\"1\">\nNew\n<g/>\nYork\nCity\n</term>\n</s>\n"
        );
    }

    #[test]
    fn explicit_terms_not_reentered() {
        let text = "<term wuri=\"Big_Apple\">\nNew\nYork\n</term>\nNew\nYork\n<term wuri=\"X\">\nCity\n</term>";
        let mut doc = VerticalDocument::parse(text, Tagset::Basic);
        external_only(new_york()).annotate(&mut doc);
        assert_eq!(
            doc.to_string(),
            "<term wuri=\"Big_Apple\">\nNew\nYork\n</term>\n<term wuri=\"wiki/New_York\" uncertainty=\"1\">\nNew\nYork\n</term>\n<term wuri=\"X\">\nCity\n</term>\n"
        );
        assert_no_overlap(&doc);
    }

    #[test]
    fn document_terms() {
        let text = "<p>\n<term wuri=\"Prague\">\nPrague\n</term>\nis\nnice\n</p>\n<p>\nPrague\nagain\n</p>";
        let result = annotate(text, Tagset::Basic, &TermOccurrenceInferer::default());
        assert_eq!(
            result,
            "<p>\n<term wuri=\"Prague\">\nPrague\n</term>\nis\nnice\n</p>\n<p>\n<term wuri=\"Prague\" uncertainty=\"1\">\nPrague\n</term>\nagain\n</p>\n"
        );
    }

    #[test]
    fn document_terms_win_ties() {
        let text = "<term wuri=\"Local\">\nNew\nYork\n</term>\nNew\nYork";
        let inferer = TermOccurrenceInferer::new(Some(new_york()), InferenceOptions::default());
        let result = annotate(text, Tagset::Basic, &inferer);
        assert!(result.ends_with("<term wuri=\"Local\" uncertainty=\"1\">\nNew\nYork\n</term>\n"));
    }

    #[test]
    fn longest_across_tries() {
        let text = "<term wuri=\"Local\">\nNew\nYork\n</term>\nNew\nYork\nCity";
        let inferer = TermOccurrenceInferer::new(Some(new_york()), InferenceOptions::default());
        let result = annotate(text, Tagset::Basic, &inferer);
        assert!(result.ends_with(
            "<term wuri=\"wiki/New_York_City\" uncertainty=\"1\">\nNew\nYork\nCity\n</term>\n"
        ));
    }

    #[test]
    fn consecutive_matches_do_not_overlap() {
        let mut trie = TermTrie::default();
        trie.insert(&["a", "b"], "AB", "a b");
        trie.insert(&["b", "c"], "BC", "b c");
        let text = "a\nb\nc\nb\nc";
        let mut doc = VerticalDocument::parse(text, Tagset::Basic);
        external_only(Arc::new(trie)).annotate(&mut doc);
        assert_eq!(
            doc.to_string(),
            "<term wuri=\"AB\" uncertainty=\"1\">\na\nb\n</term>\nc\n<term wuri=\"BC\" uncertainty=\"1\">\nb\nc\n</term>\n"
        );
        assert_no_overlap(&doc);
    }

    #[test]
    fn end_of_document_mid_match() {
        let text = "New\nYork";
        let mut trie = TermTrie::default();
        trie.insert(&["new", "york", "city"], "NYC", "New York City");
        let result = annotate(text, Tagset::Basic, &external_only(Arc::new(trie)));
        assert_eq!(result, "New\nYork\n");
    }

    #[test]
    fn nothing_to_match() {
        let text = "<p>\nword\n</p>";
        let inferer = TermOccurrenceInferer::new(
            None,
            InferenceOptions {
                use_document_terms: false,
            },
        );
        assert_eq!(annotate(text, Tagset::Basic, &inferer), "<p>\nword\n</p>\n");
    }
}
