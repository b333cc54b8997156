//! Token lines.
use std::fmt;

use super::Tagset;

/// A token line, decoded according to its tagset.
///
/// The line itself is kept and rendered back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    raw: String,
    word: String,
    lemma: Option<String>,
    tag: Option<String>,
}

impl Token {
    /// Decodes a tab separated token line.
    ///
    /// Missing or empty columns are treated as absent.
    /// Numeric lemmas (`#num#` for desamb, `@card@` for treetagger)
    /// are replaced by the word itself, followed by the rest of the lemma.
    pub fn parse(line: &str, tagset: Tagset) -> Self {
        let columns: Vec<&str> = line.split('\t').collect();
        let word = columns[0].to_string();
        let column = |index: Option<usize>| {
            index
                .and_then(|i| columns.get(i))
                .filter(|value| !value.is_empty())
                .map(|value| value.to_string())
        };

        let tag = column(tagset.tag_column());
        let lemma = column(tagset.lemma_column()).map(|lemma| {
            match tagset
                .numeric_marker()
                .and_then(|marker| lemma.strip_prefix(marker))
            {
                Some(rest) => format!("{}{}", word, rest),
                None => lemma,
            }
        });

        Self {
            raw: line.to_string(),
            word,
            lemma,
            tag,
        }
    }

    /// Token that only has a word.
    pub fn word_only(word: &str) -> Self {
        Self {
            raw: word.to_string(),
            word: word.to_string(),
            lemma: None,
            tag: None,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Lemma as produced by the tagger, if any.
    pub fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }

    /// Lemma, falling back on the word when the tagger didn't produce one.
    pub fn lemma_or_word(&self) -> &str {
        self.lemma.as_deref().unwrap_or(&self.word)
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::Token;
    use crate::vertical::Tagset;

    #[test]
    fn desamb() {
        let token = Token::parse("psy\tpes\tk1gMnPc1", Tagset::Desamb);
        assert_eq!(token.word(), "psy");
        assert_eq!(token.lemma(), Some("pes"));
        assert_eq!(token.tag(), Some("k1gMnPc1"));
        assert_eq!(token.to_string(), "psy\tpes\tk1gMnPc1");
    }

    #[test]
    fn treetagger() {
        let token = Token::parse("dogs\tNNS\tdog", Tagset::TreeTagger);
        assert_eq!(token.lemma(), Some("dog"));
        assert_eq!(token.tag(), Some("NNS"));
        assert_eq!(token.to_string(), "dogs\tNNS\tdog");
    }

    #[test]
    fn basic() {
        let token = Token::parse("word\tignored", Tagset::Basic);
        assert_eq!(token.lemma(), None);
        assert_eq!(token.lemma_or_word(), "word");
        assert_eq!(token.to_string(), "word\tignored");
    }

    #[test]
    fn numeric_lemmas() {
        let token = Token::parse("1848\t#num#\tk4", Tagset::Desamb);
        assert_eq!(token.lemma(), Some("1848"));
        let token = Token::parse("12th\t#num#th\tk4", Tagset::Desamb);
        assert_eq!(token.lemma(), Some("12thth"));
        let token = Token::parse("1848\tCD\t@card@", Tagset::TreeTagger);
        assert_eq!(token.lemma(), Some("1848"));
        assert_eq!(token.to_string(), "1848\tCD\t@card@");
        // markers belong to their own tagset only
        let token = Token::parse("1848\tCD\t#num#", Tagset::TreeTagger);
        assert_eq!(token.lemma(), Some("#num#"));
    }

    #[test]
    fn empty_lemma_falls_back_on_word() {
        let token = Token::parse("Praha\t\tk1gInSc1", Tagset::Desamb);
        assert_eq!(token.lemma(), None);
        assert_eq!(token.lemma_or_word(), "Praha");
        assert_eq!(token.to_string(), "Praha\t\tk1gInSc1");
    }

    #[test]
    fn missing_columns() {
        let token = Token::parse("alone", Tagset::TreeTagger);
        assert_eq!(token.tag(), None);
        assert_eq!(token.lemma_or_word(), "alone");
        assert_eq!(token.to_string(), "alone");
    }
}
