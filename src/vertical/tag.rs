//! Structural tag lines (`<doc ...>`, `<p>`, `<term ...>`, `<s>`...).
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TERM_OPEN: Regex =
        Regex::new(r#"^<term\s+wuri="(.*?)"(\s+uncertainty="1")?\s*>$"#).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    TermOpen { wuri: String, uncertain: bool },
    TermClose,
    ParagraphClose,
    SentenceOpen,
    SentenceClose,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    raw: String,
    kind: TagKind,
}

impl Tag {
    /// Classifies a tag line. The line is kept verbatim.
    pub fn parse(line: &str) -> Self {
        let kind = if let Some(caps) = TERM_OPEN.captures(line) {
            TagKind::TermOpen {
                wuri: caps[1].to_string(),
                uncertain: caps.get(2).is_some(),
            }
        } else if line == "</term>" {
            TagKind::TermClose
        } else if line == "</p>" {
            TagKind::ParagraphClose
        } else if line == "<s>" || line.starts_with("<s ") {
            TagKind::SentenceOpen
        } else if line == "</s>" {
            TagKind::SentenceClose
        } else {
            TagKind::Other
        };

        Self {
            raw: line.to_string(),
            kind,
        }
    }

    /// `<term wuri="..." uncertainty="1">`
    pub fn inferred_term(wuri: &str) -> Self {
        Self {
            raw: format!("<term wuri=\"{}\" uncertainty=\"1\">", wuri),
            kind: TagKind::TermOpen {
                wuri: wuri.to_string(),
                uncertain: true,
            },
        }
    }

    pub fn term_close() -> Self {
        Self {
            raw: "</term>".to_string(),
            kind: TagKind::TermClose,
        }
    }

    pub fn kind(&self) -> &TagKind {
        &self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn opens_term(&self) -> bool {
        matches!(self.kind, TagKind::TermOpen { .. })
    }

    pub fn is_sentence(&self) -> bool {
        matches!(self.kind, TagKind::SentenceOpen | TagKind::SentenceClose)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
