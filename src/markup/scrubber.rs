/*! Markup cleaning.

Turns the raw wiki markup of an article into plain text, only keeping
term elements (from wiki links) and the lines structure used by [super::compact].

Cleaning is best effort: malformed markup never fails, unmatched delimiters stay in the text.
!*/
use std::ops::Range;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::entities::unescape;
use super::links::LinkAnnotator;
use super::nested::{drop_spans, TABLES, TEMPLATES};
use super::MarkupOptions;

/// Tags that are removed along with their content.
const DISCARD_ELEMENTS: [&str; 27] = [
    "gallery", "timeline", "noinclude", "pre", "table", "tr", "td", "th", "caption", "form",
    "input", "select", "option", "textarea", "ul", "li", "ol", "dl", "dt", "dd", "menu", "dir",
    "ref", "references", "img", "imagemap", "source",
];

const SELF_CLOSING_TAGS: [&str; 5] = ["br", "hr", "nobr", "ref", "references"];

/// Tags that are removed, keeping their content.
const IGNORED_TAGS: [&str; 28] = [
    "b", "big", "blockquote", "center", "cite", "div", "em", "font", "h1", "h2", "h3", "h4",
    "hiero", "i", "kbd", "nowiki", "p", "plaintext", "s", "small", "span", "strike", "strong",
    "sub", "sup", "tt", "u", "var",
];

/// Tags replaced by numbered placeholders (`formula_1`, `codice_1`...).
const PLACEHOLDER_TAGS: [(&str, &str); 2] = [("math", "formula"), ("code", "codice")];

lazy_static! {
    static ref PARAMETRIZED_LINK: Regex = Regex::new(r"\[\[.*?\]\]").unwrap();
    static ref EXTERNAL_LINK: Regex = Regex::new(r"\[\w+.*? (.*?)\]").unwrap();
    static ref EXTERNAL_LINK_NO_ANCHOR: Regex = Regex::new(r"\[\w+[&\]]*\]").unwrap();

    static ref BOLD_ITALIC: Regex = Regex::new(r"'''''([^']*?)'''''").unwrap();
    static ref BOLD: Regex = Regex::new(r"'''(.*?)'''").unwrap();
    static ref ITALIC_QUOTE: Regex = Regex::new(r#"''"(.*?)"''"#).unwrap();
    static ref ITALIC: Regex = Regex::new(r"''([^']*)''").unwrap();
    static ref QUOTE_QUOTE: Regex = Regex::new(r#"""(.*?)"""#).unwrap();

    static ref COMMENT: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref SELF_CLOSING: Vec<Regex> = SELF_CLOSING_TAGS
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<\s*{}\b[^/]*/\s*>", tag)).unwrap())
        .collect();
    static ref IGNORED: Vec<(Regex, Regex)> = IGNORED_TAGS
        .iter()
        .map(|tag| {
            (
                Regex::new(&format!(r"(?i)<\s*{}\b[^>]*>", tag)).unwrap(),
                Regex::new(&format!(r"(?i)<\s*/\s*{}>", tag)).unwrap(),
            )
        })
        .collect();
    static ref DISCARD: Vec<Regex> = DISCARD_ELEMENTS
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<\s*{0}\b[^>]*>.*?<\s*/\s*{0}>", tag)).unwrap())
        .collect();
    static ref PLACEHOLDERS: Vec<(Regex, &'static str)> = PLACEHOLDER_TAGS
        .iter()
        .map(|(tag, placeholder)| {
            let re = Regex::new(&format!(r"(?is)<\s*{0}(\s*| [^>]+?)>.*?<\s*/\s*{0}\s*>", tag));
            (re.unwrap(), *placeholder)
        })
        .collect();

    static ref PREFORMATTED: Regex = Regex::new(r"(?m)^ .*?$").unwrap();
    static ref SPACES: Regex = Regex::new(r" {2,}").unwrap();
    static ref DOTS: Regex = Regex::new(r"\.{4,}").unwrap();
    static ref SPACE_BEFORE_PUNCT: Regex = Regex::new(r" ([,:.)\]»])").unwrap();
    static ref SPACE_AFTER_PUNCT: Regex = Regex::new(r"([\[(«]) ").unwrap();
    static ref PUNCTUATION_LINE: Regex = Regex::new(r"\n\W+?\n").unwrap();
}

/// Wiki markup cleaner.
pub struct MarkupScrubber<'a> {
    links: LinkAnnotator<'a>,
}

impl<'a> MarkupScrubber<'a> {
    pub fn new(options: &'a MarkupOptions) -> Self {
        Self {
            links: LinkAnnotator::new(options.keep_links, &options.accepted_namespaces),
        }
    }

    /// Cleans raw wiki markup.
    pub fn clean(&self, text: &str) -> String {
        // templates can't be expanded, drop them along with tables
        let text = TEMPLATES.strip(text);
        let text = TABLES.strip(&text);

        let text = self.links.annotate(&text);
        let text = PARAMETRIZED_LINK.replace_all(&text, "").into_owned();

        let text = EXTERNAL_LINK.replace_all(&text, "${1}").into_owned();
        let text = EXTERNAL_LINK_NO_ANCHOR.replace_all(&text, "").into_owned();

        let text = Self::strip_emphasis(&text);

        // twice, for doubly escaped entities (&amp;nbsp;)
        let text = unescape(&text).into_owned();
        let text = unescape(&text).into_owned();

        let text = Self::strip_html(&text);
        let text = Self::expand_placeholders(text);
        let text = text.replace("<<", "«").replace(">>", "»");

        // after html processing, since it could eat tags
        let text = PREFORMATTED.replace_all(&text, "").into_owned();

        Self::tidy(&text)
    }

    fn strip_emphasis(text: &str) -> String {
        let text = BOLD_ITALIC.replace_all(text, "${1}");
        let text = BOLD.replace_all(&text, "${1}");
        let text = ITALIC_QUOTE.replace_all(&text, "&quot;${1}&quot;");
        let text = ITALIC.replace_all(&text, "&quot;${1}&quot;");
        let text = QUOTE_QUOTE.replace_all(&text, "${1}");
        text.replace("'''", "").replace("''", "&quot;")
    }

    /// Drops comments, self-closing and ignored tags, then discarded elements.
    fn strip_html(text: &str) -> String {
        let mut spans: Vec<Range<usize>> = COMMENT.find_iter(text).map(|m| m.range()).collect();

        for pattern in SELF_CLOSING.iter() {
            spans.extend(pattern.find_iter(text).map(|m| m.range()));
        }
        for (left, right) in IGNORED.iter() {
            spans.extend(left.find_iter(text).map(|m| m.range()));
            spans.extend(right.find_iter(text).map(|m| m.range()));
        }
        let mut text = drop_spans(text, spans);

        // these may nest, so they can't be collected as spans
        for pattern in DISCARD.iter() {
            text = pattern.replace_all(&text, "").into_owned();
        }
        text
    }

    fn expand_placeholders(mut text: String) -> String {
        for (pattern, placeholder) in PLACEHOLDERS.iter() {
            let mut index = 0;
            text = pattern
                .replace_all(&text, |_: &Captures| {
                    index += 1;
                    format!("{}_{}", placeholder, index)
                })
                .into_owned();
        }
        text
    }

    /// Whitespace and punctuation cleanup.
    fn tidy(text: &str) -> String {
        let text = text.replace('\t', " ");
        let text = SPACES.replace_all(&text, " ");
        let text = DOTS.replace_all(&text, "...");
        let text = SPACE_BEFORE_PUNCT.replace_all(&text, "${1}");
        let text = SPACE_AFTER_PUNCT.replace_all(&text, "${1}");
        let text = PUNCTUATION_LINE.replace_all(&text, "\n");
        text.replace(",,", ",").replace(",.", ".")
    }
}
