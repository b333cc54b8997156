/*! Wiki markup extraction.

Turns raw article markup into a *prevertical* document: plain text lines
with `<doc>`, `<p>`, `<section>` and `<term>` structure, ready to be tokenized.

* [entities]: HTML character references.
* [nested]: balanced template/table removal.
* [links]: wiki links to term elements.
* [scrubber]: the cleaning chain.
* [compact]: paragraph/section structure.
* [article]: document assembly.
!*/
use std::collections::HashSet;

pub mod article;
pub mod compact;
pub mod entities;
pub mod links;
pub mod nested;
pub mod scrubber;

pub use article::{create_article_url, parse_wikimarkup, Article};
pub use compact::SectionCompactor;
pub use links::{term2wuri, term_element, LinkAnnotator};
pub use scrubber::MarkupScrubber;

/// Extraction options.
#[derive(Debug, Clone)]
pub struct MarkupOptions {
    /// Keep wiki links as term elements (otherwise only their text is kept).
    pub keep_links: bool,
    /// Keep section structure. Lists are dropped when sections are kept.
    pub keep_sections: bool,
    /// Link namespaces that are kept (`w` for Wikipedia links).
    pub accepted_namespaces: HashSet<String>,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            keep_links: true,
            keep_sections: true,
            accepted_namespaces: ["w".to_string()].into_iter().collect(),
        }
    }
}
