//! Article to prevertical document.
use serde::{Deserialize, Serialize};

use super::compact::SectionCompactor;
use super::links::{term2wuri, term_element};
use super::scrubber::MarkupScrubber;
use super::MarkupOptions;

/// A raw article, as provided by a dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Explicit article id. Articles without one get a sequential number.
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    pub text: String,
    /// MediaWiki namespace, `0` being articles.
    #[serde(default)]
    pub ns: i64,
    #[serde(default)]
    pub redirect: bool,
}

impl Article {
    pub fn new(id: Option<u64>, title: String, text: String) -> Self {
        Self {
            id,
            title,
            text,
            ns: 0,
            redirect: false,
        }
    }

    /// Redirects and pages outside of the article namespace aren't part of the corpus.
    pub fn is_content(&self) -> bool {
        self.ns == 0 && !self.redirect
    }
}

/// Article url from the wiki url prefix (`http://en.wikipedia.org/wiki`) and its title.
pub fn create_article_url(prefix: &str, title: &str) -> String {
    format!("{}/{}", prefix, term2wuri(title))
}

/// Parses article markup into a prevertical document.
///
/// The title is repeated as a heading paragraph (so that it gets tagged too),
/// as a term pointing to the article itself.
pub fn parse_wikimarkup(
    id: u64,
    title: &str,
    url_prefix: &str,
    text: &str,
    options: &MarkupOptions,
) -> String {
    let scrubber = MarkupScrubber::new(options);
    let cleaned = scrubber.clean(text);
    let body = SectionCompactor::compact(options.keep_sections, &cleaned).join("\n");

    format!(
        "<doc id=\"{}\" url=\"{}\" title=\"{}\">\n<p heading=\"1\">\n{}\n</p>\n{}\n</doc>",
        id,
        create_article_url(url_prefix, title),
        title,
        term_element(title, title),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::{create_article_url, parse_wikimarkup, Article};
    use crate::markup::MarkupOptions;

    #[test]
    fn url() {
        assert_eq!(
            create_article_url("http://en.wikipedia.org/wiki", "Channel Islands"),
            "http://en.wikipedia.org/wiki/Channel_Islands"
        );
    }

    #[test]
    fn full_article() {
        let text = "'''Prague''' is the capital of the [[Czech Republic]].{{citation needed}}
<!-- comment -->
== History ==
Founded in the [[early modern period|this period]]s.
* a list item
== Geography ==
=== Rivers ===
The [[Vltava]] flows through it.";

        let doc = parse_wikimarkup(
            12,
            "Prague",
            "http://en.wikipedia.org/wiki",
            text,
            &MarkupOptions::default(),
        );
        let expected = r#"<doc id="12" url="http://en.wikipedia.org/wiki/Prague" title="Prague">
<p heading="1">
<term wuri="Prague">Prague</term>
</p>
<p>
Prague is the capital of the <term wuri="Czech_Republic">Czech Republic</term>.
</p>
<section level="2" title="History">
<p heading="1">History</p>
<p>
Founded in the <term wuri="Early_modern_period">this periods</term>.
</p>
</section>
<section level="2" title="Geography">
<p heading="1">Geography</p>
<section level="3" title="Rivers">
<p heading="1">Rivers</p>
<p>
The <term wuri="Vltava">Vltava</term> flows through it.
</p>
</section>
</section>
</doc>"#;
        assert_eq!(doc, expected);
    }

    #[test]
    fn without_links_and_sections() {
        let options = MarkupOptions {
            keep_links: false,
            keep_sections: false,
            ..Default::default()
        };
        let doc = parse_wikimarkup(1, "A", "http://x/wiki", "== Top ==\nSee [[B|b]].", &options);
        assert_eq!(
            doc,
            "<doc id=\"1\" url=\"http://x/wiki/A\" title=\"A\">\n<p heading=\"1\">\n<term wuri=\"A\">A</term>\n</p>\nTop.\nSee b.\n</doc>"
        );
    }

    #[test]
    fn content_articles() {
        let mut article = Article::new(Some(1), "A".to_string(), String::new());
        assert!(article.is_content());
        article.redirect = true;
        assert!(!article.is_content());

        let talk: Article = serde_json::from_str(r#"{"title": "Talk:A", "text": "", "ns": 1}"#).unwrap();
        assert_eq!(talk.id, None);
        assert!(!talk.is_content());
    }
}
