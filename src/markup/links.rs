//! Wiki links to term elements.
//!
//! `[[target|display]]trail` becomes `<term wuri="Target">displaytrail</term>`,
//! where the wuri is the canonical last part of the article URI.
use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Innermost links: target, optional display text and trailing word characters.
    static ref WIKI_LINK: Regex =
        Regex::new(r"\[\[([^\[]*?)(?:\|([^\[]*?))?\]\](\w*)").unwrap();
    static ref WURI_SEPARATORS: Regex = Regex::new(r"[\s_]+").unwrap();
}

/// Creates the canonical last part of a Wikipedia URI ("wuri") from a term.
///
/// ```
/// use wikicorpus::markup::term2wuri;
/// assert_eq!(term2wuri("duke"), "Duke");
/// assert_eq!(term2wuri("Channel Islands"), "Channel_Islands");
/// assert_eq!(term2wuri("  early   modern_ period_"), "Early_modern_period");
/// ```
pub fn term2wuri(term: &str) -> String {
    let trimmed = term.trim_matches(|c: char| c == ' ' || c == '_');
    let joined = WURI_SEPARATORS.replace_all(trimmed, "_");

    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `<term wuri="...">name</term>` for a term pointing to `title`.
pub fn term_element(title: &str, name: &str) -> String {
    format!("<term wuri=\"{}\">{}</term>", term2wuri(title), name)
}

/// Rewrites wiki links into term elements (or into plain text).
pub struct LinkAnnotator<'a> {
    keep_links: bool,
    accepted_namespaces: &'a HashSet<String>,
}

impl<'a> LinkAnnotator<'a> {
    pub fn new(keep_links: bool, accepted_namespaces: &'a HashSet<String>) -> Self {
        Self {
            keep_links,
            accepted_namespaces,
        }
    }

    /// Replacement for a single link.
    ///
    /// Links into namespaces that are not accepted (`File:`, `Category:`...) are dropped.
    pub fn anchor(&self, target: &str, display: Option<&str>, trail: &str) -> String {
        if let Some(colon) = target.find(':') {
            if colon > 0 && !self.accepted_namespaces.contains(&target[..colon]) {
                return String::new();
            }
        }

        let target = target.trim();
        let mut anchor = match display {
            Some(display) if !display.is_empty() => display.to_string(),
            _ => target.to_string(),
        };
        anchor.push_str(trail);

        if self.keep_links {
            term_element(target, &anchor)
        } else {
            anchor
        }
    }

    /// Rewrites all innermost links of `text`.
    ///
    /// Links containing other links (`[[File:x.png|a [[b]] c]]`) keep their outer brackets
    /// and have to be dropped afterwards.
    pub fn annotate(&self, text: &str) -> String {
        WIKI_LINK
            .replace_all(text, |caps: &Captures| {
                self.anchor(
                    &caps[1],
                    caps.get(2).map(|m| m.as_str()),
                    caps.get(3).map_or("", |m| m.as_str()),
                )
            })
            .into_owned()
    }
}
