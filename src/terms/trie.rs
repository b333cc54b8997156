/*! Term trie.

Prefix tree over lemma sequences. Edges are lower-cased lemmas and
terminal nodes point to a [TermEntry].

Search state lives in a [TrieCursor] owned by the caller, so that a single
trie can be shared (`Arc<TermTrie>`) by concurrent searches.

```
use wikicorpus::terms::TermTrie;

let mut trie = TermTrie::default();
trie.insert(&["new", "york"], "New_York", "New York");
trie.insert(&["new", "york", "city"], "New_York_City", "New York City");

let mut cursor = trie.cursor();
assert!(cursor.feed("New"));
assert!(cursor.feed("York"));
assert_eq!(cursor.current_terminal().map(|e| e.id.as_str()), Some("New_York"));
assert!(cursor.feed("city"));
assert!(!cursor.feed("hall"));
assert_eq!(cursor.longest().map(|(len, e)| (len, e.id.as_str())), Some((3, "New_York_City")));
```
!*/
use std::borrow::Cow;
use std::collections::HashMap;

/// Terminal payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    /// Term identifier (wuri).
    pub id: String,
    /// Multi-word form of the term.
    pub canonical_form: String,
}

#[derive(Debug, Default, Clone)]
struct Node {
    children: HashMap<String, usize>,
    /// index into `entries`
    terminal: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct TermTrie {
    nodes: Vec<Node>,
    entries: Vec<(Vec<String>, TermEntry)>,
}

impl Default for TermTrie {
    fn default() -> Self {
        Self {
            nodes: vec![Node::default()],
            entries: Vec::new(),
        }
    }
}

fn normalize(lemma: &str) -> Cow<'_, str> {
    if lemma.chars().any(char::is_uppercase) {
        Cow::Owned(lemma.to_lowercase())
    } else {
        Cow::Borrowed(lemma)
    }
}

impl TermTrie {
    /// Adds a term keyed by its lemmas.
    ///
    /// Returns `false` (leaving the trie untouched) for an empty lemma sequence
    /// or a key that already has a term: the first inserted id is kept.
    pub fn insert<S: AsRef<str>>(
        &mut self,
        lemmas: &[S],
        id: impl Into<String>,
        canonical_form: impl Into<String>,
    ) -> bool {
        if lemmas.is_empty() {
            return false;
        }

        let mut node = 0;
        let mut key = Vec::with_capacity(lemmas.len());
        for lemma in lemmas {
            let lemma = normalize(lemma.as_ref()).into_owned();
            node = match self.nodes[node].children.get(&lemma) {
                Some(child) => *child,
                None => {
                    self.nodes.push(Node::default());
                    let child = self.nodes.len() - 1;
                    self.nodes[node].children.insert(lemma.clone(), child);
                    child
                }
            };
            key.push(lemma);
        }

        if self.nodes[node].terminal.is_some() {
            return false;
        }
        self.nodes[node].terminal = Some(self.entries.len());
        self.entries.push((
            key,
            TermEntry {
                id: id.into(),
                canonical_form: canonical_form.into(),
            },
        ));
        true
    }

    /// Adds every term of `other`, in its insertion order.
    pub fn extend(&mut self, other: &TermTrie) {
        for (key, entry) in other.entries() {
            self.insert(key, entry.id.clone(), entry.canonical_form.clone());
        }
    }

    /// Exact lookup.
    pub fn get<S: AsRef<str>>(&self, lemmas: &[S]) -> Option<&TermEntry> {
        let mut cursor = self.cursor();
        for lemma in lemmas {
            if !cursor.feed(lemma.as_ref()) {
                return None;
            }
        }
        cursor.current_terminal()
    }

    /// Fresh search from the root.
    pub fn cursor(&self) -> TrieCursor<'_> {
        TrieCursor {
            trie: self,
            node: Some(0),
            depth: 0,
            longest: None,
        }
    }

    /// Terms with their (normalized) keys, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&[String], &TermEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_slice(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Incremental search state over a [TermTrie].
#[derive(Debug, Clone)]
pub struct TrieCursor<'t> {
    trie: &'t TermTrie,
    /// `None` once a lemma had no edge
    node: Option<usize>,
    depth: usize,
    longest: Option<(usize, &'t TermEntry)>,
}

impl<'t> TrieCursor<'t> {
    /// Restarts the search from the root.
    pub fn start(&mut self) {
        self.node = Some(0);
        self.depth = 0;
        self.longest = None;
    }

    /// Follows the edge of `lemma`. Returns `false` when there is none,
    /// in which case the search is over until the next [TrieCursor::start].
    pub fn feed(&mut self, lemma: &str) -> bool {
        let trie = self.trie;
        let child = self
            .node
            .and_then(|node| trie.nodes[node].children.get(&*normalize(lemma)))
            .copied();

        self.node = child;
        match child {
            Some(node) => {
                self.depth += 1;
                if let Some(entry) = trie.nodes[node].terminal {
                    self.longest = Some((self.depth, &trie.entries[entry].1));
                }
                true
            }
            None => false,
        }
    }

    /// Term ending at the current position.
    pub fn current_terminal(&self) -> Option<&'t TermEntry> {
        let trie = self.trie;
        self.node
            .and_then(|node| trie.nodes[node].terminal)
            .map(|entry| &trie.entries[entry].1)
    }

    /// Number of lemmas fed successfully since the last start.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Longest term met since the last start, with its length in lemmas.
    pub fn longest(&self) -> Option<(usize, &'t TermEntry)> {
        self.longest
    }
}
