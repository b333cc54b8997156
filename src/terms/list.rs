/*! Term lists.

Tab separated files, one term per row:

```text
New_York	new york	New York
Prague	prague
```

The first column is the term id, the second its space-separated lemmas,
and the optional third one its canonical form (defaults to the lemmas).
!*/
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use log::{info, warn};

use super::TermTrie;
use crate::error::Error;

/// Reads a term list into a trie. Rows without lemmas are skipped.
pub fn load_terms<P: AsRef<Path>>(path: P) -> Result<TermTrie, Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_path(path.as_ref())?;

    let mut trie = TermTrie::default();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let id = record.get(0).unwrap_or_default();
        let lemmas: Vec<&str> = record.get(1).unwrap_or_default().split_whitespace().collect();
        if id.is_empty() || lemmas.is_empty() {
            warn!("{:?}: skipping row {} without term id or lemmas", path.as_ref(), row + 1);
            continue;
        }

        let canonical_form = match record.get(2) {
            Some(form) if !form.is_empty() => form.to_string(),
            _ => lemmas.join(" "),
        };
        if !trie.insert(&lemmas, id, canonical_form) {
            warn!("{:?}: duplicate lemmas for term {}, keeping the first one", path.as_ref(), id);
        }
    }

    info!("{:?}: loaded {} terms", path.as_ref(), trie.len());
    Ok(trie)
}

/// Writes the terms of `trie` in insertion order.
pub fn write_terms<P: AsRef<Path>>(trie: &TermTrie, path: P) -> Result<(), Error> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_path(path)?;

    for (lemmas, entry) in trie.entries() {
        writer.write_record([
            entry.id.as_str(),
            lemmas.join(" ").as_str(),
            entry.canonical_form.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
