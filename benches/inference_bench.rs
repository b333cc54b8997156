use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wikicorpus::terms::{InferenceOptions, TermOccurrenceInferer, TermTrie};
use wikicorpus::vertical::{Tagset, VerticalDocument};

const WORDS: [&str; 8] = [
    "the", "river", "flows", "through", "new", "york", "city", "today",
];

/// Treetagger vertical of `paragraphs` paragraphs, with an explicit term every paragraph.
fn vertical(paragraphs: usize) -> String {
    let mut text = String::from("<doc id=\"1\">\n");
    for p in 0..paragraphs {
        text.push_str("<p>\n<s>\n");
        if p % 2 == 0 {
            text.push_str("<term wuri=\"Vltava\">\nVltava\tNP\tVltava\n</term>\n");
        }
        for (i, word) in WORDS.iter().cycle().take(40).enumerate() {
            if i % 12 == 11 {
                text.push_str("</s>\n<s>\n");
            }
            text.push_str(&format!("{}\tNN\t{}\n", word, word));
        }
        text.push_str("vltava\tNN\tvltava\n</s>\n</p>\n");
    }
    text.push_str("</doc>\n");
    text
}

fn external() -> Arc<TermTrie> {
    let mut trie = TermTrie::default();
    trie.insert(&["new", "york"], "New_York", "New York");
    trie.insert(&["new", "york", "city"], "New_York_City", "New York City");
    trie.insert(&["river"], "River", "river");
    trie.insert(&["the", "river", "thames"], "Thames", "the River Thames");
    Arc::new(trie)
}

pub fn inference(c: &mut Criterion) {
    let doc = VerticalDocument::parse(&vertical(200), Tagset::TreeTagger);
    let inferer = TermOccurrenceInferer::new(Some(external()), InferenceOptions::default());

    c.bench_function("parse_vertical", |b| {
        let text = vertical(200);
        b.iter(|| VerticalDocument::parse(black_box(&text), Tagset::TreeTagger))
    });
    c.bench_function("infer_terms", |b| b.iter(|| inferer.infer(black_box(&doc))));
}

criterion_group!(benches, inference);
criterion_main!(benches);
