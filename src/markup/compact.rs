/*! Section compaction.

Rebuilds the paragraph/section structure of a cleaned article, line by line.

Sections are tracked with a stack of levels: a heading of level `L` closes every open section
of level `>= L` before opening its own. Everything still open is closed at the end of the text.
!*/
use std::collections::BTreeMap;

/// Heading line (`== Title ==`): returns its level and trimmed title.
///
/// The level is the number of `=` that open *and* close the title.
/// Leading `=` that are not closed are kept in the title.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let leading = line.bytes().take_while(|b| *b == b'=').count();
    if leading < 2 {
        return None;
    }
    (2..=leading).rev().find_map(|level| {
        let rest = &line[level..];
        let closing = "=".repeat(level);
        rest.find(&closing).map(|end| (level, rest[..end].trim()))
    })
}

/// Adds a final dot to titles, unless they already end with `!` or `?`.
fn punctuate(title: &str) -> String {
    match title.chars().last() {
        Some('!') | Some('?') => title.to_string(),
        _ => format!("{}.", title),
    }
}

/// Line-oriented paragraph/section builder.
pub struct SectionCompactor {
    keep_sections: bool,
    page: Vec<String>,
    open_sections: Vec<usize>,
    /// pending headings of unfilled sections, by level (untracked mode only)
    headers: BTreeMap<usize, String>,
    empty_section: bool,
}

impl SectionCompactor {
    pub fn new(keep_sections: bool) -> Self {
        Self {
            keep_sections,
            page: Vec::new(),
            open_sections: Vec::new(),
            headers: BTreeMap::new(),
            empty_section: false,
        }
    }

    /// Compacts the whole text, returning the output lines.
    pub fn compact(keep_sections: bool, text: &str) -> Vec<String> {
        let mut compactor = Self::new(keep_sections);
        for line in text.split('\n') {
            compactor.push_line(line);
        }
        compactor.finish()
    }

    /// Current depth of open sections.
    pub fn depth(&self) -> usize {
        self.open_sections.len()
    }

    pub fn push_line(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        if let Some((level, title)) = parse_heading(line) {
            self.heading(level, title);
            return;
        }

        let first = line.chars().next().unwrap_or_default();
        let last = line.chars().last().unwrap_or_default();

        if let Some(title) = line.strip_prefix("++") {
            // page title, "++Title++"
            let title = title.strip_suffix("++").unwrap_or(title);
            if !title.is_empty() {
                self.page.push(punctuate(title));
            }
        } else if "*#:;".contains(first) {
            // list semantics are not kept
            if !self.keep_sections {
                self.page.push(line.to_string());
            }
        } else if "{|".contains(first) || last == '}' {
            // residuals of tables
        } else if (first == '(' && last == ')')
            || line.trim_matches(|c: char| c == '.' || c == '-').is_empty()
        {
            // irrelevant lines
        } else if !self.headers.is_empty() {
            let headers = std::mem::take(&mut self.headers);
            self.page.extend(headers.into_values());
            self.page.push(line.to_string());
            self.empty_section = false;
        } else if !self.empty_section {
            self.page.push(format!("<p>\n{}\n</p>", line));
        }
    }

    fn heading(&mut self, level: usize, title: &str) {
        if self.keep_sections {
            while self.open_sections.last().map_or(false, |open| *open >= level) {
                self.open_sections.pop();
                self.page.push("</section>".to_string());
            }
            self.page
                .push(format!("<section level=\"{}\" title=\"{}\">", level, title));
            self.open_sections.push(level);
            self.page.push(format!("<p heading=\"1\">{}</p>", title));
        } else {
            self.headers.insert(level, punctuate(title));
            // deeper headings belong to the previous, unfilled section
            self.headers.retain(|l, _| *l <= level);
            self.empty_section = true;
        }
    }

    /// Closes all open sections and returns the page lines.
    pub fn finish(mut self) -> Vec<String> {
        for _ in 0..self.open_sections.len() {
            self.page.push("</section>".to_string());
        }
        self.open_sections.clear();
        self.page
    }
}
