//! Tagsets of vertical files.
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Schema of the token lines of a vertical file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tagset {
    /// `word`
    Basic,
    /// `word\tlemma\ttag`
    Desamb,
    /// `word\ttag\tlemma`
    TreeTagger,
}

impl Tagset {
    pub const ALL: [Tagset; 3] = [Tagset::Basic, Tagset::Desamb, Tagset::TreeTagger];

    pub fn name(&self) -> &'static str {
        match self {
            Tagset::Basic => "basic",
            Tagset::Desamb => "desamb",
            Tagset::TreeTagger => "treetagger",
        }
    }

    /// Column of the lemma.
    pub fn lemma_column(&self) -> Option<usize> {
        match self {
            Tagset::Basic => None,
            Tagset::Desamb => Some(1),
            Tagset::TreeTagger => Some(2),
        }
    }

    /// Column of the morphological tag.
    pub fn tag_column(&self) -> Option<usize> {
        match self {
            Tagset::Basic => None,
            Tagset::Desamb => Some(2),
            Tagset::TreeTagger => Some(1),
        }
    }

    /// Lemma prefix the tagger uses for numbers.
    ///
    /// A lemma starting with it is replaced by the word followed by the rest of the lemma.
    pub fn numeric_marker(&self) -> Option<&'static str> {
        match self {
            Tagset::Basic => None,
            Tagset::Desamb => Some("#num#"),
            Tagset::TreeTagger => Some("@card@"),
        }
    }
}

impl FromStr for Tagset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tagset::ALL
            .iter()
            .find(|tagset| tagset.name() == s)
            .copied()
            .ok_or_else(|| Error::UnknownTagset(s.to_string()))
    }
}

impl fmt::Display for Tagset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
