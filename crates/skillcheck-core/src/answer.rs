//! Submitted answer shapes.
//!
//! One variant per submitted-value shape; the validator pairs these with
//! question variants and rejects mismatches. Untagged serde so answer sheets
//! read naturally (`q1 = 2`, `q2 = true`, `q3 = "useState"`, ...). Pair
//! mappings are written as pair lists (`[[0, 1], [1, 0]]`) on the wire: JSON
//! and TOML keys are strings, so serializing the map form would stringify
//! the indices and never deserialize back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A submitted answer. Owned by the session; overwritable until the session
/// completes, frozen thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// True/false response.
    Bool(bool),
    /// Selected option index (multiple choice).
    Choice(usize),
    /// Free text (short answer, code completion, bug fix).
    Text(String),
    /// Item arrangement (drag & drop).
    Order(Vec<usize>),
    /// Term index → definition index mapping (matching).
    Pairs(#[serde(with = "pairs_repr")] BTreeMap<usize, usize>),
}

/// Wire form of a pair mapping: a list of `[term, definition]` entries.
mod pairs_repr {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<usize, usize>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(map.iter().map(|(&term, &def)| (term, def)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<usize, usize>, D::Error> {
        let entries = Vec::<(usize, usize)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

impl Answer {
    /// Stable shape name for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Answer::Bool(_) => "bool",
            Answer::Choice(_) => "choice index",
            Answer::Text(_) => "text",
            Answer::Order(_) => "ordering",
            Answer::Pairs(_) => "pair mapping",
        }
    }

    /// Convenience constructor for pair mappings.
    pub fn pairs<I: IntoIterator<Item = (usize, usize)>>(entries: I) -> Self {
        Answer::Pairs(entries.into_iter().collect())
    }
}

impl From<bool> for Answer {
    fn from(v: bool) -> Self {
        Answer::Bool(v)
    }
}

impl From<usize> for Answer {
    fn from(v: usize) -> Self {
        Answer::Choice(v)
    }
}

impl From<&str> for Answer {
    fn from(v: &str) -> Self {
        Answer::Text(v.to_string())
    }
}

impl From<String> for Answer {
    fn from(v: String) -> Self {
        Answer::Text(v)
    }
}

impl From<Vec<usize>> for Answer {
    fn from(v: Vec<usize>) -> Self {
        Answer::Order(v)
    }
}
