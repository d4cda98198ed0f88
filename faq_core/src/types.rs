//! Core data types for the intent catalog and match results

use serde::{Deserialize, Serialize};

/// A named category of user request with example phrases and candidate replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub tag: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

impl Intent {
    pub fn new<T, P, R>(tag: T, patterns: P, responses: R) -> Self
    where
        T: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            tag: tag.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered, read-only collection of intents
///
/// Built once (see [`crate::catalog`]) and never mutated afterwards, so a single
/// catalog can be shared across threads behind a plain reference or `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    intents: Vec<Intent>,
}

impl Catalog {
    pub fn new(intents: Vec<Intent>) -> Self {
        Self { intents }
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn first(&self) -> Option<&Intent> {
        self.intents.first()
    }

    /// Look up an intent by its tag
    pub fn find(&self, tag: &str) -> Option<&Intent> {
        self.intents.iter().find(|intent| intent.tag == tag)
    }
}

impl From<Vec<Intent>> for Catalog {
    fn from(intents: Vec<Intent>) -> Self {
        Self::new(intents)
    }
}

/// The intent selected for an utterance and the score that selected it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub intent: &'a Intent,
    /// Best combined score seen, even when it fell below the threshold
    pub score: f64,
    /// True when the intent came from the fallback path rather than a confident match
    pub fallback: bool,
}

impl<'a> MatchResult<'a> {
    pub fn tag(&self) -> &'a str {
        &self.intent.tag
    }
}
