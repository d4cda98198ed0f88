//! Matcher tuning

use serde::{Deserialize, Serialize};

use crate::matcher::{FALLBACK_TAG, KEYWORD_BONUS, MATCH_THRESHOLD, MIN_KEYWORD_LEN};

/// Tunable knobs of the intent matcher
///
/// The defaults reproduce the stock chatbot behavior. Every field is optional
/// when deserialized, so a partial JSON object only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Scores strictly below this route to the fallback intent
    pub threshold: f64,
    /// Added to the score for every overlapping pattern keyword
    pub keyword_bonus: f64,
    /// Pattern words must be strictly longer than this to count as keywords
    pub min_keyword_len: usize,
    /// Tag of the catch-all intent
    pub fallback_tag: String,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: MATCH_THRESHOLD,
            keyword_bonus: KEYWORD_BONUS,
            min_keyword_len: MIN_KEYWORD_LEN,
            fallback_tag: FALLBACK_TAG.to_string(),
        }
    }
}
