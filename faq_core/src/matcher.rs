//! Intent matcher - pick the best intent for an utterance and reply from it

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::MatchConfig;
use crate::similarity::{keyword_bonus, similarity};
use crate::types::{Catalog, Intent, MatchResult};

/// Scores strictly below this are not trusted
pub const MATCH_THRESHOLD: f64 = 0.3;
/// Bonus per pattern keyword found in the utterance
pub const KEYWORD_BONUS: f64 = 0.2;
/// Pattern words need more characters than this to count as keywords
pub const MIN_KEYWORD_LEN: usize = 3;
/// Tag of the catch-all intent
pub const FALLBACK_TAG: &str = "unknown";

/// Returned when there is no catalog to match against
pub const NOT_READY_MESSAGE: &str =
    "Désolé, les intents ne sont pas encore chargés. Veuillez réessayer dans quelques instants.";
/// Returned when the selected intent has nothing to say
pub const CLARIFICATION_MESSAGE: &str =
    "Je ne suis pas sûr de comprendre votre question. Pouvez-vous la reformuler ?";

/// Select the intent for `input`
///
/// Scores every pattern of every intent and keeps the highest; ties go to the
/// first one in catalog order. A best score below the threshold is replaced by
/// the fallback intent, or by the first intent when the catalog has none.
/// Returns `None` only for an empty catalog.
pub fn find_best_intent<'a>(
    catalog: &'a Catalog,
    input: &str,
    config: &MatchConfig,
) -> Option<MatchResult<'a>> {
    let first = catalog.first()?;

    let input_normalized = input.trim().to_lowercase();

    let mut best: Option<(&Intent, f64)> = None;
    for intent in catalog.intents() {
        for pattern in &intent.patterns {
            let pattern_lower = pattern.to_lowercase();
            let score = similarity(&input_normalized, &pattern_lower)
                + keyword_bonus(
                    &input_normalized,
                    &pattern_lower,
                    config.min_keyword_len,
                    config.keyword_bonus,
                );

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((intent, score));
            }
        }
    }

    let result = match best {
        Some((intent, score)) if score >= config.threshold => MatchResult {
            intent,
            score,
            fallback: false,
        },
        other => MatchResult {
            intent: catalog.find(&config.fallback_tag).unwrap_or(first),
            score: other.map_or(0.0, |(_, score)| score),
            fallback: true,
        },
    };

    debug!(
        "Matched {:?} -> '{}' (score {:.3}, fallback: {})",
        input_normalized,
        result.tag(),
        result.score,
        result.fallback
    );

    Some(result)
}

/// Pick one of the intent's responses uniformly at random
pub fn pick_response<R: Rng + ?Sized>(intent: &Intent, rng: &mut R) -> String {
    match intent.responses.choose(rng) {
        Some(response) => response.clone(),
        None => {
            debug!("Intent '{}' has no responses", intent.tag);
            CLARIFICATION_MESSAGE.to_string()
        }
    }
}

/// Reply to `input` using the default configuration and the thread RNG
///
/// Never fails: an empty catalog yields [`NOT_READY_MESSAGE`].
pub fn best_reply(catalog: &Catalog, input: &str) -> String {
    best_reply_with(catalog, input, &MatchConfig::default(), &mut rand::rng())
}

/// Reply to `input` with an explicit configuration and random source
pub fn best_reply_with<R: Rng + ?Sized>(
    catalog: &Catalog,
    input: &str,
    config: &MatchConfig,
    rng: &mut R,
) -> String {
    match find_best_intent(catalog, input, config) {
        Some(result) => pick_response(result.intent, rng),
        None => {
            debug!("Catalog is empty, cannot answer {:?}", input);
            NOT_READY_MESSAGE.to_string()
        }
    }
}

/// A catalog bundled with its matching configuration
#[derive(Debug, Clone, Default)]
pub struct IntentMatcher {
    catalog: Catalog,
    config: MatchConfig,
}

impl IntentMatcher {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, MatchConfig::default())
    }

    pub fn with_config(catalog: Catalog, config: MatchConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn find(&self, input: &str) -> Option<MatchResult<'_>> {
        find_best_intent(&self.catalog, input, &self.config)
    }

    pub fn reply(&self, input: &str) -> String {
        self.reply_with(input, &mut rand::rng())
    }

    pub fn reply_with<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> String {
        best_reply_with(&self.catalog, input, &self.config, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            Intent::new("greeting", ["bonjour"], ["Salut!"]),
            Intent::new("unknown", Vec::<String>::new(), ["Je ne comprends pas."]),
        ])
    }

    fn faq_catalog() -> Catalog {
        Catalog::new(vec![
            Intent::new("greeting", ["bonjour", "salut", "hello"], ["Bonjour !", "Salut !"]),
            Intent::new(
                "formations",
                ["quelles formations proposez-vous", "liste des formations"],
                ["Nous proposons un cycle ingénieur et des masters."],
            ),
            Intent::new(
                "admissions",
                ["comment candidater", "conditions d'admission"],
                ["Les candidatures se font sur la plateforme en ligne."],
            ),
            Intent::new("unknown", Vec::<String>::new(), ["Pouvez-vous reformuler ?"]),
        ])
    }

    #[test]
    fn test_exact_match() {
        let catalog = sample_catalog();
        assert_eq!(best_reply(&catalog, "bonjour"), "Salut!");
        assert_eq!(best_reply(&catalog, "  BONJOUR  "), "Salut!");
    }

    #[test]
    fn test_no_match_routes_to_fallback() {
        let catalog = sample_catalog();
        assert_eq!(best_reply(&catalog, "xyzzy qqq"), "Je ne comprends pas.");

        let result = find_best_intent(&catalog, "xyzzy qqq", &MatchConfig::default()).unwrap();
        assert_eq!(result.tag(), "unknown");
        assert!(result.fallback);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert_eq!(best_reply(&catalog, "bonjour"), NOT_READY_MESSAGE);
        assert!(find_best_intent(&catalog, "bonjour", &MatchConfig::default()).is_none());
    }

    #[test]
    fn test_empty_input() {
        let catalog = sample_catalog();
        assert_eq!(best_reply(&catalog, ""), "Je ne comprends pas.");
        assert_eq!(best_reply(&catalog, "   "), "Je ne comprends pas.");
    }

    #[test]
    fn test_empty_responses() {
        let catalog = Catalog::new(vec![
            Intent::new("greeting", ["bonjour"], Vec::<String>::new()),
            Intent::new("unknown", Vec::<String>::new(), ["Je ne comprends pas."]),
        ]);
        assert_eq!(best_reply(&catalog, "bonjour"), CLARIFICATION_MESSAGE);
    }

    #[test]
    fn test_missing_fallback_uses_first_intent() {
        let catalog = Catalog::new(vec![
            Intent::new("greeting", ["bonjour"], ["Salut!"]),
            Intent::new("contact", ["contact"], ["Écrivez-nous."]),
        ]);
        let result = find_best_intent(&catalog, "xyzzy qqq", &MatchConfig::default()).unwrap();
        assert_eq!(result.tag(), "greeting");
        assert!(result.fallback);
    }

    #[test]
    fn test_threshold_boundary_is_accepted() {
        // 7 substitutions over 10 characters: similarity exactly 0.3, no keyword overlap
        let catalog = Catalog::new(vec![
            Intent::new("probe", ["abcxxxxxxx"], ["accepted"]),
            Intent::new("unknown", Vec::<String>::new(), ["rejected"]),
        ]);
        let result = find_best_intent(&catalog, "abcdefghij", &MatchConfig::default()).unwrap();
        assert_eq!(result.score, MATCH_THRESHOLD);
        assert_eq!(result.tag(), "probe");
        assert!(!result.fallback);
        assert_eq!(best_reply(&catalog, "abcdefghij"), "accepted");
    }

    #[test]
    fn test_just_below_threshold_is_rejected() {
        // 8 substitutions over 10 characters: 0.2
        let catalog = Catalog::new(vec![
            Intent::new("probe", ["abxxxxxxxx"], ["accepted"]),
            Intent::new("unknown", Vec::<String>::new(), ["rejected"]),
        ]);
        assert_eq!(best_reply(&catalog, "abcdefghij"), "rejected");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            Intent::new("first", ["horaires"], ["un"]),
            Intent::new("second", ["horaires"], ["deux"]),
            Intent::new("unknown", Vec::<String>::new(), ["?"]),
        ]);
        let result = find_best_intent(&catalog, "horaires", &MatchConfig::default()).unwrap();
        assert_eq!(result.tag(), "first");
    }

    #[test]
    fn test_keyword_bonus_is_uncapped() {
        let catalog = faq_catalog();
        let result =
            find_best_intent(&catalog, "liste des formations", &MatchConfig::default()).unwrap();
        assert_eq!(result.tag(), "formations");
        // exact pattern (1.0) plus "liste" and "formations" keywords
        assert!((result.score - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_rescues_longer_question() {
        let catalog = faq_catalog();
        let result = find_best_intent(
            &catalog,
            "je voudrais connaître vos formations en informatique",
            &MatchConfig::default(),
        )
        .unwrap();
        assert_eq!(result.tag(), "formations");
        assert!(!result.fallback);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let catalog = faq_catalog();
        let config = MatchConfig::default();
        let first = find_best_intent(&catalog, "comment candidater ?", &config).unwrap();
        for _ in 0..20 {
            let again = find_best_intent(&catalog, "comment candidater ?", &config).unwrap();
            assert_eq!(again.tag(), first.tag());
            assert_eq!(again.score, first.score);
        }
        assert_eq!(first.tag(), "admissions");
    }

    #[test]
    fn test_reply_comes_from_selected_intent() {
        let catalog = faq_catalog();
        let greeting = catalog.find("greeting").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let reply = best_reply_with(&catalog, "salut", &MatchConfig::default(), &mut rng);
            assert!(greeting.responses.contains(&reply));
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let matcher = IntentMatcher::new(faq_catalog());
        let replies = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| matcher.reply_with("hello", &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(replies(42), replies(42));
    }

    #[test]
    fn test_custom_threshold() {
        let config = MatchConfig {
            threshold: 2.0,
            ..MatchConfig::default()
        };
        let matcher = IntentMatcher::with_config(sample_catalog(), config);
        let result = matcher.find("bonjour").unwrap();
        assert!(result.fallback);
        assert_eq!(matcher.reply("bonjour"), "Je ne comprends pas.");
    }
}
