//! Catalog loading and validation
//!
//! Catalogs are stored as `{"intents": [{"tag", "patterns", "responses"}, ...]}`.
//! A catalog that cannot be read, parsed or validated is replaced by the
//! built-in one so the matcher always has something to answer with.

use std::fs;
use std::path::Path;

use ahash::AHashSet;
use log::{debug, warn};

use crate::errors::{CatalogError, CatalogResult};
use crate::matcher::FALLBACK_TAG;
use crate::types::{Catalog, Intent};

impl Catalog {
    /// Parse a catalog document without validating it
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Minimal catalog used when nothing better is available
    pub fn builtin() -> Self {
        Self::new(vec![
            Intent::new(
                "greeting",
                ["bonjour", "salut", "hello"],
                ["Bonjour ! Je suis là pour vous aider concernant le département d'informatique de l'EFREI."],
            ),
            Intent::new(
                FALLBACK_TAG,
                Vec::<String>::new(),
                ["Je ne suis pas sûr de comprendre. Pouvez-vous reformuler votre question ?"],
            ),
        ])
    }

    /// Check the catalog invariants against the default fallback tag
    pub fn validate(&self) -> CatalogResult<()> {
        self.validate_with_fallback(FALLBACK_TAG)
    }

    /// Check the catalog invariants
    ///
    /// Tags must be unique, exactly one intent must carry `fallback_tag`, every
    /// other intent needs at least one pattern, and every intent needs at least
    /// one response.
    pub fn validate_with_fallback(&self, fallback_tag: &str) -> CatalogResult<()> {
        if self.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen: AHashSet<&str> = AHashSet::with_capacity(self.len());
        for intent in self.intents() {
            if !seen.insert(intent.tag.as_str()) {
                return Err(CatalogError::DuplicateTag(intent.tag.clone()));
            }
            if intent.tag != fallback_tag && intent.patterns.is_empty() {
                return Err(CatalogError::NoPatterns(intent.tag.clone()));
            }
            if intent.responses.is_empty() {
                return Err(CatalogError::NoResponses(intent.tag.clone()));
            }
        }

        if !seen.contains(fallback_tag) {
            return Err(CatalogError::MissingFallback(fallback_tag.to_string()));
        }

        Ok(())
    }
}

/// Read, parse and validate a catalog file
pub fn load_catalog(path: impl AsRef<Path>) -> CatalogResult<Catalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = Catalog::from_json_str(&content)?;
    catalog.validate()?;

    debug!("Loaded {} intents from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load a catalog file, falling back to [`Catalog::builtin`] on any error
pub fn load_or_builtin(path: impl AsRef<Path>) -> Catalog {
    let path = path.as_ref();
    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("Using built-in catalog, could not load {}: {}", path.display(), e);
            Catalog::builtin()
        }
    }
}
