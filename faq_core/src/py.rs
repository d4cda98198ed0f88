//! Python bindings for the FAQ matcher using PyO3

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::matcher::IntentMatcher;
use crate::similarity::similarity;
use crate::types::{Catalog, Intent};

/// Similarity between two strings (Python function)
#[pyfunction]
#[pyo3(name = "similarity")]
pub fn py_similarity(a: &str, b: &str) -> f64 {
    similarity(a, b)
}

/// Python wrapper for the intent matcher
///
/// The catalog is fixed at construction time.
#[pyclass]
pub struct PyFaqMatcher {
    matcher: IntentMatcher,
}

#[pymethods]
impl PyFaqMatcher {
    /// Matcher over the built-in catalog
    #[new]
    fn new() -> Self {
        Self {
            matcher: IntentMatcher::new(Catalog::builtin()),
        }
    }

    /// Matcher over a `{"intents": [...]}` JSON document
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let catalog = Catalog::from_json_str(json)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self {
            matcher: IntentMatcher::new(catalog),
        })
    }

    /// Matcher over a list of `{"tag", "patterns", "responses"}` dicts
    #[staticmethod]
    fn from_list(intents_list: Bound<'_, PyList>) -> PyResult<Self> {
        let mut intents = Vec::with_capacity(intents_list.len());
        for item in intents_list.iter() {
            let intent_dict = item.downcast::<PyDict>()?;

            let tag: String = intent_dict
                .get_item("tag")?
                .ok_or_else(|| PyValueError::new_err("intent is missing 'tag'"))?
                .extract()?;
            let patterns: Vec<String> = intent_dict
                .get_item("patterns")?
                .and_then(|v| v.extract().ok())
                .unwrap_or_default();
            let responses: Vec<String> = intent_dict
                .get_item("responses")?
                .and_then(|v| v.extract().ok())
                .unwrap_or_default();

            intents.push(Intent {
                tag,
                patterns,
                responses,
            });
        }

        Ok(Self {
            matcher: IntentMatcher::new(Catalog::new(intents)),
        })
    }

    /// Reply to a user message
    fn best_reply(&self, utterance: &str) -> String {
        self.matcher.reply(utterance)
    }

    /// Selected intent for a user message, without picking a reply
    fn match_intent<'py>(&self, utterance: &str, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        match self.matcher.find(utterance) {
            Some(result) => {
                dict.set_item("type", if result.fallback { "fallback" } else { "match" })?;
                dict.set_item("tag", result.tag())?;
                dict.set_item("score", result.score)?;
            }
            None => {
                dict.set_item("type", "none")?;
            }
        }
        Ok(dict)
    }

    fn __len__(&self) -> usize {
        self.matcher.catalog().len()
    }
}
