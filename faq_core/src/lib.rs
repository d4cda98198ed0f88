//! FAQ core - lexical intent matching for a conversational FAQ widget
//!
//! Scores a user message against the example phrases of every intent in a
//! catalog, picks the best one, and answers with one of its replies. Messages
//! that match nothing well fall back to a catch-all "please rephrase" intent.

pub mod types;
pub mod similarity;
pub mod matcher;
pub mod config;
pub mod catalog;
pub mod errors;

pub use types::*;
pub use similarity::*;
pub use matcher::*;
pub use config::*;
pub use catalog::*;
pub use errors::*;

// Python bindings
#[cfg(feature = "python")]
pub mod py;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn faq_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyFaqMatcher>()?;
    m.add_function(wrap_pyfunction!(py_similarity, m)?)?;
    Ok(())
}
