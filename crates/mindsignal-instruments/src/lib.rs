//! mindsignal-instruments
//!
//! Questionnaire definitions and similarity-based scoring. Pure logic: the
//! embedding model and the similarity operator are injected by the caller.

pub mod error;
pub mod instruments;
pub mod scoring;

use mindsignal_core::embedding::{Embedder, Embedding};

use error::ScoringError;
use scoring::{AssessmentResult, QuestionnaireItem};

/// Trait implemented by each questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "bdi2").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "BDI-II").
    fn name(&self) -> &str;

    /// Items in presentation order.
    fn items(&self) -> &[QuestionnaireItem];

    /// Highest attainable total.
    fn max_total(&self) -> u32 {
        self.items().len() as u32 * scoring::MAX_GRADE
    }

    /// Estimate item grades from free text. See [`scoring::score`].
    fn score(
        &self,
        documents: &[String],
        embedder: &dyn Embedder,
        similarity: &dyn Fn(&Embedding, &Embedding) -> f32,
    ) -> Result<AssessmentResult, ScoringError> {
        scoring::score(documents, self.items(), embedder, similarity)
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::bdi2::Bdi2)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
