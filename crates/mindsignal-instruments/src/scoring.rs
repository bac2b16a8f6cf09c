use serde::{Deserialize, Serialize};
use tracing::debug;

use mindsignal_core::embedding::{Embedder, Embedding};
use mindsignal_core::error::EmbeddingError;

use crate::error::ScoringError;

/// Number of graded answer options per item.
pub const OPTION_COUNT: usize = 4;

/// Highest grade a single item can receive.
pub const MAX_GRADE: u32 = OPTION_COUNT as u32 - 1;

/// One questionnaire item. Options are ordered from least severe (grade 0)
/// to most severe (grade 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionnaireItem {
    pub name: &'static str,
    pub options: [&'static str; OPTION_COUNT],
}

/// Grade assigned to one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemScore {
    pub item_name: String,
    pub grade: u32,
    /// Best similarity any document reached against each option.
    pub max_similarity: [f32; OPTION_COUNT],
}

/// Qualitative label for a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Minimal,
    Mild,
    Moderate,
    Severe,
}

impl SeverityBand {
    pub const ALL: [SeverityBand; 4] = [
        SeverityBand::Minimal,
        SeverityBand::Mild,
        SeverityBand::Moderate,
        SeverityBand::Severe,
    ];

    /// Band for a total. Upper bounds are inclusive: 13, 19, 28.
    pub fn from_total(total: u32) -> Self {
        match total {
            0..=13 => SeverityBand::Minimal,
            14..=19 => SeverityBand::Mild,
            20..=28 => SeverityBand::Moderate,
            _ => SeverityBand::Severe,
        }
    }

    /// Inclusive total range covered by this band.
    pub fn range(self) -> (u32, u32) {
        match self {
            SeverityBand::Minimal => (0, 13),
            SeverityBand::Mild => (14, 19),
            SeverityBand::Moderate => (20, 28),
            SeverityBand::Severe => (29, 63),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeverityBand::Minimal => "Minimal depression",
            SeverityBand::Mild => "Mild depression",
            SeverityBand::Moderate => "Moderate depression",
            SeverityBand::Severe => "Severe depression",
        }
    }
}

/// Result of scoring one document set. Derived on every request and never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub total: u32,
    /// One entry per item, in item order.
    pub breakdown: Vec<ItemScore>,
    pub severity_band: SeverityBand,
}

impl AssessmentResult {
    pub fn max_total(&self) -> u32 {
        self.breakdown.len() as u32 * MAX_GRADE
    }
}

/// Score a document set against questionnaire items.
///
/// For each item, every option is compared with every document; the best
/// similarity per option is kept and the option with the highest best
/// similarity becomes the item's grade. Ties go to the lower (less severe)
/// option. Documents are embedded once and reused across items.
///
/// An item whose best similarities are not all finite fails the run with
/// [`EmbeddingError::Inference`] rather than grading as 0.
pub fn score<E, S>(
    documents: &[String],
    items: &[QuestionnaireItem],
    embedder: &E,
    similarity: S,
) -> Result<AssessmentResult, ScoringError>
where
    E: Embedder + ?Sized,
    S: Fn(&Embedding, &Embedding) -> f32,
{
    if documents.is_empty() {
        return Err(ScoringError::EmptyInput);
    }

    let document_embeddings = embedder.embed_batch(documents)?;
    if document_embeddings.len() != documents.len() {
        return Err(ScoringError::Embedding(EmbeddingError::Inference(format!(
            "expected {} document embeddings, got {}",
            documents.len(),
            document_embeddings.len()
        ))));
    }
    let dim = shared_dimension(&document_embeddings)?;

    let mut breakdown = Vec::with_capacity(items.len());
    for item in items {
        let options: Vec<String> = item.options.iter().map(|o| o.to_string()).collect();
        let option_embeddings = embedder.embed_batch(&options)?;
        if option_embeddings.len() != OPTION_COUNT {
            return Err(ScoringError::Embedding(EmbeddingError::Inference(format!(
                "expected {OPTION_COUNT} option embeddings for '{}', got {}",
                item.name,
                option_embeddings.len()
            ))));
        }
        check_dimension(&option_embeddings, dim)?;

        let mut max_similarity = [f32::NEG_INFINITY; OPTION_COUNT];
        for doc in &document_embeddings {
            for (best, option) in max_similarity.iter_mut().zip(&option_embeddings) {
                let sim = similarity(doc, option);
                if sim > *best {
                    *best = sim;
                }
            }
        }
        if max_similarity.iter().any(|s| !s.is_finite()) {
            return Err(ScoringError::Embedding(EmbeddingError::Inference(format!(
                "no finite similarity for item '{}': {max_similarity:?}",
                item.name
            ))));
        }

        let grade = lowest_argmax(&max_similarity);
        debug!(item = item.name, grade, ?max_similarity, "item graded");

        breakdown.push(ItemScore {
            item_name: item.name.to_string(),
            grade,
            max_similarity,
        });
    }

    let total = breakdown.iter().map(|s| s.grade).sum();

    Ok(AssessmentResult {
        total,
        breakdown,
        severity_band: SeverityBand::from_total(total),
    })
}

/// Index of the largest value, the lowest index winning ties.
fn lowest_argmax(values: &[f32; OPTION_COUNT]) -> u32 {
    let best = values
        .iter()
        .enumerate()
        .skip(1)
        .fold(0, |best, (i, v)| if *v > values[best] { i } else { best });
    best as u32
}

fn shared_dimension(embeddings: &[Embedding]) -> Result<usize, EmbeddingError> {
    let dim = embeddings.first().map(Embedding::dim).unwrap_or(0);
    if dim == 0 {
        return Err(EmbeddingError::EmptyVector);
    }
    check_dimension(embeddings, dim)?;
    Ok(dim)
}

fn check_dimension(embeddings: &[Embedding], expected: usize) -> Result<(), EmbeddingError> {
    match embeddings.iter().find(|e| e.dim() != expected) {
        Some(e) => Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: e.dim(),
        }),
        None => Ok(()),
    }
}
