use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use mindsignal_core::embedding::{cosine_similarity, Embedder, Embedding};
use mindsignal_core::error::EmbeddingError;
use mindsignal_instruments::error::ScoringError;
use mindsignal_instruments::instruments::bdi2::BDI2_ITEMS;
use mindsignal_instruments::scoring::{score, AssessmentResult, QuestionnaireItem, SeverityBand};
use mindsignal_instruments::{get_instrument, Instrument};

/// Looks texts up in a table and falls back to a default vector.
struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
    fallback: Vec<f32>,
    calls: AtomicUsize,
}

impl TableEmbedder {
    fn new(fallback: Vec<f32>) -> Self {
        Self {
            table: HashMap::new(),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.table.insert(text.to_string(), vector);
        self
    }

    /// Every BDI-II option at `index` maps to `vector`.
    fn with_option_index(mut self, index: usize, vector: Vec<f32>) -> Self {
        for item in &BDI2_ITEMS {
            self.table.insert(item.options[index].to_string(), vector.clone());
        }
        self
    }
}

impl Embedder for TableEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let v = self.table.get(text).cloned().unwrap_or_else(|| self.fallback.clone());
        Ok(Embedding::new(v))
    }
}

/// Deterministic pseudo-random vectors derived from the text bytes.
struct HashEmbedder;

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let mut state: u64 = 0xcbf2_9ce4_8422_2325;
        for b in text.bytes() {
            state ^= u64::from(b);
            state = state.wrapping_mul(0x0100_0000_01b3);
        }
        let values = (0..8)
            .map(|i| {
                let x = state.rotate_left(i * 8) & 0xffff;
                x as f32 / 32768.0 - 1.0
            })
            .collect();
        Ok(Embedding::new(values))
    }
}

struct FailingEmbedder;

impl Embedder for FailingEmbedder {
    fn embed(&self, _text: &str) -> Result<Embedding, EmbeddingError> {
        Err(EmbeddingError::Inference("model offline".to_string()))
    }
}

fn docs(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

#[test]
fn document_matching_option_two_everywhere_scores_42() {
    let embedder = TableEmbedder::new(vec![0.0, 1.0])
        .with_option_index(2, vec![1.0, 0.0])
        .with("my only post", vec![1.0, 0.0]);

    let result = score(&docs(&["my only post"]), &BDI2_ITEMS, &embedder, cosine_similarity).unwrap();

    assert_eq!(result.total, 42);
    assert_eq!(result.severity_band, SeverityBand::Severe);
    assert!(result.breakdown.iter().all(|s| s.grade == 2));
}

#[test]
fn documents_matching_option_zero_score_zero() {
    let embedder = TableEmbedder::new(vec![0.0, 1.0])
        .with_option_index(0, vec![1.0, 0.0])
        .with("first", vec![1.0, 0.0])
        .with("second", vec![0.9, 0.1]);

    let result = score(&docs(&["first", "second"]), &BDI2_ITEMS, &embedder, cosine_similarity).unwrap();

    assert_eq!(result.total, 0);
    assert_eq!(result.severity_band, SeverityBand::Minimal);
}

#[test]
fn equal_similarities_resolve_to_lowest_grade() {
    // Every text, options included, embeds to the same vector.
    let embedder = TableEmbedder::new(vec![0.5, 0.5, 0.5]);
    let result = score(&docs(&["anything"]), &BDI2_ITEMS, &embedder, cosine_similarity).unwrap();

    assert!(result.breakdown.iter().all(|s| s.grade == 0));
    assert_eq!(result.total, 0);
}

#[test]
fn negative_similarities_are_not_clamped() {
    let item = QuestionnaireItem {
        name: "Only item",
        options: ["a", "b", "c", "d"],
    };
    let embedder = TableEmbedder::new(vec![-1.0, 0.0])
        .with("d", vec![-1.0, 0.1])
        .with("doc", vec![1.0, 0.0]);

    let result = score(&docs(&["doc"]), &[item], &embedder, cosine_similarity).unwrap();

    assert_eq!(result.breakdown[0].grade, 3);
    assert!(result.breakdown[0].max_similarity.iter().all(|s| *s < 0.0));
}

#[test]
fn best_document_per_option_wins() {
    let item = QuestionnaireItem {
        name: "Only item",
        options: ["a", "b", "c", "d"],
    };
    let embedder = TableEmbedder::new(vec![0.0, 0.0, 1.0])
        .with("a", vec![1.0, 0.0, 0.0])
        .with("b", vec![0.0, 1.0, 0.0])
        .with("weak a", vec![0.6, 0.0, 0.8])
        .with("strong b", vec![0.0, 0.95, 0.31]);

    let result = score(&docs(&["weak a", "strong b"]), &[item], &embedder, cosine_similarity).unwrap();

    assert_eq!(result.breakdown[0].grade, 1);
}

#[test]
fn empty_document_set_is_rejected() {
    let embedder = TableEmbedder::new(vec![1.0]);
    let err = score(&[], &BDI2_ITEMS, &embedder, cosine_similarity).unwrap_err();
    assert!(matches!(err, ScoringError::EmptyInput));
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn embedding_failure_propagates() {
    let err = score(&docs(&["post"]), &BDI2_ITEMS, &FailingEmbedder, cosine_similarity).unwrap_err();
    match err {
        ScoringError::Embedding(EmbeddingError::Inference(msg)) => assert_eq!(msg, "model offline"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn non_finite_similarity_fails_instead_of_grading_zero() {
    let embedder = TableEmbedder::new(vec![1.0, 0.0]);
    let err = score(&docs(&["post"]), &BDI2_ITEMS, &embedder, |_: &Embedding, _: &Embedding| {
        f32::NAN
    })
    .unwrap_err();

    match err {
        ScoringError::Embedding(EmbeddingError::Inference(msg)) => {
            assert!(msg.contains(BDI2_ITEMS[0].name), "{msg}")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn single_non_finite_option_also_fails() {
    let item = QuestionnaireItem {
        name: "Only item",
        options: ["a", "b", "c", "d"],
    };
    let embedder = TableEmbedder::new(vec![1.0, 0.0]).with("c", vec![0.0, 0.0]);

    // A zero vector yields NaN under a plain dot-over-norms similarity.
    let naive = |a: &Embedding, b: &Embedding| {
        let dot: f32 = a.as_slice().iter().zip(b.as_slice()).map(|(x, y)| x * y).sum();
        dot / (a.l2_norm() * b.l2_norm())
    };
    let err = score(&docs(&["doc"]), &[item], &embedder, naive).unwrap_err();
    assert!(matches!(err, ScoringError::Embedding(EmbeddingError::Inference(_))));
}

#[test]
fn assessment_json_reads_back() {
    let result = score(&docs(&["first post", "second post"]), &BDI2_ITEMS, &HashEmbedder, cosine_similarity).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains("null"), "{json}");

    let decoded: AssessmentResult = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.total, result.total);
    assert_eq!(decoded.severity_band, result.severity_band);
    let grades = |r: &AssessmentResult| r.breakdown.iter().map(|s| s.grade).collect::<Vec<_>>();
    assert_eq!(grades(&decoded), grades(&result));
}

#[test]
fn mismatched_dimensions_are_reported() {
    let embedder = TableEmbedder::new(vec![1.0, 0.0, 0.0]).with("post", vec![1.0, 0.0]);
    let err = score(&docs(&["post"]), &BDI2_ITEMS, &embedder, cosine_similarity).unwrap_err();
    assert!(matches!(
        err,
        ScoringError::Embedding(EmbeddingError::DimensionMismatch { expected: 2, actual: 3 })
    ));
}

#[test]
fn documents_are_embedded_once_per_run() {
    let embedder = TableEmbedder::new(vec![1.0, 0.0]);
    let documents = docs(&["one", "two", "three"]);
    score(&documents, &BDI2_ITEMS, &embedder, cosine_similarity).unwrap();

    let option_calls = BDI2_ITEMS.len() * 4;
    assert_eq!(embedder.calls.load(Ordering::SeqCst), documents.len() + option_calls);
}

#[test]
fn totals_stay_in_range_and_breakdown_follows_item_order() {
    let sets = [
        docs(&["I feel fine today"]),
        docs(&["nothing matters", "can't sleep", "so tired all the time"]),
        docs(&["a", "b", "c", "d", "e", "f", "g"]),
    ];

    for documents in &sets {
        let result = score(documents, &BDI2_ITEMS, &HashEmbedder, cosine_similarity).unwrap();
        assert!(result.total <= 63);
        assert_eq!(result.breakdown.len(), BDI2_ITEMS.len());
        for (entry, item) in result.breakdown.iter().zip(&BDI2_ITEMS) {
            assert_eq!(entry.item_name, item.name);
            assert!(entry.grade <= 3);
        }
        assert_eq!(result.total, result.breakdown.iter().map(|s| s.grade).sum::<u32>());
        assert_eq!(result.severity_band, SeverityBand::from_total(result.total));
    }
}

#[test]
fn scoring_is_repeatable() {
    let documents = docs(&["first post", "second post"]);
    let a = score(&documents, &BDI2_ITEMS, &HashEmbedder, cosine_similarity).unwrap();
    let b = score(&documents, &BDI2_ITEMS, &HashEmbedder, cosine_similarity).unwrap();
    assert_eq!(a, b);
}

#[test]
fn instrument_trait_scores_with_injected_similarity() {
    let instrument = get_instrument("bdi2").unwrap();
    let result = instrument
        .score(&docs(&["post"]), &HashEmbedder, &|_: &Embedding, b: &Embedding| {
            b.as_slice()[0]
        })
        .unwrap();
    assert!(result.total <= instrument.max_total());
}

#[test]
fn severity_bands_partition_the_score_range() {
    for total in 0..=63u32 {
        let containing: Vec<_> = SeverityBand::ALL
            .iter()
            .filter(|b| {
                let (lo, hi) = b.range();
                (lo..=hi).contains(&total)
            })
            .collect();
        assert_eq!(containing.len(), 1, "total {total}");
        assert_eq!(*containing[0], SeverityBand::from_total(total));
    }
}

#[test]
fn severity_band_boundaries() {
    assert_eq!(SeverityBand::from_total(13), SeverityBand::Minimal);
    assert_eq!(SeverityBand::from_total(14), SeverityBand::Mild);
    assert_eq!(SeverityBand::from_total(19), SeverityBand::Mild);
    assert_eq!(SeverityBand::from_total(20), SeverityBand::Moderate);
    assert_eq!(SeverityBand::from_total(28), SeverityBand::Moderate);
    assert_eq!(SeverityBand::from_total(29), SeverityBand::Severe);
    assert_eq!(SeverityBand::from_total(63), SeverityBand::Severe);
}
