//! TF-IDF feature extraction from an exported vectorizer artifact.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::NlpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of a fitted TF-IDF vectorizer.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorizerArtifact {
    /// Term to column index.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column.
    pub idf: Vec<f64>,
    /// `null` disables row normalization.
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_lowercase() -> bool {
    true
}

/// Sparse row with a fixed width. Entries are sorted by column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    width: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(c, v)| weights.get(*c).map(|w| w * v))
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    norm: Option<Norm>,
    sublinear_tf: bool,
    ngram_range: (usize, usize),
    lowercase: bool,
}

impl TfidfVectorizer {
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, NlpError> {
        let width = artifact.idf.len();
        if width == 0 {
            return Err(NlpError::Artifact("vectorizer has an empty idf table".to_string()));
        }
        if let Some((term, column)) = artifact.vocabulary.iter().find(|(_, c)| **c >= width) {
            return Err(NlpError::Artifact(format!(
                "term '{term}' maps to column {column} but idf has {width} entries"
            )));
        }
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(NlpError::Artifact(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            norm: artifact.norm,
            sublinear_tf: artifact.sublinear_tf,
            ngram_range: artifact.ngram_range,
            lowercase: artifact.lowercase,
        })
    }

    pub fn load(path: &Path) -> Result<Self, NlpError> {
        let contents = std::fs::read_to_string(path).map_err(|source| NlpError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: VectorizerArtifact = serde_json::from_str(&contents)?;
        let vectorizer = Self::from_artifact(artifact)?;
        tracing::info!(
            path = %path.display(),
            width = vectorizer.width(),
            "vectorizer loaded"
        );
        Ok(vectorizer)
    }

    pub fn width(&self) -> usize {
        self.idf.len()
    }

    /// Map a (normalized) document to its TF-IDF row.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.terms(text) {
            if let Some(column) = self.vocabulary.get(&term) {
                *counts.entry(*column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (column, tf * self.idf[column])
            })
            .collect();
        entries.sort_by_key(|(column, _)| *column);

        let scale = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if scale > 0.0 {
            for (_, v) in &mut entries {
                *v /= scale;
            }
        }

        FeatureVector {
            width: self.width(),
            entries,
        }
    }

    fn terms(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let words = word_tokens(&text);

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            terms.extend(words.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}

/// Runs of two or more word characters (letters, digits, underscore).
pub fn word_tokens(text: &str) -> Vec<&str> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    text.split(|c: char| !is_word(c))
        .filter(|w| w.chars().count() >= 2)
        .collect()
}
