use tantivy::tokenizer::{
    Language, LowerCaser, SimpleTokenizer, Stemmer, StopWordFilter, TextAnalyzer, TokenStream,
};

use crate::stopwords;

/// Reduces free text to the space-separated stem string the classifier was
/// trained on: lower-case, alphanumeric tokens only, stopwords dropped,
/// English stemming.
///
/// The same instance backs inference and the `/api/normalize` endpoint used
/// by training jobs, so both sides see identical output.
#[derive(Clone)]
pub struct TextNormalizer {
    analyzer: TextAnalyzer,
}

impl TextNormalizer {
    pub fn english() -> Self {
        let stop_words = stopwords::ENGLISH.iter().map(|w| w.to_string());
        let analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(StopWordFilter::remove(stop_words))
            .filter(Stemmer::new(Language::English))
            .build();
        Self { analyzer }
    }

    /// Stems in input order.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        // token_stream takes `&mut self`.
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut stems = Vec::new();
        stream.process(&mut |token| stems.push(token.text.clone()));
        stems
    }

    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::english()
    }
}
