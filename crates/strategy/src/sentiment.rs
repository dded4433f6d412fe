//! Lexicon-based sentiment scoring for news text.
//!
//! Compound scores come from the VADER analyzer: word valences from its full
//! lexicon, booster and dampener words, negation within a three-word window,
//! ALL-CAPS emphasis, contrastive "but", idioms, and punctuation emphasis,
//! normalized into [-1, 1].

use common::Article;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound polarity scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Compound score in [-1, 1]; 0.0 for text with no lexicon hits.
    pub fn compound(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let vader = SentimentIntensityAnalyzer::new();
        let scores = vader.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }
}

/// Mean compound score over articles that have any text; 0.0 when none do.
pub fn sentiment_score(analyzer: &SentimentAnalyzer, articles: &[Article]) -> f64 {
    let scores: Vec<f64> = articles
        .iter()
        .filter_map(Article::text)
        .map(|text| analyzer.compound(&text))
        .collect();

    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}
