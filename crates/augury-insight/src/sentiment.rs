//! News sentiment aggregation.
//!
//! News providers tag each article with the tickers it mentions and a
//! polarity score per ticker in `[-1, 1]`. An article's sentiment is the mean
//! over its tagged entities; the headline figure is the mean over articles.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Title shown for articles the provider sent without one.
const UNTITLED: &str = "No Title";

/// Polarity score for one entity mentioned in an article.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntitySentiment {
    /// Ticker symbol of the entity
    #[serde(default)]
    pub symbol: Option<String>,
    /// Polarity in `[-1, 1]`; absent scores count as neutral
    #[serde(default)]
    pub sentiment_score: f64,
}

/// A news article as delivered by the provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Headline
    #[serde(default)]
    pub title: Option<String>,
    /// Link to the article
    #[serde(default)]
    pub url: Option<String>,
    /// Entities the provider scored in this article
    #[serde(default)]
    pub entities: Vec<EntitySentiment>,
}

/// Coarse sentiment bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Score above the positive threshold
    Positive,
    /// Score between the thresholds
    Neutral,
    /// Score below the negative threshold
    Negative,
}

/// An article with its averaged sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArticle {
    /// Headline
    pub title: String,
    /// Link to the article
    pub url: Option<String>,
    /// Mean entity sentiment
    pub sentiment: f64,
    /// Bucket of `sentiment`
    pub label: SentimentLabel,
}

/// Aggregate sentiment over a batch of articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    /// Mean article sentiment, 0.0 if no article could be scored
    pub score: f64,
    /// Bucket of `score`
    pub label: SentimentLabel,
    /// Articles that carried at least one entity score
    pub articles: Vec<ScoredArticle>,
}

/// Configuration for sentiment labelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Scores strictly above this are positive
    pub positive_threshold: f64,
    /// Scores strictly below this are negative
    pub negative_threshold: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            positive_threshold: 0.05,
            negative_threshold: -0.05,
        }
    }
}

/// Scores and labels news articles.
#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer {
    config: SentimentConfig,
}

impl SentimentAnalyzer {
    /// Create an analyzer with the given thresholds.
    #[must_use]
    pub const fn new(config: SentimentConfig) -> Self {
        Self { config }
    }

    /// Bucket a score.
    pub const fn label(&self, score: f64) -> SentimentLabel {
        if score > self.config.positive_threshold {
            SentimentLabel::Positive
        } else if score < self.config.negative_threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Score a single article, or `None` if the provider tagged no entities.
    pub fn score_article(&self, article: &NewsArticle) -> Option<ScoredArticle> {
        if article.entities.is_empty() {
            return None;
        }

        let sentiment = article
            .entities
            .iter()
            .map(|e| e.sentiment_score)
            .sum::<f64>()
            / article.entities.len() as f64;

        Some(ScoredArticle {
            title: article
                .title
                .clone()
                .unwrap_or_else(|| UNTITLED.to_string()),
            url: article.url.clone(),
            sentiment,
            label: self.label(sentiment),
        })
    }

    /// Score every article and aggregate.
    ///
    /// Articles without entities are skipped and do not dilute the mean.
    pub fn analyze(&self, articles: &[NewsArticle]) -> SentimentReport {
        let scored: Vec<ScoredArticle> = articles
            .iter()
            .filter_map(|article| self.score_article(article))
            .collect();

        let score = if scored.is_empty() {
            0.0
        } else {
            scored.iter().map(|a| a.sentiment).sum::<f64>() / scored.len() as f64
        };

        debug!(
            received = articles.len(),
            scored = scored.len(),
            score,
            "aggregated news sentiment"
        );

        SentimentReport {
            score,
            label: self.label(score),
            articles: scored,
        }
    }
}
