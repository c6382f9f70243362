//! Sentiment command implementation.

use crate::cmd::{OutputFormat, banner, print_json};
use crate::data;
use anyhow::Result;
use augury::insight::{SentimentAnalyzer, SentimentLabel};
use std::path::Path;

const fn label_name(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "Positive",
        SentimentLabel::Neutral => "Neutral",
        SentimentLabel::Negative => "Negative",
    }
}

/// Aggregate entity sentiment over the articles in a news file.
pub(crate) fn show_sentiment(news_path: &Path, format: OutputFormat) -> Result<()> {
    let articles = data::load_news(news_path)?;
    let report = SentimentAnalyzer::default().analyze(&articles);

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            banner("News Sentiment");

            println!(
                "Overall: {} ({:+.3}) from {} of {} articles",
                label_name(report.label),
                report.score,
                report.articles.len(),
                articles.len()
            );
            println!();

            for article in &report.articles {
                println!(
                    "  {:>8}  {:+.3}  {}",
                    label_name(article.label),
                    article.sentiment,
                    article.title
                );
                if let Some(ref url) = article.url {
                    println!("                    {}", url);
                }
            }
            println!();
        }
    }

    Ok(())
}
