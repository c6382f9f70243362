//! Outlook command implementation.

use crate::cmd::{OutputFormat, banner, print_json};
use crate::data;
use anyhow::Result;
use augury::insight::{ForecastOutlook, Trend};
use std::path::Path;

/// Show the final forecast point against the last close.
pub(crate) fn show_outlook(
    history_path: &Path,
    forecast_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let history = data::load_history(history_path)?;
    let forecast = data::load_forecast(forecast_path)?;
    let outlook = ForecastOutlook::from_series(&forecast, &history)?;

    match format {
        OutputFormat::Json => print_json(&outlook)?,
        OutputFormat::Text => {
            banner("Forecast Outlook");

            let arrow = match outlook.trend {
                Trend::Up => "UP",
                Trend::Down => "DOWN",
            };

            println!("Target Date:     {}", outlook.target_date);
            println!("Predicted Close: {:>12.2}", outlook.predicted_close);
            if let (Some(lower), Some(upper)) = (outlook.lower_bound, outlook.upper_bound) {
                println!("Interval:        {:>12.2} - {:.2}", lower, upper);
            }
            println!("Last Close:      {:>12.2}", outlook.last_close);
            println!(
                "Trend:           {:>12}  ({:+.2}%)",
                arrow,
                outlook.expected_change * 100.0
            );
            println!();
        }
    }

    Ok(())
}
