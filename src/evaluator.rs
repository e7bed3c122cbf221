use crate::models::{ForecastWindow, RainEvent};

/// Returns the samples among the first `hours_to_check` of the window that meet the threshold
///
/// The comparison is inclusive, so a sample exactly at `threshold_mm` qualifies. Order of the
/// window is kept. An empty result means no rain is expected.
///
/// # Arguments
///
/// * 'window' - forecast samples in chronological order
/// * 'threshold_mm' - minimum precipitation in mm for an hour to count as rain
/// * 'hours_to_check' - number of leading samples to consider
pub fn evaluate(window: &ForecastWindow, threshold_mm: f64, hours_to_check: usize) -> Vec<RainEvent> {
    window.samples
        .iter()
        .take(hours_to_check)
        .filter(|s| s.precipitation_mm >= threshold_mm)
        .map(RainEvent::from)
        .collect()
}
