//! Band arithmetic

use super::types::RubricScores;

/// Overall band from the four sub-scores
///
/// The mean is rounded to a half band: a fractional part below 0.25 rounds
/// down, 0.75 and above rounds up, anything between lands on `.5`.
pub fn overall_band(scores: &RubricScores) -> f64 {
    let values = scores.as_array();
    let average = values.iter().sum::<f64>() / values.len() as f64;
    round_to_band(average)
}

pub(crate) fn round_to_band(average: f64) -> f64 {
    let whole = average.floor();
    let fraction = average - whole;

    if fraction < 0.25 {
        whole
    } else if fraction >= 0.75 {
        average.ceil()
    } else {
        whole + 0.5
    }
}

/// Whitespace-delimited token count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
