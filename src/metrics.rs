//! Evaluation metrics.

/// Round half away from zero to `digits` decimal places.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Percentage of predictions that match the ground truth, rounded to two
/// decimals.
///
/// Pairs whose ground truth is unknown are skipped. Returns `None` when no
/// pair can be compared.
///
/// # Examples
///
/// ```
/// use textclass::metrics::accuracy;
///
/// let truth = [Some("x"), Some("x"), Some("x")];
/// let predictions = ["x", "y", "x"];
/// assert_eq!(accuracy(&truth, &predictions), Some(66.67));
/// ```
pub fn accuracy<T: AsRef<str>, P: AsRef<str>>(truth: &[Option<T>], predictions: &[P]) -> Option<f64> {
    let mut compared = 0usize;
    let mut correct = 0usize;

    for (actual, predicted) in truth.iter().zip(predictions.iter()) {
        if let Some(actual) = actual {
            compared += 1;
            if actual.as_ref() == predicted.as_ref() {
                correct += 1;
            }
        }
    }

    if compared == 0 {
        return None;
    }
    Some(round_to(correct as f64 / compared as f64 * 100.0, 2))
}
