//! Binary classification metrics
//!
//! Positive class is `1`. Ratios with a zero denominator evaluate to `0.0`
//! rather than NaN, so every finished run records four finite numbers.

use classifier_spi::{ClassificationMetrics, ClassifierError, Result};

struct Confusion {
    tp: usize,
    fp: usize,
    tn: usize,
    fn_: usize,
}

impl Confusion {
    fn count(actual: &[u8], predicted: &[u8]) -> Self {
        let mut c = Confusion {
            tp: 0,
            fp: 0,
            tn: 0,
            fn_: 0,
        };
        for (&a, &p) in actual.iter().zip(predicted) {
            match (a == 1, p == 1) {
                (true, true) => c.tp += 1,
                (false, true) => c.fp += 1,
                (false, false) => c.tn += 1,
                (true, false) => c.fn_ += 1,
            }
        }
        c
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Fraction of rows predicted correctly.
///
/// # Example
///
/// ```rust
/// use classifier_core::metrics::accuracy;
///
/// assert_eq!(accuracy(&[0, 1, 1, 0], &[0, 1, 0, 0]), 0.75);
/// ```
pub fn accuracy(actual: &[u8], predicted: &[u8]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let c = Confusion::count(actual, predicted);
    ratio(c.tp + c.tn, actual.len())
}

/// `tp / (tp + fp)`
pub fn precision(actual: &[u8], predicted: &[u8]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let c = Confusion::count(actual, predicted);
    ratio(c.tp, c.tp + c.fp)
}

/// `tp / (tp + fn)`
pub fn recall(actual: &[u8], predicted: &[u8]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let c = Confusion::count(actual, predicted);
    ratio(c.tp, c.tp + c.fn_)
}

/// Harmonic mean of precision and recall, `2tp / (2tp + fp + fn)`.
pub fn f1_score(actual: &[u8], predicted: &[u8]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let c = Confusion::count(actual, predicted);
    ratio(2 * c.tp, 2 * c.tp + c.fp + c.fn_)
}

/// All four metrics, or an error when the inputs cannot be compared.
pub fn evaluate(actual: &[u8], predicted: &[u8]) -> Result<ClassificationMetrics> {
    if actual.len() != predicted.len() {
        return Err(ClassifierError::DimensionMismatch {
            rows: predicted.len(),
            labels: actual.len(),
        });
    }
    if actual.is_empty() {
        return Err(ClassifierError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    Ok(ClassificationMetrics {
        accuracy: accuracy(actual, predicted),
        precision: precision(actual, predicted),
        recall: recall(actual, predicted),
        f1_score: f1_score(actual, predicted),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_confusion() {
        // tp=2 fp=1 tn=3 fn=2
        let actual = [1, 1, 1, 1, 0, 0, 0, 0];
        let predicted = [1, 1, 0, 0, 1, 0, 0, 0];
        let m = evaluate(&actual, &predicted).unwrap();
        assert!((m.accuracy - 5.0 / 8.0).abs() < 1e-12);
        assert!((m.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.recall - 0.5).abs() < 1e-12);
        assert!((m.f1_score - 4.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_positive_predictions_is_zero() {
        let m = evaluate(&[1, 0, 0], &[0, 0, 0]).unwrap();
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1_score, 0.0);
        assert!((m.accuracy - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect() {
        let m = evaluate(&[0, 1, 1], &[0, 1, 1]).unwrap();
        assert_eq!(m.accuracy, 1.0);
        assert_eq!(m.f1_score, 1.0);
    }

    #[test]
    fn test_mismatch() {
        assert!(accuracy(&[1], &[1, 0]).is_nan());
        assert!(matches!(
            evaluate(&[1], &[1, 0]),
            Err(ClassifierError::DimensionMismatch { .. })
        ));
        assert!(evaluate(&[], &[]).is_err());
    }
}
