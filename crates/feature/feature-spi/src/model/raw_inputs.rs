//! Raw loan inputs.

use serde::{Deserialize, Serialize};

use super::RAW_FEATURE_COUNT;

/// The six raw quantities describing one borrower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    pub credit_lines_outstanding: f64,
    pub loan_amt_outstanding: f64,
    pub total_debt_outstanding: f64,
    pub income: f64,
    pub years_employed: f64,
    pub fico_score: f64,
}

impl RawInputs {
    /// Values in [`super::RAW_FEATURE_NAMES`] order.
    pub fn as_array(&self) -> [f64; RAW_FEATURE_COUNT] {
        [
            self.credit_lines_outstanding,
            self.loan_amt_outstanding,
            self.total_debt_outstanding,
            self.income,
            self.years_employed,
            self.fico_score,
        ]
    }

    /// Inverse of [`RawInputs::as_array`].
    pub fn from_array(values: [f64; RAW_FEATURE_COUNT]) -> Self {
        Self {
            credit_lines_outstanding: values[0],
            loan_amt_outstanding: values[1],
            total_debt_outstanding: values[2],
            income: values[3],
            years_employed: values[4],
            fico_score: values[5],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_order() {
        let raw = RawInputs::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(raw.income, 4.0);
        assert_eq!(raw.fico_score, 6.0);
        assert_eq!(raw.as_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
