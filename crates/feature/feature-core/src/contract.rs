//! The feature contract
//!
//! Every feature vector in the system, whether it becomes a row of
//! `X_train.csv` or is rebuilt from a single form submission, goes through
//! [`FeatureContract::build`]. There is no second copy of the ratio
//! formulas anywhere in the workspace.

use feature_spi::{
    FeatureError, FeatureTransform, FeatureVector, RawInputs, Result, EPSILON, FEATURE_NAMES,
    RAW_FEATURE_NAMES,
};

/// Deterministic transform from the six raw inputs to the 8-column vector.
///
/// # Example
///
/// ```rust
/// use feature_core::{FeatureContract, FeatureTransform, RawInputs};
///
/// let raw = RawInputs {
///     credit_lines_outstanding: 2.0,
///     loan_amt_outstanding: 4000.0,
///     total_debt_outstanding: 9000.0,
///     income: 60000.0,
///     years_employed: 4.0,
///     fico_score: 640.0,
/// };
/// let v = FeatureContract.build(&raw);
/// assert_eq!(v[6], 9000.0 / (60000.0 + 1e-6));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureContract;

impl FeatureContract {
    pub fn new() -> Self {
        Self
    }

    /// Parse one raw field. Missing, blank, non-numeric and non-finite
    /// values are rejected with the field's name.
    pub fn parse_field(name: &str, value: Option<&str>) -> Result<f64> {
        let raw = value.ok_or_else(|| FeatureError::invalid(name, "field is missing"))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FeatureError::invalid(name, "field is empty"));
        }
        let parsed: f64 = trimmed
            .parse()
            .map_err(|_| FeatureError::invalid(name, format!("'{}' is not a number", trimmed)))?;
        if !parsed.is_finite() {
            return Err(FeatureError::invalid(name, "must be a finite number"));
        }
        Ok(parsed)
    }

    /// Parse all six raw inputs through a name lookup.
    pub fn parse_inputs<'a, F>(lookup: F) -> Result<RawInputs>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut values = [0.0; 6];
        for (slot, name) in values.iter_mut().zip(RAW_FEATURE_NAMES.iter()) {
            *slot = Self::parse_field(name, lookup(name))?;
        }
        Ok(RawInputs::from_array(values))
    }

    /// Reject typed inputs holding NaN or infinities.
    pub fn validate(inputs: &RawInputs) -> Result<()> {
        for (value, name) in inputs.as_array().iter().zip(RAW_FEATURE_NAMES.iter()) {
            if !value.is_finite() {
                return Err(FeatureError::invalid(name, "must be a finite number"));
            }
        }
        Ok(())
    }

    /// Build one row per example.
    pub fn build_table(&self, inputs: &[RawInputs]) -> Vec<FeatureVector> {
        inputs.iter().map(|raw| self.build(raw)).collect()
    }

    /// Check that a processed table's header is exactly the contract order.
    pub fn validate_header<S: AsRef<str>>(headers: &[S]) -> Result<()> {
        let matches = headers.len() == FEATURE_NAMES.len()
            && headers
                .iter()
                .zip(FEATURE_NAMES.iter())
                .all(|(h, expected)| h.as_ref().trim() == *expected);
        if matches {
            Ok(())
        } else {
            Err(FeatureError::SchemaMismatch {
                expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                actual: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            })
        }
    }

    fn ratio(numerator: f64, income: f64) -> f64 {
        numerator / (income + EPSILON)
    }
}

impl FeatureTransform for FeatureContract {
    fn build(&self, inputs: &RawInputs) -> FeatureVector {
        [
            inputs.credit_lines_outstanding,
            inputs.loan_amt_outstanding,
            inputs.total_debt_outstanding,
            inputs.income,
            inputs.years_employed,
            inputs.fico_score,
            Self::ratio(inputs.total_debt_outstanding, inputs.income),
            Self::ratio(inputs.loan_amt_outstanding, inputs.income),
        ]
    }

    fn build_from_fields<'a, F>(&self, lookup: F) -> Result<FeatureVector>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let inputs = Self::parse_inputs(lookup)?;
        Ok(self.build(&inputs))
    }

    fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn sample() -> RawInputs {
        RawInputs {
            credit_lines_outstanding: 3.0,
            loan_amt_outstanding: 5221.5,
            total_debt_outstanding: 3915.47,
            income: 78039.39,
            years_employed: 5.0,
            fico_score: 605.0,
        }
    }

    fn fields(raw: &RawInputs) -> HashMap<String, String> {
        RAW_FEATURE_NAMES
            .iter()
            .zip(raw.as_array().iter())
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_order_and_raw_passthrough() {
        let raw = sample();
        let v = FeatureContract.build(&raw);
        assert_eq!(&v[..6], &raw.as_array());
    }

    #[test]
    fn test_ratio_formulas() {
        let raw = sample();
        let v = FeatureContract.build(&raw);
        assert_eq!(v[6], raw.total_debt_outstanding / (raw.income + 1e-6));
        assert_eq!(v[7], raw.loan_amt_outstanding / (raw.income + 1e-6));
    }

    #[test]
    fn test_zero_income_is_not_a_division_error() {
        let raw = RawInputs {
            income: 0.0,
            total_debt_outstanding: 500.0,
            ..sample()
        };
        let v = FeatureContract.build(&raw);
        assert!(v[6].is_finite());
        assert_eq!(v[6], 500.0 / 1e-6);
        assert!((v[6] - 5e8).abs() / 5e8 < 1e-12);
    }

    #[test]
    fn test_fields_match_typed_build() {
        let raw = sample();
        let map = fields(&raw);
        let from_fields = FeatureContract
            .build_from_fields(|name| map.get(name).map(String::as_str))
            .unwrap();
        assert_eq!(from_fields, FeatureContract.build(&raw));
    }

    #[test]
    fn test_missing_field_named() {
        let mut map = fields(&sample());
        map.remove("fico_score");
        let err = FeatureContract
            .build_from_fields(|name| map.get(name).map(String::as_str))
            .unwrap_err();
        assert_eq!(err.field(), Some("fico_score"));
    }

    #[test]
    fn test_non_numeric_field_named() {
        let mut map = fields(&sample());
        map.insert("income".to_string(), "lots".to_string());
        let err = FeatureContract
            .build_from_fields(|name| map.get(name).map(String::as_str))
            .unwrap_err();
        assert_eq!(err.field(), Some("income"));
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(FeatureContract::parse_field("income", Some("NaN")).is_err());
        assert!(FeatureContract::parse_field("income", Some("inf")).is_err());
        assert!(FeatureContract::parse_field("income", Some("   ")).is_err());
        assert_eq!(
            FeatureContract::parse_field("income", Some(" 42.5 ")).unwrap(),
            42.5
        );
    }

    #[test]
    fn test_validate_typed_inputs() {
        let bad = RawInputs {
            years_employed: f64::NAN,
            ..sample()
        };
        let err = FeatureContract::validate(&bad).unwrap_err();
        assert_eq!(err.field(), Some("years_employed"));
        assert!(FeatureContract::validate(&sample()).is_ok());
    }

    #[test]
    fn test_validate_header() {
        assert!(FeatureContract::validate_header(&FEATURE_NAMES).is_ok());

        let mut swapped: Vec<&str> = FEATURE_NAMES.to_vec();
        swapped.swap(6, 7);
        assert!(matches!(
            FeatureContract::validate_header(&swapped),
            Err(FeatureError::SchemaMismatch { .. })
        ));

        assert!(FeatureContract::validate_header(&FEATURE_NAMES[..6]).is_err());
    }

    #[test]
    fn test_build_table_rows() {
        let rows = FeatureContract.build_table(&[sample(), sample()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], rows[1]);
    }

    proptest! {
        #[test]
        fn prop_contract_formulas_hold(
            credit_lines in 0.0f64..10.0,
            loan_amt in 0.0f64..1e6,
            total_debt in 0.0f64..1e6,
            income in 0.0f64..1e7,
            years in 0.0f64..50.0,
            fico in 300.0f64..850.0,
        ) {
            let raw = RawInputs {
                credit_lines_outstanding: credit_lines,
                loan_amt_outstanding: loan_amt,
                total_debt_outstanding: total_debt,
                income,
                years_employed: years,
                fico_score: fico,
            };
            let v = FeatureContract.build(&raw);
            prop_assert_eq!(&v[..6], &raw.as_array()[..]);
            prop_assert_eq!(v[6], total_debt / (income + 1e-6));
            prop_assert_eq!(v[7], loan_amt / (income + 1e-6));
        }

        #[test]
        fn prop_string_round_trip_is_bit_identical(
            loan_amt in 0.0f64..1e6,
            total_debt in 0.0f64..1e6,
            income in 0.0f64..1e7,
        ) {
            let raw = RawInputs {
                loan_amt_outstanding: loan_amt,
                total_debt_outstanding: total_debt,
                income,
                ..sample()
            };
            let map = fields(&raw);
            let rebuilt = FeatureContract
                .build_from_fields(|name| map.get(name).map(String::as_str))
                .unwrap();
            let direct = FeatureContract.build(&raw);
            for (a, b) in rebuilt.iter().zip(direct.iter()) {
                prop_assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }
}
