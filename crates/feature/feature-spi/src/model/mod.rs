//! Feature schema: column names, vector layout and raw inputs.

mod raw_inputs;

pub use raw_inputs::RawInputs;

/// Guard added to income before dividing.
pub const EPSILON: f64 = 1e-6;

/// Number of raw inputs accepted from a request or raw table.
pub const RAW_FEATURE_COUNT: usize = 6;

/// Number of columns in the model-ready vector.
pub const FEATURE_COUNT: usize = 8;

/// Raw input names, in vector order.
pub const RAW_FEATURE_NAMES: [&str; RAW_FEATURE_COUNT] = [
    "credit_lines_outstanding",
    "loan_amt_outstanding",
    "total_debt_outstanding",
    "income",
    "years_employed",
    "fico_score",
];

/// Model-ready column names. The first six are the raw inputs unchanged.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "credit_lines_outstanding",
    "loan_amt_outstanding",
    "total_debt_outstanding",
    "income",
    "years_employed",
    "fico_score",
    "debt_to_income_ratio",
    "loan_to_income_ratio",
];

/// One model-ready row.
pub type FeatureVector = [f64; FEATURE_COUNT];
