//! Error module containing training error types.

mod training_error;

pub use training_error::TrainingError;
