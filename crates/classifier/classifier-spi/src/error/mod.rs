//! Error module containing classifier error types.

mod classifier_error;

pub use classifier_error::ClassifierError;
