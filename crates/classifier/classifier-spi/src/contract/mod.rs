//! Contract module containing the classifier trait.

mod classifier;

pub use classifier::Classifier;
