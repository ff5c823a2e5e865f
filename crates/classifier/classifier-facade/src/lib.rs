//! Classifier Facade
//!
//! High-level API for the model families. Re-exports all public types
//! from the classifier stack for convenient usage.
//!
//! # Example
//!
//! ```rust
//! use classifier_facade::prelude::*;
//!
//! let x = vec![[0.0; 8], [1.0; 8], [0.1; 8], [0.9; 8]];
//! let y = vec![0, 1, 0, 1];
//! let mut model = ModelConfig::default_for(ModelKind::LogisticRegression).build().unwrap();
//! model.fit(&x, &y).unwrap();
//! let metrics = evaluate(&y, &model.predict(&x).unwrap()).unwrap();
//! assert_eq!(metrics.accuracy, 1.0);
//! ```

// Re-export everything from core (which includes SPI)
pub use classifier_core::*;

// Explicit re-exports for documentation
pub use classifier_core::prelude;
