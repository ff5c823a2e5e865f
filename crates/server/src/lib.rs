//! # credit-default-server
//!
//! Form server for the promoted credit-default model.
//!
//! Start-up loads the serving slot into a [`ReadyContext`]; if that fails
//! the process exits before binding. The context is never reloaded, so a
//! new promotion takes effect on the next restart.

pub mod config;
pub mod error;
pub mod page;
pub mod ready;
pub mod routes;

pub use config::ServerConfig;
pub use error::ServingError;
pub use ready::{Prediction, ReadyContext};
pub use routes::{router, AppState};
