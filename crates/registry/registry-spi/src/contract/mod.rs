//! Contract module containing registry traits.

mod run_selector;

pub use run_selector::RunSelector;
