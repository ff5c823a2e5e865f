//! Error module containing ledger error types.

mod ledger_error;

pub use ledger_error::LedgerError;
