//! Contract module containing ledger traits.

mod tracking_store;

pub use tracking_store::TrackingStore;
