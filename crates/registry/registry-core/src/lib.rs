//! Registry Core
//!
//! Selection and promotion over ledger records:
//! - [`MaxMetricSelector`]: highest metric wins, earliest run on ties
//! - [`ModelPromoter`]: locate a run's artifact and swap it into the slot

mod promoter;
mod selector;

pub use promoter::{ModelPromoter, ARTIFACT_PATTERNS};
pub use selector::MaxMetricSelector;

// Re-export SPI types
pub use registry_spi::{
    Confirmation, LeaderboardRow, PromotionMetadata, PromotionReport, RegistryError, Result,
    RunSelector, Selection, SelectionAnalysis, ServingSlot, DEFAULT_METRIC,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{MaxMetricSelector, ModelPromoter};
    pub use registry_spi::{
        Confirmation, LeaderboardRow, PromotionReport, RegistryError, RunSelector, Selection,
        SelectionAnalysis, ServingSlot, DEFAULT_METRIC,
    };
}
