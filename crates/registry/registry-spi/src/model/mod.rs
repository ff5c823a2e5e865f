//! Registry data model.

mod confirmation;
mod promotion;
mod selection;
mod slot;

pub use confirmation::Confirmation;
pub use promotion::{PromotionMetadata, PromotionReport};
pub use selection::{LeaderboardRow, Selection, SelectionAnalysis, DEFAULT_METRIC};
pub use slot::ServingSlot;
