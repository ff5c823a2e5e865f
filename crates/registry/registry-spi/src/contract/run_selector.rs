//! Run selection trait.

use ledger_spi::RunRecord;

use crate::model::Selection;
use crate::Result;

/// Policy choosing one run out of the ledger.
///
/// Implementations are pure: the same records in the same order always
/// yield the same selection.
pub trait RunSelector {
    fn select(&self, records: &[RunRecord]) -> Result<Selection>;
}
