//! Data source trait.

use crate::model::Dataset;
use crate::Result;

/// Supplies the unscaled train and test tables for a sweep.
pub trait DataSource {
    fn load(&self) -> Result<Dataset>;
}
