use feature_spi::FeatureVector;

/// Train and test tables in feature-contract column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub x_train: Vec<FeatureVector>,
    pub y_train: Vec<u8>,
    pub x_test: Vec<FeatureVector>,
    pub y_test: Vec<u8>,
}

impl Dataset {
    /// `(train_rows, test_rows)`
    pub fn shape(&self) -> (usize, usize) {
        (self.x_train.len(), self.x_test.len())
    }

    /// Features and labels agree in length and neither split is empty.
    pub fn check(&self) -> Result<(), String> {
        if self.x_train.len() != self.y_train.len() {
            return Err(format!(
                "train split has {} rows but {} labels",
                self.x_train.len(),
                self.y_train.len()
            ));
        }
        if self.x_test.len() != self.y_test.len() {
            return Err(format!(
                "test split has {} rows but {} labels",
                self.x_test.len(),
                self.y_test.len()
            ));
        }
        if self.x_train.is_empty() || self.x_test.is_empty() {
            return Err("train and test splits must both be non-empty".to_string());
        }
        Ok(())
    }
}
