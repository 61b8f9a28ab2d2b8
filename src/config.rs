//! Run configuration for the ETL pass and the dashboard.

use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_EXTRACTS: [&str; 3] = [
    "daily_sales_data_0.csv",
    "daily_sales_data_1.csv",
    "daily_sales_data_2.csv",
];
pub const DEFAULT_OUTPUT: &str = "formatted_sales_data.csv";
pub const TARGET_PRODUCT: &str = "pink morsel";

/// Inputs and output of one ETL run.
#[derive(Clone, Debug, PartialEq)]
pub struct EtlConfig {
    /// Directory holding the raw extracts.
    pub data_dir: PathBuf,
    /// Extract file names, read in this order.
    pub extracts: Vec<String>,
    /// Consolidated CSV destination.
    pub output: PathBuf,
    /// Product kept by the transform (matched case-insensitively).
    pub product: String,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            extracts: DEFAULT_EXTRACTS.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            product: TARGET_PRODUCT.to_string(),
        }
    }
}

impl EtlConfig {
    /// Full paths of the extracts.
    pub fn extract_paths(&self) -> Vec<PathBuf> {
        self.extracts.iter().map(|f| self.data_dir.join(f)).collect()
    }
}
