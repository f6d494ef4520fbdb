use serde::{Deserialize, Serialize};

pub const PORTRAIT_UNCANNY: &str = "portrait_uncanny";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub path: String,
    pub extension: String,
}

impl Thumbnail {
    /// Image URL for a named size variant, e.g. `portrait_uncanny`.
    pub fn url(&self, variant: &str) -> String {
        format!("{}/{}.{}", self.path.trim_end_matches('/'), variant, self.extension)
    }
}
