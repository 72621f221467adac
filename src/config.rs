use crate::model::ImageKey;

pub const DEFAULT_LOOKUP_URL: &str = "https://nba2adew5h.execute-api.eu-west-1.amazonaws.com/prod/";
pub const DEFAULT_ANALYSIS_URL: &str =
    "https://nba2adew5h.execute-api.eu-west-1.amazonaws.com/prod/description/";
pub const DEFAULT_ASSET_BASE_URL: &str = "https://converter-input-moil.s3.eu-west-1.amazonaws.com/";

/// The three remote locations the client talks to.
///
/// Per-key URLs are built by plain concatenation of the base and the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Returns `{ "key": ... }` for the most recent image.
    pub lookup_url: String,
    /// Prefix of the analysis endpoint; the image key is appended.
    pub analysis_url: String,
    /// Prefix of the static asset host; the image key is appended.
    pub asset_base_url: String,
}

impl Endpoints {
    pub fn analysis_url_for(&self, key: &ImageKey) -> String {
        format!("{}{}", self.analysis_url, key.as_str())
    }

    pub fn image_url_for(&self, key: &ImageKey) -> String {
        format!("{}{}", self.asset_base_url, key.as_str())
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            analysis_url: DEFAULT_ANALYSIS_URL.to_string(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
        }
    }
}
