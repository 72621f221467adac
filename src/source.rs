use crate::{
    config::Endpoints,
    error::AnalysisError,
    model::{AnalysisResult, ImageKey, LookupResponse},
};

/// Where image keys, analysis results and image URLs come from.
#[allow(async_fn_in_trait)]
pub trait AnalysisSource {
    /// Returns the key of the most recent image, or `None` if there is none.
    async fn latest_key(&self) -> Result<Option<ImageKey>, AnalysisError>;

    /// Returns the validated analysis result for `key`.
    async fn analysis(&self, key: &ImageKey) -> Result<AnalysisResult, AnalysisError>;

    /// URL the view should load the image from.
    fn image_url(&self, key: &ImageKey) -> String;
}

/// [`AnalysisSource`] backed by the remote HTTP endpoints.
#[derive(Debug, Clone)]
pub struct HttpAnalysisSource {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpAnalysisSource {
    pub fn new(endpoints: Endpoints) -> Self {
        Self::with_client(reqwest::Client::new(), endpoints)
    }

    pub fn with_client(client: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

impl Default for HttpAnalysisSource {
    fn default() -> Self {
        Self::new(Endpoints::default())
    }
}

impl AnalysisSource for HttpAnalysisSource {
    async fn latest_key(&self) -> Result<Option<ImageKey>, AnalysisError> {
        let response = self.client.get(&self.endpoints.lookup_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Lookup {
                status: status.as_u16(),
            });
        }

        let lookup = response.json::<LookupResponse>().await?;
        Ok(lookup.into_key())
    }

    async fn analysis(&self, key: &ImageKey) -> Result<AnalysisResult, AnalysisError> {
        let url = self.endpoints.analysis_url_for(key);
        log::debug!("Fetching analysis from {url}");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Fetch {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let payload = response.json::<serde_json::Value>().await?;
        AnalysisResult::from_json(payload)
    }

    fn image_url(&self, key: &ImageKey) -> String {
        self.endpoints.image_url_for(key)
    }
}
