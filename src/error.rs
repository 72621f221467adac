use thiserror::Error;

/// Errors that can end an analysis run.
///
/// An empty lookup result is not an error; it surfaces as
/// [`crate::AnalysisOutcome::NoImage`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The lookup endpoint answered with a non-success status.
    #[error("failed to look up the latest image key (status {status})")]
    Lookup { status: u16 },
    /// The analysis endpoint answered with a non-success status.
    #[error("analysis request failed ({status}): {status_text}")]
    Fetch { status: u16, status_text: String },
    /// The analysis payload does not have the expected shape.
    #[error("analysis data incomplete or malformed: {0}")]
    MalformedResponse(String),
    /// The view could not load the image.
    #[error("image failed to load: {0}")]
    ImageLoad(String),
    /// Transport or body decoding failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
