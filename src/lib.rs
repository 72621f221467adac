//! Client for image label analysis results.
//!
//! [`AnalysisClient`] looks up the most recent image, fetches its label
//! analysis, lists the detected labels and overlays one box and caption per
//! detected instance on the displayed image. The network side is abstracted
//! by [`AnalysisSource`] and the UI by [`AnalysisView`], so the same flow runs
//! against a browser, a terminal or a test double.

pub mod config;
pub mod engine;
pub mod error;
pub mod image_load;
pub mod labels;
pub mod model;
pub mod overlay;
pub mod source;
pub mod status;
pub mod view;

pub use config::Endpoints;
pub use engine::{AnalysisClient, AnalysisOutcome, AnalysisReport, AnalysisState};
pub use error::AnalysisError;
pub use image_load::ImageLoad;
pub use model::{AnalysisResult, BoundingBox, ImageKey, Instance, Label, LookupResponse};
pub use overlay::{ImageSize, OverlayElement, PixelRect, layout_overlays};
pub use source::{AnalysisSource, HttpAnalysisSource};
pub use view::AnalysisView;
