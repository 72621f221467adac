use crate::error::AnalysisError;
use serde::{Deserialize, Deserializer, de};
use std::fmt;

/// Key value the lookup endpoint uses when no image is available.
pub const NO_IMAGE_SENTINEL: &str = "none";

/// Identifier of an image in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey(String);

impl ImageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of the lookup endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub key: Option<String>,
}

impl LookupResponse {
    /// Returns the image key, or `None` when the lookup reported no image.
    pub fn into_key(self) -> Option<ImageKey> {
        self.key
            .filter(|key| !key.is_empty() && key != NO_IMAGE_SENTINEL)
            .map(ImageKey)
    }
}

/// Rectangle in fractions of the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    #[serde(rename = "Left")]
    pub left: f64,
    #[serde(rename = "Top")]
    pub top: f64,
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "Height")]
    pub height: f64,
}

/// One detected occurrence of a label.
///
/// The analysis endpoint emits instances either with a nested `BoundingBox`
/// or shaped as a box themselves. Both are accepted and the shape is decided
/// once while deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "InstanceShape")]
pub enum Instance {
    Nested(BoundingBox),
    Bare(BoundingBox),
}

impl Instance {
    pub fn bounding_box(&self) -> &BoundingBox {
        match self {
            Instance::Nested(bbox) | Instance::Bare(bbox) => bbox,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InstanceShape {
    Nested {
        #[serde(rename = "BoundingBox")]
        bounding_box: BoundingBox,
    },
    Bare(BoundingBox),
}

impl From<InstanceShape> for Instance {
    fn from(shape: InstanceShape) -> Self {
        match shape {
            InstanceShape::Nested { bounding_box } => Instance::Nested(bounding_box),
            InstanceShape::Bare(bbox) => Instance::Bare(bbox),
        }
    }
}

/// A detected category with its confidence and spatial instances.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Label {
    #[serde(rename = "Name")]
    pub name: String,
    /// Confidence in percent. Sent as a decimal string upstream.
    #[serde(rename = "Confidence", deserialize_with = "deserialize_confidence")]
    pub confidence: f64,
    #[serde(rename = "Instances", default)]
    instances: Option<Vec<Instance>>,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f64, instances: Vec<Instance>) -> Self {
        Self {
            name: name.into(),
            confidence,
            instances: Some(instances),
        }
    }

    /// Instances of this label; empty when the payload had none.
    pub fn instances(&self) -> &[Instance] {
        self.instances.as_deref().unwrap_or_default()
    }
}

/// Body of the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "Labels")]
    pub labels: Vec<Label>,
}

impl AnalysisResult {
    /// Validates and converts a raw analysis payload.
    ///
    /// Fails with [`AnalysisError::MalformedResponse`] if `Labels` is missing
    /// or not an array. Entries that do not deserialize are logged and skipped.
    pub fn from_json(value: serde_json::Value) -> Result<Self, AnalysisError> {
        let Some(serde_json::Value::Array(entries)) = value.get("Labels") else {
            return Err(AnalysisError::MalformedResponse(
                "`Labels` is missing or not a sequence".to_string(),
            ));
        };

        let labels = entries
            .iter()
            .filter_map(|entry| match Label::deserialize(entry) {
                Ok(label) => Some(label),
                Err(e) => {
                    let name = entry
                        .get("Name")
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or("<unnamed>");
                    log::warn!("Skipping label {name}: {e}");
                    None
                }
            })
            .collect();

        Ok(Self { labels })
    }

    pub fn instance_count(&self) -> usize {
        self.labels.iter().map(|label| label.instances().len()).sum()
    }
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid confidence value `{text}`"))),
    }
}
