#![allow(dead_code)]

use labelscope::{
    AnalysisError, AnalysisResult, AnalysisSource, AnalysisView, ImageKey, ImageLoad, ImageSize,
    OverlayElement,
};
use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Everything a user could see on the page.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    pub trigger_enabled: bool,
    pub trigger_caption: String,
    pub loading: bool,
    pub status_text: String,
    pub image_key_text: String,
    pub labels: Vec<String>,
    pub image_source: Option<String>,
    pub overlays: Vec<OverlayElement>,
    pub notices: Vec<String>,
}

impl Screen {
    pub fn box_count(&self) -> usize {
        self.overlays.iter().filter(|e| e.is_box()).count()
    }
}

enum ImageBehaviour {
    Cached(ImageSize),
    Manual,
    Broken(String),
}

/// View double that records what it is told to display.
pub struct RecordingView {
    screen: Mutex<Screen>,
    behaviour: ImageBehaviour,
    image: Mutex<ImageLoad>,
}

impl RecordingView {
    /// Images load instantly at `width` x `height`.
    pub fn cached(width: f64, height: f64) -> Self {
        Self::with_behaviour(ImageBehaviour::Cached(ImageSize::new(width, height)))
    }

    /// Images stay pending until the test resolves [`RecordingView::image_load`].
    pub fn manual() -> Self {
        Self::with_behaviour(ImageBehaviour::Manual)
    }

    /// Images always fail to load.
    pub fn broken(reason: &str) -> Self {
        Self::with_behaviour(ImageBehaviour::Broken(reason.to_string()))
    }

    fn with_behaviour(behaviour: ImageBehaviour) -> Self {
        Self {
            screen: Mutex::new(Screen::default()),
            behaviour,
            image: Mutex::new(ImageLoad::new()),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen.lock().unwrap().clone()
    }

    pub fn image_load(&self) -> ImageLoad {
        self.image.lock().unwrap().clone()
    }

    fn update(&self, f: impl FnOnce(&mut Screen)) {
        f(&mut self.screen.lock().unwrap());
    }
}

impl AnalysisView for RecordingView {
    fn set_trigger(&self, enabled: bool, caption: &str) {
        self.update(|s| {
            s.trigger_enabled = enabled;
            s.trigger_caption = caption.to_string();
        });
    }

    fn set_loading_indicator(&self, visible: bool) {
        self.update(|s| s.loading = visible);
    }

    fn set_status_text(&self, text: &str) {
        self.update(|s| s.status_text = text.to_string());
    }

    fn set_image_key_text(&self, text: &str) {
        self.update(|s| s.image_key_text = text.to_string());
    }

    fn clear_labels(&self) {
        self.update(|s| s.labels.clear());
    }

    fn append_label(&self, text: &str) {
        self.update(|s| s.labels.push(text.to_string()));
    }

    fn set_image_source(&self, url: &str) {
        self.update(|s| s.image_source = Some(url.to_string()));

        let load = ImageLoad::new();
        match &self.behaviour {
            ImageBehaviour::Cached(size) => {
                load.resolve(*size);
            }
            ImageBehaviour::Broken(reason) => {
                load.fail(reason.clone());
            }
            ImageBehaviour::Manual => {}
        }
        *self.image.lock().unwrap() = load;
    }

    async fn wait_for_image(&self) -> Result<ImageSize, AnalysisError> {
        let load = self.image_load();
        load.wait().await
    }

    fn remove_overlays(&self) {
        self.update(|s| s.overlays.clear());
    }

    fn append_overlay(&self, element: &OverlayElement) {
        self.update(|s| s.overlays.push(element.clone()));
    }

    fn notify(&self, message: &str) {
        self.update(|s| s.notices.push(message.to_string()));
    }
}

/// In-memory source serving one key and a queue of analysis payloads.
pub struct StubSource {
    key: Result<Option<String>, u16>,
    responses: Mutex<VecDeque<Result<serde_json::Value, u16>>>,
    analysis_calls: AtomicUsize,
}

impl StubSource {
    pub fn with_key(key: &str) -> Self {
        Self::new(Ok(Some(key.to_string())))
    }

    /// Lookup answers with the `"none"` sentinel.
    pub fn without_image() -> Self {
        Self::new(Ok(None))
    }

    pub fn failing_lookup(status: u16) -> Self {
        Self::new(Err(status))
    }

    fn new(key: Result<Option<String>, u16>) -> Self {
        Self {
            key,
            responses: Mutex::new(VecDeque::new()),
            analysis_calls: AtomicUsize::new(0),
        }
    }

    pub fn then_payload(self, payload: serde_json::Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(payload));
        self
    }

    pub fn then_status(self, status: u16) -> Self {
        self.responses.lock().unwrap().push_back(Err(status));
        self
    }

    pub fn analysis_calls(&self) -> usize {
        self.analysis_calls.load(Ordering::SeqCst)
    }
}

impl AnalysisSource for StubSource {
    async fn latest_key(&self) -> Result<Option<ImageKey>, AnalysisError> {
        match &self.key {
            Ok(key) => Ok(labelscope::LookupResponse {
                key: Some(key.clone().unwrap_or_else(|| "none".to_string())),
            }
            .into_key()),
            Err(status) => Err(AnalysisError::Lookup { status: *status }),
        }
    }

    async fn analysis(&self, _key: &ImageKey) -> Result<AnalysisResult, AnalysisError> {
        self.analysis_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(payload)) => AnalysisResult::from_json(payload),
            Some(Err(status)) => Err(AnalysisError::Fetch {
                status,
                status_text: "Stubbed".to_string(),
            }),
            None => Err(AnalysisError::Fetch {
                status: 404,
                status_text: "Not Found".to_string(),
            }),
        }
    }

    fn image_url(&self, key: &ImageKey) -> String {
        format!("memory://{key}")
    }
}

/// Three labels with three instances in both accepted shapes; one label has none.
pub fn sample_payload() -> serde_json::Value {
    serde_json::json!({
        "Labels": [
            {
                "Name": "Dog",
                "Confidence": "87.666",
                "Instances": [
                    {
                        "BoundingBox": { "Left": 0.1, "Top": 0.2, "Width": 0.3, "Height": 0.4 },
                        "Confidence": "85.1"
                    },
                    { "Left": 0.5, "Top": 0.5, "Width": 0.25, "Height": 0.25 }
                ]
            },
            { "Name": "Animal", "Confidence": "99.2", "Instances": [] },
            {
                "Name": "Ball",
                "Confidence": "71.004",
                "Instances": [
                    { "BoundingBox": { "Left": 0.0, "Top": 0.0, "Width": 0.1, "Height": 0.1 } }
                ]
            }
        ]
    })
}

/// One label with a single instance.
pub fn single_payload() -> serde_json::Value {
    serde_json::json!({
        "Labels": [{
            "Name": "Cat",
            "Confidence": "90",
            "Instances": [
                { "BoundingBox": { "Left": 0.5, "Top": 0.5, "Width": 0.5, "Height": 0.5 } }
            ]
        }]
    })
}
