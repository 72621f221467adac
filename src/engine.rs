use crate::{
    error::AnalysisError,
    labels,
    model::ImageKey,
    overlay::{self, ImageSize},
    source::AnalysisSource,
    status,
    view::AnalysisView,
};
use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

pub const READY_MESSAGE: &str = "Ready.";
pub const LOOKUP_MESSAGE: &str = "1/3: Looking for the latest image...";
pub const SUCCESS_MESSAGE: &str = "Analysis completed successfully.";
pub const FAILURE_MESSAGE: &str = "Analysis failed. Try again.";
pub const NO_IMAGE_NOTICE: &str = "No image could be found in the bucket.";
pub const FAILURE_NOTICE: &str = "The analysis failed. Check the logs for details.";

fn fetching_message(key: &ImageKey) -> String {
    format!("2/3: Fetching analysis for {key}...")
}

/// Where the analysis client is in its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisState {
    /// No run has started yet, or the last one found no image.
    Idle,
    /// Asking the lookup endpoint for the latest image key.
    LookingUpKey,
    /// Fetching the analysis result for the key.
    FetchingAnalysis,
    /// Labels are shown; waiting for the image to load before drawing overlays.
    WaitingForImageLoad,
    /// The last run completed.
    Done,
    /// The last run failed.
    Failed,
}

impl AnalysisState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisState::Idle => "idle",
            AnalysisState::LookingUpKey => "looking_up_key",
            AnalysisState::FetchingAnalysis => "fetching_analysis",
            AnalysisState::WaitingForImageLoad => "waiting_for_image_load",
            AnalysisState::Done => "done",
            AnalysisState::Failed => "failed",
        }
    }

    /// Whether a run is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            AnalysisState::LookingUpKey
                | AnalysisState::FetchingAnalysis
                | AnalysisState::WaitingForImageLoad
        )
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub key: ImageKey,
    pub label_count: usize,
    pub instance_count: usize,
    /// Rendered image size the overlays were computed against.
    pub image_size: ImageSize,
    pub start_time: Instant,
    pub duration: Duration,
}

/// How a call to [`AnalysisClient::start_analysis`] ended.
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// Labels and overlays are displayed.
    Completed(AnalysisReport),
    /// The lookup reported no image; the user was notified.
    NoImage,
    /// Another run was still in flight; nothing was done.
    Busy,
    /// The run failed; the user was notified and the view is idle again.
    Failed(AnalysisError),
}

/// Drives one analysis cycle: look up the latest key, fetch its analysis,
/// list the labels and draw overlays once the image has loaded.
///
/// The source and the view are injected so that both can be replaced, e.g.
/// by test doubles.
pub struct AnalysisClient<S: AnalysisSource, V: AnalysisView> {
    source: S,
    view: V,
    state: Arc<Mutex<AnalysisState>>,
}

impl<S: AnalysisSource, V: AnalysisView> AnalysisClient<S, V> {
    /// Creates the client and puts the view into its idle state.
    pub fn new(source: S, view: V) -> Self {
        status::set_status(&view, false, READY_MESSAGE);
        Self {
            source,
            view,
            state: Arc::new(Mutex::new(AnalysisState::Idle)),
        }
    }

    /// Returns the current state of the client.
    pub fn state(&self) -> AnalysisState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs a full analysis cycle.
    ///
    /// Errors are caught here: they are logged, the user is notified and the
    /// view returns to idle. Calling this while a run is in flight returns
    /// [`AnalysisOutcome::Busy`] without touching the view.
    pub async fn start_analysis(&self) -> AnalysisOutcome {
        if !self.try_begin() {
            log::warn!("Analysis already in progress ({})", self.state().as_str());
            return AnalysisOutcome::Busy;
        }

        status::set_status(&self.view, true, LOOKUP_MESSAGE);

        match self.run().await {
            Ok(Some(report)) => {
                log::info!(
                    "Analysed {} with {} labels and {} instances in {:?}",
                    report.key,
                    report.label_count,
                    report.instance_count,
                    report.duration
                );
                self.set_state(AnalysisState::Done);
                status::set_status(&self.view, false, SUCCESS_MESSAGE);
                AnalysisOutcome::Completed(report)
            }
            Ok(None) => {
                log::warn!("Lookup returned no image");
                self.view.notify(NO_IMAGE_NOTICE);
                self.set_state(AnalysisState::Idle);
                status::set_status(&self.view, false, "");
                AnalysisOutcome::NoImage
            }
            Err(e) => {
                log::error!("Analysis run failed: {e}");
                self.set_state(AnalysisState::Failed);
                status::set_status(&self.view, false, FAILURE_MESSAGE);
                self.view.notify(FAILURE_NOTICE);
                AnalysisOutcome::Failed(e)
            }
        }
    }

    /// Shows the image for `key`, lists its labels and draws one box and one
    /// caption per detected instance.
    ///
    /// Overlays from earlier runs are removed before anything else happens.
    /// The label list is written before waiting for the image, so a failing
    /// image load leaves labels without overlays.
    pub async fn analyze_image(&self, key: &ImageKey) -> Result<AnalysisReport, AnalysisError> {
        let start_time = Instant::now();

        self.view.remove_overlays();
        self.view.set_image_source(&self.source.image_url(key));

        self.set_state(AnalysisState::FetchingAnalysis);
        let result = self.source.analysis(key).await?;

        labels::display_analysis_data(&self.view, &result, key);

        self.set_state(AnalysisState::WaitingForImageLoad);
        log::debug!("Waiting for {key} to load");
        let image_size = self.view.wait_for_image().await?;

        for element in overlay::layout_overlays(&result, image_size) {
            self.view.append_overlay(&element);
        }

        Ok(AnalysisReport {
            key: key.clone(),
            label_count: result.labels.len(),
            instance_count: result.instance_count(),
            image_size,
            start_time,
            duration: start_time.elapsed(),
        })
    }

    async fn run(&self) -> Result<Option<AnalysisReport>, AnalysisError> {
        let Some(key) = self.source.latest_key().await? else {
            return Ok(None);
        };
        log::debug!("Latest image key: {key}");

        status::set_status(&self.view, true, &fetching_message(&key));

        self.analyze_image(&key).await.map(Some)
    }

    fn try_begin(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.is_busy() {
            return false;
        }
        *state = AnalysisState::LookingUpKey;
        true
    }

    fn set_state(&self, next: AnalysisState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        log::debug!("State {} -> {}", state.as_str(), next.as_str());
        *state = next;
    }
}
