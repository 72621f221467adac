use crate::{error::AnalysisError, overlay::ImageSize, overlay::OverlayElement};

/// The UI surface the analysis client drives.
///
/// Implementations map each call onto their own widgets. A browser view would
/// touch DOM elements, a terminal view prints, and tests record the calls.
/// All methods take `&self`; implementations use interior mutability.
#[allow(async_fn_in_trait)]
pub trait AnalysisView {
    /// Enables or disables the trigger control and sets its caption.
    fn set_trigger(&self, enabled: bool, caption: &str);

    fn set_loading_indicator(&self, visible: bool);

    /// Writes the progress message of the current step.
    fn set_status_text(&self, text: &str);

    /// Writes the "current image" line.
    fn set_image_key_text(&self, text: &str);

    fn clear_labels(&self);

    fn append_label(&self, text: &str);

    /// Points the displayed image at `url`, starting a new load.
    fn set_image_source(&self, url: &str);

    /// Waits until the image set by the last [`AnalysisView::set_image_source`]
    /// has loaded and returns its rendered size.
    ///
    /// Must return immediately when the image is already loaded.
    async fn wait_for_image(&self) -> Result<ImageSize, AnalysisError>;

    /// Removes every overlay element. The image itself stays.
    fn remove_overlays(&self);

    fn append_overlay(&self, element: &OverlayElement);

    /// Shows a blocking notice to the user.
    fn notify(&self, message: &str);
}
