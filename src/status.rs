use crate::view::AnalysisView;

pub const TRIGGER_BUSY_CAPTION: &str = "Analysis running...";
pub const TRIGGER_IDLE_CAPTION: &str = "Start analysis (automatic)";
pub const FETCHING_PLACEHOLDER: &str = "Fetching data...";

/// Puts the view into the loading or the idle state.
///
/// While loading, `message` goes to the status text and the label list is
/// replaced by a placeholder. Going idle leaves the status text and labels
/// alone; the message is only logged.
pub fn set_status<V: AnalysisView + ?Sized>(view: &V, is_loading: bool, message: &str) {
    if is_loading {
        log::debug!("Status: {message}");
        view.set_trigger(false, TRIGGER_BUSY_CAPTION);
        view.set_loading_indicator(true);
        view.set_status_text(message);
        view.clear_labels();
        view.append_label(FETCHING_PLACEHOLDER);
    } else {
        if !message.is_empty() {
            log::info!("{message}");
        }
        view.set_trigger(true, TRIGGER_IDLE_CAPTION);
        view.set_loading_indicator(false);
    }
}
