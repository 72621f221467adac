use crate::{
    model::{AnalysisResult, ImageKey, Label},
    view::AnalysisView,
};

/// Shown instead of the list when the result has no labels. The threshold is
/// applied upstream.
pub const NO_LABELS_PLACEHOLDER: &str = "No prominent labels found (min. confidence 70%).";

/// List entry for a label, e.g. `‣ Dog: 87.67%`.
///
/// Ties round away from zero, so `87.125` shows as `87.13`.
pub fn format_label(label: &Label) -> String {
    let confidence = (label.confidence * 100.0).round() / 100.0;
    format!("‣ {}: {:.2}%", label.name, confidence)
}

/// Writes the current key and rebuilds the label list in result order.
pub fn display_analysis_data<V: AnalysisView + ?Sized>(
    view: &V,
    result: &AnalysisResult,
    key: &ImageKey,
) {
    view.set_image_key_text(&format!("Current image: {key}"));
    view.clear_labels();

    if result.labels.is_empty() {
        view.append_label(NO_LABELS_PLACEHOLDER);
        return;
    }

    for label in &result.labels {
        view.append_label(&format_label(label));
    }
}
