use crate::model::{AnalysisResult, BoundingBox};

/// Vertical gap between a caption and the top edge of its box.
pub const CAPTION_OFFSET_PX: f64 = 20.0;

/// Rendered size of the displayed image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Rectangle in pixels, relative to the image's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Scales the fractional box to the rendered image size.
    pub fn to_pixels(&self, size: ImageSize) -> PixelRect {
        PixelRect {
            x: self.left * size.width,
            y: self.top * size.height,
            width: self.width * size.width,
            height: self.height * size.height,
        }
    }
}

/// An element drawn on top of the image.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayElement {
    /// Translucent rectangle marking one instance.
    Box(PixelRect),
    /// Label name shown just above its box.
    Caption { text: String, left: f64, top: f64 },
}

impl OverlayElement {
    pub fn is_box(&self) -> bool {
        matches!(self, OverlayElement::Box(_))
    }
}

/// Computes one box and one caption per instance, in label then instance order.
///
/// Labels without instances contribute nothing.
pub fn layout_overlays(result: &AnalysisResult, size: ImageSize) -> Vec<OverlayElement> {
    let mut elements = Vec::with_capacity(result.instance_count() * 2);
    for label in &result.labels {
        for instance in label.instances() {
            let rect = instance.bounding_box().to_pixels(size);
            elements.push(OverlayElement::Box(rect));
            elements.push(OverlayElement::Caption {
                text: label.name.clone(),
                left: rect.x,
                top: rect.y - CAPTION_OFFSET_PX,
            });
        }
    }
    elements
}
