//! Canny edge detection

use crate::io::error::{Result, invalid_parameter};
use crate::io::figure::{Figure, Panel};
use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;

/// Binary edge map: 255 on edges, 0 elsewhere
///
/// # Errors
///
/// Returns an error if the thresholds are negative or `low > high`
pub fn detect_edges(image: &GrayImage, low: f32, high: f32) -> Result<GrayImage> {
    if !(low.is_finite() && high.is_finite()) || low < 0.0 {
        return Err(invalid_parameter(
            "low_threshold",
            &low,
            &"thresholds must be finite and non-negative",
        ));
    }
    if low > high {
        return Err(invalid_parameter(
            "high_threshold",
            &high,
            &format!("must not be below the low threshold {low}"),
        ));
    }
    Ok(canny(image, low, high))
}

/// Original next to its Canny edge map
///
/// # Errors
///
/// Returns an error if the thresholds are invalid
pub fn edges(image: &DynamicImage, low: f32, high: f32) -> Result<Figure> {
    let edge_map = detect_edges(&image.to_luma8(), low, high)?;
    Ok(Figure::new("Edge Detection")
        .with_panel(Panel::rgb("Original Image", image.to_rgb8()))
        .with_panel(Panel::gray("Edge Detection", &edge_map)))
}
