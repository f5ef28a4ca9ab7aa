//! Per-pixel color and intensity transforms

use crate::io::error::{Result, invalid_parameter};
use crate::io::figure::{Figure, Panel, histogram_chart};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::contrast::equalize_histogram;
use imageproc::map::map_colors;
use num_traits::clamp;

/// Original next to its grayscale conversion
pub fn grayscale(image: &DynamicImage) -> Figure {
    Figure::new("Grayscale")
        .with_panel(Panel::rgb("Original Image", image.to_rgb8()))
        .with_panel(Panel::gray("Grayscale Image", &image.to_luma8()))
}

/// Reverse the channel order, turning RGB into BGR and back
pub fn swap_channels(image: &RgbImage) -> RgbImage {
    map_colors(image, |Rgb([r, g, b])| Rgb([b, g, r]))
}

/// Decoded colors next to the same bytes read in BGR order
pub fn channel_swap(image: &DynamicImage) -> Figure {
    let rgb = image.to_rgb8();
    let bgr = swap_channels(&rgb);
    Figure::new("Channel order")
        .with_panel(Panel::rgb("BGR - Wrong Colors", bgr))
        .with_panel(Panel::rgb("RGB - Correct Colors", rgb))
}

/// Equalize the luma of a color image, keeping its chroma
///
/// With chroma held fixed in YCbCr, a luma change shifts every channel by the
/// same amount, so hues survive up to clipping at 0 and 255.
pub fn equalize_color(image: &RgbImage) -> RgbImage {
    let luma_plane = GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([clamp(luma(*image.get_pixel(x, y)).round(), 0.0, 255.0) as u8])
    });
    let equalized = equalize_histogram(&luma_plane);

    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let pixel = *image.get_pixel(x, y);
        let shift = f32::from(equalized.get_pixel(x, y).0[0]) - luma(pixel);
        let Rgb(channels) = pixel;
        Rgb(channels.map(|c| clamp((f32::from(c) + shift).round(), 0.0, 255.0) as u8))
    })
}

/// Grayscale and color images before and after histogram equalization,
/// followed by the grayscale histograms
pub fn equalize(image: &DynamicImage) -> Figure {
    let gray = image.to_luma8();
    let equalized = equalize_histogram(&gray);
    let rgb = image.to_rgb8();
    let equalized_rgb = equalize_color(&rgb);
    let before_chart = histogram_chart(&gray);
    let after_chart = histogram_chart(&equalized);

    Figure::new("Histogram Equalization")
        .with_panel(Panel::gray("Original Image", &gray))
        .with_panel(Panel::gray("Equalized Image", &equalized))
        .with_panel(Panel::rgb("Original Color Image", rgb))
        .with_panel(Panel::rgb("Equalized Color Image", equalized_rgb))
        .with_panel(Panel::rgb("Original histogram and CDF", before_chart))
        .with_panel(Panel::rgb("Equalized histogram and CDF", after_chart))
}

// ITU-R 601-2 luma, the gray level colour saturation is measured against
fn luma(Rgb([r, g, b]): Rgb<u8>) -> f32 {
    (f32::from(r) * 299.0 + f32::from(g) * 587.0 + f32::from(b) * 114.0) / 1000.0
}

/// Scale each pixel's distance from its own gray level by `factor`
///
/// A factor of 1.0 leaves the image unchanged, 0.0 yields grayscale and
/// values above 1.0 saturate colors.
///
/// # Errors
///
/// Returns an error if `factor` is negative or not finite
pub fn enhance_saturation(image: &RgbImage, factor: f32) -> Result<RgbImage> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(invalid_parameter(
            "factor",
            &factor,
            &"enhancement factor must be a finite non-negative number",
        ));
    }

    Ok(map_colors(image, |pixel| {
        let gray = luma(pixel);
        let Rgb(channels) = pixel;
        Rgb(channels.map(|c| {
            let value = gray + factor * (f32::from(c) - gray);
            clamp(value.round(), 0.0, 255.0) as u8
        }))
    }))
}

/// Original next to its color-enhanced version
///
/// # Errors
///
/// Returns an error if `factor` is invalid
pub fn enhance_color(image: &DynamicImage, factor: f32) -> Result<Figure> {
    let rgb = image.to_rgb8();
    let enhanced = enhance_saturation(&rgb, factor)?;
    Ok(Figure::new("Color enhancement")
        .with_panel(Panel::rgb("Original Image", rgb))
        .with_panel(Panel::rgb(
            format!("Color Enhanced Image (Factor {factor:.1})"),
            enhanced,
        )))
}
