//! Harris corner response and Shi-Tomasi good features

use crate::io::configuration::{
    CORNER_MARKER_RADIUS, HARRIS_BLOCK_SIZE, HARRIS_K, HARRIS_RELATIVE_THRESHOLD, MAX_CORNERS,
    SHI_TOMASI_BLOCK_SIZE, SHI_TOMASI_MIN_DISTANCE, SHI_TOMASI_QUALITY,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::figure::{Figure, Panel};
use bitvec::bitvec;
use bitvec::vec::BitVec;
use image::{DynamicImage, GrayImage, Rgb};
use imageproc::drawing::draw_filled_circle_mut;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use ndarray::{Array2, Axis, Slice};

const HARRIS_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const SHI_TOMASI_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Parameters of both corner detectors
#[derive(Debug, Clone, Copy)]
pub struct CornerSettings {
    /// Side length of the Harris structure tensor window
    pub harris_block_size: usize,
    /// Harris free parameter
    pub k: f32,
    /// Fraction of the peak Harris response a corner must exceed
    pub relative_threshold: f32,
    /// Side length of the Shi-Tomasi structure tensor window
    pub shi_tomasi_block_size: usize,
    /// Fraction of the strongest Shi-Tomasi response a corner must exceed
    pub quality: f32,
    /// Minimum distance between two kept Shi-Tomasi corners
    pub min_distance: f32,
    /// Maximum number of Shi-Tomasi corners kept
    pub max_corners: usize,
}

impl Default for CornerSettings {
    fn default() -> Self {
        Self {
            harris_block_size: HARRIS_BLOCK_SIZE,
            k: HARRIS_K,
            relative_threshold: HARRIS_RELATIVE_THRESHOLD,
            shi_tomasi_block_size: SHI_TOMASI_BLOCK_SIZE,
            quality: SHI_TOMASI_QUALITY,
            min_distance: SHI_TOMASI_MIN_DISTANCE,
            max_corners: MAX_CORNERS,
        }
    }
}

impl CornerSettings {
    fn validate(&self) -> Result<()> {
        if self.harris_block_size == 0 || self.shi_tomasi_block_size == 0 {
            return Err(invalid_parameter(
                "block_size",
                &self.harris_block_size.min(self.shi_tomasi_block_size),
                &"window side length must be at least 1",
            ));
        }
        if !self.k.is_finite() {
            return Err(invalid_parameter("k", &self.k, &"must be finite"));
        }
        if !(0.0..=1.0).contains(&self.relative_threshold) {
            return Err(invalid_parameter(
                "relative_threshold",
                &self.relative_threshold,
                &"must lie between 0.0 and 1.0",
            ));
        }
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(invalid_parameter(
                "quality",
                &self.quality,
                &"must lie between 0.0 and 1.0",
            ));
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(invalid_parameter(
                "min_distance",
                &self.min_distance,
                &"must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// A Shi-Tomasi corner kept after distance suppression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feature {
    /// Column of the corner
    pub x: u32,
    /// Row of the corner
    pub y: u32,
    /// Smaller structure tensor eigenvalue at the corner
    pub score: f32,
}

// Summed-area table with a zero first row and column
fn integral(values: &Array2<f64>) -> Array2<f64> {
    let (rows, cols) = values.dim();
    let mut table = Array2::zeros((rows + 1, cols + 1));
    table
        .slice_axis_mut(Axis(0), Slice::from(1..))
        .slice_axis_mut(Axis(1), Slice::from(1..))
        .assign(values);
    table.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);
    table.accumulate_axis_inplace(Axis(1), |&prev, curr| *curr += prev);
    table
}

fn box_sum(table: &Array2<f64>, (r0, r1): (usize, usize), (c0, c1): (usize, usize)) -> f64 {
    let at = |r: usize, c: usize| table.get((r, c)).copied().unwrap_or(0.0);
    at(r1, c1) - at(r0, c1) - at(r1, c0) + at(r0, c0)
}

/// Apply `response` to the Sobel structure tensor `(Sxx, Syy, Sxy)` of every pixel
///
/// The window has side `block_size`; even sizes extend one pixel further up
/// and left than down and right. Windows are clipped at the image border.
fn tensor_response(
    image: &GrayImage,
    block_size: usize,
    response: impl Fn(f64, f64, f64) -> f64,
) -> Array2<f32> {
    let (width, height) = image.dimensions();
    let (rows, cols) = (height as usize, width as usize);
    let gx = horizontal_sobel(image);
    let gy = vertical_sobel(image);

    // Gradients scaled to roughly unit range
    let grad = |row: usize, col: usize| {
        let x = f64::from(gx.get_pixel(col as u32, row as u32).0[0]) / 255.0;
        let y = f64::from(gy.get_pixel(col as u32, row as u32).0[0]) / 255.0;
        (x, y)
    };
    let sxx = integral(&Array2::from_shape_fn((rows, cols), |(r, c)| {
        grad(r, c).0.powi(2)
    }));
    let syy = integral(&Array2::from_shape_fn((rows, cols), |(r, c)| {
        grad(r, c).1.powi(2)
    }));
    let sxy = integral(&Array2::from_shape_fn((rows, cols), |(r, c)| {
        let (x, y) = grad(r, c);
        x * y
    }));

    let before = block_size / 2;
    let after = block_size - before;
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let row_span = (r.saturating_sub(before), (r + after).min(rows));
        let col_span = (c.saturating_sub(before), (c + after).min(cols));
        response(
            box_sum(&sxx, row_span, col_span),
            box_sum(&syy, row_span, col_span),
            box_sum(&sxy, row_span, col_span),
        ) as f32
    })
}

/// Harris response `det(M) - k * trace(M)^2`, indexed `[row, col]`
///
/// `M` is the Sobel structure tensor summed over a `block_size` square window.
pub fn harris_response(image: &GrayImage, block_size: usize, k: f32) -> Array2<f32> {
    let k = f64::from(k);
    tensor_response(image, block_size, |xx, yy, xy| {
        let trace = xx + yy;
        xx.mul_add(yy, -(xy * xy)) - k * trace * trace
    })
}

/// Smaller eigenvalue of the structure tensor, indexed `[row, col]`
pub fn shi_tomasi_response(image: &GrayImage, block_size: usize) -> Array2<f32> {
    tensor_response(image, block_size, |xx, yy, xy| {
        (xx + yy) / 2.0 - ((xx - yy) / 2.0).hypot(xy)
    })
}

/// Row-major mask of pixels whose response exceeds `relative_threshold * max`
///
/// The mask is empty when no response is positive.
pub fn harris_mask(response: &Array2<f32>, relative_threshold: f32) -> BitVec {
    let mut mask = bitvec![0; response.len()];
    let peak = response.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if peak <= 0.0 {
        return mask;
    }

    let threshold = relative_threshold * peak;
    for (index, &value) in response.iter().enumerate() {
        if value > threshold {
            mask.set(index, true);
        }
    }
    mask
}

fn is_local_max(response: &Array2<f32>, row: usize, col: usize, value: f32) -> bool {
    (row.saturating_sub(1)..=row + 1).all(|r| {
        (col.saturating_sub(1)..=col + 1)
            .all(|c| response.get((r, c)).is_none_or(|&neighbour| neighbour <= value))
    })
}

/// Strongest local maxima of a Shi-Tomasi response, kept greedily
///
/// A candidate must exceed `quality * max` and be a 3x3 local maximum. The
/// strongest candidates are taken first; any candidate closer than
/// `min_distance` to one already kept is dropped. At most `max_corners` are
/// returned, strongest first.
pub fn good_features(
    response: &Array2<f32>,
    quality: f32,
    min_distance: f32,
    max_corners: usize,
) -> Vec<Feature> {
    let peak = response.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if peak <= 0.0 || max_corners == 0 {
        return Vec::new();
    }

    let threshold = quality * peak;
    let mut candidates: Vec<Feature> = response
        .indexed_iter()
        .filter(|&((r, c), &value)| value > threshold && is_local_max(response, r, c, value))
        .map(|((r, c), &score)| Feature {
            x: c as u32,
            y: r as u32,
            score,
        })
        .collect();
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let min_squared = min_distance * min_distance;
    let mut kept: Vec<Feature> = Vec::new();
    for candidate in candidates {
        if kept.len() == max_corners {
            break;
        }
        let isolated = kept.iter().all(|other| {
            let dx = other.x as f32 - candidate.x as f32;
            let dy = other.y as f32 - candidate.y as f32;
            dx.mul_add(dx, dy * dy) >= min_squared
        });
        if isolated {
            kept.push(candidate);
        }
    }
    kept
}

/// Original, Harris corners marked in red, Shi-Tomasi corners circled in green
///
/// # Errors
///
/// Returns an error if a window size is zero, `k` is not finite, a relative
/// threshold is outside `0.0..=1.0` or the minimum distance is negative
pub fn corners(image: &DynamicImage, settings: &CornerSettings) -> Result<Figure> {
    settings.validate()?;

    let rgb = image.to_rgb8();
    let gray = image.to_luma8();
    let width = gray.width() as usize;

    let response = harris_response(&gray, settings.harris_block_size, settings.k);
    let mask = harris_mask(&response, settings.relative_threshold);
    let mut harris = rgb.clone();
    for index in mask.iter_ones() {
        harris.put_pixel((index % width) as u32, (index / width) as u32, HARRIS_COLOR);
    }

    let features = good_features(
        &shi_tomasi_response(&gray, settings.shi_tomasi_block_size),
        settings.quality,
        settings.min_distance,
        settings.max_corners,
    );
    let mut shi_tomasi = rgb.clone();
    for feature in &features {
        draw_filled_circle_mut(
            &mut shi_tomasi,
            (feature.x as i32, feature.y as i32),
            CORNER_MARKER_RADIUS,
            SHI_TOMASI_COLOR,
        );
    }
    log::debug!(
        "{} Harris pixels, {} Shi-Tomasi corners",
        mask.count_ones(),
        features.len()
    );

    Ok(Figure::new("Corner detection")
        .with_panel(Panel::rgb("Original Image (Color)", rgb))
        .with_panel(Panel::rgb("Harris Corner Detection", harris))
        .with_panel(Panel::rgb("Shi-Tomasi Corner Detection", shi_tomasi)))
}
