//! Side-by-side comparison figures and histogram charts

use crate::io::configuration::{CHART_BIN_WIDTH, CHART_HEIGHT, FIGURE_GUTTER};
use crate::io::error::{Result, computation_error};
use crate::io::image::save_image;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::path::Path;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const HISTOGRAM_COLOR: Rgb<u8> = Rgb([220, 40, 40]);
const CDF_COLOR: Rgb<u8> = Rgb([40, 40, 220]);

/// One titled image within a figure
#[derive(Debug, Clone)]
pub struct Panel {
    /// Caption describing what the panel shows
    pub title: String,
    /// Pixels of the panel
    pub image: RgbImage,
}

impl Panel {
    /// Panel from an RGB image
    pub fn rgb(title: impl Into<String>, image: RgbImage) -> Self {
        Self {
            title: title.into(),
            image,
        }
    }

    /// Panel from a grayscale image, replicated across channels
    pub fn gray(title: impl Into<String>, image: &GrayImage) -> Self {
        Self::rgb(title, DynamicImage::ImageLuma8(image.clone()).to_rgb8())
    }
}

/// An ordered row of panels rendered as a single image
#[derive(Debug, Clone)]
pub struct Figure {
    title: String,
    panels: Vec<Panel>,
}

impl Figure {
    /// Empty figure with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            panels: Vec::new(),
        }
    }

    /// Append a panel on the right
    #[must_use]
    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    /// Figure title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Panels in left-to-right order
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Lay the panels out left to right on a white canvas
    ///
    /// Panels shorter than the tallest one are scaled up to its height so the
    /// comparison lines up.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure has no panels or a panel is empty
    pub fn compose(&self) -> Result<RgbImage> {
        let height = self
            .panels
            .iter()
            .map(|p| p.image.height())
            .max()
            .ok_or_else(|| computation_error("compose figure", &"figure has no panels"))?;

        let mut scaled = Vec::with_capacity(self.panels.len());
        for panel in &self.panels {
            let (w, h) = panel.image.dimensions();
            if w == 0 || h == 0 {
                return Err(computation_error(
                    "compose figure",
                    &format!("panel '{}' is empty", panel.title),
                ));
            }
            if h == height {
                scaled.push(panel.image.clone());
            } else {
                let new_width = ((u64::from(w) * u64::from(height)) / u64::from(h)).max(1) as u32;
                scaled.push(imageops::resize(
                    &panel.image,
                    new_width,
                    height,
                    FilterType::Triangle,
                ));
            }
        }

        let width = scaled.iter().map(RgbImage::width).sum::<u32>()
            + FIGURE_GUTTER * (scaled.len() as u32 + 1);
        let mut canvas = RgbImage::from_pixel(width, height + 2 * FIGURE_GUTTER, BACKGROUND);

        let mut x = FIGURE_GUTTER;
        for image in &scaled {
            imageops::overlay(&mut canvas, image, i64::from(x), i64::from(FIGURE_GUTTER));
            x += image.width() + FIGURE_GUTTER;
        }

        Ok(canvas)
    }

    /// Compose and write the figure
    ///
    /// # Errors
    ///
    /// Returns an error if composition fails or the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        let canvas = self.compose()?;
        let titles: Vec<&str> = self.panels.iter().map(|p| p.title.as_str()).collect();
        log::info!(
            "{}: [{}] -> {}",
            self.title,
            titles.join(" | "),
            path.display()
        );
        save_image(&DynamicImage::ImageRgb8(canvas), path)
    }
}

/// Intensity histogram in red with its cumulative distribution in blue
///
/// The CDF is normalized to the histogram peak so both share one axis.
pub fn histogram_chart(image: &GrayImage) -> RgbImage {
    let width = 256 * CHART_BIN_WIDTH;
    let mut chart = RgbImage::from_pixel(width, CHART_HEIGHT, BACKGROUND);

    let stats = imageproc::stats::histogram(image);
    let Some(hist) = stats.channels.first() else {
        return chart;
    };

    let peak = hist.iter().copied().max().unwrap_or(0);
    if peak == 0 {
        return chart;
    }

    let total: u64 = hist.iter().map(|&c| u64::from(c)).sum();
    let usable = (CHART_HEIGHT - 1) as f32;
    let mut cumulative = 0u64;
    let mut previous: Option<(f32, f32)> = None;

    for (bin, &count) in hist.iter().enumerate() {
        let x = bin as u32 * CHART_BIN_WIDTH;

        let bar = ((count as f32 / peak as f32) * usable).round() as u32;
        if bar > 0 {
            draw_filled_rect_mut(
                &mut chart,
                Rect::at(x as i32, (CHART_HEIGHT - bar) as i32).of_size(CHART_BIN_WIDTH, bar),
                HISTOGRAM_COLOR,
            );
        }

        cumulative += u64::from(count);
        let point = (
            x as f32 + CHART_BIN_WIDTH as f32 / 2.0,
            usable - (cumulative as f32 / total as f32) * usable,
        );
        if let Some(start) = previous {
            draw_line_segment_mut(&mut chart, start, point, CDF_COLOR);
        }
        previous = Some(point);
    }

    chart
}
