/// Harris and Shi-Tomasi corner detection
pub mod corners;
/// JPEG compression ratio demonstration
pub mod compression;
/// Canny edge detection
pub mod edges;
/// Blur, sharpening, Laplacian and denoising
pub mod filters;
/// K-means color segmentation
pub mod segmentation;
/// Grayscale, channel order, equalization and color enhancement
pub mod tone;

use crate::io::configuration::{
    BLUR_SIGMA, CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD, COLOR_ENHANCE_FACTOR, JPEG_QUALITY,
};
use crate::io::error::Result;
use crate::io::figure::Figure;
use clap::ValueEnum;
use image::DynamicImage;
use std::path::PathBuf;

/// A single image-processing demonstration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Operation {
    /// Convert to grayscale
    Grayscale,
    /// Show the image with red and blue channels exchanged
    ChannelSwap,
    /// Canny edge detection
    Canny,
    /// Absolute Laplacian response
    Laplacian,
    /// Gaussian blur
    Blur,
    /// 3x3 sharpening
    Sharpen,
    /// Histogram equalization with histogram charts
    Equalize,
    /// Color saturation boost
    EnhanceColor,
    /// Synthetic noise and its removal
    Noise,
    /// Harris and Shi-Tomasi corners
    Corners,
    /// K-means color segmentation
    Kmeans,
    /// JPEG re-encoding and compression ratio
    Compress,
}

impl Operation {
    /// Every operation, in the order `--all` runs them
    pub const ALL: [Self; 12] = [
        Self::Grayscale,
        Self::ChannelSwap,
        Self::Canny,
        Self::Laplacian,
        Self::Blur,
        Self::Sharpen,
        Self::Equalize,
        Self::EnhanceColor,
        Self::Noise,
        Self::Corners,
        Self::Kmeans,
        Self::Compress,
    ];

    /// Name used on the command line and in output file names
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::ChannelSwap => "channel-swap",
            Self::Canny => "canny",
            Self::Laplacian => "laplacian",
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Equalize => "equalize",
            Self::EnhanceColor => "enhance-color",
            Self::Noise => "noise",
            Self::Corners => "corners",
            Self::Kmeans => "kmeans",
            Self::Compress => "compress",
        }
    }

    /// Run the operation with default parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the operation's parameters are rejected or, for
    /// `compress`, if the JPEG cannot be written or read back
    pub fn apply(self, image: &DynamicImage, context: &OperationContext) -> Result<Figure> {
        match self {
            Self::Grayscale => Ok(tone::grayscale(image)),
            Self::ChannelSwap => Ok(tone::channel_swap(image)),
            Self::Canny => edges::edges(image, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD),
            Self::Laplacian => Ok(filters::laplacian(image)),
            Self::Blur => filters::blur(image, BLUR_SIGMA),
            Self::Sharpen => Ok(filters::sharpen(image)),
            Self::Equalize => Ok(tone::equalize(image)),
            Self::EnhanceColor => tone::enhance_color(image, COLOR_ENHANCE_FACTOR),
            Self::Noise => filters::noise(image, &filters::NoiseSettings::with_seed(context.seed)),
            Self::Corners => corners::corners(image, &corners::CornerSettings::default()),
            Self::Kmeans => segmentation::kmeans_segmentation(
                image,
                &segmentation::KMeansSettings::with_seed(context.seed),
            ),
            Self::Compress => {
                let result = compression::compress(
                    image,
                    &context.source,
                    &context.output_dir,
                    JPEG_QUALITY,
                )?;
                log::info!("{}", result.report);
                Ok(result.figure)
            }
        }
    }
}

/// Inputs an operation may need beyond the decoded pixels
#[derive(Debug, Clone)]
pub struct OperationContext {
    /// Path of the sample file the image was decoded from
    pub source: PathBuf,
    /// Directory receiving figures and side outputs
    pub output_dir: PathBuf,
    /// Seed for randomized operations
    pub seed: u64,
}
