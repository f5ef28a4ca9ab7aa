//! Neighbourhood filters: blur, sharpen, Laplacian and noise removal

use crate::io::configuration::{
    DENOISE_SIGMA, LAPLACIAN_KERNEL, MEDIAN_RADIUS, NOISE_MEAN, NOISE_SIGMA, SALT_AND_PEPPER_RATE,
    SHARPEN_KERNEL,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::figure::{Figure, Panel};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::filter::{filter3x3, gaussian_blur_f32, median_filter};
use imageproc::map::map_colors;
use imageproc::noise::{gaussian_noise, salt_and_pepper_noise};

fn check_sigma(sigma: f32) -> Result<()> {
    if sigma.is_finite() && sigma > 0.0 {
        Ok(())
    } else {
        Err(invalid_parameter(
            "sigma",
            &sigma,
            &"Gaussian sigma must be a finite positive number",
        ))
    }
}

/// Original next to its Gaussian blur
///
/// # Errors
///
/// Returns an error if `sigma` is not a finite positive number
pub fn blur(image: &DynamicImage, sigma: f32) -> Result<Figure> {
    check_sigma(sigma)?;
    let rgb = image.to_rgb8();
    let blurred = gaussian_blur_f32(&rgb, sigma);
    Ok(Figure::new("Gaussian blur")
        .with_panel(Panel::rgb("Original Image", rgb))
        .with_panel(Panel::rgb("Blurred Image (Gaussian Blur)", blurred)))
}

/// Correlate every channel with the identity-minus-Laplacian kernel
pub fn sharpen_rgb(image: &RgbImage) -> RgbImage {
    filter3x3::<Rgb<u8>, f32, u8>(image, &SHARPEN_KERNEL)
}

/// Original next to its sharpened version
pub fn sharpen(image: &DynamicImage) -> Figure {
    let rgb = image.to_rgb8();
    let sharpened = sharpen_rgb(&rgb);
    Figure::new("Sharpening")
        .with_panel(Panel::rgb("Original Image", rgb))
        .with_panel(Panel::rgb("Sharpened Image", sharpened))
}

/// Absolute response of the 4-neighbour Laplacian, saturated at 255
pub fn laplacian_magnitude(image: &GrayImage) -> GrayImage {
    let response = filter3x3::<Luma<u8>, i32, i16>(image, &LAPLACIAN_KERNEL);
    map_colors(&response, |Luma([v])| {
        Luma([u8::try_from(v.unsigned_abs()).unwrap_or(u8::MAX)])
    })
}

/// Grayscale next to its Laplacian
pub fn laplacian(image: &DynamicImage) -> Figure {
    let gray = image.to_luma8();
    let edges = laplacian_magnitude(&gray);
    Figure::new("Laplacian")
        .with_panel(Panel::gray("Original Image", &gray))
        .with_panel(Panel::gray("Laplacian Image", &edges))
}

/// Noise models and the filters that undo them
#[derive(Debug, Clone, Copy)]
pub struct NoiseSettings {
    /// Mean of the additive Gaussian noise
    pub mean: f64,
    /// Standard deviation of the additive Gaussian noise
    pub sigma: f64,
    /// Fraction of pixels replaced by black or white
    pub salt_and_pepper_rate: f64,
    /// Sigma of the Gaussian filter applied to the Gaussian-noised image
    pub denoise_sigma: f32,
    /// Median filter radius applied to the salt-and-pepper image
    pub median_radius: u32,
    /// Seed shared by both noise generators
    pub seed: u64,
}

impl NoiseSettings {
    /// Default noise parameters with the given seed
    pub const fn with_seed(seed: u64) -> Self {
        Self {
            mean: NOISE_MEAN,
            sigma: NOISE_SIGMA,
            salt_and_pepper_rate: SALT_AND_PEPPER_RATE,
            denoise_sigma: DENOISE_SIGMA,
            median_radius: MEDIAN_RADIUS,
            seed,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.mean.is_finite() {
            return Err(invalid_parameter("mean", &self.mean, &"must be finite"));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(invalid_parameter(
                "sigma",
                &self.sigma,
                &"noise standard deviation must be finite and non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.salt_and_pepper_rate) {
            return Err(invalid_parameter(
                "salt_and_pepper_rate",
                &self.salt_and_pepper_rate,
                &"rate must lie between 0.0 and 1.0",
            ));
        }
        check_sigma(self.denoise_sigma)
    }
}

/// Noisy and restored versions of a grayscale image
#[derive(Debug, Clone)]
pub struct DenoiseResult {
    /// Image with additive Gaussian noise
    pub gaussian_noisy: GrayImage,
    /// Image with salt-and-pepper noise
    pub salt_and_pepper_noisy: GrayImage,
    /// Gaussian-noised image after Gaussian filtering
    pub gaussian_restored: GrayImage,
    /// Salt-and-pepper image after median filtering
    pub median_restored: GrayImage,
}

/// Corrupt `image` with both noise models and filter each back
///
/// # Errors
///
/// Returns an error if any setting is out of range
pub fn add_and_remove_noise(image: &GrayImage, settings: &NoiseSettings) -> Result<DenoiseResult> {
    settings.validate()?;

    let gaussian_noisy = gaussian_noise(image, settings.mean, settings.sigma, settings.seed);
    let salt_and_pepper_noisy = salt_and_pepper_noise(
        image,
        settings.salt_and_pepper_rate,
        settings.seed.wrapping_add(1),
    );
    let gaussian_restored = gaussian_blur_f32(&gaussian_noisy, settings.denoise_sigma);
    let median_restored = median_filter(
        &salt_and_pepper_noisy,
        settings.median_radius,
        settings.median_radius,
    );

    Ok(DenoiseResult {
        gaussian_noisy,
        salt_and_pepper_noisy,
        gaussian_restored,
        median_restored,
    })
}

/// Original, both noisy versions and both restorations
///
/// # Errors
///
/// Returns an error if any setting is out of range
pub fn noise(image: &DynamicImage, settings: &NoiseSettings) -> Result<Figure> {
    let gray = image.to_luma8();
    let result = add_and_remove_noise(&gray, settings)?;
    Ok(Figure::new("Noise and denoising")
        .with_panel(Panel::gray("Original Image", &gray))
        .with_panel(Panel::gray("Gaussian Noisy Image", &result.gaussian_noisy))
        .with_panel(Panel::gray(
            "Salt-and-Pepper Noisy Image",
            &result.salt_and_pepper_noisy,
        ))
        .with_panel(Panel::gray("Gaussian Filtered", &result.gaussian_restored))
        .with_panel(Panel::gray("Median Filtered", &result.median_restored)))
}
