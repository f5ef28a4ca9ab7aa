//! Lookup rules, operation parameters and output defaults

// Sample lookup
/// Required file-name prefix for the sample image (case-sensitive)
pub const SAMPLE_PREFIX: &str = "sample";
/// Accepted image extensions, compared against the lowercased file name
pub const ACCEPTED_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".bmp", ".tiff"];
/// Label reported for near-miss files without any extension
pub const NO_EXTENSION_LABEL: &str = "no extension";

// Edge detection
/// Canny hysteresis low threshold
pub const CANNY_LOW_THRESHOLD: f32 = 100.0;
/// Canny hysteresis high threshold
pub const CANNY_HIGH_THRESHOLD: f32 = 200.0;
/// 4-neighbour Laplacian kernel, row-major
pub const LAPLACIAN_KERNEL: [i32; 9] = [0, 1, 0, 1, -4, 1, 0, 1, 0];

// Filtering
/// Standard deviation of the Gaussian blur demonstration
pub const BLUR_SIGMA: f32 = 2.0;
/// Identity minus Laplacian sharpening kernel, row-major
pub const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];
/// Saturation factor for color enhancement (1.0 leaves the image unchanged)
pub const COLOR_ENHANCE_FACTOR: f32 = 2.0;

// Noise
/// Mean of the additive Gaussian noise
pub const NOISE_MEAN: f64 = 0.0;
/// Standard deviation of the additive Gaussian noise
pub const NOISE_SIGMA: f64 = 25.0;
/// Fraction of pixels turned to salt or pepper
pub const SALT_AND_PEPPER_RATE: f64 = 0.02;
/// Sigma of the Gaussian filter applied to the Gaussian-noised image
pub const DENOISE_SIGMA: f32 = 1.5;
/// Radius of the median filter applied to the salt-and-pepper image
pub const MEDIAN_RADIUS: u32 = 1;

// Corner detection
/// Harris detector free parameter
pub const HARRIS_K: f32 = 0.04;
/// Side length of the Harris structure tensor window
pub const HARRIS_BLOCK_SIZE: usize = 2;
/// Harris responses above this fraction of the maximum are corners
pub const HARRIS_RELATIVE_THRESHOLD: f32 = 0.01;
/// Side length of the Shi-Tomasi structure tensor window
pub const SHI_TOMASI_BLOCK_SIZE: usize = 3;
/// Shi-Tomasi responses must exceed this fraction of the strongest one
pub const SHI_TOMASI_QUALITY: f32 = 0.01;
/// Minimum Euclidean distance between two kept Shi-Tomasi corners
pub const SHI_TOMASI_MIN_DISTANCE: f32 = 10.0;
/// Maximum number of Shi-Tomasi corners kept
pub const MAX_CORNERS: usize = 100;
/// Radius of the marker drawn at each Shi-Tomasi corner
pub const CORNER_MARKER_RADIUS: i32 = 3;

// Segmentation
/// Number of k-means clusters
pub const KMEANS_CLUSTERS: usize = 3;
/// Maximum Lloyd iterations
pub const KMEANS_MAX_ITERATIONS: usize = 10;
/// Convergence threshold on the largest center shift
pub const KMEANS_EPSILON: f32 = 1.0;
/// Restarts from fresh seeds, keeping the most compact clustering
pub const KMEANS_ATTEMPTS: usize = 10;

// Compression
/// JPEG quality for the compression demonstration (1-100)
pub const JPEG_QUALITY: u8 = 90;
/// File name of the re-encoded JPEG
pub const COMPRESSED_FILE_NAME: &str = "compressed_image.jpg";

// Figure layout
/// Gap in pixels between adjacent panels and around the figure
pub const FIGURE_GUTTER: u32 = 16;
/// Height in pixels of a rendered histogram chart
pub const CHART_HEIGHT: u32 = 200;
/// Horizontal pixels per histogram bin
pub const CHART_BIN_WIDTH: u32 = 2;

// Defaults for configurable parameters
/// Fixed seed for reproducible noise and clustering
pub const DEFAULT_SEED: u64 = 42;
/// Directory searched when none is given
pub const DEFAULT_SEARCH_DIR: &str = ".";
/// File-name prefix of written figures, never a sample candidate
pub const FIGURE_PREFIX: &str = "output";
/// Extension of written figures
pub const FIGURE_EXTENSION: &str = "png";
