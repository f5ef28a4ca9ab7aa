//! K-means color segmentation

use crate::io::configuration::{
    KMEANS_ATTEMPTS, KMEANS_CLUSTERS, KMEANS_EPSILON, KMEANS_MAX_ITERATIONS,
};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::io::figure::{Figure, Panel};
use image::{DynamicImage, RgbImage};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use num_traits::clamp;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Termination criteria and seeding of the clustering
#[derive(Debug, Clone, Copy)]
pub struct KMeansSettings {
    /// Number of clusters
    pub clusters: usize,
    /// Upper bound on Lloyd iterations
    pub max_iterations: usize,
    /// Stop once no center moves by this much or more
    pub epsilon: f32,
    /// Independent restarts; the most compact result wins
    pub attempts: usize,
    /// Seed for picking the initial centers
    pub seed: u64,
}

impl KMeansSettings {
    /// Default criteria with the given seed
    pub const fn with_seed(seed: u64) -> Self {
        Self {
            clusters: KMEANS_CLUSTERS,
            max_iterations: KMEANS_MAX_ITERATIONS,
            epsilon: KMEANS_EPSILON,
            attempts: KMEANS_ATTEMPTS,
            seed,
        }
    }
}

/// Outcome of a clustering run
#[derive(Debug, Clone)]
pub struct Clustering {
    /// One row per cluster
    pub centers: Array2<f32>,
    /// Cluster index of every sample, in input order
    pub labels: Vec<usize>,
    /// Lloyd iterations performed
    pub iterations: usize,
    /// Sum of squared distances from each sample to its center
    pub compactness: f32,
}

fn squared_distance(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest_center(point: ArrayView1<'_, f32>, centers: &Array2<f32>) -> usize {
    centers
        .rows()
        .into_iter()
        .map(|center| squared_distance(point, center))
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(0, |(index, _)| index)
}

fn assign(samples: &Array2<f32>, centers: &Array2<f32>) -> Vec<usize> {
    samples
        .rows()
        .into_iter()
        .map(|row| nearest_center(row, centers))
        .collect()
}

// k-means++ seeding: each further center is drawn with probability
// proportional to its squared distance from the nearest chosen center
fn seed_centers(samples: &Array2<f32>, clusters: usize, rng: &mut StdRng) -> Array2<f32> {
    let count = samples.nrows();
    let mut chosen = vec![rng.random_range(0..count)];
    let mut nearest: Vec<f32> = vec![f32::INFINITY; count];

    while chosen.len() < clusters {
        if let Some(&last) = chosen.last() {
            let center = samples.row(last);
            for (distance, row) in nearest.iter_mut().zip(samples.rows()) {
                *distance = distance.min(squared_distance(row, center));
            }
        }

        let total: f32 = nearest.iter().sum();
        let next = if total > 0.0 {
            let mut target = rng.random::<f32>() * total;
            let mut pick = nearest.iter().rposition(|&d| d > 0.0).unwrap_or(count - 1);
            for (index, &distance) in nearest.iter().enumerate() {
                if distance > 0.0 && target < distance {
                    pick = index;
                    break;
                }
                target -= distance;
            }
            pick
        } else {
            rng.random_range(0..count)
        };
        chosen.push(next);
    }

    samples.select(Axis(0), &chosen)
}

fn lloyd(
    samples: &Array2<f32>,
    mut centers: Array2<f32>,
    settings: &KMeansSettings,
) -> Clustering {
    let mut iterations = 0;
    while iterations < settings.max_iterations {
        iterations += 1;
        let labels = assign(samples, &centers);

        let mut sums = Array2::<f32>::zeros(centers.dim());
        let mut members = vec![0usize; centers.nrows()];
        for (row, &label) in samples.rows().into_iter().zip(&labels) {
            let mut target = sums.row_mut(label);
            target += &row;
            if let Some(n) = members.get_mut(label) {
                *n += 1;
            }
        }

        let mut shift = 0.0f32;
        for (cluster, &n) in members.iter().enumerate() {
            if n == 0 {
                continue;
            }
            let updated: Array1<f32> = sums.row(cluster).mapv(|v| v / n as f32);
            shift = shift.max(squared_distance(updated.view(), centers.row(cluster)).sqrt());
            centers.row_mut(cluster).assign(&updated);
        }

        if shift < settings.epsilon {
            break;
        }
    }

    let labels = assign(samples, &centers);
    let compactness = samples
        .rows()
        .into_iter()
        .zip(&labels)
        .map(|(row, &label)| squared_distance(row, centers.row(label)))
        .sum();

    Clustering {
        centers,
        labels,
        iterations,
        compactness,
    }
}

/// Lloyd's k-means over the rows of `samples`
///
/// Each attempt seeds its centers with k-means++ from one seeded RNG, so runs
/// are reproducible; the attempt with the lowest compactness is returned. A
/// cluster that loses all its samples keeps its previous center.
///
/// # Errors
///
/// Returns an error if `clusters` is zero or exceeds the sample count, or if
/// `max_iterations`, `attempts` or `epsilon` is invalid
pub fn kmeans(samples: &Array2<f32>, settings: &KMeansSettings) -> Result<Clustering> {
    let count = samples.nrows();
    if settings.clusters == 0 || settings.clusters > count {
        return Err(invalid_parameter(
            "clusters",
            &settings.clusters,
            &format!("must lie between 1 and the number of samples ({count})"),
        ));
    }
    if settings.max_iterations == 0 {
        return Err(invalid_parameter(
            "max_iterations",
            &settings.max_iterations,
            &"at least one iteration is required",
        ));
    }
    if settings.attempts == 0 {
        return Err(invalid_parameter(
            "attempts",
            &settings.attempts,
            &"at least one attempt is required",
        ));
    }
    if !settings.epsilon.is_finite() || settings.epsilon < 0.0 {
        return Err(invalid_parameter(
            "epsilon",
            &settings.epsilon,
            &"must be finite and non-negative",
        ));
    }

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut best: Option<Clustering> = None;
    for _ in 0..settings.attempts {
        let centers = seed_centers(samples, settings.clusters, &mut rng);
        let candidate = lloyd(samples, centers, settings);
        if best
            .as_ref()
            .is_none_or(|b| candidate.compactness < b.compactness)
        {
            best = Some(candidate);
        }
    }

    best.ok_or_else(|| computation_error("kmeans", &"no attempt produced a clustering"))
}

/// Replace every pixel by the center of its color cluster
///
/// # Errors
///
/// Returns an error if the image is empty or clustering fails
pub fn segment(image: &RgbImage, settings: &KMeansSettings) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    let pixel_count = (width as usize) * (height as usize);
    let samples = Array2::from_shape_vec(
        (pixel_count, 3),
        image.as_raw().iter().map(|&v| f32::from(v)).collect(),
    )
    .map_err(|e| computation_error("pixel matrix", &e))?;

    let clustering = kmeans(&samples, settings)?;
    log::debug!(
        "k-means converged after {} iterations",
        clustering.iterations
    );

    let palette: Vec<[u8; 3]> = clustering
        .centers
        .rows()
        .into_iter()
        .map(|center| {
            let mut color = [0u8; 3];
            for (channel, &value) in color.iter_mut().zip(center.iter()) {
                *channel = clamp(value.round(), 0.0, 255.0) as u8;
            }
            color
        })
        .collect();

    let raw: Vec<u8> = clustering
        .labels
        .iter()
        .flat_map(|&label| palette.get(label).copied().unwrap_or_default())
        .collect();

    RgbImage::from_raw(width, height, raw)
        .ok_or_else(|| computation_error("segment", &"label count does not match image size"))
}

/// Original next to its k-means segmentation
///
/// # Errors
///
/// Returns an error if segmentation fails
pub fn kmeans_segmentation(image: &DynamicImage, settings: &KMeansSettings) -> Result<Figure> {
    let rgb = image.to_rgb8();
    let segmented = segment(&rgb, settings)?;
    Ok(Figure::new("K-means segmentation")
        .with_panel(Panel::rgb("Original Image", rgb))
        .with_panel(Panel::rgb(
            format!("Segmented Image (K={})", settings.clusters),
            segmented,
        )))
}
