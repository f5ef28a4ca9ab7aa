//! Tests for the Harris response, corner mask and Shi-Tomasi corners

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayImage, Luma, Rgb};
    use ndarray::Array2;
    use samplelab::operations::corners::{
        CornerSettings, Feature, corners, good_features, harris_mask, harris_response,
        shi_tomasi_response,
    };

    fn square() -> GrayImage {
        GrayImage::from_fn(40, 40, |x, y| {
            Luma([if (10..30).contains(&x) && (10..30).contains(&y) { 220 } else { 20 }])
        })
    }

    // Tests the response peaks near a square corner rather than along an edge
    // Verified by dropping the trace penalty
    #[test]
    fn test_harris_response_peaks_at_corner() {
        let response = harris_response(&square(), 2, 0.04);

        assert_eq!(response.dim(), (40, 40));
        let corner = response[[10, 10]];
        let edge = response[[20, 10]];
        let flat = response[[20, 20]];
        assert!(corner > 0.0);
        assert!(edge < corner);
        assert!(flat.abs() < 1e-6);
    }

    // Tests mask thresholding relative to the peak response
    // Verified by thresholding against an absolute value
    #[test]
    fn test_harris_mask_threshold() {
        let response = Array2::from_shape_vec((2, 2), vec![10.0, 0.5, -3.0, 2.0]).unwrap();
        let mask = harris_mask(&response, 0.1);

        assert_eq!(mask.iter_ones().collect::<Vec<_>>(), vec![0, 3]);
    }

    // Tests an all non-positive response yields an empty mask
    // Verified by thresholding against a negative peak
    #[test]
    fn test_harris_mask_empty_when_no_positive_response() {
        let response = Array2::from_elem((3, 3), -1.0f32);
        assert_eq!(harris_mask(&response, 0.01).count_ones(), 0);
    }

    // Tests a two pixel window only sees the pixel and its upper-left neighbours
    // Verified by centering the window on the pixel
    #[test]
    fn test_harris_even_window_anchor() {
        let response = harris_response(&square(), 2, 0.04);

        // Gradients are non-zero on rows and columns 9..=30 only
        assert!(response[[8, 8]].abs() < 1e-6);
        assert!(response[[31, 31]].abs() > 1e-6);
    }

    // Tests the smaller eigenvalue vanishes on straight edges and flat areas
    // Verified by returning the larger eigenvalue
    #[test]
    fn test_shi_tomasi_response() {
        let response = shi_tomasi_response(&square(), 3);

        assert!(response[[10, 10]] > 0.0);
        assert!(response[[20, 10]].abs() < 1e-6);
        assert!(response[[20, 20]].abs() < 1e-6);
    }

    // Tests the square yields one feature per corner, strongest first
    // Verified by skipping the minimum distance check
    #[test]
    fn test_good_features_on_square() {
        let response = shi_tomasi_response(&square(), 3);
        let features = good_features(&response, 0.01, 10.0, 100);

        assert_eq!(features.len(), 4);
        assert!(features.windows(2).all(|w| w[0].score >= w[1].score));

        let targets = [(9.5, 9.5), (29.5, 9.5), (9.5, 29.5), (29.5, 29.5)];
        for (tx, ty) in targets {
            let near = features.iter().filter(|f| {
                let dx = f.x as f32 - tx;
                let dy = f.y as f32 - ty;
                dx.hypot(dy) <= 4.0
            });
            assert_eq!(near.count(), 1, "expected one feature near ({tx}, {ty})");
        }
    }

    // Tests the corner cap and the minimum spacing
    // Verified by truncating before the distance suppression
    #[test]
    fn test_good_features_limits() {
        let response = shi_tomasi_response(&square(), 3);

        assert_eq!(good_features(&response, 0.01, 10.0, 2).len(), 2);
        assert!(good_features(&response, 0.01, 10.0, 0).is_empty());

        let spaced = good_features(&response, 0.01, 25.0, 100);
        assert!(spaced.len() < 4);
        for (i, a) in spaced.iter().enumerate() {
            for b in spaced.iter().skip(i + 1) {
                let dx = a.x as f32 - b.x as f32;
                let dy = a.y as f32 - b.y as f32;
                assert!(dx.hypot(dy) >= 25.0);
            }
        }
    }

    // Tests a featureless image yields no corners
    // Verified by thresholding against a non-positive peak
    #[test]
    fn test_good_features_flat() {
        let flat = GrayImage::from_pixel(20, 20, Luma([77]));
        let features: Vec<Feature> = good_features(&shi_tomasi_response(&flat, 3), 0.01, 10.0, 100);
        assert!(features.is_empty());
    }

    // Tests the figure marks Harris pixels in red and Shi-Tomasi corners in green
    // Verified by drawing marks on the original panel
    #[test]
    fn test_corners_figure() {
        let image = DynamicImage::ImageLuma8(square());
        let figure = corners(&image, &CornerSettings::default()).unwrap();

        assert_eq!(figure.panels().len(), 3);
        assert!(!figure.panels()[0].image.pixels().any(|p| *p == Rgb([255, 0, 0])));
        assert!(figure.panels()[1].image.pixels().any(|p| *p == Rgb([255, 0, 0])));
        assert!(figure.panels()[2].image.pixels().any(|p| *p == Rgb([0, 255, 0])));
    }

    // Tests settings validation
    // Verified by accepting thresholds above one
    #[test]
    fn test_corners_rejects_invalid_settings() {
        let image = DynamicImage::ImageLuma8(square());
        let invalid = [
            CornerSettings {
                relative_threshold: 1.5,
                ..CornerSettings::default()
            },
            CornerSettings {
                harris_block_size: 0,
                ..CornerSettings::default()
            },
            CornerSettings {
                quality: -0.1,
                ..CornerSettings::default()
            },
            CornerSettings {
                min_distance: f32::NAN,
                ..CornerSettings::default()
            },
        ];
        for settings in &invalid {
            assert!(corners(&image, settings).is_err());
        }
    }
}
