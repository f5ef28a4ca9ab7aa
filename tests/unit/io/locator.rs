//! Tests for sample discovery, candidate ordering and failure classification

#[cfg(test)]
mod tests {
    use samplelab::LabError;
    use samplelab::io::error::NearMiss;
    use samplelab::io::locator::{
        classify, extension_label, is_accepted_extension, list_directory, locate_sample,
    };
    use std::fs;

    // Tests near-miss classification when only unsupported sample files exist
    // Verified by reporting SampleNotFound whenever there is no candidate
    #[test]
    fn test_unsupported_format_lists_near_misses() {
        let err = classify(&["sample.txt", "readme.md"]).unwrap_err();

        match &err {
            LabError::UnsupportedFormat { near_misses } => {
                assert_eq!(
                    near_misses,
                    &vec![NearMiss {
                        name: "sample.txt".to_string(),
                        extension: ".txt".to_string(),
                    }]
                );
            }
            other => panic!("Expected UnsupportedFormat, got {other:?}"),
        }
        assert!(err.diagnostic().contains("sample.txt (.txt)"));
    }

    // Tests that every present file is listed when nothing carries the prefix
    // Verified by listing only the first file
    #[test]
    fn test_not_found_lists_all_files() {
        let err = classify(&["photo.png", "notes.md"]).unwrap_err();

        match &err {
            LabError::SampleNotFound { files } => {
                assert_eq!(files, &vec!["photo.png".to_string(), "notes.md".to_string()]);
            }
            other => panic!("Expected SampleNotFound, got {other:?}"),
        }
        let text = err.diagnostic();
        assert!(text.contains("photo.png"));
        assert!(text.contains("notes.md"));
    }

    // Tests that an empty listing is reported as having no files
    // Verified by printing an empty file list instead of None
    #[test]
    fn test_empty_listing_reports_none() {
        let empty: [&str; 0] = [];
        let err = classify(&empty).unwrap_err();

        assert!(matches!(&err, LabError::SampleNotFound { files } if files.is_empty()));
        assert!(err.diagnostic().contains("Available files: None"));
    }

    // Tests that the first candidate in listing order wins
    // Verified by sorting candidates before selection
    #[test]
    fn test_first_candidate_in_listing_order() {
        assert_eq!(classify(&["sample.png", "sample.jpg"]).unwrap(), "sample.png");
        assert_eq!(classify(&["sample.jpg", "sample.png"]).unwrap(), "sample.jpg");
    }

    // Tests that near-misses before a valid candidate are ignored
    // Verified by failing on the first prefix match
    #[test]
    fn test_candidate_beats_near_miss() {
        let chosen = classify(&["sample.gif", "other.png", "sample.bmp"]).unwrap();
        assert_eq!(chosen, "sample.bmp");
    }

    // Tests case-insensitive extensions and case-sensitive prefix
    // Verified by lowercasing the whole name before the prefix check
    #[test]
    fn test_case_rules() {
        assert_eq!(classify(&["sample.JPG"]).unwrap(), "sample.JPG");
        assert_eq!(classify(&["sample.TiFf"]).unwrap(), "sample.TiFf");

        let err = classify(&["Sample.jpg", "SAMPLE.JPG"]).unwrap_err();
        assert!(matches!(err, LabError::SampleNotFound { .. }));
    }

    // Tests prefix matching on names that merely start with the prefix
    // Verified by requiring an exact stem of "sample"
    #[test]
    fn test_prefix_allows_longer_stems() {
        assert_eq!(classify(&["sample2.jpg"]).unwrap(), "sample2.jpg");
        assert_eq!(classify(&["sample_photo.jpeg"]).unwrap(), "sample_photo.jpeg");
    }

    // Tests extension labels for missing and compound extensions
    // Verified by returning an empty label for extensionless files
    #[test]
    fn test_extension_label() {
        assert_eq!(extension_label("sample"), "no extension");
        assert_eq!(extension_label("sample.tar.gz"), ".gz");
        assert_eq!(extension_label("sample.webp"), ".webp");
    }

    // Tests that extensionless sample files are reported as near-misses
    // Verified by skipping names without a dot
    #[test]
    fn test_extensionless_near_miss() {
        let err = classify(&["sample"]).unwrap_err();
        assert!(err.diagnostic().contains("sample (no extension)"));
    }

    // Tests accepted extension matching on the full name suffix
    // Verified by comparing against the last extension only
    #[test]
    fn test_is_accepted_extension() {
        assert!(is_accepted_extension("sample.jpeg"));
        assert!(is_accepted_extension("sample.PNG"));
        assert!(is_accepted_extension("sample.bmp"));
        assert!(!is_accepted_extension("sample.tif"));
        assert!(!is_accepted_extension("samplejpg"));
    }

    // Tests that the unsupported-format diagnostic carries remediation hints
    // Verified by dropping the supported formats line
    #[test]
    fn test_unsupported_format_diagnostic_suggestions() {
        let text = classify(&["sample.heic"]).unwrap_err().diagnostic();
        assert!(text.contains(".JPG, .JPEG, .PNG, .BMP, .TIFF"));
        assert!(text.contains("Convert your image"));
        assert!(text.contains("converter"));
    }

    // Tests that directory listing is sorted and skips directories
    // Verified by returning raw read_dir order
    #[test]
    fn test_list_directory_sorted_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("zeta.txt"), b"z").unwrap();
        fs::write(dir.path().join("alpha.txt"), b"a").unwrap();
        fs::create_dir(dir.path().join("sample.png")).unwrap();

        let names = list_directory(dir.path()).unwrap();
        assert_eq!(names, vec!["alpha.txt".to_string(), "zeta.txt".to_string()]);
    }

    // Tests lexicographic tie-break on the filesystem
    // Verified by selecting the last candidate
    #[test]
    fn test_locate_sample_lexicographic() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sample.png"), b"png").unwrap();
        fs::write(dir.path().join("sample.jpg"), b"jpg").unwrap();

        let path = locate_sample(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("sample.jpg"));
    }

    // Tests listing failure on a missing directory
    // Verified by treating a missing directory as empty
    #[test]
    fn test_locate_sample_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        let err = locate_sample(&missing).unwrap_err();
        assert!(matches!(err, LabError::FileSystem { .. }));
    }
}
