//! Tests for progress tracking across operations

#[cfg(test)]
mod tests {
    use samplelab::io::progress::ProgressManager;

    // Tests operation counting on a hidden bar
    // Verified by not incrementing on completion
    #[test]
    fn test_hidden_progress_counts() {
        let progress = ProgressManager::hidden();
        progress.start_operation("grayscale");
        progress.complete_operation();
        progress.start_operation("canny");
        progress.complete_operation();

        assert_eq!(progress.completed(), 2);
        progress.finish();
    }

    // Tests a visible bar tracks completions
    // Verified by resetting position in start_operation
    #[test]
    fn test_visible_progress_counts() {
        let progress = ProgressManager::new("sample.png", 3);
        progress.start_operation("blur");
        progress.complete_operation();

        assert_eq!(progress.completed(), 1);
        progress.finish();
    }
}
