/// Tunable constants for the progress sampler.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Fraction of the content treated as one progress bucket (>0..1).
    pub progress_bucket_size: f64,

    /// Where the end of the content must sit on screen to count as reached.
    /// 1.0 = bottom edge of the viewport, 0.5 = middle, 0.0 = top edge
    /// (the reader has scrolled past the article entirely).
    pub content_end_on_screen_factor: f64,

    /// Quiet period after the last scroll event before a sample fires.
    pub debounce_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            progress_bucket_size: 0.10,
            content_end_on_screen_factor: 0.80,
            debounce_ms: 100,
        }
    }
}

/// Tunable constants for the reference reporting policy.
///
/// See <https://en.wikipedia.org/wiki/Words_per_minute#Reading_and_comprehension>
/// for picking an applicable scanner threshold.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Readers finishing above this estimated WPM are classified as scanners.
    pub scanner_wpm_threshold: f64,

    /// Custom-variable slot used for the reader-type dimension.
    pub reader_type_slot: u32,

    /// Custom-variable scope used for the reader-type dimension.
    pub reader_type_scope: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            scanner_wpm_threshold: 500.0,
            reader_type_slot: 5,
            reader_type_scope: 3,
        }
    }
}
