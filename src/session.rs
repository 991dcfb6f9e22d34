use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

/// One measurement handed to the reporting callback per debounced sample.
///
/// `furthest_bucket` is the furthest bucket reached *before* this sample was
/// taken, so the callback can tell a newly crossed threshold apart from one
/// it has already reported.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Current progress bucket, a multiple of the bucket size. Not clamped:
    /// exceeds 1.0 once the content has been scrolled past.
    pub current_bucket: f64,
    /// Furthest bucket reached in earlier samples of this session.
    pub furthest_bucket: f64,
    /// Whole seconds since activation, rounded.
    pub seconds_since_start: u64,
    /// Estimated reading speed, assuming evenly distributed text.
    pub words_per_minute: f64,
}

/// Per-activation tracking state, owned by the sampling loop.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub session_id: String,
    pub selector: String,
    pub word_count: usize,
    pub started_at: DateTime<Utc>,
    pub furthest_bucket: f64,
    /// Cleared once the reporting callback returns false; bucket bookkeeping
    /// still advances afterwards, the callback is just no longer invoked.
    pub active: bool,
    anchor: Instant,
}

impl SessionState {
    pub fn new(session_id: String, selector: String, word_count: usize) -> Self {
        Self {
            session_id,
            selector,
            word_count,
            started_at: Utc::now(),
            furthest_bucket: 0.0,
            active: true,
            anchor: Instant::now(),
        }
    }

    pub fn seconds_since_start(&self) -> u64 {
        (self.anchor.elapsed().as_millis() as f64 / 1000.0).round() as u64
    }

    /// Advance the furthest-bucket watermark. Called after the callback has
    /// seen the pre-update value, and regardless of the active flag.
    pub fn advance(&mut self, bucket: f64) {
        if bucket > self.furthest_bucket {
            self.furthest_bucket = bucket;
        }
    }
}
