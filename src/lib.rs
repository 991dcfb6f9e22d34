//! Reading-progress tracking: samples how far a reader has scrolled through
//! an article, buckets the progress, estimates reading speed and reports
//! newly crossed thresholds to a GA-style analytics queue.
//!
//! The host supplies page geometry through [`PageView`], forwards raw scroll
//! events into the tracker's scroll sender, and provides a reporting
//! callback; [`ga_callback`] is the reference policy.

mod analytics;
mod config;
mod page;
mod policy;
mod sampler;
mod session;
mod words;

pub use analytics::{AnalyticsCommand, AnalyticsQueue};
pub use config::{PolicyConfig, TrackerConfig};
pub use page::{ElementRef, PageView, ScrollEvent};
pub use policy::{ga_callback, ga_report, ga_report_debug, ReaderType};
pub use sampler::{ReadingTracker, TrackingCallback};
pub use session::{ProgressSnapshot, SessionState};
pub use words::word_count;

/// Initialize env_logger for hosts that have no logging setup of their own.
/// Reads `RUST_LOG`, defaults to info. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}
