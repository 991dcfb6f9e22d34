use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::config::TrackerConfig;
use crate::page::{PageView, ScrollEvent};
use crate::session::{ProgressSnapshot, SessionState};

use super::controller::TrackingCallback;

/// Debounced sampling loop for one tracking session.
///
/// Every scroll event replaces the pending sample deadline, so a burst of
/// events produces exactly one sample, taken against the geometry at the end
/// of the burst once the page has been quiet for the debounce window. Runs
/// until cancelled or until the host drops its scroll sender; the callback
/// returning false only stops reporting, not the loop itself.
pub(crate) async fn sampling_loop(
    mut session: SessionState,
    page: Arc<dyn PageView>,
    config: TrackerConfig,
    mut callback: TrackingCallback,
    mut scroll_rx: mpsc::UnboundedReceiver<ScrollEvent>,
    cancel_token: CancellationToken,
) {
    let debounce = Duration::from_millis(config.debounce_ms);
    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                info!("sampling loop for session {} shutting down", session.session_id);
                break;
            }
            event = scroll_rx.recv() => {
                match event {
                    // Give the reader time to finish scrolling instead of
                    // sampling at every scrolled pixel.
                    Some(ScrollEvent) => deadline = Some(Instant::now() + debounce),
                    None => {
                        info!(
                            "scroll source for session {} closed, sampling stops",
                            session.session_id
                        );
                        break;
                    }
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                sample_location(&mut session, page.as_ref(), &config, &mut callback);
            }
        }
    }
}

/// Take one progress sample and drive the reporting callback.
fn sample_location(
    session: &mut SessionState,
    page: &dyn PageView,
    config: &TrackerConfig,
    callback: &mut TrackingCallback,
) {
    let seconds_since_start = session.seconds_since_start();

    let Some(element) = page.query(&session.selector).into_iter().next() else {
        warn!(
            "content element {:?} no longer resolves, skipping sample",
            session.selector
        );
        return;
    };

    let snapshot = compute_snapshot(
        session.word_count,
        session.furthest_bucket,
        seconds_since_start,
        page.viewport_height(),
        page.scroll_offset(),
        element.offset_top,
        element.height,
        config,
    );

    if session.active {
        session.active = (callback)(&snapshot);
        if !session.active {
            info!(
                "callback for session {} requested no further reporting",
                session.session_id
            );
        }
    }

    // Set after the callback so it can still observe the pre-sample value,
    // and regardless of the active flag.
    session.advance(snapshot.current_bucket);
}

/// Pure geometry-to-snapshot computation.
///
/// A zero content height makes `progress` non-finite and that value flows
/// through to the snapshot unguarded; likewise the speed estimate divides by
/// zero when the sample lands in the same second as activation. Callers that
/// care must check `is_finite` on the snapshot fields.
#[allow(clippy::too_many_arguments)]
fn compute_snapshot(
    word_count: usize,
    furthest_bucket: f64,
    seconds_since_start: u64,
    viewport_height: f64,
    scroll_offset: f64,
    content_top: f64,
    content_height: f64,
    config: &TrackerConfig,
) -> ProgressSnapshot {
    // Lowest document coordinate counted as seen by the reader.
    let view_cutoff = viewport_height * config.content_end_on_screen_factor + scroll_offset;
    let content_end = content_top + content_height;
    let progress = view_cutoff / content_end;

    let current_bucket = (progress / config.progress_bucket_size).floor()
        * config.progress_bucket_size;

    // Assumes equally distributed text. Buckets past the end still count as
    // having read the whole article.
    let speed_fraction = current_bucket.min(1.0);
    let words_per_minute =
        word_count as f64 * speed_fraction / (seconds_since_start as f64 / 60.0);

    ProgressSnapshot {
        current_bucket,
        furthest_bucket,
        seconds_since_start,
        words_per_minute,
    }
}
