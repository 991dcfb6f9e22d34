use log::info;

use crate::analytics::{AnalyticsCommand, AnalyticsQueue};
use crate::config::PolicyConfig;
use crate::session::ProgressSnapshot;

/// Classification of a reader who finished the content, from estimated WPM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ReaderType {
    Reader,
    Scanner,
}

impl ReaderType {
    pub fn classify(words_per_minute: f64, threshold: f64) -> Self {
        if words_per_minute > threshold {
            ReaderType::Scanner
        } else {
            ReaderType::Reader
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReaderType::Reader => "Reader",
            ReaderType::Scanner => "Scanner",
        }
    }
}

/// Reference reporting callback: emits GA-style events for newly crossed
/// progress buckets and returns whether sampling should keep invoking it.
///
/// Only reports when the current bucket exceeds the furthest bucket seen
/// before this sample. Change that comparison if you want logic for scrolling
/// back through the content, e.g. tracking skimming followed by reading.
pub fn ga_report(
    snapshot: &ProgressSnapshot,
    queue: &AnalyticsQueue,
    config: &PolicyConfig,
    debug: bool,
) -> bool {
    let mut keep_tracking = true;

    if snapshot.current_bucket > snapshot.furthest_bucket {
        let mut confirmed_completion = false;
        let label = if snapshot.current_bucket >= 1.0 {
            if snapshot.furthest_bucket == 0.0 {
                // The entire article fit in one or fewer scrolls, so no
                // intermediate buckets exist and the speed estimate is
                // unreliable. Parenthesized label, and keep sampling.
                "(100%)".to_string()
            } else {
                confirmed_completion = true;
                "100%".to_string()
            }
        } else {
            format!("{}%", (snapshot.current_bucket * 100.0).floor() as i64)
        };

        emit(
            AnalyticsCommand::TrackEvent {
                category: "Reading".to_string(),
                action: "Progress".to_string(),
                label,
                value: snapshot.seconds_since_start,
            },
            queue,
            debug,
        );

        if confirmed_completion {
            // End of content confirmed with valid progression data: classify
            // the reader and stop sampling.
            let reader_type =
                ReaderType::classify(snapshot.words_per_minute, config.scanner_wpm_threshold);
            emit(
                AnalyticsCommand::SetCustomVar {
                    slot: config.reader_type_slot,
                    name: "ReaderType".to_string(),
                    value: reader_type.as_str().to_string(),
                    scope: config.reader_type_scope,
                },
                queue,
                debug,
            );
            keep_tracking = false;
        }
    }

    keep_tracking
}

/// Convenience wrapper that always runs in debug mode.
pub fn ga_report_debug(
    snapshot: &ProgressSnapshot,
    queue: &AnalyticsQueue,
    config: &PolicyConfig,
) -> bool {
    ga_report(snapshot, queue, config, true)
}

/// Package the policy as a tracking callback for
/// [`ReadingTracker::start_tracking`](crate::ReadingTracker::start_tracking).
pub fn ga_callback(
    queue: AnalyticsQueue,
    config: PolicyConfig,
    debug: bool,
) -> impl FnMut(&ProgressSnapshot) -> bool + Send {
    move |snapshot| ga_report(snapshot, &queue, &config, debug)
}

fn emit(command: AnalyticsCommand, queue: &AnalyticsQueue, debug: bool) {
    if debug {
        info!("would push: {}", command.to_wire());
    } else {
        queue.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(current: f64, furthest: f64, seconds: u64, wpm: f64) -> ProgressSnapshot {
        ProgressSnapshot {
            current_bucket: current,
            furthest_bucket: furthest,
            seconds_since_start: seconds,
            words_per_minute: wpm,
        }
    }

    #[test]
    fn no_event_when_bucket_not_advanced() {
        let queue = AnalyticsQueue::new();
        let config = PolicyConfig::default();

        assert!(ga_report(&snapshot(0.3, 0.3, 10, 100.0), &queue, &config, false));
        assert!(ga_report(&snapshot(0.2, 0.3, 10, 100.0), &queue, &config, false));
        assert!(queue.is_empty());
    }

    #[test]
    fn newly_crossed_bucket_emits_percent_label() {
        let queue = AnalyticsQueue::new();
        let config = PolicyConfig::default();

        let keep = ga_report(&snapshot(0.3, 0.2, 60, 300.0), &queue, &config, false);

        assert!(keep);
        let events = queue.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            AnalyticsCommand::TrackEvent {
                category: "Reading".into(),
                action: "Progress".into(),
                label: "30%".into(),
                value: 60,
            }
        );
    }

    #[test]
    fn single_sample_completion_is_parenthesized_and_continues() {
        let queue = AnalyticsQueue::new();
        let config = PolicyConfig::default();

        let keep = ga_report(&snapshot(1.0, 0.0, 5, 12000.0), &queue, &config, false);

        assert!(keep);
        let events = queue.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            AnalyticsCommand::TrackEvent { label, .. } if label == "(100%)"
        ));
    }

    #[test]
    fn confirmed_completion_classifies_reader_and_stops() {
        let queue = AnalyticsQueue::new();
        let config = PolicyConfig::default();

        // 1000 words over 120s at full progress: 500 WPM, not above threshold.
        let keep = ga_report(&snapshot(1.0, 0.9, 120, 500.0), &queue, &config, false);

        assert!(!keep);
        let events = queue.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            AnalyticsCommand::TrackEvent { label, value, .. } if label == "100%" && *value == 120
        ));
        assert_eq!(
            events[1],
            AnalyticsCommand::SetCustomVar {
                slot: 5,
                name: "ReaderType".into(),
                value: "Reader".into(),
                scope: 3,
            }
        );
    }

    #[test]
    fn fast_completion_is_a_scanner() {
        let queue = AnalyticsQueue::new();
        let config = PolicyConfig::default();

        // 1000 words over 60s: 1000 WPM.
        let keep = ga_report(&snapshot(1.0, 0.9, 60, 1000.0), &queue, &config, false);

        assert!(!keep);
        let events = queue.drain();
        assert!(matches!(
            &events[1],
            AnalyticsCommand::SetCustomVar { value, .. } if value == "Scanner"
        ));
    }

    #[test]
    fn bucket_beyond_one_still_counts_as_completion() {
        let queue = AnalyticsQueue::new();
        let config = PolicyConfig::default();

        let keep = ga_report(&snapshot(1.2, 0.8, 90, 400.0), &queue, &config, false);

        assert!(!keep);
        let events = queue.drain();
        assert!(matches!(
            &events[0],
            AnalyticsCommand::TrackEvent { label, .. } if label == "100%"
        ));
    }

    #[test]
    fn non_finite_bucket_emits_nothing() {
        let queue = AnalyticsQueue::new();
        let config = PolicyConfig::default();

        assert!(ga_report(
            &snapshot(f64::NAN, 0.0, 10, f64::NAN),
            &queue,
            &config,
            false
        ));
        assert!(queue.is_empty());
    }

    #[test]
    fn debug_mode_logs_instead_of_queueing() {
        let queue = AnalyticsQueue::new();
        let config = PolicyConfig::default();

        let keep = ga_report_debug(&snapshot(0.5, 0.4, 30, 250.0), &queue, &config);

        assert!(keep);
        assert!(queue.is_empty());
    }

    #[test]
    fn classify_threshold_is_exclusive() {
        assert_eq!(ReaderType::classify(500.0, 500.0), ReaderType::Reader);
        assert_eq!(ReaderType::classify(500.1, 500.0), ReaderType::Scanner);
        assert_eq!(ReaderType::classify(f64::INFINITY, 500.0), ReaderType::Scanner);
    }
}
