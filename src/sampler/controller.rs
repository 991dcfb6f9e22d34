use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::TrackerConfig;
use crate::page::{PageView, ScrollEvent};
use crate::session::{ProgressSnapshot, SessionState};
use crate::words::word_count;

use super::loop_worker::sampling_loop;

/// Reporting callback driven by the sampler. Returns whether it wants to
/// keep being called; returning false once 100% of the article has been
/// scrolled is the usual way to stop reporting.
pub type TrackingCallback = Box<dyn FnMut(&ProgressSnapshot) -> bool + Send>;

/// Owns the debounced sampling task for one tracked content element.
pub struct ReadingTracker {
    page: Arc<dyn PageView>,
    config: TrackerConfig,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    scroll_tx: Option<mpsc::UnboundedSender<ScrollEvent>>,
}

impl ReadingTracker {
    pub fn new(page: Arc<dyn PageView>) -> Self {
        Self::with_config(page, TrackerConfig::default())
    }

    pub fn with_config(page: Arc<dyn PageView>, config: TrackerConfig) -> Self {
        Self {
            page,
            config,
            handle: None,
            cancel_token: None,
            scroll_tx: None,
        }
    }

    /// Resolve `selector`, count the content's words and start the sampling
    /// task.
    ///
    /// A selector resolving to zero or several elements aborts activation
    /// with a warning instead of an error, matching the defensive behavior
    /// expected of an analytics snippet: the page must keep working when
    /// tracking cannot start. Check [`is_active`](Self::is_active) if the
    /// distinction matters.
    pub fn start_tracking(&mut self, callback: TrackingCallback, selector: &str) -> Result<()> {
        if self.handle.is_some() {
            bail!("tracking already active");
        }

        let elements = self.page.query(selector);
        if elements.len() != 1 {
            warn!(
                "found {} content elements for selector {:?}, expected exactly one; tracking not started",
                elements.len(),
                selector
            );
            return Ok(());
        }
        let element = elements.into_iter().next().context("element vanished")?;

        if element.height == 0.0 {
            warn!(
                "content element {:?} has zero height, progress values will be non-finite",
                selector
            );
        }

        let words = word_count(&element.text);
        let session = SessionState::new(Uuid::new_v4().to_string(), selector.to_string(), words);
        info!(
            "tracking session {} started for {:?}: {} words, began at {}",
            session.session_id, selector, words, session.started_at
        );

        let (scroll_tx, scroll_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(sampling_loop(
            session,
            Arc::clone(&self.page),
            self.config.clone(),
            callback,
            scroll_rx,
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.scroll_tx = Some(scroll_tx);
        Ok(())
    }

    /// Sender the host wires its scroll events into. `None` until tracking
    /// has started.
    pub fn scroll_sender(&self) -> Option<mpsc::UnboundedSender<ScrollEvent>> {
        self.scroll_tx.clone()
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Cancel the sampling task and wait for it to finish. The original
    /// browser snippet never unregistered its scroll listener; this is the
    /// explicit teardown for hosts that want one.
    pub async fn stop_tracking(&mut self) -> Result<()> {
        self.scroll_tx = None;

        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("sampling task failed to join")?;
        }
        Ok(())
    }
}
