//! Watches a rendered page and records every new restaurant URL it links to.
//!
//! A [`Monitor`] starts `Idle`, becomes `Running` on [`Monitor::start`] and ends
//! either `Stopped` (interrupted) or `Failed` (the renderer died). Each tick reads
//! the page's links, keeps the canonical restaurant URLs not seen before in this
//! run, numbers them and appends them to the output file. The stop signal is only
//! looked at between ticks, so a tick is never cut off halfway through a write,
//! but the sleep between ticks ends as soon as the signal arrives.

use crate::crawlers::links::extract_links;
use crate::error::{CaptureError, RenderError};
use crate::events::{CaptureEvent, EventSink};
use crate::filter::RestaurantFilter;
use crate::renderer::PageRenderer;
use crate::results::{CapturedUrl, RunSummary};
use crate::store::JsonStore;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::watch;

/// Lifecycle of a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Running,
    Stopped,
    Failed,
}

/// Polling loop over a single rendered page
pub struct Monitor<R, S> {
    renderer: R,
    filter: RestaurantFilter,
    store: JsonStore<CapturedUrl>,
    sink: S,
    seen: HashSet<String>,
    // Records whose write failed; retried on every tick until written
    pending: Vec<CapturedUrl>,
    next_id: u64,
    load_timeout: Duration,
    state: MonitorState,
    ticks: u64,
    captured: u64,
}

impl<R, S> Monitor<R, S>
where
    R: PageRenderer,
    S: EventSink,
{
    /// Create an idle monitor writing to `store`.
    ///
    /// The store is read once so a corrupt file is reported up front; its
    /// contents are not used unless [`Monitor::with_resume`] is enabled.
    pub fn new(
        renderer: R,
        filter: RestaurantFilter,
        store: JsonStore<CapturedUrl>,
        sink: S,
    ) -> Self {
        let existing = store.load();
        ::log::info!(
            "Output file {} holds {} records",
            store.path().display(),
            existing.len()
        );

        Self {
            renderer,
            filter,
            store,
            sink,
            seen: HashSet::new(),
            pending: Vec::new(),
            next_id: 1,
            load_timeout: Duration::from_secs(10),
            state: MonitorState::Idle,
            ticks: 0,
            captured: 0,
        }
    }

    /// Set how long to wait for the target page to show a link
    pub fn with_load_timeout(mut self, timeout_seconds: u64) -> Self {
        self.load_timeout = Duration::from_secs(timeout_seconds);
        self
    }

    /// Seed the seen-set and id counter from the output file.
    ///
    /// Without this every run numbers from 1 and announces URLs captured by
    /// earlier runs again.
    pub fn with_resume(mut self, resume: bool) -> Self {
        if resume {
            let records = self.store.load();
            self.seen
                .extend(records.iter().map(|record| record.url.clone()));
            let max_id = records.iter().map(|record| record.id).max().unwrap_or(0);
            self.next_id = self.next_id.max(max_id.saturating_add(1));
            if max_id == u64::MAX {
                ::log::warn!("Stored ids are exhausted; new URLs will reuse id {}", u64::MAX);
            }
            ::log::info!(
                "Resuming after {} stored URLs, next id is {}",
                records.len(),
                self.next_id
            );
        }
        self
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            ticks: self.ticks,
            captured: self.captured,
            next_id: self.next_id,
        }
    }

    /// Load `target_url` and poll it every `poll_interval` until Ctrl-C.
    pub async fn start(
        &mut self,
        target_url: &str,
        poll_interval: Duration,
    ) -> Result<RunSummary, CaptureError> {
        let (stop_tx, stop_rx) = watch::channel(false);
        let interrupt = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    ::log::info!("Received interrupt signal");
                    let _ = stop_tx.send(true);
                }
                Err(e) => ::log::warn!("Unable to listen for interrupt signal: {}", e),
            }
        });

        let result = self.start_with_stop(target_url, poll_interval, stop_rx).await;
        interrupt.abort();
        result
    }

    pub(crate) async fn start_with_stop(
        &mut self,
        target_url: &str,
        poll_interval: Duration,
        stop: watch::Receiver<bool>,
    ) -> Result<RunSummary, CaptureError> {
        if self.state != MonitorState::Idle {
            return Err(CaptureError::NotIdle);
        }

        self.load_page(target_url).await?;
        self.run(poll_interval, stop).await
    }

    async fn load_page(&mut self, url: &str) -> Result<(), RenderError> {
        match self.renderer.navigate(url, self.load_timeout).await {
            Ok(()) => Ok(()),
            Err(e @ RenderError::Timeout { .. }) => {
                ::log::error!("Error waiting for page load: {}", e);
                Ok(())
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    async fn run(
        &mut self,
        poll_interval: Duration,
        mut stop: watch::Receiver<bool>,
    ) -> Result<RunSummary, CaptureError> {
        self.state = MonitorState::Running;
        ::log::info!("Starting real-time URL monitoring.");

        loop {
            if *stop.borrow() {
                break;
            }

            match self.tick().await {
                Ok(_) => {}
                Err(e) if e.is_fatal() => {
                    self.fail(&e);
                    return Err(e.into());
                }
                Err(e) => self.sink.emit(CaptureEvent::TickFailed {
                    reason: e.to_string(),
                }),
            }

            let sleep = tokio::time::sleep(poll_interval);
            tokio::pin!(sleep);
            let stop_gone = tokio::select! {
                _ = &mut sleep => false,
                changed = stop.changed() => changed.is_err(),
            };
            // No stop can arrive any more; sit out the interval
            if stop_gone {
                sleep.await;
            }
        }

        self.state = MonitorState::Stopped;
        if !self.pending.is_empty() {
            ::log::error!(
                "{} captured URLs were never written to {}",
                self.pending.len(),
                self.store.path().display()
            );
        }

        let summary = self.summary();
        self.sink.emit(CaptureEvent::Stopped(summary));
        Ok(summary)
    }

    /// One pass over the current page. Returns the URLs captured by this pass.
    pub async fn tick(&mut self) -> Result<Vec<CapturedUrl>, RenderError> {
        self.ticks += 1;

        let links = extract_links(&mut self.renderer).await?;
        let restaurants = self.filter.filter(&links);

        let mut batch = Vec::new();
        for url in restaurants {
            if self.seen.contains(&url) {
                continue;
            }
            let item = CapturedUrl::new(self.next_id, url);
            self.next_id = self.next_id.saturating_add(1);
            self.sink.emit(CaptureEvent::Captured(item.clone()));
            batch.push(item);
        }

        if !batch.is_empty() {
            self.captured += batch.len() as u64;
            self.seen.extend(batch.iter().map(|item| item.url.clone()));
        }
        // Also retries an earlier failed write when nothing new turned up
        if !batch.is_empty() || !self.pending.is_empty() {
            self.persist(&batch);
        }

        match self.renderer.current_url().await {
            Ok(url) => ::log::debug!("Current page: {}", url),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => ::log::debug!("Could not read current page URL: {}", e),
        }

        Ok(batch)
    }

    fn persist(&mut self, batch: &[CapturedUrl]) {
        self.pending.extend_from_slice(batch);
        match self.store.append(&self.pending) {
            Ok(total) => {
                let added = self.pending.len();
                self.pending.clear();
                self.sink.emit(CaptureEvent::Persisted { added, total });
            }
            Err(e) => self.sink.emit(CaptureEvent::PersistFailed {
                pending: self.pending.len(),
                reason: e.to_string(),
            }),
        }
    }

    fn fail(&mut self, error: &RenderError) {
        self.state = MonitorState::Failed;
        self.sink.emit(CaptureEvent::Failed {
            reason: error.to_string(),
        });
    }

    /// Release the browser session
    pub async fn close(&mut self) -> Result<(), RenderError> {
        self.renderer.close().await
    }
}
