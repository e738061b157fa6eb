//! Observable events of a capture run.
//!
//! The monitor reports what it does through an [`EventSink`] handed to it at
//! construction, so callers decide where captures and failures end up.

use crate::results::{CapturedUrl, RunSummary};

/// Something the capture loop did or ran into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// A new canonical URL was assigned an id
    Captured(CapturedUrl),

    /// A batch reached the output file
    Persisted { added: usize, total: usize },

    /// Writing the output file failed; `pending` records are kept for the next write
    PersistFailed { pending: usize, reason: String },

    /// One iteration failed but the loop keeps going
    TickFailed { reason: String },

    /// The loop was interrupted and exited cleanly
    Stopped(RunSummary),

    /// The renderer failed and the loop gave up
    Failed { reason: String },
}

/// Receiver of capture events
pub trait EventSink: Send {
    fn emit(&mut self, event: CaptureEvent);
}

/// Prints captured URLs to stdout and logs everything else
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::Captured(item) => {
                println!("New URL captured (ID {}): {}", item.id, item.url);
            }
            CaptureEvent::Persisted { added, total } => {
                ::log::debug!("Persisted {} new URLs, {} stored in total", added, total);
            }
            CaptureEvent::PersistFailed { pending, reason } => {
                ::log::error!(
                    "Failed to persist captured URLs ({} waiting for the next write): {}",
                    pending,
                    reason
                );
            }
            CaptureEvent::TickFailed { reason } => {
                ::log::error!("Error reading the page: {}", reason);
            }
            CaptureEvent::Stopped(summary) => {
                ::log::info!(
                    "Real-time monitoring stopped by user after {} checks; captured {} URLs",
                    summary.ticks,
                    summary.captured
                );
            }
            CaptureEvent::Failed { reason } => {
                ::log::error!("Real-time monitoring aborted: {}", reason);
            }
        }
    }
}

/// Keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<CaptureEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of all `Captured` events, in emission order
    pub fn captured(&self) -> Vec<CapturedUrl> {
        self.events
            .iter()
            .filter_map(|event| match event {
                CaptureEvent::Captured(item) => Some(item.clone()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: CaptureEvent) {
        self.events.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: CaptureEvent) {
        (**self).emit(event);
    }
}
