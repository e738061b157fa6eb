//! In-memory renderer used by the crawler tests.

use crate::error::RenderError;
use crate::renderer::{Attribute, PageRenderer};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::watch;

/// What one call to `anchors` sees
pub enum Frame {
    Anchors(Vec<Attribute>),
    Fail(RenderError),
}

/// Renderer that plays back a fixed sequence of DOM states.
///
/// Each `anchors` call consumes one frame; once the script is exhausted the
/// last DOM state is repeated. If a stop sender is attached it fires as soon
/// as the last frame has been handed out.
pub struct ScriptedRenderer {
    frames: VecDeque<Frame>,
    current: Vec<Attribute>,
    current_url: String,
    stop: Option<watch::Sender<bool>>,
    pub navigation_errors: HashMap<String, RenderError>,
    pub sources: HashMap<String, String>,
    pub navigations: Vec<String>,
    pub closed: bool,
}

impl ScriptedRenderer {
    pub fn new(frames: Vec<Vec<Attribute>>) -> Self {
        Self::with_frames(frames.into_iter().map(Frame::Anchors).collect())
    }

    pub fn failing(error: RenderError) -> Self {
        Self::with_frames(vec![Frame::Fail(error)])
    }

    pub fn with_frames(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
            current: Vec::new(),
            current_url: "about:blank".to_string(),
            stop: None,
            navigation_errors: HashMap::new(),
            sources: HashMap::new(),
            navigations: Vec::new(),
            closed: false,
        }
    }

    /// Fire `stop` once every frame has been seen
    pub fn stop_when_done(mut self, stop: watch::Sender<bool>) -> Self {
        self.stop = Some(stop);
        self
    }
}

/// `Attribute::Present` for each URL
pub fn links(urls: &[&str]) -> Vec<Attribute> {
    urls.iter()
        .map(|url| Attribute::Present(url.to_string()))
        .collect()
}

#[async_trait]
impl PageRenderer for ScriptedRenderer {
    type Handle = usize;

    async fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<(), RenderError> {
        self.navigations.push(url.to_string());
        self.current_url = url.to_string();
        match self.navigation_errors.remove(url) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn anchors(&mut self) -> Result<Vec<usize>, RenderError> {
        let frame = self.frames.pop_front();
        if self.frames.is_empty() {
            if let Some(stop) = &self.stop {
                let _ = stop.send(true);
            }
        }

        match frame {
            Some(Frame::Anchors(anchors)) => self.current = anchors,
            Some(Frame::Fail(err)) => return Err(err),
            None => {}
        }
        Ok((0..self.current.len()).collect())
    }

    async fn read_href(&mut self, handle: &usize) -> Result<Attribute, RenderError> {
        Ok(self
            .current
            .get(*handle)
            .cloned()
            .unwrap_or(Attribute::Stale))
    }

    async fn current_url(&mut self) -> Result<String, RenderError> {
        Ok(self.current_url.clone())
    }

    async fn source(&mut self) -> Result<String, RenderError> {
        self.sources
            .get(&self.current_url)
            .cloned()
            .ok_or_else(|| RenderError::Command(format!("no source for {}", self.current_url)))
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        self.closed = true;
        Ok(())
    }
}
