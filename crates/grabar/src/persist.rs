//! Throttled persistence of the displayed document.
//!
//! At most one write per throttle window: content set while a window is open
//! replaces the pending text and goes out when the window closes. The writer
//! is an explicit resource owned by whoever drives the session.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::result::GrabarResult;

/// Coalesces frequent snapshots into throttled file writes
#[derive(Debug)]
pub struct ThrottledWriter {
    path: Option<PathBuf>,
    pending: Option<String>,
    deadline: Option<Instant>,
    window: Duration,
    writes: usize,
}

impl ThrottledWriter {
    /// Create a writer with the given throttle window
    #[must_use]
    pub const fn new(throttle_ms: u64) -> Self {
        Self {
            path: None,
            pending: None,
            deadline: None,
            window: Duration::from_millis(throttle_ms),
            writes: 0,
        }
    }

    /// Current target file
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of writes performed
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Whether content is waiting to be written
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Change the target file, flushing pending content to the old one first
    pub fn set_path(&mut self, path: Option<PathBuf>) -> GrabarResult<()> {
        self.flush()?;
        self.path = path;
        Ok(())
    }

    /// Queue content; ignored when no path is set
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.set_content_at(text, Instant::now());
    }

    /// Queue content as of `now`
    pub fn set_content_at(&mut self, text: impl Into<String>, now: Instant) {
        if self.path.is_none() {
            return;
        }
        self.pending = Some(text.into());
        if self.deadline.is_none() {
            self.deadline = Some(now + self.window);
        }
    }

    /// Write if the window has elapsed; returns whether a write happened
    pub fn poll(&mut self) -> GrabarResult<bool> {
        self.poll_at(Instant::now())
    }

    /// Write if the window has elapsed as of `now`
    pub fn poll_at(&mut self, now: Instant) -> GrabarResult<bool> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.flush(),
            _ => Ok(false),
        }
    }

    /// Write pending content immediately; returns whether a write happened.
    ///
    /// On failure the pending content is kept so a later flush can retry.
    pub fn flush(&mut self) -> GrabarResult<bool> {
        let (Some(path), Some(text)) = (self.path.as_ref(), self.pending.as_ref()) else {
            self.deadline = None;
            return Ok(false);
        };
        fs::write(path, text)?;
        self.pending = None;
        self.deadline = None;
        self.writes += 1;
        tracing::trace!(path = %path.display(), writes = self.writes, "persisted source");
        Ok(true)
    }
}

impl Default for ThrottledWriter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_THROTTLE_MS)
    }
}

impl Drop for ThrottledWriter {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "failed to persist pending source on drop");
        }
    }
}
