//! Scan decoder: turns raw frames into candidate code strings.
//!
//! The decode loop runs continuously and a steady camera keeps producing
//! frames of the same code, so the decoder emits at most one decode event
//! per distinguishable frame content: consecutive identical frames collapse
//! into a single event. Submission-level duplicate suppression is the
//! guard's job, not the decoder's.

use crate::errors::AppResult;
use std::collections::VecDeque;
use std::io::BufRead;

/// Where frames come from. The kiosk feeds this from stdin lines; tests
/// feed it from memory. A real camera backend would sit behind the same
/// trait.
pub trait FrameSource {
    /// Next raw frame content, or None once the source is closed.
    fn next_frame(&mut self) -> AppResult<Option<String>>;
}

/// Frame source over any buffered reader, one frame per non-empty line.
pub struct LineFrameSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> LineFrameSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> FrameSource for LineFrameSource<R> {
    fn next_frame(&mut self) -> AppResult<Option<String>> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self.reader.read_line(&mut line)?;
            if n == 0 {
                return Ok(None);
            }

            let frame = line.trim();
            if !frame.is_empty() {
                return Ok(Some(frame.to_string()));
            }
        }
    }
}

/// In-memory frame source for tests and scripted runs.
pub struct VecFrameSource {
    frames: VecDeque<String>,
}

impl VecFrameSource {
    pub fn new<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            frames: frames.into_iter().map(Into::into).collect(),
        }
    }
}

impl FrameSource for VecFrameSource {
    fn next_frame(&mut self) -> AppResult<Option<String>> {
        Ok(self.frames.pop_front())
    }
}

/// Owns the frame-source lifecycle and collapses runs of identical frames.
pub struct ScanDecoder<S: FrameSource> {
    source: S,
    last_content: Option<String>,
}

impl<S: FrameSource> ScanDecoder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            last_content: None,
        }
    }

    /// Next decode event: the first frame whose content differs from the
    /// previous frame. None once the source is exhausted.
    pub fn next_code(&mut self) -> AppResult<Option<String>> {
        while let Some(frame) = self.source.next_frame()? {
            if self.last_content.as_deref() == Some(frame.as_str()) {
                continue;
            }
            self.last_content = Some(frame.clone());
            return Ok(Some(frame));
        }
        Ok(None)
    }

    /// Re-arm the decoder after a retryable failure, so the user can hold
    /// up the same code again ("try again" affordance).
    pub fn reset(&mut self) {
        self.last_content = None;
    }
}
