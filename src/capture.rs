//! Frame capture to numbered files
//!
//! A [`FrameRecorder`] dumps the rendered terminal buffer as plain text after
//! every completed step: `frame_00000.txt`, `frame_00001.txt`, …  Each
//! recording session starts by clearing old frames from the directory.
//!
//! Capture is fire-and-forget.  Callers log a [`CaptureError`] and move on;
//! nothing here ever touches the sieve state.

use ratatui::buffer::Buffer;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const FRAME_PREFIX: &str = "frame_";
const FRAME_EXTENSION: &str = "txt";

/// Errors raised while writing frames
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("frame capture I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no recording session is active")]
    NotRecording,
}

/// Writes numbered frame files into one directory
#[derive(Debug)]
pub struct FrameRecorder {
    dir: PathBuf,
    next_index: usize,
    recording: bool,
}

impl FrameRecorder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FrameRecorder {
            dir: dir.into(),
            next_index: 0,
            recording: false,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Frames written in the current (or last) session
    pub fn frames_written(&self) -> usize {
        self.next_index
    }

    /// Create the directory, remove old frames and restart numbering at 0
    pub fn begin_session(&mut self) -> Result<(), CaptureError> {
        fs::create_dir_all(&self.dir).map_err(|source| self.io_error(&self.dir, source))?;

        let entries = fs::read_dir(&self.dir).map_err(|source| self.io_error(&self.dir, source))?;
        for entry in entries {
            let path = entry.map_err(|source| self.io_error(&self.dir, source))?.path();
            if is_frame_file(&path) {
                fs::remove_file(&path).map_err(|source| self.io_error(&path, source))?;
            }
        }

        self.next_index = 0;
        self.recording = true;
        info!(dir = %self.dir.display(), "recording session started");
        Ok(())
    }

    /// Stop recording; later captures are rejected until the next session
    pub fn end_session(&mut self) {
        if self.recording {
            info!(frames = self.next_index, "recording session stopped");
        }
        self.recording = false;
    }

    /// Write `buffer` as the next frame and return its path
    pub fn capture(&mut self, buffer: &Buffer) -> Result<PathBuf, CaptureError> {
        if !self.recording {
            return Err(CaptureError::NotRecording);
        }

        let path = self.frame_path(self.next_index);
        fs::write(&path, buffer_to_text(buffer)).map_err(|source| self.io_error(&path, source))?;
        self.next_index += 1;
        Ok(path)
    }

    /// Path of frame number `index`
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir
            .join(format!("{FRAME_PREFIX}{index:05}.{FRAME_EXTENSION}"))
    }

    fn io_error(&self, path: &Path, source: io::Error) -> CaptureError {
        CaptureError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn is_frame_file(path: &Path) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(FRAME_PREFIX));
    let ext_matches = path.extension().is_some_and(|ext| ext == FRAME_EXTENSION);
    name_matches && ext_matches && path.is_file()
}

/// Render a buffer as lines of text, trailing spaces trimmed
pub fn buffer_to_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::with_capacity((area.width as usize + 1) * area.height as usize);
    for y in area.top()..area.bottom() {
        let mut line = String::with_capacity(area.width as usize);
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
