//! Rewindable file writer
//!
//! Nothing touches the filesystem until the first write or flush. The first
//! open may append to existing content; every open after a [`rewind`]
//! truncates, so the file starts over.
//!
//! [`rewind`]: RewindableFileWriter::rewind

use crate::core::sync::handle_mutex_poison;
use crate::output::error::{OutputError, OutputResult};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct State {
    append_next: bool,
    closed: bool,
    current: Option<BufWriter<File>>,
}

/// Lazily opened, rewindable, buffered file writer
///
/// All state sits behind one mutex, so a shared reference may be written
/// from several threads.
#[derive(Debug)]
pub struct RewindableFileWriter {
    path: PathBuf,
    state: Mutex<State>,
}

impl RewindableFileWriter {
    /// Writer that truncates the file on first open
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_initial_append(path, false)
    }

    /// Writer whose first open appends when `initial_append` is set
    pub fn with_initial_append(path: impl AsRef<Path>, initial_append: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            state: Mutex::new(State {
                append_next: initial_append,
                closed: false,
                current: None,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> OutputResult<bool> {
        Ok(self.lock()?.closed)
    }

    pub fn write_byte(&self, byte: u8) -> OutputResult<()> {
        self.write_range(&[byte], 0, 1)
    }

    pub fn write_bytes(&self, buf: &[u8]) -> OutputResult<()> {
        self.write_range(buf, 0, buf.len())
    }

    /// Write `len` bytes of `buf` starting at `offset`
    pub fn write_range(&self, buf: &[u8], offset: usize, len: usize) -> OutputResult<()> {
        let end = offset.checked_add(len).ok_or(OutputError::InvalidRange)?;
        let bytes = buf.get(offset..end).ok_or(OutputError::InvalidRange)?;

        let mut state = self.lock()?;
        let writer = self.current(&mut state)?;
        writer.write_all(bytes).map_err(|e| self.write_error(e))
    }

    pub fn flush(&self) -> OutputResult<()> {
        let mut state = self.lock()?;
        let writer = self.current(&mut state)?;
        writer.flush().map_err(|e| self.write_error(e))
    }

    /// Close the current handle; the next write starts the file over
    pub fn rewind(&self) -> OutputResult<()> {
        let mut state = self.lock()?;
        self.close_current(&mut state)
    }

    /// Close the stream for good; closing twice does nothing
    ///
    /// The stream only counts as closed once the final flush succeeded.
    pub fn close(&self) -> OutputResult<()> {
        let mut state = self.lock()?;
        if state.closed {
            return Ok(());
        }
        self.close_current(&mut state)?;
        state.closed = true;
        Ok(())
    }

    fn lock(&self) -> OutputResult<MutexGuard<'_, State>> {
        handle_mutex_poison(self.state.lock(), OutputError::synchronisation)
    }

    fn current<'a>(&self, state: &'a mut State) -> OutputResult<&'a mut BufWriter<File>> {
        if state.closed {
            return Err(OutputError::Closed { name: self.name() });
        }
        if state.current.is_none() {
            let file = self.open(state.append_next)?;
            state.append_next = false;
            state.current = Some(BufWriter::new(file));
        }
        state
            .current
            .as_mut()
            .ok_or_else(|| OutputError::Closed { name: self.name() })
    }

    fn open(&self, append: bool) -> OutputResult<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| OutputError::Open {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        log::trace!(
            "opening {} ({})",
            self.path.display(),
            if append { "append" } else { "truncate" }
        );
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        options.open(&self.path).map_err(|e| self.open_error(e))
    }

    fn close_current(&self, state: &mut State) -> OutputResult<()> {
        if let Some(mut writer) = state.current.take() {
            writer.flush().map_err(|e| self.write_error(e))?;
        }
        Ok(())
    }

    fn open_error(&self, source: io::Error) -> OutputError {
        OutputError::Open {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: io::Error) -> OutputError {
        OutputError::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl Write for &RewindableFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        RewindableFileWriter::flush(self)?;
        Ok(())
    }
}

impl Write for RewindableFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        RewindableFileWriter::flush(self)?;
        Ok(())
    }
}

impl Drop for RewindableFileWriter {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("Failed to close {}: {}", self.path.display(), e);
        }
    }
}
