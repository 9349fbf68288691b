//! In-memory clipboard for tests.
//!
//! Simulates contention (`set_busy_for`) and backend faults so guard and
//! preserve behavior can be checked without an OS clipboard.

use std::sync::Mutex;

use super::{ClipboardError, ClipboardResource};

#[derive(Debug, Default)]
struct State {
    text: Option<String>,
    open: bool,
    busy_remaining: u32,
    busy_io_remaining: u32,
    open_calls: u32,
    close_calls: u32,
    fail_reads: bool,
    fail_writes: bool,
    writes: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    state: Mutex<State>,
}

impl MemoryClipboard {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let cb = Self::default();
        cb.lock().text = Some(text.to_string());
        cb
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Fail the next `n` calls to `open` with [`ClipboardError::Busy`].
    pub fn set_busy_for(&self, n: u32) {
        self.lock().busy_remaining = n;
    }

    /// Let `open` succeed but fail the next `n` reads or writes with
    /// [`ClipboardError::Busy`], as backends that only see contention on
    /// access do.
    pub fn set_busy_io_for(&self, n: u32) {
        self.lock().busy_io_remaining = n;
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Replace the content as another process would, bypassing open/close.
    pub fn set_external(&self, text: Option<&str>) {
        self.lock().text = text.map(str::to_string);
    }

    pub fn text(&self) -> Option<String> {
        self.lock().text.clone()
    }

    pub fn is_open(&self) -> bool {
        self.lock().open
    }

    pub fn open_calls(&self) -> u32 {
        self.lock().open_calls
    }

    pub fn close_calls(&self) -> u32 {
        self.lock().close_calls
    }

    /// Every successful write, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.lock().writes.clone()
    }
}

impl ClipboardResource for MemoryClipboard {
    fn open(&self) -> Result<(), ClipboardError> {
        let mut s = self.lock();
        s.open_calls += 1;
        if s.busy_remaining > 0 {
            s.busy_remaining -= 1;
            return Err(ClipboardError::Busy("held by test".into()));
        }
        if s.open {
            return Err(ClipboardError::Busy("already open".into()));
        }
        s.open = true;
        Ok(())
    }

    fn close(&self) {
        let mut s = self.lock();
        s.close_calls += 1;
        s.open = false;
    }

    fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        let mut s = self.lock();
        if !s.open {
            return Err(ClipboardError::Backend("read while closed".into()));
        }
        if s.busy_io_remaining > 0 {
            s.busy_io_remaining -= 1;
            return Err(ClipboardError::Busy("occupied".into()));
        }
        if s.fail_reads {
            return Err(ClipboardError::Backend("read failed".into()));
        }
        Ok(s.text.clone())
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut s = self.lock();
        if !s.open {
            return Err(ClipboardError::Backend("write while closed".into()));
        }
        if s.busy_io_remaining > 0 {
            s.busy_io_remaining -= 1;
            return Err(ClipboardError::Busy("occupied".into()));
        }
        if s.fail_writes {
            return Err(ClipboardError::Backend("write failed".into()));
        }
        s.text = Some(text.to_string());
        s.writes.push(text.to_string());
        Ok(())
    }
}
