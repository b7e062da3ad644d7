//! Plain-text clipboard collaborator.
//!
//! Calls block and are not retried. The system clipboard lives outside this
//! crate; [`MemoryClipboard`] is an in-process implementation for tests and
//! for terminals without clipboard access.

use parking_lot::Mutex;

use crate::error::ClipboardError;

pub trait Clipboard: Send + Sync {
    fn get_text(&self) -> Result<String, ClipboardError>;

    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(text.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&self) -> Result<String, ClipboardError> {
        self.contents.lock().clone().ok_or(ClipboardError::Empty)
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }
}
