//! Clipboard access used around an injection

use std::os::fd::RawFd;

use anyhow::Result;
use tracing::debug;

use crate::x11::selection::{Selection, SelectionFormat, Selections};

/// Owned copy of every representation the clipboard offered at snapshot time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardSnapshot {
    Empty,
    Formats(Vec<SelectionFormat>),
}

impl ClipboardSnapshot {
    pub fn from_formats(formats: Vec<SelectionFormat>) -> Self {
        if formats.is_empty() {
            Self::Empty
        } else {
            Self::Formats(formats)
        }
    }

    pub fn formats(&self) -> &[SelectionFormat] {
        match self {
            Self::Empty => &[],
            Self::Formats(formats) => formats,
        }
    }
}

pub trait ClipboardBackend {
    /// Full copy of the CLIPBOARD selection
    fn snapshot(&mut self) -> Result<ClipboardSnapshot>;

    /// Puts `text` on CLIPBOARD and PRIMARY
    fn set_text(&mut self, text: &str) -> Result<()>;

    /// Puts a snapshot back on CLIPBOARD; `Empty` clears it
    fn restore(&mut self, snapshot: &ClipboardSnapshot) -> Result<()>;
}

/// Clipboard served by our own selection owner window
pub struct X11Clipboard {
    selections: Selections,
}

impl X11Clipboard {
    pub fn open() -> Result<Self> {
        Ok(Self {
            selections: Selections::open()?,
        })
    }

    pub fn raw_fd(&self) -> RawFd {
        self.selections.raw_fd()
    }

    /// Serves pending requests for selections we own
    pub fn dispatch_pending(&mut self) -> Result<()> {
        self.selections.dispatch_pending()
    }
}

impl ClipboardBackend for X11Clipboard {
    fn snapshot(&mut self) -> Result<ClipboardSnapshot> {
        let formats = self.selections.snapshot(Selection::Clipboard)?;
        debug!(
            targets = ?formats.iter().map(|f| f.target.as_str()).collect::<Vec<_>>(),
            "Clipboard snapshot"
        );
        Ok(ClipboardSnapshot::from_formats(formats))
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.selections.set_text(text)
    }

    fn restore(&mut self, snapshot: &ClipboardSnapshot) -> Result<()> {
        // Requests queued while the glyph was on the clipboard get the glyph
        self.selections.dispatch_pending()?;
        self.selections
            .restore(Selection::Clipboard, snapshot.formats())
    }
}

/// In-memory clipboard with the same text targets as the X11 one
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub clipboard: Vec<SelectionFormat>,
    pub primary: Vec<SelectionFormat>,
    pub fail_snapshot: bool,
}

#[cfg(test)]
impl ClipboardBackend for MemoryClipboard {
    fn snapshot(&mut self) -> Result<ClipboardSnapshot> {
        if self.fail_snapshot {
            anyhow::bail!("clipboard owner did not answer");
        }
        Ok(ClipboardSnapshot::from_formats(self.clipboard.clone()))
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard = crate::x11::selection::text_formats(text);
        self.primary = crate::x11::selection::text_formats(text);
        Ok(())
    }

    fn restore(&mut self, snapshot: &ClipboardSnapshot) -> Result<()> {
        self.clipboard = snapshot.formats().to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_formats_become_empty_sentinel() {
        assert_eq!(ClipboardSnapshot::from_formats(Vec::new()), ClipboardSnapshot::Empty);
        assert!(ClipboardSnapshot::Empty.formats().is_empty());

        let formats = vec![SelectionFormat::text("UTF8_STRING", "UTF8_STRING", b"x".to_vec())];
        let snapshot = ClipboardSnapshot::from_formats(formats.clone());
        assert_eq!(snapshot.formats(), formats.as_slice());
    }
}
