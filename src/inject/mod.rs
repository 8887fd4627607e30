//! Injection of a chosen glyph into the window that had focus when the gesture committed

pub mod clipboard;
mod desktop;

use std::time::Instant;

use anyhow::{Result, bail};
use tracing::{debug, info, warn};
use x11rb::protocol::xproto::Window;

pub use clipboard::{ClipboardBackend, ClipboardSnapshot, X11Clipboard};
pub use desktop::X11Desktop;

use crate::common::constants::timing;

/// Window and keyboard side effects the gesture machine and the injector rely on
pub trait Desktop {
    /// Synthesizes one BackSpace in the focused window
    fn erase_previous_char(&mut self) -> Result<()>;

    /// Window that currently has input focus, if the window manager reports one
    fn focused_window(&mut self) -> Option<Window>;

    /// Activates, raises and focuses `window`. `Ok(false)` when it is not viewable
    /// or did not become the active window in time.
    fn focus_window(&mut self, window: Window) -> Result<bool>;

    /// Shift+Insert into the focused window
    fn paste(&mut self) -> Result<()>;
}

/// Clipboard contents to put back once `deadline` passes
#[derive(Debug)]
pub struct PendingRestore {
    pub deadline: Instant,
    snapshot: ClipboardSnapshot,
}

pub struct Injector<B: ClipboardBackend> {
    clipboard: B,
}

impl<B: ClipboardBackend> Injector<B> {
    pub fn new(clipboard: B) -> Self {
        Self { clipboard }
    }

    pub fn clipboard_mut(&mut self) -> &mut B {
        &mut self.clipboard
    }

    /// Replaces the character before the cursor of `window` with `text`.
    ///
    /// Every failure after the snapshot only skips the remaining steps; the returned
    /// restore must always be passed to [`Injector::restore`].
    #[tracing::instrument(skip(self, desktop))]
    pub fn inject<D: Desktop>(
        &mut self,
        desktop: &mut D,
        text: &str,
        window: Option<Window>,
    ) -> Option<PendingRestore> {
        let snapshot = match self.clipboard.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "Failed to snapshot clipboard, not injecting");
                return None;
            }
        };

        match self.replace_char(desktop, text, window) {
            Ok(true) => info!(text = %text, "Accent injected"),
            Ok(false) => debug!("Target window did not take focus, nothing injected"),
            Err(err) => debug!(error = %err, "Injection aborted"),
        }

        Some(PendingRestore {
            deadline: Instant::now() + timing::CLIPBOARD_RESTORE_DELAY,
            snapshot,
        })
    }

    fn replace_char<D: Desktop>(
        &mut self,
        desktop: &mut D,
        text: &str,
        window: Option<Window>,
    ) -> Result<bool> {
        self.clipboard.set_text(text)?;

        let Some(window) = window else {
            bail!("No window had focus when the gesture committed");
        };
        if !desktop.focus_window(window)? {
            return Ok(false);
        }

        desktop.erase_previous_char()?;
        desktop.paste()?;
        Ok(true)
    }

    pub fn restore(&mut self, pending: PendingRestore) {
        match self.clipboard.restore(&pending.snapshot) {
            Ok(()) => debug!(
                formats = pending.snapshot.formats().len(),
                "Clipboard restored"
            ),
            Err(err) => warn!(error = %err, "Failed to restore clipboard"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::clipboard::MemoryClipboard;
    use super::testing::FakeDesktop;
    use super::*;
    use crate::x11::selection::SelectionFormat;

    const TARGET: Window = 0x0480_0007;

    fn multi_format_clipboard() -> Vec<SelectionFormat> {
        vec![
            SelectionFormat::text("UTF8_STRING", "UTF8_STRING", b"hello".to_vec()),
            SelectionFormat::text("text/html", "text/html", b"<b>hello</b>".to_vec()),
            SelectionFormat::text(
                "text/uri-list",
                "text/uri-list",
                b"https://example.org/\r\n".to_vec(),
            ),
            SelectionFormat {
                target: "application/x-color".to_string(),
                type_name: "application/x-color".to_string(),
                format: 16,
                data: vec![0xff, 0xff, 0, 0, 0, 0, 0xff, 0xff],
            },
        ]
    }

    fn round_trip(before: Vec<SelectionFormat>) {
        let mut injector = Injector::new(MemoryClipboard {
            clipboard: before.clone(),
            ..MemoryClipboard::default()
        });
        let mut desktop = FakeDesktop::default();

        let pending = injector
            .inject(&mut desktop, "é", Some(TARGET))
            .expect("snapshot was taken");
        assert_eq!(desktop.pasted, 1);
        assert_eq!(
            injector.clipboard_mut().clipboard[0].data,
            "é".as_bytes().to_vec()
        );

        injector.restore(pending);
        assert_eq!(injector.clipboard_mut().clipboard, before);
    }

    #[test]
    fn test_restore_round_trips_empty_clipboard() {
        round_trip(Vec::new());
    }

    #[test]
    fn test_restore_round_trips_text_clipboard() {
        round_trip(vec![SelectionFormat::text(
            "UTF8_STRING",
            "UTF8_STRING",
            b"plain".to_vec(),
        )]);
    }

    #[test]
    fn test_restore_round_trips_multi_format_clipboard() {
        round_trip(multi_format_clipboard());
    }

    #[test]
    fn test_injection_focuses_then_erases_then_pastes() {
        let mut injector = Injector::new(MemoryClipboard::default());
        let mut desktop = FakeDesktop::focused_on(1);

        let pending = injector.inject(&mut desktop, "ë", Some(TARGET));

        assert!(pending.is_some());
        assert_eq!(desktop.focus_requests, vec![TARGET]);
        assert_eq!(desktop.erased, 1);
        assert_eq!(desktop.pasted, 1);
        assert_eq!(
            injector.clipboard_mut().primary[0].data,
            "ë".as_bytes().to_vec()
        );
    }

    #[test]
    fn test_no_keystrokes_when_focus_is_not_granted() {
        let before = multi_format_clipboard();
        let mut injector = Injector::new(MemoryClipboard {
            clipboard: before.clone(),
            ..MemoryClipboard::default()
        });
        let mut desktop = FakeDesktop {
            refuse_focus: true,
            ..FakeDesktop::default()
        };

        let pending = injector
            .inject(&mut desktop, "é", Some(TARGET))
            .expect("restore is scheduled once a snapshot exists");
        assert_eq!(desktop.erased, 0);
        assert_eq!(desktop.pasted, 0);

        injector.restore(pending);
        assert_eq!(injector.clipboard_mut().clipboard, before);
    }

    #[test]
    fn test_missing_window_still_schedules_restore() {
        let mut injector = Injector::new(MemoryClipboard::default());
        let mut desktop = FakeDesktop::default();

        let pending = injector.inject(&mut desktop, "é", None);

        assert!(pending.is_some());
        assert!(desktop.focus_requests.is_empty());
        assert_eq!(desktop.pasted, 0);
    }

    #[test]
    fn test_failed_snapshot_injects_nothing() {
        let mut injector = Injector::new(MemoryClipboard {
            fail_snapshot: true,
            ..MemoryClipboard::default()
        });
        let mut desktop = FakeDesktop::default();

        assert!(injector.inject(&mut desktop, "é", Some(TARGET)).is_none());
        assert!(desktop.focus_requests.is_empty());
        assert!(injector.clipboard_mut().clipboard.is_empty());
    }
}
