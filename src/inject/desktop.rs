use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;

use super::Desktop;
use crate::common::constants::{keysym, timing};
use crate::input::KeySynth;
use crate::x11::{X11Session, activate_window, get_active_window, is_window_viewable, sync};

/// [`Desktop`] backed by the daemon's main X11 connection
pub struct X11Desktop<'a> {
    session: &'a X11Session,
}

impl<'a> X11Desktop<'a> {
    pub fn new(session: &'a X11Session) -> Self {
        Self { session }
    }

    fn active_window(&self) -> Option<Window> {
        match get_active_window(&self.session.conn, self.session.root(), &self.session.atoms) {
            Ok(window) => window,
            Err(err) => {
                debug!(error = %err, "Failed to read active window");
                None
            }
        }
    }

    fn input_focus(&self) -> Option<Window> {
        let focus = self
            .session
            .conn
            .get_input_focus()
            .ok()?
            .reply()
            .ok()?
            .focus;
        // 0 is None, 1 is PointerRoot
        (focus > 1).then_some(focus)
    }

    fn has_focus(&self, window: Window) -> bool {
        self.active_window() == Some(window) || self.input_focus() == Some(window)
    }

    fn wait_for_focus(&self, window: Window, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.has_focus(window) {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(timing::FOCUS_POLL_INTERVAL);
        }
    }

    fn raise(&self, window: Window) -> Result<()> {
        let conn = &self.session.conn;
        conn.configure_window(
            window,
            &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE),
        )
        .context(format!("Failed to raise window {}", window))?;
        conn.set_input_focus(InputFocus::POINTER_ROOT, window, x11rb::CURRENT_TIME)
            .context(format!("Failed to set input focus to window {}", window))?;
        conn.flush()
            .context("Failed to flush X11 connection after raise")?;
        sync(conn)
    }
}

impl Desktop for X11Desktop<'_> {
    fn erase_previous_char(&mut self) -> Result<()> {
        KeySynth::new(self.session).tap_key(keysym::BACKSPACE)
    }

    fn focused_window(&mut self) -> Option<Window> {
        self.active_window().or_else(|| self.input_focus())
    }

    #[tracing::instrument(skip(self))]
    fn focus_window(&mut self, window: Window) -> Result<bool> {
        if !is_window_viewable(&self.session.conn, window)? {
            debug!(window = window, "Target window is not viewable");
            return Ok(false);
        }

        activate_window(&self.session.conn, self.session.root(), &self.session.atoms, window)?;

        if self.wait_for_focus(window, timing::FOCUS_WAIT_SHORT) {
            return Ok(true);
        }

        debug!(window = window, "Focus not granted yet, raising again");
        self.raise(window)?;
        let focused = self.wait_for_focus(window, timing::FOCUS_WAIT_LONG);
        if !focused {
            warn!(window = window, "Target window never became active");
        }
        Ok(focused)
    }

    fn paste(&mut self) -> Result<()> {
        thread::sleep(timing::PASTE_SETTLE);
        KeySynth::new(self.session).tap_chord(&[keysym::SHIFT_L], keysym::INSERT)
    }
}
