//! XTEST key synthesis that stays out of the way of physically held modifiers

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;
use x11rb::protocol::xproto::{ConnectionExt as _, KEY_PRESS_EVENT, KEY_RELEASE_EVENT, Keycode, Keysym};
use x11rb::protocol::xtest::ConnectionExt as _;

use crate::common::constants::{keysym, timing};
use crate::x11::{X11Session, sync};

/// Whether `keycode` is down in a `QueryKeymap` bit vector
pub fn is_key_down(keys: &[u8; 32], keycode: Keycode) -> bool {
    keys[usize::from(keycode / 8)] & (1 << (keycode % 8)) != 0
}

pub struct KeySynth<'a> {
    session: &'a X11Session,
}

impl<'a> KeySynth<'a> {
    pub fn new(session: &'a X11Session) -> Self {
        Self { session }
    }

    /// Whether any Shift, Control, Meta, Alt, Super or Hyper key is physically down
    pub fn modifiers_pressed(&self) -> Result<bool> {
        let keys = self
            .session
            .conn
            .query_keymap()
            .context("Failed to query keymap state")?
            .reply()
            .context("Failed to get keymap state reply")?
            .keys;

        Ok(keysym::MODIFIERS
            .iter()
            .filter_map(|&sym| self.session.keymap.keycode(sym))
            .any(|keycode| is_key_down(&keys, keycode)))
    }

    /// Polls until no modifier is held. Gives up silently after `timeout`.
    pub fn wait_for_modifiers_released(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while self.modifiers_pressed()? {
            if Instant::now() >= deadline {
                debug!(
                    timeout_ms = timeout.as_millis() as u64,
                    "Modifiers still held, synthesizing anyway"
                );
                return Ok(());
            }
            thread::sleep(timing::MODIFIER_POLL_INTERVAL);
        }
        Ok(())
    }

    /// Single press/release of `sym`
    pub fn tap_key(&self, sym: Keysym) -> Result<()> {
        let keycode = self.keycode(sym)?;
        self.fake(KEY_PRESS_EVENT, keycode, 0)?;
        self.fake(KEY_RELEASE_EVENT, keycode, 0)
    }

    /// `modifiers` + `sym`, once the user's own modifiers are released.
    ///
    /// The key release is delayed server-side; some applications ignore pastes
    /// whose keys arrive back to back.
    pub fn tap_chord(&self, modifiers: &[Keysym], sym: Keysym) -> Result<()> {
        self.wait_for_modifiers_released(timing::MODIFIER_RELEASE_TIMEOUT)?;

        let modifier_codes = modifiers
            .iter()
            .map(|&m| self.keycode(m))
            .collect::<Result<Vec<_>>>()?;
        let keycode = self.keycode(sym)?;

        for &code in &modifier_codes {
            self.fake(KEY_PRESS_EVENT, code, 0)?;
        }
        self.fake(KEY_PRESS_EVENT, keycode, 0)?;
        self.fake(KEY_RELEASE_EVENT, keycode, timing::CHORD_RELEASE_DELAY_MS)?;
        for &code in modifier_codes.iter().rev() {
            self.fake(KEY_RELEASE_EVENT, code, 0)?;
        }
        Ok(())
    }

    fn keycode(&self, sym: Keysym) -> Result<Keycode> {
        self.session
            .keymap
            .keycode(sym)
            .with_context(|| format!("No keycode mapped for keysym 0x{sym:x}"))
    }

    /// One synthetic key event followed by a server round trip
    fn fake(&self, event_type: u8, keycode: Keycode, delay_ms: u32) -> Result<()> {
        self.session
            .conn
            .xtest_fake_input(event_type, keycode, delay_ms, self.session.root(), 0, 0, 0)
            .context(format!("Failed to send fake input for keycode {}", keycode))?;
        sync(&self.session.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_bit_lookup() {
        let mut keys = [0u8; 32];
        keys[6] = 0b0000_0100; // keycode 50 (Shift_L on pc105)
        assert!(is_key_down(&keys, 50));
        assert!(!is_key_down(&keys, 49));
        assert!(!is_key_down(&keys, 51));

        keys[31] = 0x80;
        assert!(is_key_down(&keys, 255));
        assert!(!is_key_down(&[0u8; 32], 8));
    }
}
