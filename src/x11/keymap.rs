//! Snapshot of the core keyboard mapping

use anyhow::{Context, Result};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{ConnectionExt, KeyButMask, Keycode, Keysym};

use crate::common::constants::keysym;

/// Keycode → keysym table as returned by `GetKeyboardMapping`.
///
/// Taken once per connection; refreshed by the daemon on `MappingNotify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    min_keycode: Keycode,
    keysyms_per_keycode: usize,
    keysyms: Vec<Keysym>,
}

impl Keymap {
    pub fn query<C: Connection>(conn: &C) -> Result<Self> {
        let setup = conn.setup();
        let min_keycode = setup.min_keycode;
        let count = setup.max_keycode - min_keycode + 1;

        let reply = conn
            .get_keyboard_mapping(min_keycode, count)
            .context("Failed to query keyboard mapping")?
            .reply()
            .context("Failed to get keyboard mapping reply")?;

        Ok(Self::from_parts(
            min_keycode,
            reply.keysyms_per_keycode,
            reply.keysyms,
        ))
    }

    pub fn from_parts(min_keycode: Keycode, keysyms_per_keycode: u8, keysyms: Vec<Keysym>) -> Self {
        Self {
            min_keycode,
            keysyms_per_keycode: keysyms_per_keycode as usize,
            keysyms,
        }
    }

    fn row(&self, keycode: Keycode) -> Option<&[Keysym]> {
        if keycode < self.min_keycode || self.keysyms_per_keycode == 0 {
            return None;
        }
        let start = (keycode - self.min_keycode) as usize * self.keysyms_per_keycode;
        self.keysyms.get(start..start + self.keysyms_per_keycode)
    }

    /// Keysym of `keycode` at shift `level`, falling back to level 0 when the level is empty
    pub fn keysym(&self, keycode: Keycode, level: usize) -> Keysym {
        let Some(row) = self.row(keycode) else {
            return keysym::NO_SYMBOL;
        };
        match row.get(level) {
            Some(&sym) if sym != keysym::NO_SYMBOL => sym,
            _ => row.first().copied().unwrap_or(keysym::NO_SYMBOL),
        }
    }

    /// Keysym produced under the given modifier mask (Shift xor Lock selects level 1)
    pub fn keysym_for_state(&self, keycode: Keycode, state: KeyButMask) -> Keysym {
        self.keysym(keycode, shift_level(state))
    }

    /// First keycode whose row contains `sym`
    pub fn keycode(&self, sym: Keysym) -> Option<Keycode> {
        if self.keysyms_per_keycode == 0 {
            return None;
        }
        self.keysyms
            .chunks(self.keysyms_per_keycode)
            .position(|row| row.contains(&sym))
            .and_then(|index| Keycode::try_from(index + self.min_keycode as usize).ok())
    }
}

/// Keysym table level selected by the modifier state: 1 when exactly one of Shift / Lock is active
pub fn shift_level(state: KeyButMask) -> usize {
    let bits = u16::from(state);
    let shift = bits & u16::from(KeyButMask::SHIFT) != 0;
    let lock = bits & u16::from(KeyButMask::LOCK) != 0;
    usize::from(shift ^ lock)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// keycode 8: a/A, keycode 9: comma/less, keycode 10: space, keycode 11: BackSpace
    fn sample_keymap() -> Keymap {
        Keymap::from_parts(
            8,
            2,
            vec![
                0x0061, 0x0041, // a A
                0x002c, 0x003c, // , <
                keysym::SPACE, keysym::NO_SYMBOL,
                keysym::BACKSPACE, keysym::BACKSPACE,
            ],
        )
    }

    #[test]
    fn test_keysym_levels() {
        let keymap = sample_keymap();
        assert_eq!(keymap.keysym(8, 0), 0x0061);
        assert_eq!(keymap.keysym(8, 1), 0x0041);
        assert_eq!(keymap.keysym(9, 1), 0x003c);
    }

    #[test]
    fn test_empty_level_falls_back_to_base() {
        let keymap = sample_keymap();
        assert_eq!(keymap.keysym(10, 1), keysym::SPACE);
    }

    #[test]
    fn test_out_of_range_keycodes() {
        let keymap = sample_keymap();
        assert_eq!(keymap.keysym(7, 0), keysym::NO_SYMBOL);
        assert_eq!(keymap.keysym(200, 0), keysym::NO_SYMBOL);
    }

    #[test]
    fn test_reverse_lookup() {
        let keymap = sample_keymap();
        assert_eq!(keymap.keycode(keysym::SPACE), Some(10));
        assert_eq!(keymap.keycode(0x0041), Some(8));
        assert_eq!(keymap.keycode(keysym::BACKSPACE), Some(11));
        assert_eq!(keymap.keycode(keysym::INSERT), None);
    }

    #[test]
    fn test_shift_xor_lock() {
        assert_eq!(shift_level(KeyButMask::default()), 0);
        assert_eq!(shift_level(KeyButMask::SHIFT), 1);
        assert_eq!(shift_level(KeyButMask::LOCK), 1);
        assert_eq!(shift_level(KeyButMask::SHIFT | KeyButMask::LOCK), 0);
        assert_eq!(shift_level(KeyButMask::CONTROL), 0);
    }

    #[test]
    fn test_keysym_for_state_preserves_case() {
        let keymap = sample_keymap();
        assert_eq!(keymap.keysym_for_state(8, KeyButMask::default()), 0x0061);
        assert_eq!(keymap.keysym_for_state(8, KeyButMask::LOCK), 0x0041);
        assert_eq!(
            keymap.keysym_for_state(8, KeyButMask::SHIFT | KeyButMask::LOCK),
            0x0061
        );
    }
}
