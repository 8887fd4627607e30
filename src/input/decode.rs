//! Decoding of RECORD reply payloads into key transitions

use x11rb::protocol::xproto::{KEY_PRESS_EVENT, KEY_RELEASE_EVENT, KeyButMask, Keycode};

use crate::common::constants::x11;
use crate::common::types::KeyEvent;
use crate::x11::{Keymap, keysym};

/// Key transition as read off the wire, before keysym resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKey {
    pub keycode: Keycode,
    pub pressed: bool,
}

/// Extracts the key transitions of a FromServer payload.
///
/// Device events are recorded as 32-byte wire events: byte 0 is the event type
/// (high bit set for SendEvent), byte 1 the keycode. Anything that is not a key
/// event, and trailing partial chunks, are skipped.
pub fn key_transitions(data: &[u8]) -> Vec<RawKey> {
    data.chunks_exact(x11::WIRE_EVENT_SIZE)
        .filter_map(|event| {
            let pressed = match event[0] & !x11::SEND_EVENT_MASK {
                KEY_PRESS_EVENT => true,
                KEY_RELEASE_EVENT => false,
                _ => return None,
            };
            Some(RawKey {
                keycode: event[1],
                pressed,
            })
        })
        .collect()
}

/// Resolves a raw transition against the keymap. Presses of keycodes without any
/// keysym yield `None`; releases never need one.
pub fn resolve(raw: RawKey, keymap: &Keymap, state: KeyButMask) -> Option<KeyEvent> {
    if !raw.pressed {
        return Some(KeyEvent::Released {
            keycode: raw.keycode,
        });
    }
    let sym = keymap.keysym_for_state(raw.keycode, state);
    keysym::symbol_name(sym).map(|symbol| KeyEvent::Pressed {
        keycode: raw.keycode,
        symbol,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::keysym as ks;

    fn wire_event(event_type: u8, keycode: u8) -> [u8; 32] {
        let mut event = [0u8; 32];
        event[0] = event_type;
        event[1] = keycode;
        event
    }

    fn sample_keymap() -> Keymap {
        Keymap::from_parts(
            38,
            2,
            vec![0x0065, 0x0045, ks::SPACE, ks::NO_SYMBOL, ks::RIGHT, ks::NO_SYMBOL],
        )
    }

    #[test]
    fn test_press_and_release_decoded_in_order() {
        let mut data = Vec::new();
        data.extend_from_slice(&wire_event(KEY_PRESS_EVENT, 38));
        data.extend_from_slice(&wire_event(KEY_RELEASE_EVENT, 38));

        assert_eq!(
            key_transitions(&data),
            vec![
                RawKey { keycode: 38, pressed: true },
                RawKey { keycode: 38, pressed: false },
            ]
        );
    }

    #[test]
    fn test_non_key_events_and_partial_chunks_skipped() {
        let mut data = Vec::new();
        data.extend_from_slice(&wire_event(6, 0)); // MotionNotify
        data.extend_from_slice(&wire_event(KEY_PRESS_EVENT | x11::SEND_EVENT_MASK, 39));
        data.extend_from_slice(&[KEY_PRESS_EVENT, 40, 0, 0]);

        assert_eq!(
            key_transitions(&data),
            vec![RawKey { keycode: 39, pressed: true }]
        );
        assert!(key_transitions(&[]).is_empty());
    }

    #[test]
    fn test_resolve_uses_modifier_level() {
        let keymap = sample_keymap();
        let press = RawKey { keycode: 38, pressed: true };

        assert_eq!(
            resolve(press, &keymap, KeyButMask::default()),
            Some(KeyEvent::Pressed { keycode: 38, symbol: "e".into() })
        );
        assert_eq!(
            resolve(press, &keymap, KeyButMask::LOCK),
            Some(KeyEvent::Pressed { keycode: 38, symbol: "E".into() })
        );
    }

    #[test]
    fn test_resolve_named_keys_and_releases() {
        let keymap = sample_keymap();
        let space = RawKey { keycode: 39, pressed: true };
        let right = RawKey { keycode: 40, pressed: true };

        assert_eq!(
            resolve(space, &keymap, KeyButMask::SHIFT),
            Some(KeyEvent::Pressed { keycode: 39, symbol: "space".into() })
        );
        assert_eq!(
            resolve(right, &keymap, KeyButMask::default()),
            Some(KeyEvent::Pressed { keycode: 40, symbol: "Right".into() })
        );
        assert_eq!(
            resolve(RawKey { keycode: 99, pressed: false }, &keymap, KeyButMask::default()),
            Some(KeyEvent::Released { keycode: 99 })
        );
        assert_eq!(
            resolve(RawKey { keycode: 99, pressed: true }, &keymap, KeyButMask::default()),
            None
        );
    }
}
