//! Decoded keyboard events delivered by the event tap

use crate::common::constants::symbol;

/// A key transition observed on the global input stream.
///
/// `symbol` is the printable character for printable keysyms (`"e"`, `"É"`, `","`)
/// and the X keysym name for everything else (`"space"`, `"Right"`, `"Shift_L"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed { keycode: u8, symbol: String },
    Released { keycode: u8 },
}

impl KeyEvent {
    pub fn keycode(&self) -> u8 {
        match self {
            Self::Pressed { keycode, .. } | Self::Released { keycode } => *keycode,
        }
    }

    /// The single character this press produces, if it produces exactly one
    pub fn single_char(&self) -> Option<char> {
        let Self::Pressed { symbol, .. } = self else {
            return None;
        };
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    pub fn is_space_press(&self) -> bool {
        matches!(self, Self::Pressed { symbol: s, .. } if s == symbol::SPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(keycode: u8, symbol: &str) -> KeyEvent {
        KeyEvent::Pressed {
            keycode,
            symbol: symbol.to_string(),
        }
    }

    #[test]
    fn test_single_char_only_for_one_character_presses() {
        assert_eq!(press(26, "e").single_char(), Some('e'));
        assert_eq!(press(26, "É").single_char(), Some('É'));
        assert_eq!(press(65, "space").single_char(), None);
        assert_eq!(press(50, "Shift_L").single_char(), None);
        assert_eq!(KeyEvent::Released { keycode: 26 }.single_char(), None);
    }

    #[test]
    fn test_space_detection() {
        assert!(press(65, "space").is_space_press());
        assert!(!press(65, " ").is_space_press());
        assert!(!KeyEvent::Released { keycode: 65 }.is_space_press());
    }

    #[test]
    fn test_keycode_accessor() {
        assert_eq!(press(38, "a").keycode(), 38);
        assert_eq!(KeyEvent::Released { keycode: 38 }.keycode(), 38);
    }
}
