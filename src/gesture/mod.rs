//! Hold-then-space gesture detection
//!
//! The machine sees every key transition from the event tap. Holding a key that
//! produces a single character arms it; pressing space while it is held asks for
//! accent candidates; releasing the held key confirms whatever the picker shows.

use tracing::{debug, trace};
use x11rb::protocol::xproto::Window;

use crate::accents::{AccentTable, LookupConfig};
use crate::common::types::KeyEvent;
use crate::inject::Desktop;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    keycode: u8,
    character: char,
}

/// What the daemon has to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureSignal {
    /// Space was pressed while `character` was held and candidates exist.
    /// `window` had input focus at that moment.
    CharacterHeld {
        character: char,
        candidates: Vec<String>,
        window: Option<Window>,
    },
    /// The held key was released while the picker was showing
    CommitSelection,
}

#[derive(Debug, Default)]
pub struct GestureMachine {
    held: Option<HeldKey>,
    picker_visible: bool,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    pub fn set_picker_visible(&mut self, visible: bool) {
        self.picker_visible = visible;
    }

    /// Forgets the held key, used when monitoring is switched off
    pub fn reset(&mut self) {
        self.held = None;
        self.picker_visible = false;
    }

    pub fn handle<D: Desktop>(
        &mut self,
        event: &KeyEvent,
        desktop: &mut D,
        accents: &mut AccentTable,
        lookup: &LookupConfig,
    ) -> Option<GestureSignal> {
        match event {
            KeyEvent::Pressed { keycode, .. } => {
                self.on_press(event, *keycode, desktop, accents, lookup)
            }
            KeyEvent::Released { keycode } => self.on_release(*keycode),
        }
    }

    fn on_press<D: Desktop>(
        &mut self,
        event: &KeyEvent,
        keycode: u8,
        desktop: &mut D,
        accents: &mut AccentTable,
        lookup: &LookupConfig,
    ) -> Option<GestureSignal> {
        let Some(held) = self.held else {
            if let Some(character) = event.single_char() {
                trace!(keycode = keycode, character = %character, "Key held");
                self.held = Some(HeldKey { keycode, character });
            }
            return None;
        };

        // Autorepeat of the held key, other keys and space used for picker navigation
        if held.keycode == keycode || !event.is_space_press() || self.picker_visible {
            return None;
        }

        // The space already reached the focused window
        if let Err(err) = desktop.erase_previous_char() {
            debug!(error = %err, "Failed to erase space");
        }

        let candidates = accents.lookup(held.character, lookup);
        if candidates.is_empty() {
            debug!(character = %held.character, "No accents for held character");
            return None;
        }

        let window = desktop.focused_window();
        debug!(
            character = %held.character,
            candidates = candidates.len(),
            window = ?window,
            "Accent request"
        );
        Some(GestureSignal::CharacterHeld {
            character: held.character,
            candidates,
            window,
        })
    }

    fn on_release(&mut self, keycode: u8) -> Option<GestureSignal> {
        if self.held.is_none_or(|held| held.keycode != keycode) {
            return None;
        }
        self.held = None;
        trace!(keycode = keycode, "Held key released");
        self.picker_visible.then_some(GestureSignal::CommitSelection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::testing::FakeDesktop;
    use crate::picker::{PickerEvent, PickerModel};

    const E: u8 = 26;
    const Q: u8 = 24;
    const COMMA: u8 = 59;
    const SPACE: u8 = 65;
    const SHIFT: u8 = 50;
    const FOCUSED: Window = 0x0360_0004;

    fn press(keycode: u8, symbol: &str) -> KeyEvent {
        KeyEvent::Pressed {
            keycode,
            symbol: symbol.to_string(),
        }
    }

    fn release(keycode: u8) -> KeyEvent {
        KeyEvent::Released { keycode }
    }

    fn french() -> LookupConfig {
        LookupConfig {
            all_character_sets: false,
            character_sets: vec!["FR".to_string()],
        }
    }

    struct Harness {
        machine: GestureMachine,
        desktop: FakeDesktop,
        accents: AccentTable,
        lookup: LookupConfig,
    }

    impl Harness {
        fn new(lookup: LookupConfig) -> Self {
            Self {
                machine: GestureMachine::new(),
                desktop: FakeDesktop::focused_on(FOCUSED),
                accents: AccentTable::new(),
                lookup,
            }
        }

        fn feed(&mut self, event: KeyEvent) -> Option<GestureSignal> {
            self.machine
                .handle(&event, &mut self.desktop, &mut self.accents, &self.lookup)
        }
    }

    #[test]
    fn test_press_release_without_space_does_nothing() {
        let mut h = Harness::new(french());

        assert_eq!(h.feed(press(E, "e")), None);
        assert!(h.machine.is_held());
        assert_eq!(h.feed(release(E)), None);

        assert!(!h.machine.is_held());
        assert_eq!(h.desktop.erased, 0);
    }

    #[test]
    fn test_space_while_held_erases_once_and_signals_once() {
        let mut h = Harness::new(french());

        h.feed(press(E, "e"));
        let signal = h.feed(press(SPACE, "space"));

        assert_eq!(
            signal,
            Some(GestureSignal::CharacterHeld {
                character: 'e',
                candidates: ["é", "è", "ê", "ë", "€"].map(String::from).to_vec(),
                window: Some(FOCUSED),
            })
        );
        assert_eq!(h.desktop.erased, 1);
        assert!(h.machine.is_held());
    }

    #[test]
    fn test_window_captured_at_space_not_at_hold() {
        let mut h = Harness::new(french());

        h.feed(press(E, "e"));
        h.desktop.focused = Some(0x0500_0001);
        let signal = h.feed(press(SPACE, "space"));

        assert!(matches!(
            signal,
            Some(GestureSignal::CharacterHeld { window: Some(0x0500_0001), .. })
        ));
    }

    #[test]
    fn test_empty_lookup_still_erases_space() {
        let mut h = Harness::new(french());

        h.feed(press(Q, "q"));
        assert_eq!(h.feed(press(SPACE, "space")), None);

        assert_eq!(h.desktop.erased, 1);
        assert!(h.machine.is_held());
    }

    #[test]
    fn test_unknown_language_yields_no_signal() {
        let mut h = Harness::new(LookupConfig {
            all_character_sets: false,
            character_sets: vec!["XX".to_string()],
        });

        h.feed(press(COMMA, ","));
        assert_eq!(h.feed(press(SPACE, "space")), None);
        assert_eq!(h.desktop.erased, 1);
    }

    #[test]
    fn test_autorepeat_and_other_keys_ignored() {
        let mut h = Harness::new(french());

        h.feed(press(E, "e"));
        assert_eq!(h.feed(press(E, "e")), None);
        assert_eq!(h.feed(press(Q, "q")), None);
        assert_eq!(h.feed(press(SHIFT, "Shift_L")), None);
        assert_eq!(h.feed(release(Q)), None);
        assert!(h.machine.is_held());

        let signal = h.feed(press(SPACE, "space"));
        assert!(matches!(
            signal,
            Some(GestureSignal::CharacterHeld { character: 'e', .. })
        ));
    }

    #[test]
    fn test_multi_character_symbols_never_hold() {
        let mut h = Harness::new(french());

        h.feed(press(SHIFT, "Shift_L"));
        assert!(!h.machine.is_held());
        assert_eq!(h.feed(press(SPACE, "space")), None);
        assert_eq!(h.desktop.erased, 0);
    }

    #[test]
    fn test_space_is_navigation_while_picker_visible() {
        let mut h = Harness::new(french());

        h.feed(press(E, "e"));
        h.feed(press(SPACE, "space"));
        h.machine.set_picker_visible(true);

        assert_eq!(h.feed(press(SPACE, "space")), None);
        assert_eq!(h.feed(press(SPACE, "space")), None);
        assert_eq!(h.desktop.erased, 1);
    }

    #[test]
    fn test_release_with_picker_commits_exactly_once() {
        let mut h = Harness::new(french());

        h.feed(press(E, "e"));
        h.feed(press(SPACE, "space"));
        h.machine.set_picker_visible(true);

        assert_eq!(h.feed(release(SPACE)), None);
        assert_eq!(h.feed(release(E)), Some(GestureSignal::CommitSelection));
        assert!(!h.machine.is_held());
        assert_eq!(h.feed(release(E)), None);
    }

    #[test]
    fn test_reset_clears_held_key() {
        let mut h = Harness::new(french());

        h.feed(press(E, "e"));
        h.machine.set_picker_visible(true);
        h.machine.reset();

        assert!(!h.machine.is_held());
        assert_eq!(h.feed(release(E)), None);
    }

    #[test]
    fn test_french_e_scenario_end_to_end() {
        let mut h = Harness::new(french());
        let mut picker = PickerModel::default();
        let mut chosen = None;

        h.feed(press(E, "e"));
        let Some(GestureSignal::CharacterHeld {
            character,
            candidates,
            window,
        }) = h.feed(press(SPACE, "space"))
        else {
            panic!("expected an accent request");
        };

        for event in picker.show(character, &candidates) {
            if let PickerEvent::VisibilityChanged(visible) = event {
                h.machine.set_picker_visible(visible);
            }
        }
        assert_eq!(picker.highlighted(), Some("é"));

        // Right, space, Right
        picker.next();
        h.feed(press(SPACE, "space"));
        picker.next();
        picker.next();
        assert_eq!(picker.highlighted(), Some("ë"));

        let signal = h.feed(release(E));
        assert_eq!(signal, Some(GestureSignal::CommitSelection));
        for event in picker.commit() {
            match event {
                PickerEvent::AccentChosen(glyph) => chosen = Some(glyph),
                PickerEvent::VisibilityChanged(visible) => h.machine.set_picker_visible(visible),
            }
        }

        assert_eq!(chosen.as_deref(), Some("ë"));
        assert_eq!(window, Some(FOCUSED));
        assert_eq!(h.desktop.erased, 1);
        assert!(!picker.is_visible());
    }
}
