//! Keysym to symbol string conversion

use x11rb::protocol::xproto::Keysym;

use crate::common::constants::keysym;

/// Names for the non-printable keysyms the pipeline cares about; the rest fall back to hex
const NAMED_KEYSYMS: &[(Keysym, &str)] = &[
    (keysym::SPACE, "space"),
    (keysym::BACKSPACE, "BackSpace"),
    (keysym::TAB, "Tab"),
    (keysym::RETURN, "Return"),
    (keysym::ESCAPE, "Escape"),
    (keysym::HOME, "Home"),
    (keysym::LEFT, "Left"),
    (keysym::UP, "Up"),
    (keysym::RIGHT, "Right"),
    (keysym::DOWN, "Down"),
    (keysym::PAGE_UP, "Prior"),
    (keysym::PAGE_DOWN, "Next"),
    (keysym::END, "End"),
    (keysym::INSERT, "Insert"),
    (keysym::DELETE, "Delete"),
    (keysym::SHIFT_L, "Shift_L"),
    (keysym::SHIFT_R, "Shift_R"),
    (keysym::CONTROL_L, "Control_L"),
    (keysym::CONTROL_R, "Control_R"),
    (keysym::CAPS_LOCK, "Caps_Lock"),
    (keysym::META_L, "Meta_L"),
    (keysym::META_R, "Meta_R"),
    (keysym::ALT_L, "Alt_L"),
    (keysym::ALT_R, "Alt_R"),
    (keysym::SUPER_L, "Super_L"),
    (keysym::SUPER_R, "Super_R"),
    (keysym::HYPER_L, "Hyper_L"),
    (keysym::HYPER_R, "Hyper_R"),
    (0x00a0, "nobreakspace"),
];

/// Character produced by a keysym, for Latin-1 and directly encoded Unicode keysyms
pub fn keysym_to_char(sym: Keysym) -> Option<char> {
    let code_point = match sym {
        0x0021..=0x007e | 0x00a1..=0x00ff => sym,
        s if s > keysym::UNICODE_OFFSET => s - keysym::UNICODE_OFFSET,
        _ => return None,
    };
    char::from_u32(code_point).filter(|c| !c.is_control() && !c.is_whitespace())
}

/// Resolve a keysym into the symbol string carried by `KeyEvent::Pressed`.
///
/// Returns `None` for `NoSymbol` so unmapped keys never reach the gesture machine.
pub fn symbol_name(sym: Keysym) -> Option<String> {
    if sym == keysym::NO_SYMBOL {
        return None;
    }
    if let Some((_, name)) = NAMED_KEYSYMS.iter().find(|(s, _)| *s == sym) {
        return Some((*name).to_string());
    }
    if let Some(c) = keysym_to_char(sym) {
        return Some(c.to_string());
    }
    Some(format!("0x{sym:x}"))
}
