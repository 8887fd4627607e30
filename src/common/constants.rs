//! Application-wide constants

/// Names and file locations
pub mod app {
    pub const NAME: &str = "accent-hold";
    pub const DISPLAY_NAME: &str = "Accent Hold";
    pub const CONFIG_FILE: &str = "config.json";
    pub const LOCK_FILE: &str = "accent-hold.lock";
    pub const AUTOSTART_DIR: &str = "autostart";
    pub const AUTOSTART_FILE: &str = "accent-hold.desktop";
}

/// Delays and timeouts of the gesture / injection pipeline
pub mod timing {
    use std::time::Duration;

    /// Capacity of the channel between the tap thread and the daemon loop
    pub const TAP_CHANNEL_CAPACITY: usize = 1024;

    /// How long `EventTap::start` waits for the server to begin delivering data
    pub const TAP_START_TIMEOUT: Duration = Duration::from_secs(2);

    /// Upper bound for waiting on the user to release physical modifiers
    pub const MODIFIER_RELEASE_TIMEOUT: Duration = Duration::from_millis(2000);

    pub const MODIFIER_POLL_INTERVAL: Duration = Duration::from_millis(5);

    /// XTEST delay (ms) applied to the key release of a synthesized chord.
    /// Some applications (Chromium URL bar) drop pastes whose keys arrive back to back.
    pub const CHORD_RELEASE_DELAY_MS: u32 = 50;

    /// First focus check after activation, before re-raising the window
    pub const FOCUS_WAIT_SHORT: Duration = Duration::from_millis(20);

    /// Second focus check after the window was raised again
    pub const FOCUS_WAIT_LONG: Duration = Duration::from_millis(150);

    pub const FOCUS_POLL_INTERVAL: Duration = Duration::from_millis(5);

    /// Pause between gaining focus and sending the paste chord
    pub const PASTE_SETTLE: Duration = Duration::from_millis(50);

    /// Time the target application gets to read the clipboard before it is restored
    pub const CLIPBOARD_RESTORE_DELAY: Duration = Duration::from_millis(50);

    /// Per-target timeout when reading another client's selection
    pub const SELECTION_READ_TIMEOUT: Duration = Duration::from_millis(300);

    pub const SELECTION_POLL_INTERVAL: Duration = Duration::from_millis(1);
}

/// X11 protocol values not exported by x11rb as named constants
pub mod x11 {
    /// `_NET_ACTIVE_WINDOW` source indication: request comes from a pager
    pub const ACTIVE_WINDOW_SOURCE_PAGER: u32 = 2;

    pub const RECORD_MAJOR_VERSION: u16 = 1;
    pub const RECORD_MINOR_VERSION: u16 = 13;

    pub const XTEST_MAJOR_VERSION: u8 = 2;
    pub const XTEST_MINOR_VERSION: u16 = 2;

    /// RECORD intercept categories
    pub const RECORD_FROM_SERVER: u8 = 0;
    pub const RECORD_START_OF_DATA: u8 = 4;
    pub const RECORD_END_OF_DATA: u8 = 5;

    /// Size of a wire event inside a RECORD reply
    pub const WIRE_EVENT_SIZE: usize = 32;

    /// High bit of the event type marks events produced by SendEvent
    pub const SEND_EVENT_MASK: u8 = 0x80;

    /// Property used to receive converted selections
    pub const SELECTION_PROPERTY: &[u8] = b"ACCENT_HOLD_SELECTION";
}

/// Keysym values (X11 keysymdef.h)
pub mod keysym {
    pub const NO_SYMBOL: u32 = 0;
    pub const SPACE: u32 = 0x0020;
    pub const BACKSPACE: u32 = 0xff08;
    pub const TAB: u32 = 0xff09;
    pub const RETURN: u32 = 0xff0d;
    pub const ESCAPE: u32 = 0xff1b;
    pub const HOME: u32 = 0xff50;
    pub const LEFT: u32 = 0xff51;
    pub const UP: u32 = 0xff52;
    pub const RIGHT: u32 = 0xff53;
    pub const DOWN: u32 = 0xff54;
    pub const PAGE_UP: u32 = 0xff55;
    pub const PAGE_DOWN: u32 = 0xff56;
    pub const END: u32 = 0xff57;
    pub const INSERT: u32 = 0xff63;
    pub const DELETE: u32 = 0xffff;
    pub const SHIFT_L: u32 = 0xffe1;
    pub const SHIFT_R: u32 = 0xffe2;
    pub const CONTROL_L: u32 = 0xffe3;
    pub const CONTROL_R: u32 = 0xffe4;
    pub const CAPS_LOCK: u32 = 0xffe5;
    pub const META_L: u32 = 0xffe7;
    pub const META_R: u32 = 0xffe8;
    pub const ALT_L: u32 = 0xffe9;
    pub const ALT_R: u32 = 0xffea;
    pub const SUPER_L: u32 = 0xffeb;
    pub const SUPER_R: u32 = 0xffec;
    pub const HYPER_L: u32 = 0xffed;
    pub const HYPER_R: u32 = 0xffee;

    /// Modifiers that must not be physically held while a chord is synthesized
    pub const MODIFIERS: [u32; 12] = [
        SHIFT_L, SHIFT_R, CONTROL_L, CONTROL_R, META_L, META_R, ALT_L, ALT_R, SUPER_L, SUPER_R,
        HYPER_L, HYPER_R,
    ];

    /// Offset of directly encoded Unicode keysyms (0x01000000 + code point)
    pub const UNICODE_OFFSET: u32 = 0x0100_0000;
}

/// Resolved symbol strings the gesture machine and picker react to
pub mod symbol {
    pub const SPACE: &str = "space";
}

/// Accent popup geometry and colors
pub mod popup {
    pub const TOP_MARGIN: i32 = 20;
    pub const PADDING: u16 = 8;
    pub const SPACING: u16 = 6;
    pub const CELL_WIDTH: u16 = 40;
    pub const CELL_HEIGHT: u16 = 40;

    pub const BACKGROUND: u32 = 0x2C2C2C;
    pub const CELL: u32 = 0x3A3A3A;
    pub const CELL_HIGHLIGHT: u32 = 0x4A90E2;
    pub const TEXT: u32 = 0xCCCCCC;
    pub const TEXT_HIGHLIGHT: u32 = 0xFFFFFF;

    /// Core fonts tried in order; the first one with ISO 10646 coverage wins
    pub const FONTS: [&[u8]; 3] = [
        b"-misc-fixed-medium-r-normal--18-*-*-*-*-*-iso10646-1",
        b"-misc-fixed-medium-r-normal--*-*-*-*-*-*-iso10646-1",
        b"fixed",
    ];
}
