//! X11 window operations

use anyhow::{Context, Result};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;

use super::{CachedAtoms, sync};
use crate::common::constants::x11;

/// Requests the window manager to grant focus to the specified window using standard EWMH
/// protocols, then raises it and sets input focus directly.
///
/// The server is synchronized after the client message and again after the focus change so
/// synthetic events sent afterwards do not race the window manager.
pub fn activate_window(
    conn: &RustConnection,
    root: Window,
    atoms: &CachedAtoms,
    window: Window,
) -> Result<()> {
    let event = ClientMessageEvent {
        response_type: CLIENT_MESSAGE_EVENT,
        format: 32,
        sequence: 0,
        window,
        type_: atoms.net_active_window,
        data: ClientMessageData::from([
            x11::ACTIVE_WINDOW_SOURCE_PAGER,
            x11rb::CURRENT_TIME,
            0,
            0,
            0,
        ]),
    };

    conn.send_event(
        false,
        root,
        EventMask::SUBSTRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_REDIRECT,
        event,
    )
    .context(format!(
        "Failed to send _NET_ACTIVE_WINDOW event for window {}",
        window
    ))?;
    sync(conn).context("Failed to sync after _NET_ACTIVE_WINDOW request")?;

    conn.configure_window(
        window,
        &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE),
    )
    .context(format!("Failed to raise window {} to top of stack", window))?;

    conn.set_input_focus(InputFocus::POINTER_ROOT, window, x11rb::CURRENT_TIME)
        .context(format!("Failed to set input focus to window {}", window))?;

    conn.flush()
        .context("Failed to flush X11 connection after window activation")?;
    sync(conn).context("Failed to sync after window activation")?;
    Ok(())
}
