//! X11 window state queries

use anyhow::{Context, Result};
use tracing::debug;
use x11rb::errors::ReplyError;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;

use super::CachedAtoms;

/// Get the window the window manager reports as active (`_NET_ACTIVE_WINDOW`), if any
pub fn get_active_window(
    conn: &RustConnection,
    root: Window,
    atoms: &CachedAtoms,
) -> Result<Option<Window>> {
    let active_window_prop = conn
        .get_property(false, root, atoms.net_active_window, AtomEnum::WINDOW, 0, 1)
        .context("Failed to query _NET_ACTIVE_WINDOW property")?
        .reply()
        .context("Failed to get reply for _NET_ACTIVE_WINDOW query")?;

    if active_window_prop.format != 32 || active_window_prop.value_len != 1 {
        return Ok(None);
    }

    let active_window = active_window_prop
        .value32()
        .and_then(|mut values| values.next())
        .filter(|&window| window != x11rb::NONE);

    Ok(active_window)
}

/// Check whether the window is mapped and all its ancestors are mapped
pub fn is_window_viewable(conn: &RustConnection, window: Window) -> Result<bool> {
    let cookie = conn
        .get_window_attributes(window)
        .context(format!(
            "Failed to query attributes for window {}",
            window
        ))?;

    match cookie.reply() {
        Ok(attributes) => Ok(attributes.map_state == MapState::VIEWABLE),
        Err(ReplyError::X11Error(err)) if err.error_kind == x11rb::protocol::ErrorKind::Window => {
            debug!(window = window, "Window destroyed before attributes reply");
            Ok(false)
        }
        Err(err) => Err(err).context(format!(
            "Failed to get attributes reply for window {}",
            window
        )),
    }
}
