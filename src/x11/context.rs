//! Main-thread X11 session and cached state

use anyhow::{Context, Result};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::protocol::xtest::ConnectionExt as XTestExt;
use x11rb::rust_connection::RustConnection;

use super::Keymap;
use crate::common::constants::x11;

/// Connection owned by the daemon's main thread together with the state derived from it.
///
/// Used for window queries, focus changes, key synthesis and the accent popup.
/// The event tap and the clipboard owner open their own connections.
pub struct X11Session {
    pub conn: RustConnection,
    pub screen_num: usize,
    pub atoms: CachedAtoms,
    pub keymap: Keymap,
}

impl X11Session {
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None).context("Failed to open X display")?;

        conn.xtest_get_version(x11::XTEST_MAJOR_VERSION, x11::XTEST_MINOR_VERSION)
            .context("XTEST extension is not available")?
            .reply()
            .context("Failed to get XTEST version reply")?;

        let atoms = CachedAtoms::new(&conn)?;
        let keymap = Keymap::query(&conn)?;

        Ok(Self {
            conn,
            screen_num,
            atoms,
            keymap,
        })
    }

    pub fn screen(&self) -> &Screen {
        &self.conn.setup().roots[self.screen_num]
    }

    pub fn root(&self) -> Window {
        self.screen().root
    }

    pub fn refresh_keymap(&mut self) -> Result<()> {
        self.keymap = Keymap::query(&self.conn)?;
        Ok(())
    }
}

/// Pre-cached X11 atoms to avoid repeated roundtrips
#[derive(Debug)]
pub struct CachedAtoms {
    pub net_active_window: Atom,
    pub net_wm_name: Atom,
    pub net_wm_window_type: Atom,
    pub net_wm_window_type_popup_menu: Atom,
    pub utf8_string: Atom,
}

impl CachedAtoms {
    pub fn new(conn: &RustConnection) -> Result<Self> {
        Ok(Self {
            net_active_window: intern(conn, b"_NET_ACTIVE_WINDOW")?,
            net_wm_name: intern(conn, b"_NET_WM_NAME")?,
            net_wm_window_type: intern(conn, b"_NET_WM_WINDOW_TYPE")?,
            net_wm_window_type_popup_menu: intern(conn, b"_NET_WM_WINDOW_TYPE_POPUP_MENU")?,
            utf8_string: intern(conn, b"UTF8_STRING")?,
        })
    }
}

/// Interns a single atom, creating it when it does not exist yet
pub fn intern<C: Connection>(conn: &C, name: &[u8]) -> Result<Atom> {
    let label = String::from_utf8_lossy(name);
    Ok(conn
        .intern_atom(false, name)
        .with_context(|| format!("Failed to intern {label} atom"))?
        .reply()
        .with_context(|| format!("Failed to get reply for {label} atom"))?
        .atom)
}

/// Round-trip to the server so every request sent so far has been processed (XSync)
pub fn sync<C: Connection>(conn: &C) -> Result<()> {
    conn.get_input_focus()
        .context("Failed to send sync request")?
        .reply()
        .context("Failed to sync with X server")?;
    Ok(())
}
