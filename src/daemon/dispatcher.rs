//! Daemon state and routing of X11 events from the main connection

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;
use x11rb::connection::Connection;
use x11rb::protocol::Event;
use x11rb::protocol::xproto::{Mapping, Window};

use super::handlers::{input, state};
use crate::accents::AccentTable;
use crate::common::types::KeyEvent;
use crate::config::AppConfig;
use crate::gesture::GestureMachine;
use crate::inject::{Injector, PendingRestore, X11Clipboard};
use crate::input::EventTap;
use crate::picker::Popup;
use crate::x11::X11Session;

/// Everything the event handlers operate on
pub struct EventContext {
    pub session: X11Session,
    pub popup: Popup,
    pub gesture: GestureMachine,
    pub accents: AccentTable,
    pub injector: Injector<X11Clipboard>,
    /// `None` while monitoring is off or the tap failed to start
    pub tap: Option<EventTap>,
    pub key_tx: mpsc::Sender<KeyEvent>,
    pub config: AppConfig,
    pub config_path: PathBuf,
    /// Window that had focus when the last gesture committed
    pub target_window: Option<Window>,
    pub pending_restore: Option<PendingRestore>,
}

impl EventContext {
    /// Handles every event already queued on the main connection
    pub fn drain_x11_events(&mut self) -> Result<()> {
        while let Some(event) = self.session.conn.poll_for_event()? {
            handle_event(self, &event)?;
        }
        Ok(())
    }
}

fn handle_event(ctx: &mut EventContext, event: &Event) -> Result<()> {
    match event {
        Event::MappingNotify(notify) if notify.request != Mapping::POINTER => {
            state::handle_mapping_notify(ctx)
        }
        Event::Error(err) => {
            debug!(error = ?err, "X11 error on main connection");
            Ok(())
        }
        _ => {
            let events = ctx.popup.handle_event(&ctx.session, event)?;
            input::handle_picker_events(ctx, events);
            Ok(())
        }
    }
}
