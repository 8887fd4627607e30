//! Main-thread daemon: one select loop over the X11 connections, the event tap,
//! the clipboard restore deadline and Unix signals.

mod dispatcher;
mod handlers;
pub mod instance;

use std::os::fd::{AsRawFd, RawFd};

use anyhow::{Context, Result};
use tokio::io::Interest;
use tokio::io::unix::AsyncFd;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::accents::AccentTable;
use crate::common::constants::timing;
use crate::common::types::KeyEvent;
use crate::config::{self, AppConfig};
use crate::gesture::GestureMachine;
use crate::inject::{Injector, X11Clipboard};
use crate::picker::Popup;
use crate::x11::X11Session;
use dispatcher::EventContext;
use handlers::{input, state};

pub async fn run_daemon(config: AppConfig) -> Result<()> {
    let _instance = instance::acquire()?;

    let session = X11Session::connect().context("Failed to set up main X11 connection")?;
    let clipboard = X11Clipboard::open().context("Failed to set up clipboard connection")?;
    let popup = Popup::new(&session).context("Failed to create accent popup")?;

    let (key_tx, mut key_rx) = mpsc::channel(timing::TAP_CHANNEL_CAPACITY);

    let mut sigint = signal(SignalKind::interrupt()).context("Failed to register SIGINT")?;
    let mut sigterm = signal(SignalKind::terminate()).context("Failed to register SIGTERM")?;
    let mut sigusr1 =
        signal(SignalKind::user_defined1()).context("Failed to register SIGUSR1")?;
    let mut sighup = signal(SignalKind::hangup()).context("Failed to register SIGHUP")?;

    let active = config.active;
    let mut ctx = EventContext {
        session,
        popup,
        gesture: GestureMachine::new(),
        accents: AccentTable::new(),
        injector: Injector::new(clipboard),
        tap: None,
        key_tx,
        config,
        config_path: config::config_path(),
        target_window: None,
        pending_restore: None,
    };
    state::set_monitoring(&mut ctx, active)?;

    // Registered after the connections so they are deregistered before the sockets close
    let x11_fd = AsyncFd::with_interest(
        ConnectionFd(ctx.session.conn.stream().as_raw_fd()),
        Interest::READABLE,
    )
    .context("Failed to register X11 connection with the runtime")?;
    let clipboard_fd = AsyncFd::with_interest(
        ConnectionFd(ctx.injector.clipboard_mut().raw_fd()),
        Interest::READABLE,
    )
    .context("Failed to register clipboard connection with the runtime")?;

    info!(
        active = active,
        all_character_sets = ctx.config.all_character_sets,
        character_sets = ?ctx.config.character_sets,
        "Daemon started"
    );

    loop {
        // Requests may have been queued while we waited on replies elsewhere
        ctx.drain_x11_events()?;
        if let Err(err) = ctx.injector.clipboard_mut().dispatch_pending() {
            warn!(error = %err, "Failed to serve clipboard requests");
        }

        let restore_at = ctx.pending_restore.as_ref().map(|p| Instant::from_std(p.deadline));

        tokio::select! {
            biased;

            guard = clipboard_fd.readable() => {
                let mut guard = guard.context("Clipboard connection poll failed")?;
                guard.clear_ready();
            }
            guard = x11_fd.readable() => {
                let mut guard = guard.context("X11 connection poll failed")?;
                guard.clear_ready();
            }
            Some(event) = key_rx.recv() => {
                if let Err(err) = input::handle_key_event(&mut ctx, event) {
                    warn!(error = %err, "Failed to handle key event");
                }
            }
            _ = tokio::time::sleep_until(restore_at.unwrap_or_else(Instant::now)), if restore_at.is_some() => {
                input::handle_restore_deadline(&mut ctx);
            }
            _ = sigusr1.recv() => {
                state::handle_toggle(&mut ctx)?;
                discard_if_inactive(&ctx, &mut key_rx);
            }
            _ = sighup.recv() => {
                state::handle_reload(&mut ctx)?;
                discard_if_inactive(&ctx, &mut key_rx);
            }
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down");
                break;
            }
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down");
                break;
            }
        }
    }

    shutdown(&mut ctx);
    Ok(())
}

/// Socket of a connection owned by the [`EventContext`], polled for readability only
struct ConnectionFd(RawFd);

impl AsRawFd for ConnectionFd {
    fn as_raw_fd(&self) -> RawFd {
        self.0
    }
}

/// Transitions tapped before monitoring stopped must not arm a gesture
fn discard_if_inactive(ctx: &EventContext, key_rx: &mut mpsc::Receiver<KeyEvent>) {
    if ctx.config.active {
        return;
    }
    let dropped = input::discard_queued_keys(key_rx);
    if dropped > 0 {
        debug!(dropped = dropped, "Discarded key events queued before monitoring stopped");
    }
}

fn shutdown(ctx: &mut EventContext) {
    if let Some(mut tap) = ctx.tap.take() {
        tap.stop();
    }
    match ctx.popup.hide(&ctx.session) {
        Ok(events) => input::handle_picker_events(ctx, events),
        Err(err) => debug!(error = %err, "Failed to hide popup on shutdown"),
    }
    input::handle_restore_deadline(ctx);
    info!("Daemon stopped");
}
