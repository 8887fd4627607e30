//! Global key event tap built on the X RECORD extension
//!
//! Two connections are involved: the *control* connection creates, disables and
//! frees the record context and answers modifier-state queries; the *data*
//! connection is moved into the tap thread and only ever reads the reply stream
//! of `RecordEnableContext`. Disabling the context from the control connection
//! makes the server send EndOfData, which ends the stream and the thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{RecvTimeoutError, SyncSender, sync_channel};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, trace, warn};
use x11rb::connection::Connection;
use x11rb::protocol::record::{self, ConnectionExt as RecordExt};
use x11rb::protocol::xproto::{
    ConnectionExt as _, KEY_PRESS_EVENT, KEY_RELEASE_EVENT, KeyButMask, Window,
};
use x11rb::rust_connection::RustConnection;

use super::decode::{self, RawKey};
use crate::common::constants::{timing, x11};
use crate::common::types::KeyEvent;
use crate::x11::Keymap;

#[derive(Debug, Error)]
pub enum TapError {
    #[error("event tap unavailable: {what}: {reason}")]
    ResourceUnavailable { what: &'static str, reason: String },
}

impl TapError {
    fn unavailable(what: &'static str, reason: impl ToString) -> Self {
        Self::ResourceUnavailable {
            what,
            reason: reason.to_string(),
        }
    }
}

/// State that only exists while the tap thread is alive
struct Running {
    control: Arc<RustConnection>,
    context: record::Context,
    keymap: Arc<Mutex<Keymap>>,
    active: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

pub struct EventTap {
    running: Option<Running>,
}

impl EventTap {
    /// Subscribes to every client's key events and starts delivering them to `sender`.
    ///
    /// Returns only after the server confirmed start of data, so [`EventTap::stop`]
    /// always finds an enabled context.
    pub fn start(sender: mpsc::Sender<KeyEvent>) -> Result<Self, TapError> {
        let (control, screen_num) = x11rb::connect(None)
            .map_err(|e| TapError::unavailable("control connection", e))?;
        let (data, _) =
            x11rb::connect(None).map_err(|e| TapError::unavailable("data connection", e))?;

        control
            .record_query_version(x11::RECORD_MAJOR_VERSION, x11::RECORD_MINOR_VERSION)
            .map_err(|e| TapError::unavailable("RECORD extension", e))?
            .reply()
            .map_err(|e| TapError::unavailable("RECORD extension", e))?;

        let keymap =
            Keymap::query(&control).map_err(|e| TapError::unavailable("keyboard mapping", e))?;
        let root = control.setup().roots[screen_num].root;

        let context = control
            .generate_id()
            .map_err(|e| TapError::unavailable("record context id", e))?;
        control
            .record_create_context(
                context,
                0,
                &[u32::from(record::CS::ALL_CLIENTS)],
                &[key_event_range()],
            )
            .map_err(|e| TapError::unavailable("record context", e))?
            .check()
            .map_err(|e| TapError::unavailable("record context", e))?;

        let control = Arc::new(control);
        let keymap = Arc::new(Mutex::new(keymap));
        let active = Arc::new(AtomicBool::new(true));
        let (ready_tx, ready_rx) = sync_channel(1);

        let worker = TapWorker {
            control: Arc::clone(&control),
            root,
            keymap: Arc::clone(&keymap),
            active: Arc::clone(&active),
            sender,
        };
        let spawned = thread::Builder::new()
            .name("event-tap".to_string())
            .spawn(move || worker.run(data, context, ready_tx));

        let thread = match spawned {
            Ok(thread) => thread,
            Err(err) => {
                free_context(&control, context);
                return Err(TapError::unavailable("tap thread", err));
            }
        };

        let running = Running {
            control,
            context,
            keymap,
            active,
            thread,
        };

        let started = match ready_rx.recv_timeout(timing::TAP_START_TIMEOUT) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(reason)) => Err(TapError::unavailable("record enable", reason)),
            Err(RecvTimeoutError::Timeout) => Err(TapError::unavailable(
                "record enable",
                "no start of data from server",
            )),
            Err(RecvTimeoutError::Disconnected) => Err(TapError::unavailable(
                "record enable",
                "tap thread exited",
            )),
        };

        match started {
            Ok(()) => {
                info!(context = context, "Event tap started");
                Ok(Self {
                    running: Some(running),
                })
            }
            Err(err) => {
                shutdown(running);
                Err(err)
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Re-reads the keyboard mapping used to resolve presses (after `MappingNotify`)
    pub fn refresh_keymap(&self) -> anyhow::Result<()> {
        if let Some(running) = &self.running {
            let keymap = Keymap::query(running.control.as_ref())?;
            *running
                .keymap
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = keymap;
            debug!("Event tap keymap refreshed");
        }
        Ok(())
    }

    /// Disables and frees the context, joins the thread and closes both connections.
    /// Does nothing when already stopped.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            shutdown(running);
            info!("Event tap stopped");
        }
    }
}

impl Drop for EventTap {
    fn drop(&mut self) {
        self.stop();
    }
}

fn shutdown(running: Running) {
    running.active.store(false, Ordering::Release);

    if let Err(err) = running
        .control
        .record_disable_context(running.context)
        .map_err(anyhow::Error::from)
        .and_then(|cookie| cookie.check().map_err(anyhow::Error::from))
    {
        debug!(error = %err, "Failed to disable record context");
    }
    free_context(&running.control, running.context);

    if running.thread.join().is_err() {
        warn!("Event tap thread panicked");
    }
    // Both connections close here: the data connection went down with the thread,
    // the last reference to the control connection is dropped with `running`.
}

fn free_context(control: &RustConnection, context: record::Context) {
    if let Err(err) = control
        .record_free_context(context)
        .map_err(anyhow::Error::from)
        .and_then(|cookie| cookie.check().map_err(anyhow::Error::from))
    {
        debug!(error = %err, context = context, "Failed to free record context");
    }
}

/// Device events KeyPress..=KeyRelease, nothing else
fn key_event_range() -> record::Range {
    let none8 = record::Range8 { first: 0, last: 0 };
    let none_ext = record::ExtRange {
        major: none8,
        minor: record::Range16 { first: 0, last: 0 },
    };
    record::Range {
        core_requests: none8,
        core_replies: none8,
        ext_requests: none_ext,
        ext_replies: none_ext,
        delivered_events: none8,
        device_events: record::Range8 {
            first: KEY_PRESS_EVENT,
            last: KEY_RELEASE_EVENT,
        },
        errors: none8,
        client_started: false,
        client_died: false,
    }
}

struct TapWorker {
    control: Arc<RustConnection>,
    root: Window,
    keymap: Arc<Mutex<Keymap>>,
    active: Arc<AtomicBool>,
    sender: mpsc::Sender<KeyEvent>,
}

impl TapWorker {
    fn run(self, data: RustConnection, context: record::Context, ready: SyncSender<Result<(), String>>) {
        let mut ready = Some(ready);

        let replies = match data.record_enable_context(context) {
            Ok(replies) => replies,
            Err(err) => {
                if let Some(r) = ready.take() {
                    let _ = r.send(Err(err.to_string()));
                }
                return;
            }
        };

        for reply in replies {
            let reply = match reply {
                Ok(reply) => reply,
                Err(err) => {
                    match ready.take() {
                        Some(r) => {
                            let _ = r.send(Err(err.to_string()));
                        }
                        None => debug!(error = %err, "Record stream ended with error"),
                    }
                    break;
                }
            };

            match reply.category {
                x11::RECORD_START_OF_DATA => {
                    if let Some(r) = ready.take() {
                        let _ = r.send(Ok(()));
                    }
                }
                x11::RECORD_END_OF_DATA => break,
                x11::RECORD_FROM_SERVER => {
                    for raw in decode::key_transitions(&reply.data) {
                        if !self.forward(raw) {
                            debug!("Key event receiver gone, stopping tap");
                            return;
                        }
                    }
                }
                other => trace!(category = other, "Ignoring record reply"),
            }

            if !self.active.load(Ordering::Acquire) {
                break;
            }
        }
        debug!("Event tap thread exiting");
    }

    /// Resolves and sends one transition; `false` once the receiver is closed
    fn forward(&self, raw: RawKey) -> bool {
        let state = if raw.pressed {
            self.modifier_state()
        } else {
            KeyButMask::default()
        };
        let event = {
            let keymap = self.keymap.lock().unwrap_or_else(PoisonError::into_inner);
            decode::resolve(raw, &keymap, state)
        };
        let Some(event) = event else {
            trace!(keycode = raw.keycode, "Press without keysym");
            return true;
        };

        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(keycode = event.keycode(), "Key event channel full, dropping event");
                true
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Current modifier mask of the core pointer, which carries the keyboard state
    fn modifier_state(&self) -> KeyButMask {
        match self
            .control
            .query_pointer(self.root)
            .map_err(anyhow::Error::from)
            .and_then(|cookie| cookie.reply().map_err(anyhow::Error::from))
        {
            Ok(reply) => reply.mask,
            Err(err) => {
                debug!(error = %err, "Failed to query modifier state");
                KeyButMask::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_twice_matches_stop_once() {
        let mut tap = EventTap { running: None };
        assert!(!tap.is_running());

        tap.stop();
        assert!(!tap.is_running());
        tap.stop();
        assert!(!tap.is_running());
        drop(tap);
    }

    #[test]
    fn test_drop_without_start_is_safe() {
        let tap = EventTap { running: None };
        assert!(!tap.is_running());
        assert!(tap.refresh_keymap().is_ok());
        drop(tap);
    }

    #[test]
    fn test_record_range_covers_key_events_only() {
        let range = key_event_range();
        assert_eq!(range.device_events.first, KEY_PRESS_EVENT);
        assert_eq!(range.device_events.last, KEY_RELEASE_EVENT);
        assert_eq!(range.delivered_events.last, 0);
        assert_eq!(range.core_requests.last, 0);
        assert!(!range.client_started);
        assert!(!range.client_died);
    }
}
