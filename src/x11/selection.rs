//! Selection ownership and retrieval on a dedicated X11 connection
//!
//! The daemon keeps one [`Selections`] alive for its whole lifetime. While it owns
//! CLIPBOARD or PRIMARY, other clients' `SelectionRequest`s are answered from
//! [`Selections::dispatch_pending`], which the daemon loop calls whenever the
//! connection becomes readable.

use std::collections::HashMap;
use std::os::fd::{AsRawFd, RawFd};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, trace, warn};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::protocol::Event;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use super::intern;
use crate::common::constants::{timing, x11};

/// Which selection an operation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Clipboard,
    Primary,
}

/// One converted representation of a selection, keyed by atom names so it stays
/// meaningful independent of the connection it was read on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionFormat {
    pub target: String,
    pub type_name: String,
    pub format: u8,
    pub data: Vec<u8>,
}

impl SelectionFormat {
    pub fn text(target: &str, type_name: &str, data: Vec<u8>) -> Self {
        Self {
            target: target.to_string(),
            type_name: type_name.to_string(),
            format: 8,
            data,
        }
    }
}

/// Representation we currently serve, already resolved to atoms
#[derive(Debug, Clone)]
struct OwnedFormat {
    target: Atom,
    type_: Atom,
    format: u8,
    data: Vec<u8>,
}

struct SelectionAtoms {
    clipboard: Atom,
    targets: Atom,
    multiple: Atom,
    timestamp: Atom,
    save_targets: Atom,
    delete: Atom,
    incr: Atom,
    property: Atom,
}

impl SelectionAtoms {
    fn new(conn: &RustConnection) -> Result<Self> {
        Ok(Self {
            clipboard: intern(conn, b"CLIPBOARD")?,
            targets: intern(conn, b"TARGETS")?,
            multiple: intern(conn, b"MULTIPLE")?,
            timestamp: intern(conn, b"TIMESTAMP")?,
            save_targets: intern(conn, b"SAVE_TARGETS")?,
            delete: intern(conn, b"DELETE")?,
            incr: intern(conn, b"INCR")?,
            property: intern(conn, x11::SELECTION_PROPERTY)?,
        })
    }

    /// Targets that describe the selection rather than carry its content
    fn is_meta_target(&self, target: Atom) -> bool {
        [
            self.targets,
            self.multiple,
            self.timestamp,
            self.save_targets,
            self.delete,
        ]
        .contains(&target)
    }
}

pub struct Selections {
    conn: RustConnection,
    window: Window,
    atoms: SelectionAtoms,
    owned: HashMap<Atom, Vec<OwnedFormat>>,
}

impl Selections {
    /// Connects to the display and creates the unmapped window that owns our selections
    pub fn open() -> Result<Self> {
        let (conn, screen_num) =
            x11rb::connect(None).context("Failed to open X display for selections")?;
        let root = conn.setup().roots[screen_num].root;

        let window = conn
            .generate_id()
            .context("Failed to generate ID for selection window")?;
        conn.create_window(
            x11rb::COPY_DEPTH_FROM_PARENT,
            window,
            root,
            -10,
            -10,
            1,
            1,
            0,
            WindowClass::INPUT_ONLY,
            x11rb::COPY_FROM_PARENT,
            &CreateWindowAux::new()
                .override_redirect(1)
                .event_mask(EventMask::PROPERTY_CHANGE),
        )
        .context("Failed to create selection window")?;

        let atoms = SelectionAtoms::new(&conn)?;
        conn.flush()
            .context("Failed to flush selection connection")?;

        debug!(window = window, "Selection owner window created");
        Ok(Self {
            conn,
            window,
            atoms,
            owned: HashMap::new(),
        })
    }

    pub fn raw_fd(&self) -> RawFd {
        self.conn.stream().as_raw_fd()
    }

    fn atom(&self, selection: Selection) -> Atom {
        match selection {
            Selection::Clipboard => self.atoms.clipboard,
            Selection::Primary => AtomEnum::PRIMARY.into(),
        }
    }

    /// Answers every queued request from other clients
    pub fn dispatch_pending(&mut self) -> Result<()> {
        while let Some(event) = self
            .conn
            .poll_for_event()
            .context("Failed to poll selection connection")?
        {
            self.handle_event(event)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::SelectionRequest(request) => self.serve(request),
            Event::SelectionClear(clear) => {
                if self.owned.remove(&clear.selection).is_some() {
                    debug!(selection = clear.selection, "Lost selection ownership");
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    #[tracing::instrument(skip(self, request), fields(requestor = request.requestor, target = request.target))]
    fn serve(&mut self, request: SelectionRequestEvent) -> Result<()> {
        // Obsolete clients pass None and expect the target to be used as property
        let property = if request.property == x11rb::NONE {
            request.target
        } else {
            request.property
        };

        let stored = self.answer(&request, property);
        let stored = match stored {
            Ok(stored) => stored,
            Err(err) => {
                debug!(error = %err, "Refusing selection request");
                false
            }
        };

        let notify = SelectionNotifyEvent {
            response_type: SELECTION_NOTIFY_EVENT,
            sequence: 0,
            time: request.time,
            requestor: request.requestor,
            selection: request.selection,
            target: request.target,
            property: if stored { property } else { x11rb::NONE },
        };
        self.conn
            .send_event(false, request.requestor, EventMask::NO_EVENT, notify)
            .context("Failed to send SelectionNotify")?;
        self.conn
            .flush()
            .context("Failed to flush SelectionNotify")?;
        Ok(())
    }

    /// Writes the requested representation to the requestor; `Ok(false)` means refused
    fn answer(&self, request: &SelectionRequestEvent, property: Atom) -> Result<bool> {
        let Some(formats) = self.owned.get(&request.selection) else {
            return Ok(false);
        };

        if request.target == self.atoms.targets {
            let mut targets = vec![self.atoms.targets];
            targets.extend(formats.iter().map(|f| f.target));
            self.conn
                .change_property32(
                    PropMode::REPLACE,
                    request.requestor,
                    property,
                    AtomEnum::ATOM,
                    &targets,
                )
                .context("Failed to write TARGETS")?;
            return Ok(true);
        }

        if request.target == self.atoms.multiple {
            return Ok(false);
        }

        let Some(found) = formats.iter().find(|f| f.target == request.target) else {
            return Ok(false);
        };

        // No INCR transfers
        if found.data.len() + 64 > self.conn.maximum_request_bytes() {
            warn!(
                bytes = found.data.len(),
                "Selection data too large for a single request"
            );
            return Ok(false);
        }

        let unit = usize::from(found.format / 8).max(1);
        let data_len = u32::try_from(found.data.len() / unit)
            .context("Selection data length overflow")?;
        self.conn
            .change_property(
                PropMode::REPLACE,
                request.requestor,
                property,
                found.type_,
                found.format,
                data_len,
                &found.data,
            )
            .context("Failed to write selection data")?;
        Ok(true)
    }

    /// Reads every content representation currently offered for `selection`
    pub fn snapshot(&mut self, selection: Selection) -> Result<Vec<SelectionFormat>> {
        let selection_atom = self.atom(selection);
        let owner = self
            .conn
            .get_selection_owner(selection_atom)
            .context("Failed to query selection owner")?
            .reply()
            .context("Failed to get selection owner reply")?
            .owner;

        if owner == x11rb::NONE {
            return Ok(Vec::new());
        }

        if owner == self.window {
            let owned = self.owned.get(&selection_atom).cloned().unwrap_or_default();
            return owned
                .iter()
                .map(|f| {
                    Ok(SelectionFormat {
                        target: self.atom_name(f.target)?,
                        type_name: self.atom_name(f.type_)?,
                        format: f.format,
                        data: f.data.clone(),
                    })
                })
                .collect();
        }

        let Some(targets) = self.convert(selection_atom, self.atoms.targets)? else {
            debug!(owner = owner, "Selection owner did not answer TARGETS");
            return Ok(Vec::new());
        };
        let targets: Vec<Atom> = targets
            .value32()
            .map(|values| values.collect())
            .unwrap_or_default();

        let mut formats = Vec::new();
        for target in targets {
            if self.atoms.is_meta_target(target) {
                continue;
            }
            let Some(reply) = self.convert(selection_atom, target)? else {
                continue;
            };
            if reply.type_ == self.atoms.incr {
                debug!(target = target, "Skipping incremental selection target");
                continue;
            }
            formats.push(SelectionFormat {
                target: self.atom_name(target)?,
                type_name: self.atom_name(reply.type_)?,
                format: reply.format,
                data: reply.value,
            });
        }

        trace!(count = formats.len(), "Selection snapshot taken");
        Ok(formats)
    }

    /// Requests `target` from the selection owner and waits for the answer.
    ///
    /// Returns `None` when the owner refuses or does not answer in time.
    fn convert(&mut self, selection: Atom, target: Atom) -> Result<Option<GetPropertyReply>> {
        self.conn
            .delete_property(self.window, self.atoms.property)
            .context("Failed to clear selection property")?;
        self.conn
            .convert_selection(
                self.window,
                selection,
                target,
                self.atoms.property,
                x11rb::CURRENT_TIME,
            )
            .context("Failed to request selection conversion")?;
        self.conn
            .flush()
            .context("Failed to flush selection conversion")?;

        let deadline = Instant::now() + timing::SELECTION_READ_TIMEOUT;
        loop {
            while let Some(event) = self
                .conn
                .poll_for_event()
                .context("Failed to poll selection connection")?
            {
                match event {
                    Event::SelectionNotify(notify)
                        if notify.requestor == self.window
                            && notify.selection == selection
                            && notify.target == target =>
                    {
                        if notify.property == x11rb::NONE {
                            return Ok(None);
                        }
                        let reply = self
                            .conn
                            .get_property(
                                true,
                                self.window,
                                notify.property,
                                AtomEnum::ANY,
                                0,
                                u32::MAX,
                            )
                            .context("Failed to read converted selection")?
                            .reply()
                            .context("Failed to get converted selection reply")?;
                        return Ok(Some(reply));
                    }
                    other => self.handle_event(other)?,
                }
            }

            if Instant::now() >= deadline {
                debug!(target = target, "Timed out waiting for selection conversion");
                return Ok(None);
            }
            thread::sleep(timing::SELECTION_POLL_INTERVAL);
        }
    }

    /// Takes ownership of CLIPBOARD and PRIMARY, offering `text` in the common text targets
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        let formats = text_formats(text);
        for selection in [Selection::Clipboard, Selection::Primary] {
            self.own(selection, &formats)?;
        }
        Ok(())
    }

    /// Puts a previously taken snapshot back; an empty snapshot clears the selection
    pub fn restore(&mut self, selection: Selection, formats: &[SelectionFormat]) -> Result<()> {
        if formats.is_empty() {
            let selection_atom = self.atom(selection);
            self.owned.remove(&selection_atom);
            self.conn
                .set_selection_owner(x11rb::NONE, selection_atom, x11rb::CURRENT_TIME)
                .context("Failed to clear selection owner")?;
            self.conn
                .flush()
                .context("Failed to flush selection owner change")?;
            return Ok(());
        }
        self.own(selection, formats)
    }

    fn own(&mut self, selection: Selection, formats: &[SelectionFormat]) -> Result<()> {
        let selection_atom = self.atom(selection);
        let owned = formats
            .iter()
            .map(|f| {
                Ok(OwnedFormat {
                    target: intern(&self.conn, f.target.as_bytes())?,
                    type_: intern(&self.conn, f.type_name.as_bytes())?,
                    format: f.format,
                    data: f.data.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.owned.insert(selection_atom, owned);

        self.conn
            .set_selection_owner(self.window, selection_atom, x11rb::CURRENT_TIME)
            .context("Failed to take selection ownership")?;
        let owner = self
            .conn
            .get_selection_owner(selection_atom)
            .context("Failed to verify selection owner")?
            .reply()
            .context("Failed to get selection owner reply")?
            .owner;
        if owner != self.window {
            warn!(selection = ?selection, owner = owner, "Selection ownership was not granted");
            self.owned.remove(&selection_atom);
        }
        Ok(())
    }

    fn atom_name(&self, atom: Atom) -> Result<String> {
        let reply = self
            .conn
            .get_atom_name(atom)
            .context("Failed to query atom name")?
            .reply()
            .context(format!("Failed to get name of atom {}", atom))?;
        Ok(String::from_utf8_lossy(&reply.name).into_owned())
    }
}

impl Drop for Selections {
    fn drop(&mut self) {
        let _ = self.conn.destroy_window(self.window);
        let _ = self.conn.flush();
    }
}

/// Text targets offered for an injected glyph. STRING is Latin-1 and only offered when
/// the text fits in it.
pub fn text_formats(text: &str) -> Vec<SelectionFormat> {
    let utf8 = text.as_bytes().to_vec();
    let mut formats = vec![SelectionFormat::text("UTF8_STRING", "UTF8_STRING", utf8.clone())];

    let latin1: Option<Vec<u8>> = text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect();
    if let Some(latin1) = latin1 {
        formats.push(SelectionFormat::text("STRING", "STRING", latin1));
    }

    formats.push(SelectionFormat::text("TEXT", "UTF8_STRING", utf8.clone()));
    formats.push(SelectionFormat::text(
        "text/plain;charset=utf-8",
        "text/plain;charset=utf-8",
        utf8.clone(),
    ));
    formats.push(SelectionFormat::text("text/plain", "text/plain", utf8));
    formats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(formats: &[SelectionFormat]) -> Vec<&str> {
        formats.iter().map(|f| f.target.as_str()).collect()
    }

    #[test]
    fn test_latin1_text_offers_string() {
        let formats = text_formats("é");
        assert_eq!(
            targets(&formats),
            vec![
                "UTF8_STRING",
                "STRING",
                "TEXT",
                "text/plain;charset=utf-8",
                "text/plain"
            ]
        );
        assert_eq!(formats[0].data, "é".as_bytes());
        assert_eq!(formats[1].data, vec![0xe9]);
    }

    #[test]
    fn test_non_latin1_text_skips_string() {
        let formats = text_formats("€");
        assert!(!targets(&formats).contains(&"STRING"));
        assert!(formats.iter().all(|f| f.data == "€".as_bytes()));
        assert!(formats.iter().all(|f| f.format == 8));
    }
}
