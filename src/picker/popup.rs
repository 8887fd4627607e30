//! Override-redirect accent popup drawn with X11 core fonts
//!
//! The popup grabs the keyboard while it is visible so navigation keys never reach
//! the application the accent is destined for.

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};
use x11rb::connection::Connection;
use x11rb::protocol::Event;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use super::{PickerEvent, PickerModel};
use crate::common::constants::{app, keysym, popup};
use crate::x11::{X11Session, sync};

/// Opened core font and the metrics needed to center glyphs
#[derive(Debug, Clone, Copy)]
struct CoreFont {
    id: Font,
    ascent: i16,
    descent: i16,
    char_width: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

/// Popup placement for `count` cells: horizontally centered, `TOP_MARGIN` below the top edge
pub fn geometry(screen_width: u16, count: usize) -> Geometry {
    let count = u16::try_from(count.max(1)).unwrap_or(u16::MAX);
    let width = popup::PADDING
        .saturating_mul(2)
        .saturating_add(popup::CELL_WIDTH.saturating_mul(count))
        .saturating_add(popup::SPACING.saturating_mul(count - 1));
    let height = popup::PADDING * 2 + popup::CELL_HEIGHT;
    let x = (i32::from(screen_width) - i32::from(width)).max(0) / 2;

    Geometry {
        x: x as i16,
        y: popup::TOP_MARGIN as i16,
        width,
        height,
    }
}

/// Top-left corner of cell `index` inside the popup
pub fn cell_origin(index: usize) -> (i16, i16) {
    let step = usize::from(popup::CELL_WIDTH + popup::SPACING);
    let x = usize::from(popup::PADDING) + index * step;
    (i16::try_from(x).unwrap_or(i16::MAX), popup::PADDING as i16)
}

/// UCS-2 encoding for `ImageText16`; characters outside the BMP become `?`
pub fn encode_char2b(glyph: &str) -> Vec<Char2b> {
    glyph
        .chars()
        .map(|c| {
            let code = u16::try_from(u32::from(c)).unwrap_or(u16::from(b'?'));
            let [byte1, byte2] = code.to_be_bytes();
            Char2b { byte1, byte2 }
        })
        .collect()
}

pub struct Popup {
    model: PickerModel,
    window: Window,
    gc: Gcontext,
    font: CoreFont,
    geometry: Geometry,
    screen_width: u16,
}

impl Popup {
    pub fn new(session: &X11Session) -> Result<Self> {
        let conn = &session.conn;
        let screen = session.screen();
        let font = open_core_font(conn)?;

        let window = conn
            .generate_id()
            .context("Failed to generate ID for popup window")?;
        conn.create_window(
            x11rb::COPY_DEPTH_FROM_PARENT,
            window,
            screen.root,
            0,
            0,
            1,
            1,
            0,
            WindowClass::INPUT_OUTPUT,
            screen.root_visual,
            &CreateWindowAux::new()
                .background_pixel(popup::BACKGROUND)
                .border_pixel(0)
                .override_redirect(1)
                .event_mask(EventMask::EXPOSURE | EventMask::KEY_PRESS),
        )
        .context("Failed to create popup window")?;

        conn.change_property8(
            PropMode::REPLACE,
            window,
            session.atoms.net_wm_name,
            session.atoms.utf8_string,
            app::DISPLAY_NAME.as_bytes(),
        )
        .context("Failed to set popup window name")?;
        conn.change_property32(
            PropMode::REPLACE,
            window,
            session.atoms.net_wm_window_type,
            AtomEnum::ATOM,
            &[session.atoms.net_wm_window_type_popup_menu],
        )
        .context("Failed to set popup window type")?;

        let gc = conn
            .generate_id()
            .context("Failed to generate ID for popup graphics context")?;
        conn.create_gc(
            gc,
            window,
            &CreateGCAux::new().font(font.id).graphics_exposures(0),
        )
        .context("Failed to create popup graphics context")?;
        conn.flush().context("Failed to flush popup creation")?;

        debug!(window = window, "Popup window created");
        Ok(Self {
            model: PickerModel::default(),
            window,
            gc,
            font,
            geometry: geometry(screen.width_in_pixels, 1),
            screen_width: screen.width_in_pixels,
        })
    }

    pub fn is_visible(&self) -> bool {
        self.model.is_visible()
    }

    /// Lays out `candidates` for `character`, maps the popup and grabs the keyboard
    pub fn show(
        &mut self,
        session: &X11Session,
        character: char,
        candidates: &[String],
    ) -> Result<Vec<PickerEvent>> {
        let was_visible = self.model.is_visible();
        let events = self.model.show(character, candidates);
        if !self.model.is_visible() {
            if was_visible {
                self.unmap(&session.conn)?;
            }
            return Ok(events);
        }

        let conn = &session.conn;
        self.geometry = geometry(self.screen_width, self.model.candidates().len());
        conn.configure_window(
            self.window,
            &ConfigureWindowAux::new()
                .x(i32::from(self.geometry.x))
                .y(i32::from(self.geometry.y))
                .width(u32::from(self.geometry.width))
                .height(u32::from(self.geometry.height))
                .stack_mode(StackMode::ABOVE),
        )
        .context("Failed to place popup window")?;
        conn.map_window(self.window)
            .context("Failed to map popup window")?;
        sync(conn)?;

        self.draw(conn)?;
        self.grab_keyboard(conn)?;
        Ok(events)
    }

    pub fn hide(&mut self, session: &X11Session) -> Result<Vec<PickerEvent>> {
        let events: Vec<_> = self.model.hide().into_iter().collect();
        if !events.is_empty() {
            self.unmap(&session.conn)?;
        }
        Ok(events)
    }

    /// Chooses the highlighted candidate and hides
    pub fn commit(&mut self, session: &X11Session) -> Result<Vec<PickerEvent>> {
        let events = self.model.commit();
        if !events.is_empty() {
            self.unmap(&session.conn)?;
        }
        Ok(events)
    }

    pub fn next(&mut self, session: &X11Session) -> Result<()> {
        if self.model.next() {
            self.draw(&session.conn)?;
        }
        Ok(())
    }

    pub fn previous(&mut self, session: &X11Session) -> Result<()> {
        if self.model.previous() {
            self.draw(&session.conn)?;
        }
        Ok(())
    }

    /// Redraws on expose and handles navigation keys delivered through the grab
    pub fn handle_event(&mut self, session: &X11Session, event: &Event) -> Result<Vec<PickerEvent>> {
        match event {
            Event::Expose(expose) if expose.window == self.window && expose.count == 0 => {
                self.draw(&session.conn)?;
                Ok(Vec::new())
            }
            Event::KeyPress(press) if press.event == self.window => {
                match session.keymap.keysym(press.detail, 0) {
                    keysym::RIGHT | keysym::SPACE => self.next(session)?,
                    keysym::LEFT => self.previous(session)?,
                    keysym::RETURN => return self.commit(session),
                    keysym::ESCAPE => return self.hide(session),
                    _ => {}
                }
                Ok(Vec::new())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn grab_keyboard(&self, conn: &RustConnection) -> Result<()> {
        let status = conn
            .grab_keyboard(
                false,
                self.window,
                x11rb::CURRENT_TIME,
                GrabMode::ASYNC,
                GrabMode::ASYNC,
            )
            .context("Failed to request keyboard grab")?
            .reply()
            .context("Failed to get keyboard grab reply")?
            .status;
        if status != GrabStatus::SUCCESS {
            warn!(status = ?status, "Keyboard grab refused, navigation keys reach the focused window");
        }
        Ok(())
    }

    fn unmap(&self, conn: &RustConnection) -> Result<()> {
        conn.ungrab_keyboard(x11rb::CURRENT_TIME)
            .context("Failed to release keyboard grab")?;
        conn.unmap_window(self.window)
            .context("Failed to unmap popup window")?;
        sync(conn)
    }

    fn draw(&self, conn: &RustConnection) -> Result<()> {
        if !self.model.is_visible() {
            return Ok(());
        }

        self.fill(
            conn,
            popup::BACKGROUND,
            Rectangle {
                x: 0,
                y: 0,
                width: self.geometry.width,
                height: self.geometry.height,
            },
        )?;

        let highlighted = self.model.highlighted_index();
        for (index, glyph) in self.model.candidates().iter().enumerate() {
            let (cell_x, cell_y) = cell_origin(index);
            let (cell_color, text_color) = if index == highlighted {
                (popup::CELL_HIGHLIGHT, popup::TEXT_HIGHLIGHT)
            } else {
                (popup::CELL, popup::TEXT)
            };
            self.fill(
                conn,
                cell_color,
                Rectangle {
                    x: cell_x,
                    y: cell_y,
                    width: popup::CELL_WIDTH,
                    height: popup::CELL_HEIGHT,
                },
            )?;

            let text = encode_char2b(glyph);
            let text_width = i32::from(self.font.char_width) * text.len() as i32;
            let x = i32::from(cell_x) + (i32::from(popup::CELL_WIDTH) - text_width) / 2;
            let y = i32::from(cell_y)
                + (i32::from(popup::CELL_HEIGHT) + i32::from(self.font.ascent)
                    - i32::from(self.font.descent))
                    / 2;

            conn.change_gc(
                self.gc,
                &ChangeGCAux::new().foreground(text_color).background(cell_color),
            )
            .context("Failed to set popup text colors")?;
            conn.image_text16(self.window, self.gc, x as i16, y as i16, &text)
                .context("Failed to draw popup glyph")?;
        }

        conn.flush().context("Failed to flush popup drawing")?;
        Ok(())
    }

    fn fill(&self, conn: &RustConnection, color: u32, rect: Rectangle) -> Result<()> {
        conn.change_gc(self.gc, &ChangeGCAux::new().foreground(color))
            .context("Failed to set popup fill color")?;
        conn.poly_fill_rectangle(self.window, self.gc, &[rect])
            .context("Failed to fill popup rectangle")?;
        Ok(())
    }
}

/// Opens the first available font of `popup::FONTS`
fn open_core_font(conn: &RustConnection) -> Result<CoreFont> {
    let id = conn
        .generate_id()
        .context("Failed to generate X11 font ID")?;

    for name in popup::FONTS {
        let opened = conn
            .open_font(id, name)
            .context("Failed to send open font request")?
            .check();
        if let Err(err) = opened {
            debug!(font = %String::from_utf8_lossy(name), error = %err, "Core font unavailable");
            continue;
        }

        let info = conn
            .query_font(id)
            .context("Failed to query font metrics")?
            .reply()
            .context("Failed to get font metrics reply")?;
        debug!(font = %String::from_utf8_lossy(name), "Using X11 core font");
        return Ok(CoreFont {
            id,
            ascent: info.font_ascent,
            descent: info.font_descent,
            char_width: info.max_bounds.character_width,
        });
    }

    bail!("No X11 core font available for the accent popup")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_centers_horizontally() {
        let g = geometry(1920, 5);
        // 8 + 5 * 40 + 4 * 6 + 8
        assert_eq!(g.width, 240);
        assert_eq!(g.height, 56);
        assert_eq!(g.x, (1920 - 240) / 2);
        assert_eq!(g.y, 20);
    }

    #[test]
    fn test_geometry_never_negative_on_narrow_screens() {
        let g = geometry(100, 17);
        assert_eq!(g.x, 0);
    }

    #[test]
    fn test_cell_origins() {
        assert_eq!(cell_origin(0), (8, 8));
        assert_eq!(cell_origin(3), (8 + 3 * 46, 8));
    }

    fn bytes(glyph: &str) -> Vec<(u8, u8)> {
        encode_char2b(glyph)
            .iter()
            .map(|c| (c.byte1, c.byte2))
            .collect()
    }

    #[test]
    fn test_char2b_encoding() {
        assert_eq!(bytes("é"), vec![(0x00, 0xe9)]);
        assert_eq!(bytes("€"), vec![(0x20, 0xac)]);
        assert_eq!(bytes("r̥"), vec![(0x00, b'r'), (0x03, 0x25)]);
        assert_eq!(bytes("\u{1f600}"), vec![(0x00, b'?')]);
    }
}
