use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::super::dispatcher::EventContext;
use crate::common::types::KeyEvent;
use crate::gesture::GestureSignal;
use crate::inject::X11Desktop;
use crate::picker::PickerEvent;

/// Feed a tapped key transition through the gesture machine and act on its signal
#[tracing::instrument(skip(ctx), fields(keycode = event.keycode()))]
pub fn handle_key_event(ctx: &mut EventContext, event: KeyEvent) -> Result<()> {
    if !ctx.config.active {
        return Ok(());
    }

    let lookup = ctx.config.lookup_config();
    let signal = {
        let mut desktop = X11Desktop::new(&ctx.session);
        ctx.gesture
            .handle(&event, &mut desktop, &mut ctx.accents, &lookup)
    };

    let events = match signal {
        Some(GestureSignal::CharacterHeld {
            character,
            candidates,
            window,
        }) => {
            ctx.target_window = window;
            ctx.popup.show(&ctx.session, character, &candidates)?
        }
        Some(GestureSignal::CommitSelection) => ctx.popup.commit(&ctx.session)?,
        None => return Ok(()),
    };

    handle_picker_events(ctx, events);
    Ok(())
}

/// Couple picker visibility back into the gesture machine and inject chosen accents
pub fn handle_picker_events(ctx: &mut EventContext, events: Vec<PickerEvent>) {
    for event in events {
        match event {
            PickerEvent::VisibilityChanged(visible) => {
                debug!(visible = visible, "Picker visibility changed");
                ctx.gesture.set_picker_visible(visible);
            }
            PickerEvent::AccentChosen(glyph) => inject_accent(ctx, &glyph),
        }
    }
}

fn inject_accent(ctx: &mut EventContext, glyph: &str) {
    // A new snapshot must not capture our own glyph
    if let Some(pending) = ctx.pending_restore.take() {
        ctx.injector.restore(pending);
    }

    if ctx.target_window.is_none() {
        warn!(glyph = %glyph, "No window to insert accent into");
    }

    let mut desktop = X11Desktop::new(&ctx.session);
    ctx.pending_restore = ctx.injector.inject(&mut desktop, glyph, ctx.target_window);
}

/// Put the clipboard back once the target application had its chance to paste
pub fn handle_restore_deadline(ctx: &mut EventContext) {
    if let Some(pending) = ctx.pending_restore.take() {
        ctx.injector.restore(pending);
    }
}

/// Empties the tap channel without handling anything; returns how many events were dropped
pub fn discard_queued_keys(key_rx: &mut mpsc::Receiver<KeyEvent>) -> usize {
    let mut dropped = 0;
    while key_rx.try_recv().is_ok() {
        dropped += 1;
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discard_queued_keys_empties_channel() {
        let (tx, mut rx) = mpsc::channel(8);
        tx.try_send(KeyEvent::Pressed {
            keycode: 26,
            symbol: "e".to_string(),
        })
        .unwrap();
        tx.try_send(KeyEvent::Pressed {
            keycode: 65,
            symbol: "space".to_string(),
        })
        .unwrap();

        assert_eq!(discard_queued_keys(&mut rx), 2);
        assert!(rx.try_recv().is_err());
        assert_eq!(discard_queued_keys(&mut rx), 0);

        tx.try_send(KeyEvent::Released { keycode: 26 }).unwrap();
        assert_eq!(rx.try_recv().unwrap(), KeyEvent::Released { keycode: 26 });
    }
}
