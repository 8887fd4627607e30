use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::super::dispatcher::EventContext;
use super::input::handle_picker_events;
use crate::config::AppConfig;
use crate::input::EventTap;

/// Keyboard layout changed: re-read the mapping on both connections
pub fn handle_mapping_notify(ctx: &mut EventContext) -> Result<()> {
    ctx.session
        .refresh_keymap()
        .context("Failed to refresh keymap after MappingNotify")?;
    if let Some(tap) = &ctx.tap
        && let Err(err) = tap.refresh_keymap()
    {
        warn!(error = %err, "Failed to refresh event tap keymap");
    }
    debug!("Keymap refreshed");
    Ok(())
}

/// Starts or stops gesture monitoring. Stopping forgets any held key and hides the picker.
#[tracing::instrument(skip(ctx))]
pub fn set_monitoring(ctx: &mut EventContext, active: bool) -> Result<()> {
    if active {
        if ctx.tap.as_ref().is_none_or(|tap| !tap.is_running()) {
            match EventTap::start(ctx.key_tx.clone()) {
                Ok(tap) => ctx.tap = Some(tap),
                Err(err) => warn!(error = %err, "Monitoring requested but the event tap is unavailable"),
            }
        }
    } else {
        if let Some(mut tap) = ctx.tap.take() {
            tap.stop();
        }
        if ctx.gesture.is_held() {
            debug!("Dropping held key");
        }
        ctx.gesture.reset();
        let events = ctx.popup.hide(&ctx.session)?;
        handle_picker_events(ctx, events);
    }

    ctx.config.set_active(active);
    info!(active = active, "Monitoring toggled");
    Ok(())
}

/// SIGUSR1: flip monitoring and remember the choice
pub fn handle_toggle(ctx: &mut EventContext) -> Result<()> {
    let active = !ctx.config.active;
    set_monitoring(ctx, active)?;
    if let Err(err) = ctx.config.save_to(&ctx.config_path) {
        warn!(error = %err, "Failed to persist monitoring state");
    }
    Ok(())
}

/// SIGHUP: re-read the configuration file. A broken file keeps the current settings.
pub fn handle_reload(ctx: &mut EventContext) -> Result<()> {
    let config = match AppConfig::load_from(&ctx.config_path) {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "Config reload failed, keeping current settings");
            return Ok(());
        }
    };

    let active = config.active;
    let monitoring_changed = active != ctx.config.active;
    ctx.config = config;
    if monitoring_changed {
        set_monitoring(ctx, active)?;
    }
    info!(
        all_character_sets = ctx.config.all_character_sets,
        character_sets = ?ctx.config.character_sets,
        "Configuration reloaded"
    );
    Ok(())
}
