//! XDG autostart entry (`~/.config/autostart/accent-hold.desktop`)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::common::constants::app;

pub fn entry_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app::AUTOSTART_DIR)
        .join(app::AUTOSTART_FILE)
}

/// Desktop entry launching `exec` in daemon mode
pub fn desktop_entry(exec: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={name}\n\
         Comment=Type accented characters by holding a key and pressing space\n\
         Exec=\"{exec}\" run\n\
         Terminal=false\n\
         X-GNOME-Autostart-enabled=true\n",
        name = app::DISPLAY_NAME,
        exec = exec.display(),
    )
}

pub fn install(path: &Path, exec: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create autostart directory {}", parent.display()))?;
    }
    fs::write(path, desktop_entry(exec))
        .with_context(|| format!("Failed to write autostart entry {}", path.display()))?;
    info!(path = %path.display(), "Autostart entry installed");
    Ok(())
}

/// Removing an entry that does not exist is not an error
pub fn remove(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "Autostart entry removed");
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err)
            .with_context(|| format!("Failed to remove autostart entry {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_desktop_entry_runs_daemon() {
        let entry = desktop_entry(Path::new("/usr/bin/accent-hold"));

        assert!(entry.starts_with("[Desktop Entry]\n"));
        assert!(entry.contains("Name=Accent Hold\n"));
        assert!(entry.contains("Exec=\"/usr/bin/accent-hold\" run\n"));
    }

    #[test]
    fn test_install_then_remove() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("autostart").join("accent-hold.desktop");

        install(&path, Path::new("/opt/accent-hold")).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("/opt/accent-hold"));

        remove(&path).unwrap();
        assert!(!path.exists());
        remove(&path).unwrap();
    }
}
