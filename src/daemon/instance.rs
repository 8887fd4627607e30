//! Single-instance guard
//!
//! The daemon holds an exclusive `flock` on `$XDG_RUNTIME_DIR/accent-hold.lock` for its
//! whole lifetime and writes its PID into the file so `accent-hold config` can ask it to
//! reload.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use tracing::{debug, info};

use crate::common::constants::app;

pub fn lock_path() -> PathBuf {
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(app::LOCK_FILE)
}

/// Released when dropped
#[derive(Debug)]
pub struct InstanceLock {
    _lock: Flock<File>,
}

pub fn acquire() -> Result<InstanceLock> {
    acquire_at(&lock_path())
}

pub fn acquire_at(path: &Path) -> Result<InstanceLock> {
    let lock = try_lock(path)?.with_context(|| {
        format!(
            "Another instance of {} is already running (lock held on {})",
            app::NAME,
            path.display()
        )
    })?;

    let mut file: &File = &lock;
    file.set_len(0)
        .with_context(|| format!("Failed to truncate lock file {}", path.display()))?;
    write!(file, "{}", std::process::id())
        .with_context(|| format!("Failed to write PID to {}", path.display()))?;

    debug!(path = %path.display(), "Instance lock acquired");
    Ok(InstanceLock { _lock: lock })
}

/// `Ok(None)` when another process holds the lock
fn try_lock(path: &Path) -> Result<Option<Flock<File>>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create lock directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(path)
        .with_context(|| format!("Failed to open lock file {}", path.display()))?;

    match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
        Ok(lock) => Ok(Some(lock)),
        Err((_, errno)) if errno == Errno::EWOULDBLOCK => Ok(None),
        Err((_, errno)) => {
            Err(errno).with_context(|| format!("Failed to lock {}", path.display()))
        }
    }
}

/// Sends SIGHUP to the running daemon so it reloads its configuration.
/// Returns `false` when no daemon is running.
pub fn notify_reload() -> Result<bool> {
    notify_reload_at(&lock_path())
}

pub fn notify_reload_at(path: &Path) -> Result<bool> {
    if try_lock(path)?.is_some() {
        return Ok(false);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read lock file {}", path.display()))?;
    let Ok(pid) = contents.trim().parse::<i32>() else {
        bail!("Lock file {} does not contain a PID", path.display());
    };

    kill(Pid::from_raw(pid), Signal::SIGHUP)
        .with_context(|| format!("Failed to signal daemon (pid {pid})"))?;
    info!(pid = pid, "Asked running daemon to reload its configuration");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_second_lock_is_refused_until_first_drops() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("accent-hold.lock");

        let first = acquire_at(&path).unwrap();
        let err = acquire_at(&path).unwrap_err();
        assert!(err.to_string().contains("already running"));

        drop(first);
        assert!(acquire_at(&path).is_ok());
    }

    #[test]
    fn test_lock_file_holds_pid() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("run").join("accent-hold.lock");

        let _lock = acquire_at(&path).unwrap();
        let pid: u32 = fs::read_to_string(&path).unwrap().trim().parse().unwrap();
        assert_eq!(pid, std::process::id());
    }

    #[test]
    fn test_notify_without_daemon_reports_false() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("accent-hold.lock");
        assert!(!notify_reload_at(&path).unwrap());
    }
}
