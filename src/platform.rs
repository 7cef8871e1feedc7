//! Platform-specific configuration

use std::io;
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Submit shortcut display for form help text
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Step navigation shortcuts
pub const NEXT_STEP_SHORTCUT: &str = "Ctrl+N";
pub const PREV_STEP_SHORTCUT: &str = "Ctrl+P";
pub const JUMP_STEP_SHORTCUT: &str = "Alt+1-9";

pub const RESET_SHORTCUT: &str = "Ctrl+R";

/// Launch the system's default viewer for `path` without waiting for it
pub fn open_in_viewer(path: &Path) -> io::Result<()> {
    let child = viewer_command(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    reap_in_background(child);
    Ok(())
}

/// Wait for `child` on a helper thread so it does not linger as a zombie
fn reap_in_background(mut child: Child) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || match child.wait() {
        Ok(status) => tracing::debug!("Viewer exited with {}", status),
        Err(e) => tracing::warn!("Failed to wait for viewer: {}", e),
    })
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_command_targets_path() {
        let cmd = viewer_command(Path::new("/tmp/nda.pdf"));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args.last().unwrap().to_str(), Some("/tmp/nda.pdf"));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawned_viewer_is_reaped() {
        let child = Command::new("true").spawn().unwrap();
        let pid = child.id();
        reap_in_background(child).join().unwrap();
        // A reaped pid no longer has a /proc entry or a zombie state
        let status = std::fs::read_to_string(format!("/proc/{pid}/status")).unwrap_or_default();
        assert!(!status.contains("State:\tZ"));
    }
}
