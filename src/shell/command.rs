//! Shell command execution bounded by a deadline.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;

use wait_timeout::ChildExt;

use crate::error::CheckError;
use crate::runner::Deadline;

/// Run `command` through the platform shell and capture its standard output.
///
/// Standard error is discarded and standard input is closed. The deadline
/// covers both the shell's exit and the end of its output: if it expires
/// first, the shell's whole process group is killed and
/// [`CheckError::Timeout`] is returned.
///
/// # Errors
///
/// - [`CheckError::Spawn`] if the shell cannot be started
/// - [`CheckError::CommandFailed`] on a non-zero exit or signal death
/// - [`CheckError::Timeout`] when the deadline elapses
pub fn run_captured(command: &str, deadline: &Deadline) -> Result<String, CheckError> {
    deadline.check()?;

    let mut child = shell_command(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| CheckError::Spawn {
            command: command.to_string(),
            source: Arc::new(e),
        })?;

    // Drain stdout on its own thread so a chatty child cannot block on a full pipe.
    let (tx, rx) = mpsc::channel();
    if let Some(mut stdout) = child.stdout.take() {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stdout.read_to_end(&mut buf);
            let _ = tx.send(buf);
        });
    } else {
        drop(tx);
    }

    let status = match wait(&mut child, command, deadline)? {
        Some(status) => status,
        None => {
            tracing::debug!(command, "command exceeded deadline, killing");
            kill_tree(&mut child);
            let _ = child.wait();
            return Err(deadline.timeout_error());
        }
    };

    if !status.success() {
        return Err(CheckError::CommandFailed {
            command: command.to_string(),
            code: status.code(),
        });
    }

    // A background process started by the shell can keep stdout open after
    // the shell itself has exited.
    let output = match collect(&rx, deadline) {
        Some(output) => output,
        None => {
            tracing::debug!(command, "output still open at deadline, killing process group");
            kill_tree(&mut child);
            return Err(deadline.timeout_error());
        }
    };

    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Wait for the reader thread's buffer. `None` means the deadline expired.
fn collect(rx: &Receiver<Vec<u8>>, deadline: &Deadline) -> Option<Vec<u8>> {
    let received = match deadline.remaining() {
        Some(left) => rx.recv_timeout(left),
        None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
    };

    match received {
        Ok(buf) => Some(buf),
        Err(RecvTimeoutError::Disconnected) => Some(Vec::new()),
        Err(RecvTimeoutError::Timeout) => None,
    }
}

/// Wait for the child, returning `None` if the deadline expired first.
fn wait(child: &mut Child, command: &str, deadline: &Deadline) -> Result<Option<ExitStatus>, CheckError> {
    let result = match deadline.remaining() {
        Some(left) => child.wait_timeout(left),
        None => child.wait().map(Some),
    };

    result.map_err(|e| CheckError::Wait {
        command: command.to_string(),
        source: Arc::new(e),
    })
}

/// Kill the shell and everything left in its process group.
#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    if let Ok(pid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: kill(2) takes no pointers. The negative pid addresses the
        // process group created for this child by `process_group(0)`.
        unsafe {
            libc::kill(-pid, libc::SIGKILL);
        }
    }
    let _ = child.kill();
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    use std::os::unix::process::CommandExt;

    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command).process_group(0);
    cmd
}
