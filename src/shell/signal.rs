//! Interrupt handling.
//!
//! SIGINT and SIGTERM flip a process-wide flag; a watcher thread turns the
//! flag into a [`CancelToken`] cancellation so running checks drain and no
//! new ones start.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::runner::CancelToken;

/// Printed to stderr when an interrupt is received.
pub const INTERRUPT_MESSAGE: &str = "Received interrupt signal, shutting down...";

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Whether an interrupt signal has been received.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Install SIGINT/SIGTERM handlers that cancel `token`.
///
/// After the first interrupt the default disposition is restored, so a
/// second Ctrl-C terminates immediately.
#[cfg(unix)]
pub fn install_interrupt_handler(token: CancelToken) {
    let handler = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;

    // SAFETY: the handler only stores to an atomic, which is async-signal-safe.
    unsafe {
        libc::signal(libc::SIGINT, handler);
        libc::signal(libc::SIGTERM, handler);
    }

    let spawned = thread::Builder::new()
        .name("doctor-signal".into())
        .spawn(move || watch(token));
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "could not start interrupt watcher");
    }
}

/// No handler is installed on this platform.
#[cfg(not(unix))]
pub fn install_interrupt_handler(_token: CancelToken) {
    tracing::debug!("interrupt handling not supported on this platform");
}

#[cfg(unix)]
extern "C" fn on_signal(_signum: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

#[cfg(unix)]
fn watch(token: CancelToken) {
    while !interrupted() {
        thread::sleep(POLL_INTERVAL);
    }

    eprintln!("\n{}", INTERRUPT_MESSAGE);
    tracing::info!("interrupt received, cancelling run");
    token.cancel();

    // SAFETY: restoring the default disposition has no preconditions.
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
        libc::signal(libc::SIGTERM, libc::SIG_DFL);
    }
}
