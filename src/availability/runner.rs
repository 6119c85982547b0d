//! Running one probe command under an [`Operation`].

use super::operation::Operation;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// How often a running probe is checked for exit or cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Exited with status zero.
    Passed,
    /// Could not start, or exited non-zero.
    Failed,
    /// The operation ended before the probe did; the probe was killed.
    Cancelled,
}

impl ProbeOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Runs probe commands.
pub trait ProbeRunner {
    /// Run `argv` (program followed by arguments) until it exits or `op` ends.
    fn run(&self, argv: &[String], op: &Operation) -> ProbeOutcome;
}

/// Probe runner backed by real child processes.
///
/// The child inherits the environment; its stdio is discarded. On Unix it
/// gets its own process group so cancellation also reaps anything it spawned.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbeRunner;

impl ProbeRunner for SystemProbeRunner {
    fn run(&self, argv: &[String], op: &Operation) -> ProbeOutcome {
        let Some((program, args)) = argv.split_first() else {
            return ProbeOutcome::Failed;
        };
        if op.is_done() {
            return ProbeOutcome::Cancelled;
        }

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!(program = %program, error = %e, "probe failed to start");
                return ProbeOutcome::Failed;
            }
        };

        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    debug!(program = %program, code = ?status.code(), "probe exited");
                    return if status.success() {
                        ProbeOutcome::Passed
                    } else {
                        ProbeOutcome::Failed
                    };
                }
                Ok(None) if op.is_done() => {
                    debug!(program = %program, "probe cancelled");
                    terminate(&mut child);
                    return ProbeOutcome::Cancelled;
                }
                Ok(None) => {
                    let pause = op
                        .remaining()
                        .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL));
                    thread::sleep(pause);
                }
                Err(e) => {
                    debug!(program = %program, error = %e, "probe wait failed");
                    terminate(&mut child);
                    return ProbeOutcome::Failed;
                }
            }
        }
    }
}

/// Kill the child (and its process group on Unix) and reap it.
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pid) = libc::pid_t::try_from(child.id()) {
            // SAFETY: kill(2) with a negative pid signals the process group we
            // created for this child; it has no memory-safety preconditions.
            unsafe {
                libc::kill(-pid, libc::SIGKILL);
            }
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}
