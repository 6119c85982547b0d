//! Host availability checks for templates.
//!
//! Each template lists probe commands (for example `["which", "python3"]`).
//! The template is usable on this host when every probe exits with status
//! zero. Probes run under an [`Operation`] that can be cancelled or given a
//! deadline; a probe still running when the operation ends is killed.
//!
//! A failing probe is not an error, it just means "unavailable".

pub mod checker;
pub mod operation;
pub mod runner;

pub use checker::{check_all, check_all_with, is_available, AvailabilityChecker};
pub use operation::Operation;
pub use runner::{ProbeOutcome, ProbeRunner, SystemProbeRunner};
