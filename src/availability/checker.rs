//! Deciding whether a template can run on this host.
//!
//! A template is available when every one of its probes exits successfully.
//! Probes run one after another and stop at the first failure. A template
//! with no probes is always available.

use super::operation::Operation;
use super::runner::{ProbeRunner, SystemProbeRunner};
use std::panic;
use crate::registry::{Registry, Template};
use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Runs a template's probes through a [`ProbeRunner`].
#[derive(Debug, Clone, Default)]
pub struct AvailabilityChecker<R: ProbeRunner = SystemProbeRunner> {
    runner: R,
}

impl AvailabilityChecker {
    /// A checker that spawns real processes.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: ProbeRunner> AvailabilityChecker<R> {
    /// A checker using a custom probe runner.
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// Run `checks` in order; `true` only if all of them pass.
    ///
    /// Stops at the first failing or cancelled probe. Once `op` is cancelled
    /// or past its deadline, no further probe starts and the result is `false`.
    pub fn check(&self, checks: &[Vec<String>], op: &Operation) -> bool {
        for argv in checks {
            if op.is_done() {
                debug!("availability check cancelled");
                return false;
            }
            let outcome = self.runner.run(argv, op);
            if !outcome.passed() {
                debug!(probe = ?argv, ?outcome, "probe did not pass");
                return false;
            }
        }
        true
    }

    /// Check a single template.
    pub fn is_available(&self, template: &Template, op: &Operation) -> bool {
        if template.always_available() {
            return true;
        }
        self.check(&template.check, op)
    }
}

/// Check a template against the host using real processes.
pub fn is_available(template: &Template, op: &Operation) -> bool {
    AvailabilityChecker::new().is_available(template, op)
}

/// Check every template in `registry` concurrently.
///
/// Each template gets its own operation with `timeout`, so a slow probe in
/// one template never affects another. A panic in any template's check is
/// propagated to the caller.
pub fn check_all(registry: &Registry, timeout: Duration) -> BTreeMap<String, bool> {
    check_all_with(&AvailabilityChecker::new(), registry, timeout)
}

/// [`check_all`] with a custom checker.
pub fn check_all_with<R: ProbeRunner + Sync>(
    checker: &AvailabilityChecker<R>,
    registry: &Registry,
    timeout: Duration,
) -> BTreeMap<String, bool> {
    thread::scope(|scope| {
        let handles: Vec<_> = registry
            .iter()
            .map(|(name, template)| {
                let handle = scope.spawn(move || {
                    let op = Operation::with_timeout(timeout);
                    checker.is_available(template, &op)
                });
                (name, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(name, handle)| match handle.join() {
                Ok(available) => (name.to_string(), available),
                Err(payload) => panic::resume_unwind(payload),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::ProbeOutcome;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Passes or fails probes by program name and records what ran.
    #[derive(Default)]
    struct FakeRunner {
        failing: Vec<&'static str>,
        ran: Mutex<Vec<String>>,
    }

    impl FakeRunner {
        fn failing(programs: &[&'static str]) -> Self {
            Self {
                failing: programs.to_vec(),
                ..Default::default()
            }
        }

        fn ran(&self) -> Vec<String> {
            self.ran.lock().unwrap().clone()
        }
    }

    impl ProbeRunner for FakeRunner {
        fn run(&self, argv: &[String], _op: &Operation) -> ProbeOutcome {
            let Some(program) = argv.first() else {
                return ProbeOutcome::Failed;
            };
            self.ran.lock().unwrap().push(program.clone());
            if self.failing.contains(&program.as_str()) {
                ProbeOutcome::Failed
            } else {
                ProbeOutcome::Passed
            }
        }
    }

    fn probes(programs: &[&str]) -> Vec<Vec<String>> {
        programs.iter().map(|p| vec![p.to_string()]).collect()
    }

    #[test]
    fn no_probes_is_available() {
        let checker = AvailabilityChecker::with_runner(FakeRunner::default());
        assert!(checker.check(&[], &Operation::new()));
    }

    #[test]
    fn no_probes_is_available_even_when_cancelled() {
        let checker = AvailabilityChecker::with_runner(FakeRunner::default());
        let op = Operation::new();
        op.cancel();
        assert!(checker.check(&[], &op));
    }

    #[test]
    fn all_passing_is_available() {
        let checker = AvailabilityChecker::with_runner(FakeRunner::default());
        assert!(checker.check(&probes(&["a", "b", "c"]), &Operation::new()));
        assert_eq!(checker.runner.ran(), vec!["a", "b", "c"]);
    }

    #[test]
    fn stops_at_first_failure() {
        let checker = AvailabilityChecker::with_runner(FakeRunner::failing(&["b"]));
        assert!(!checker.check(&probes(&["a", "b", "c"]), &Operation::new()));
        assert_eq!(checker.runner.ran(), vec!["a", "b"]);
    }

    #[test]
    fn cancelled_operation_runs_nothing() {
        let checker = AvailabilityChecker::with_runner(FakeRunner::default());
        let op = Operation::new();
        op.cancel();
        assert!(!checker.check(&probes(&["a"]), &op));
        assert!(checker.runner.ran().is_empty());
    }

    #[test]
    fn empty_probe_is_a_failure() {
        let checker = AvailabilityChecker::with_runner(FakeRunner::default());
        assert!(!checker.check(&[vec![]], &Operation::new()));
    }

    #[test]
    fn check_all_covers_every_template() {
        let mut templates = HashMap::new();
        templates.insert(
            "Ready".to_string(),
            Template {
                check: probes(&["ok"]),
                ..Default::default()
            },
        );
        templates.insert(
            "Missing".to_string(),
            Template {
                check: probes(&["ok", "absent"]),
                ..Default::default()
            },
        );
        templates.insert("Bare".to_string(), Template::default());
        let registry = Registry::merge(templates, HashMap::new());

        let checker = AvailabilityChecker::with_runner(FakeRunner::failing(&["absent"]));
        let results = check_all_with(&checker, &registry, Duration::from_secs(5));

        assert_eq!(results.len(), 3);
        assert!(results["Ready"]);
        assert!(!results["Missing"]);
        assert!(results["Bare"]);
    }

    /// Panics on every command it is asked to run.
    struct Exploding;

    impl ProbeRunner for Exploding {
        fn run(&self, argv: &[String], _op: &Operation) -> ProbeOutcome {
            panic!("runner exploded on {:?}", argv);
        }
    }

    #[test]
    #[should_panic(expected = "runner exploded")]
    fn check_all_propagates_runner_panic() {
        let mut templates = HashMap::new();
        templates.insert(
            "Boom".to_string(),
            Template {
                check: probes(&["anything"]),
                ..Default::default()
            },
        );
        templates.insert("Bare".to_string(), Template::default());
        let registry = Registry::merge(templates, HashMap::new());

        check_all_with(
            &AvailabilityChecker::with_runner(Exploding),
            &registry,
            Duration::from_secs(5),
        );
    }

    #[test]
    fn check_all_with_unrepresentable_timeout() {
        let mut templates = HashMap::new();
        templates.insert(
            "Ready".to_string(),
            Template {
                check: probes(&["ok"]),
                ..Default::default()
            },
        );
        templates.insert("Bare".to_string(), Template::default());
        let registry = Registry::merge(templates, HashMap::new());

        let checker = AvailabilityChecker::with_runner(FakeRunner::default());
        let results = check_all_with(&checker, &registry, Duration::from_secs(u64::MAX));

        assert_eq!(results.len(), 2);
        assert!(results["Ready"]);
        assert!(results["Bare"]);
    }

    #[cfg(unix)]
    #[test]
    fn real_probes_short_circuit() {
        let template = Template {
            check: vec![
                vec!["true".into()],
                vec!["false".into()],
                vec!["sleep".into(), "30".into()],
            ],
            ..Default::default()
        };
        let start = std::time::Instant::now();
        assert!(!is_available(&template, &Operation::new()));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn real_probe_past_deadline_is_unavailable() {
        let template = Template {
            check: vec![vec!["sleep".into(), "30".into()]],
            ..Default::default()
        };
        let op = Operation::with_timeout(Duration::from_millis(100));
        assert!(!is_available(&template, &op));
    }
}
