//! Interception points for [`Escalation`] unwinds.
//!
//! Neither function ever turns an escalation into an ordinary return value:
//! one re-raises it, the other terminates the process.

use std::backtrace::Backtrace;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::process;

use super::escalation::Escalation;
use crate::constants::ESCALATION_EXIT_CODE;

/// Installs a panic hook that stays silent for [`Escalation`] payloads and
/// defers to the previous hook for everything else.
///
/// Boundaries report escalations themselves; without this the default hook
/// prints an extra `Box<dyn Any>` line first.
pub fn quiet_escalation_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if info.payload().downcast_ref::<Escalation>().is_none() {
            previous(info);
        }
    }));
}

/// Runs `f`, re-raising any escalation with the stack captured here.
///
/// Other panics resume unchanged.
pub fn reraise_with_stack<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => match Escalation::from_panic(payload.as_ref()) {
            Some(escalation) => {
                let enriched = escalation.with_stack(&Backtrace::force_capture().to_string());
                panic::resume_unwind(Box::new(enriched))
            }
            None => panic::resume_unwind(payload),
        },
    }
}

/// Top-level boundary: runs `f` and, if it escalates, reports the enriched
/// escalation on stderr and exits with [`ESCALATION_EXIT_CODE`].
///
/// The report bypasses `tracing` since the log sink may be the channel that
/// broke. Other panics resume unchanged.
pub fn exit_on_escalation<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => match Escalation::from_panic(payload.as_ref()) {
            Some(escalation) => {
                let enriched = escalation.with_stack(&Backtrace::force_capture().to_string());
                // Best effort; we are exiting regardless.
                let _ = writeln!(io::stderr().lock(), "{enriched}");
                process::exit(ESCALATION_EXIT_CODE)
            }
            None => panic::resume_unwind(payload),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_reraise_passes_values_through() {
        assert_eq!(reraise_with_stack(|| 41 + 1), 42);
    }

    #[test]
    fn test_reraise_enriches_escalation() {
        let payload = panic::catch_unwind(|| {
            reraise_with_stack(|| -> () { Escalation::new("fatal write to audit failed: EPIPE").raise() })
        })
        .unwrap_err();

        let escalation = Escalation::from_panic(payload.as_ref()).expect("escalation payload");
        assert!(escalation
            .message()
            .starts_with("intentional panic error: fatal write to audit failed: EPIPE\nstack: "));
    }

    #[test]
    fn test_reraise_resumes_foreign_panics_unchanged() {
        let payload = panic::catch_unwind(|| reraise_with_stack(|| -> () { panic!("plain failure") }))
            .unwrap_err();

        assert!(Escalation::from_panic(payload.as_ref()).is_none());
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"plain failure"));
    }

    #[test]
    fn test_exit_boundary_passes_values_through() {
        assert_eq!(exit_on_escalation(|| "ok"), "ok");
    }

    #[test]
    fn test_exit_boundary_resumes_foreign_panics() {
        let payload = panic::catch_unwind(|| exit_on_escalation(|| -> () { panic!("not ours") }))
            .unwrap_err();
        assert!(Escalation::from_panic(payload.as_ref()).is_none());
    }

    #[test]
    fn test_escalation_does_not_vanish_in_spawned_thread() {
        let joined = thread::spawn(|| reraise_with_stack(|| -> () { Escalation::new("worker sink").raise() }))
            .join();

        let payload = joined.unwrap_err();
        let escalation = Escalation::from_panic(payload.as_ref()).expect("escalation payload");
        assert!(escalation.message().contains("worker sink"));
    }
}
