use std::any::Any;
use std::panic;

use thiserror::Error;

/// Unrecoverable failure carried as an unwinding panic payload.
///
/// Created at the failure site with a message only. A recovery boundary may
/// attach the stack captured where it intercepted the unwind, producing a
/// new value; the original is never modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct Escalation {
    message: String,
}

impl Escalation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns a copy whose message records `stack`.
    #[must_use]
    pub fn with_stack(&self, stack: &str) -> Self {
        Self::new(format!(
            "intentional panic error: {}\nstack: {}\n",
            self.message, stack
        ))
    }

    /// Unwinds the current thread with `self` as the panic payload.
    pub fn raise(self) -> ! {
        panic::panic_any(self)
    }

    /// Recovers an escalation from a caught panic payload.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Option<&Escalation> {
        payload.downcast_ref::<Escalation>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_stack_leaves_original_untouched() {
        let original = Escalation::new("fatal write to log failed: broken pipe");
        let enriched = original.with_stack("frame 0\nframe 1");

        assert_eq!(original.message(), "fatal write to log failed: broken pipe");
        assert!(enriched.message().contains(original.message()));
        assert!(enriched.message().contains("frame 0\nframe 1"));
        assert!(enriched.message().len() > original.message().len());
        assert_eq!(
            enriched.message(),
            "intentional panic error: fatal write to log failed: broken pipe\nstack: frame 0\nframe 1\n"
        );
    }

    #[test]
    fn test_display_is_message() {
        let escalation = Escalation::new("channel gone");
        assert_eq!(escalation.to_string(), "channel gone");
    }

    #[test]
    fn test_raise_unwinds_with_payload() {
        let payload = panic::catch_unwind(|| Escalation::new("boom").raise()).unwrap_err();
        let escalation = Escalation::from_panic(payload.as_ref()).expect("escalation payload");
        assert_eq!(escalation.message(), "boom");
    }

    #[test]
    fn test_from_panic_ignores_other_payloads() {
        let payload = panic::catch_unwind(|| panic!("ordinary")).unwrap_err();
        assert!(Escalation::from_panic(payload.as_ref()).is_none());
    }
}
