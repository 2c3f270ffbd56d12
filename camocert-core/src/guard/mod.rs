//! Fail-fast output channels.
//!
//! A [`FatalWriter`] never reports a failed write as an `io::Error`. It
//! unwinds with an [`Escalation`] payload instead, which only a top-level
//! boundary ([`exit_on_escalation`]) or an enriching relay
//! ([`reraise_with_stack`]) may intercept.

pub mod boundary;
pub mod escalation;
pub mod writer;

pub use boundary::{exit_on_escalation, quiet_escalation_hook, reraise_with_stack};
pub use escalation::Escalation;
pub use writer::FatalWriter;
