//! Ephemeral TLS server credentials and fail-fast output channels.
//!
//! The credential generator mints a fresh self-signed certificate per call,
//! with a randomized serial and a backdated validity window so freshly minted
//! credentials look like long-lived ones. The write guard turns a failed
//! write on a critical channel into an unwinding [`guard::Escalation`]
//! instead of an error value that could be ignored.

pub mod error;
pub mod constants;
pub mod traits;
pub mod platform;
pub mod cert;
pub mod guard;

#[cfg(test)]
mod testing;
