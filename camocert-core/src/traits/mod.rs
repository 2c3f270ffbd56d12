//! Platform capabilities injected into the generator (randomness and time).

pub mod random;
pub mod clock;
