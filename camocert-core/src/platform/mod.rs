//! Native implementations of the platform traits.

pub mod native_random;
pub mod native_clock;

pub use native_clock::NativeClock;
pub use native_random::NativeRandom;
