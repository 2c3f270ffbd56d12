//! Substitutable platform capabilities for tests.

use std::sync::Mutex;

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

use crate::error::CamoError;
use crate::traits::clock::Clock;
use crate::traits::random::SecureRandom;

/// Deterministic random source: the same seed yields the same stream.
pub(crate) struct SeededRandom(Mutex<ChaCha20Rng>);

impl SeededRandom {
    pub(crate) fn new(seed: u64) -> Self {
        Self(Mutex::new(ChaCha20Rng::seed_from_u64(seed)))
    }
}

impl SecureRandom for SeededRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CamoError> {
        let mut rng = self
            .0
            .lock()
            .map_err(|_| CamoError::Platform("seeded random poisoned".into()))?;
        RngCore::fill_bytes(&mut *rng, dest);
        Ok(())
    }
}

/// Random source whose entropy is always exhausted.
pub(crate) struct FailingRandom;

impl SecureRandom for FailingRandom {
    fn fill_bytes(&self, _dest: &mut [u8]) -> Result<(), CamoError> {
        Err(CamoError::Platform("entropy source unavailable".into()))
    }
}

pub(crate) struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_secs(&self) -> Result<u64, CamoError> {
        Ok(self.0)
    }
}
