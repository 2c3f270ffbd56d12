use crate::error::CamoError;
use crate::traits::random::SecureRandom;

/// Native SecureRandom implementation using the OS CSPRNG via getrandom.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeRandom;

impl NativeRandom {
    pub fn new() -> Self {
        Self
    }
}

impl SecureRandom for NativeRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CamoError> {
        getrandom::getrandom(dest)
            .map_err(|e| CamoError::Platform(format!("getrandom failed: {e}")))
    }
}
