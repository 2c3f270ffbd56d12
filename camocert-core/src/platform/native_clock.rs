use std::time::SystemTime;

use crate::error::CamoError;
use crate::traits::clock::Clock;

/// Native Clock implementation using std::time::SystemTime.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeClock;

impl NativeClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for NativeClock {
    fn now_secs(&self) -> Result<u64, CamoError> {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| CamoError::Platform(format!("SystemTime error: {e}")))
    }
}
