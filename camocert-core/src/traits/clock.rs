use crate::error::CamoError;

pub trait Clock {
    /// Seconds since the Unix epoch.
    fn now_secs(&self) -> Result<u64, CamoError>;
}
