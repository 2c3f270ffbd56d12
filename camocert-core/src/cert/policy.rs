//! Validity window policy.
//!
//! `notBefore` is pushed back by a random number of whole periods so a
//! credential minted now is indistinguishable by its start date from one
//! minted months ago. The range and period length are configuration.

use std::time::Duration;

use time::OffsetDateTime;

use crate::constants::{BACKDATE_PERIOD, CERT_LIFETIME, MAX_BACKDATE_PERIODS, MIN_BACKDATE_PERIODS};
use crate::error::{CamoError, GenerationStep, Result};
use crate::traits::random::SecureRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackdatePolicy {
    /// Fewest periods to backdate by (inclusive, at least 1).
    pub min_periods: u32,
    /// Most periods to backdate by (inclusive).
    pub max_periods: u32,
    /// Length of one period, in whole seconds.
    pub period: Duration,
}

impl Default for BackdatePolicy {
    fn default() -> Self {
        Self {
            min_periods: MIN_BACKDATE_PERIODS,
            max_periods: MAX_BACKDATE_PERIODS,
            period: BACKDATE_PERIOD,
        }
    }
}

impl BackdatePolicy {
    pub fn validate(&self) -> Result<()> {
        if self.min_periods == 0 {
            return Err(CamoError::Config("backdate min_periods must be at least 1".into()));
        }
        if self.min_periods > self.max_periods {
            return Err(CamoError::Config(format!(
                "backdate range is empty: min_periods {} > max_periods {}",
                self.min_periods, self.max_periods
            )));
        }
        if self.period.as_secs() == 0 {
            return Err(CamoError::Config("backdate period must be at least one second".into()));
        }
        self.max_offset_secs()
            .ok_or_else(|| CamoError::Config("backdate offset overflows".into()))?;
        Ok(())
    }

    /// Largest possible backdating offset in seconds.
    pub fn max_offset_secs(&self) -> Option<u64> {
        self.period.as_secs().checked_mul(u64::from(self.max_periods))
    }

    /// Draws a period count uniformly from `[min_periods, max_periods]`.
    pub fn draw_periods<R: SecureRandom + ?Sized>(&self, rng: &R) -> Result<u32> {
        let span = u64::from(self.max_periods.saturating_sub(self.min_periods)) + 1;
        let drawn = rng
            .random_below(span)
            .map_err(|e| CamoError::generation(GenerationStep::RandomSource, e))?;
        // drawn < span <= u32::MAX + 1, and min + drawn <= max_periods.
        Ok(self.min_periods + drawn as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPolicy {
    pub backdate: BackdatePolicy,
    /// `notAfter - notBefore`, in whole seconds.
    pub lifetime: Duration,
}

impl Default for ValidityPolicy {
    fn default() -> Self {
        Self {
            backdate: BackdatePolicy::default(),
            lifetime: CERT_LIFETIME,
        }
    }
}

/// A concrete `[notBefore, notAfter]` drawn from a [`ValidityPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
    pub backdated_periods: u32,
}

impl ValidityPolicy {
    pub fn validate(&self) -> Result<()> {
        self.backdate.validate()?;
        let max_offset = self.backdate.max_offset_secs().unwrap_or(u64::MAX);
        // now must stay strictly inside the window for every draw.
        if self.lifetime.as_secs() <= max_offset {
            return Err(CamoError::Config(format!(
                "lifetime of {}s does not outlast the maximum backdate of {}s",
                self.lifetime.as_secs(),
                max_offset
            )));
        }
        Ok(())
    }

    /// Draws a window around `now_secs` (Unix seconds, UTC).
    pub fn window<R: SecureRandom + ?Sized>(&self, now_secs: u64, rng: &R) -> Result<ValidityWindow> {
        let periods = self.backdate.draw_periods(rng)?;
        let offset = self
            .backdate
            .period
            .as_secs()
            .checked_mul(u64::from(periods))
            .ok_or_else(|| CamoError::generation(GenerationStep::Validity, "backdate offset overflows"))?;

        let not_before = now_secs.checked_sub(offset).ok_or_else(|| {
            CamoError::generation(
                GenerationStep::Validity,
                format!("clock at {now_secs}s is earlier than the {offset}s backdate"),
            )
        })?;
        let not_after = not_before
            .checked_add(self.lifetime.as_secs())
            .ok_or_else(|| CamoError::generation(GenerationStep::Validity, "notAfter overflows"))?;

        Ok(ValidityWindow {
            not_before: to_datetime(not_before)?,
            not_after: to_datetime(not_after)?,
            backdated_periods: periods,
        })
    }
}

fn to_datetime(secs: u64) -> Result<OffsetDateTime> {
    i64::try_from(secs)
        .ok()
        .and_then(|s| OffsetDateTime::from_unix_timestamp(s).ok())
        .ok_or_else(|| {
            CamoError::generation(GenerationStep::Validity, format!("timestamp {secs} out of range"))
        })
}
