use crate::error::CamoError;

pub trait SecureRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CamoError>;

    fn random_bytes(&self, len: usize) -> Result<Vec<u8>, CamoError> {
        let mut buf = vec![0u8; len];
        self.fill_bytes(&mut buf)?;
        Ok(buf)
    }

    /// Uniform integer in `[0, n)`, by rejection sampling over 64-bit draws.
    fn random_below(&self, n: u64) -> Result<u64, CamoError> {
        if n == 0 {
            return Err(CamoError::Platform("random_below: empty range".into()));
        }

        // Largest accepted draw; (limit + 1) is a multiple of n.
        let limit = u64::MAX - ((u64::MAX % n + 1) % n);
        loop {
            let mut buf = [0u8; 8];
            self.fill_bytes(&mut buf)?;
            let v = u64::from_le_bytes(buf);
            if v <= limit {
                return Ok(v % n);
            }
        }
    }
}

impl<T: SecureRandom + ?Sized> SecureRandom for &T {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CamoError> {
        (**self).fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// Hands out queued 64-bit little-endian values.
    struct Scripted(RefCell<VecDeque<u64>>);

    impl SecureRandom for Scripted {
        fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CamoError> {
            let v = self
                .0
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| CamoError::Platform("script exhausted".into()))?;
            dest.copy_from_slice(&v.to_le_bytes()[..dest.len()]);
            Ok(())
        }
    }

    #[test]
    fn test_random_below_reduces_accepted_draw() {
        let rng = Scripted(RefCell::new(VecDeque::from([17])));
        assert_eq!(rng.random_below(12).unwrap(), 17 % 12);
    }

    #[test]
    fn test_random_below_rejects_biased_tail() {
        // 2^64 mod 12 == 4, so the top four values are rejected.
        let rng = Scripted(RefCell::new(VecDeque::from([u64::MAX, u64::MAX - 3, 5])));
        assert_eq!(rng.random_below(12).unwrap(), 5);
    }

    #[test]
    fn test_random_below_zero_is_error() {
        let rng = Scripted(RefCell::new(VecDeque::new()));
        assert!(rng.random_below(0).is_err());
    }

    #[test]
    fn test_random_below_propagates_source_failure() {
        let rng = Scripted(RefCell::new(VecDeque::new()));
        assert!(matches!(rng.random_below(12), Err(CamoError::Platform(_))));
    }

    #[test]
    fn test_random_below_one_is_always_zero() {
        let rng = Scripted(RefCell::new(VecDeque::from([u64::MAX])));
        assert_eq!(rng.random_below(1).unwrap(), 0);
    }
}
