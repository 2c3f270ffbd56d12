use std::time::Duration;

const DAY: u64 = 24 * 60 * 60;

/// Default RSA modulus size in bits.
pub const DEFAULT_RSA_BITS: usize = 2048;

/// Smallest RSA modulus accepted by the generator.
pub const MIN_RSA_BITS: usize = 2048;

/// Largest RSA modulus accepted by the generator; ring refuses to sign
/// with anything bigger.
pub const MAX_RSA_BITS: usize = 4096;

/// Length of one backdating period (~1 month).
pub const BACKDATE_PERIOD: Duration = Duration::from_secs(30 * DAY);

/// Fewest backdating periods drawn for `notBefore`.
pub const MIN_BACKDATE_PERIODS: u32 = 1;

/// Most backdating periods drawn for `notBefore`.
pub const MAX_BACKDATE_PERIODS: u32 = 12;

/// Certificate lifetime, `notAfter - notBefore` (~10 years).
pub const CERT_LIFETIME: Duration = Duration::from_secs(10 * 365 * DAY);

/// Serial number length in bytes; serials are uniform in `[0, 2^128)`.
pub const SERIAL_LEN: usize = 16;

/// Seed length for the key generation CSPRNG.
pub const KEYGEN_SEED_LEN: usize = 32;

/// Maximum basic-constraints path length on generated certificates.
pub const CA_PATH_LEN: u8 = 1;

/// PEM label of the certificate block.
pub const PEM_CERTIFICATE: &str = "CERTIFICATE";

/// PEM label of an RSA (PKCS#1) private key block.
pub const PEM_RSA_PRIVATE_KEY: &str = "RSA PRIVATE KEY";

/// PEM label of a PKCS#8 private key block.
pub const PEM_PRIVATE_KEY: &str = "PRIVATE KEY";

/// Process exit status after an escalation reaches the top-level boundary
/// (`EX_SOFTWARE` from sysexits.h).
pub const ESCALATION_EXIT_CODE: i32 = 70;
