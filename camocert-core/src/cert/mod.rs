//! Ephemeral self-signed TLS server credentials.

pub mod generator;
pub mod keys;
pub mod policy;

pub use generator::{Credential, CredentialGenerator, GeneratorConfig};
pub use keys::KeyAlgorithm;
pub use policy::{BackdatePolicy, ValidityPolicy, ValidityWindow};

use crate::error::Result;
use crate::platform::{NativeClock, NativeRandom};

/// Generates a self-signed web server certificate for `host_name` with the
/// default policy (RSA-2048, backdated 1-12 months, ~10 year lifetime).
///
/// Returns `(certificate_pem, private_key_pem)`.
pub fn generate_web_server_certificate(host_name: &str) -> Result<(String, String)> {
    let generator =
        CredentialGenerator::new(GeneratorConfig::default(), NativeRandom::new(), NativeClock::new())?;
    Ok(generator.generate(host_name)?.into_pem_pair())
}
