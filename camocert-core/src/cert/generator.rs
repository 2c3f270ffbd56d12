use std::fmt;

use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, ExtendedKeyUsagePurpose, IsCa,
    KeyIdMethod, KeyUsagePurpose, SerialNumber,
};
use sha1::{Digest, Sha1};
use time::OffsetDateTime;
use tracing::debug;

use super::keys::{generate_key_material, KeyAlgorithm};
use super::policy::{ValidityPolicy, ValidityWindow};
use crate::constants::{CA_PATH_LEN, KEYGEN_SEED_LEN, SERIAL_LEN};
use crate::error::{CamoError, GenerationStep, Result};
use crate::traits::clock::Clock;
use crate::traits::random::SecureRandom;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub key_algorithm: KeyAlgorithm,
    pub validity: ValidityPolicy,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        self.key_algorithm.validate()?;
        self.validity.validate()
    }
}

/// A generated self-signed certificate and its private key.
///
/// Nothing here is cached or persisted; the caller owns its lifetime.
#[derive(Clone)]
pub struct Credential {
    /// PEM block of type `CERTIFICATE`.
    pub certificate_pem: String,
    /// PEM private key block, `RSA PRIVATE KEY` or `PRIVATE KEY`.
    pub private_key_pem: String,
    pub key_algorithm: KeyAlgorithm,
    /// Big-endian serial number, uniform in `[0, 2^128)`.
    pub serial: [u8; SERIAL_LEN],
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
    /// SHA-1 of the DER SubjectPublicKeyInfo.
    pub subject_key_id: Vec<u8>,
    pub backdated_periods: u32,
}

impl Credential {
    pub fn serial_hex(&self) -> String {
        hex::encode(self.serial)
    }

    /// Splits into `(certificate_pem, private_key_pem)`.
    pub fn into_pem_pair(self) -> (String, String) {
        (self.certificate_pem, self.private_key_pem)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key_algorithm", &self.key_algorithm)
            .field("serial", &self.serial_hex())
            .field("not_before", &self.not_before)
            .field("not_after", &self.not_after)
            .field("subject_key_id", &hex::encode(&self.subject_key_id))
            .field("private_key_pem", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Mints a fresh, unlinkable self-signed server credential per call.
///
/// Stateless between calls: every invocation draws new key material, a new
/// serial and a new backdating offset from the injected random source.
pub struct CredentialGenerator<R, C> {
    config: GeneratorConfig,
    rng: R,
    clock: C,
}

impl<R: SecureRandom, C: Clock> CredentialGenerator<R, C> {
    pub fn new(config: GeneratorConfig, rng: R, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng, clock })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a credential bound to `host_name` (empty for no subject).
    pub fn generate(&self, host_name: &str) -> Result<Credential> {
        let mut seed = [0u8; KEYGEN_SEED_LEN];
        self.rng
            .fill_bytes(&mut seed)
            .map_err(|e| CamoError::generation(GenerationStep::RandomSource, e))?;
        let key = generate_key_material(self.config.key_algorithm, seed)?;

        let now = self
            .clock
            .now_secs()
            .map_err(|e| CamoError::generation(GenerationStep::Validity, e))?;
        let window = self.config.validity.window(now, &self.rng)?;

        let mut serial = [0u8; SERIAL_LEN];
        self.rng
            .fill_bytes(&mut serial)
            .map_err(|e| CamoError::generation(GenerationStep::RandomSource, e))?;

        // RFC 3280 section 4.2.1.2, method (1).
        let subject_key_id = Sha1::digest(&key.public_key_der).to_vec();

        let params = certificate_params(host_name, &window, &serial, &subject_key_id);
        let cert = params
            .self_signed(&key.signing_key)
            .map_err(|e| CamoError::generation(GenerationStep::Signing, e))?;

        let credential = Credential {
            certificate_pem: cert.pem(),
            private_key_pem: key.private_key_pem,
            key_algorithm: self.config.key_algorithm,
            serial,
            not_before: window.not_before,
            not_after: window.not_after,
            subject_key_id,
            backdated_periods: window.backdated_periods,
        };

        debug!(
            serial = %credential.serial_hex(),
            key = %credential.key_algorithm,
            backdated_periods = credential.backdated_periods,
            "generated self-signed credential"
        );

        Ok(credential)
    }
}

/// Self-signed template: subject == issuer, server auth only, CA with a
/// path length of one.
fn certificate_params(
    host_name: &str,
    window: &ValidityWindow,
    serial: &[u8],
    subject_key_id: &[u8],
) -> CertificateParams {
    let mut distinguished_name = DistinguishedName::new();
    if !host_name.is_empty() {
        distinguished_name.push(DnType::CommonName, host_name);
    }

    let mut params = CertificateParams::default();
    params.distinguished_name = distinguished_name;
    params.serial_number = Some(SerialNumber::from_slice(serial));
    params.not_before = window.not_before;
    params.not_after = window.not_after;
    params.key_usages = vec![
        KeyUsagePurpose::KeyEncipherment,
        KeyUsagePurpose::DigitalSignature,
        KeyUsagePurpose::KeyCertSign,
    ];
    params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];
    params.is_ca = IsCa::Ca(BasicConstraints::Constrained(CA_PATH_LEN));
    params.key_identifier_method = KeyIdMethod::PreSpecified(subject_key_id.to_vec());
    params
}
