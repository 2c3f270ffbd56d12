//! Key pair generation for generated credentials.
//!
//! Keys are derived from a 32-byte seed expanded by ChaCha20, so the injected
//! random source is the only entropy input.

use std::fmt;
use std::str::FromStr;

use p256::SecretKey;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use rcgen::{KeyPair, SignatureAlgorithm, PKCS_ECDSA_P256_SHA256, PKCS_RSA_SHA256};
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;

use crate::constants::{
    DEFAULT_RSA_BITS, KEYGEN_SEED_LEN, MAX_RSA_BITS, MIN_RSA_BITS, PEM_PRIVATE_KEY,
    PEM_RSA_PRIVATE_KEY,
};
use crate::error::{CamoError, GenerationStep, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    /// RSA with PKCS#1 v1.5 SHA-256 signatures.
    Rsa { bits: usize },
    /// ECDSA on NIST P-256 with SHA-256.
    EcdsaP256,
}

impl Default for KeyAlgorithm {
    fn default() -> Self {
        KeyAlgorithm::Rsa {
            bits: DEFAULT_RSA_BITS,
        }
    }
}

impl KeyAlgorithm {
    pub fn validate(&self) -> Result<()> {
        match *self {
            KeyAlgorithm::Rsa { bits } if !(MIN_RSA_BITS..=MAX_RSA_BITS).contains(&bits) => {
                Err(CamoError::Config(format!(
                    "RSA key size {bits} outside {MIN_RSA_BITS}..={MAX_RSA_BITS}"
                )))
            }
            KeyAlgorithm::Rsa { bits } if bits % 8 != 0 => Err(CamoError::Config(format!(
                "RSA key size {bits} is not a whole number of bytes"
            ))),
            _ => Ok(()),
        }
    }

    /// PEM label of the private key block this algorithm produces.
    pub fn private_key_label(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa { .. } => PEM_RSA_PRIVATE_KEY,
            KeyAlgorithm::EcdsaP256 => PEM_PRIVATE_KEY,
        }
    }

    fn signature_algorithm(&self) -> &'static SignatureAlgorithm {
        match self {
            KeyAlgorithm::Rsa { .. } => &PKCS_RSA_SHA256,
            KeyAlgorithm::EcdsaP256 => &PKCS_ECDSA_P256_SHA256,
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Rsa { bits } => write!(f, "rsa-{bits}"),
            KeyAlgorithm::EcdsaP256 => f.write_str("p256"),
        }
    }
}

/// Accepts `rsa`, `rsa-<bits>`, `p256` and `ecdsa-p256` (case-insensitive).
impl FromStr for KeyAlgorithm {
    type Err = CamoError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let algorithm = match lower.as_str() {
            "rsa" => KeyAlgorithm::default(),
            "p256" | "ecdsa-p256" => KeyAlgorithm::EcdsaP256,
            other => {
                let bits = other
                    .strip_prefix("rsa-")
                    .and_then(|b| b.parse::<usize>().ok())
                    .ok_or_else(|| CamoError::Config(format!("unknown key algorithm: {s}")))?;
                KeyAlgorithm::Rsa { bits }
            }
        };
        algorithm.validate()?;
        Ok(algorithm)
    }
}

/// A freshly generated key pair in the forms the generator needs.
pub(crate) struct KeyMaterial {
    /// Signing handle used to self-sign the certificate.
    pub signing_key: KeyPair,
    /// DER SubjectPublicKeyInfo.
    pub public_key_der: Vec<u8>,
    /// Private key as PEM, labelled per [`KeyAlgorithm::private_key_label`].
    pub private_key_pem: String,
}

pub(crate) fn generate_key_material(
    algorithm: KeyAlgorithm,
    seed: [u8; KEYGEN_SEED_LEN],
) -> Result<KeyMaterial> {
    let mut rng = ChaCha20Rng::from_seed(seed);

    let (pkcs8_pem, private_key_pem, public_key_der) = match algorithm {
        KeyAlgorithm::Rsa { bits } => {
            let key = RsaPrivateKey::new(&mut rng, bits)
                .map_err(|e| CamoError::generation(GenerationStep::KeyGeneration, e))?;
            let public_key_der = key
                .to_public_key()
                .to_public_key_der()
                .map_err(|e| CamoError::generation(GenerationStep::Marshal, e))?;
            let pkcs8_pem = key
                .to_pkcs8_pem(LineEnding::LF)
                .map_err(|e| CamoError::generation(GenerationStep::Encoding, e))?;
            let pkcs1_pem = key
                .to_pkcs1_pem(LineEnding::LF)
                .map_err(|e| CamoError::generation(GenerationStep::Encoding, e))?;
            (pkcs8_pem, pkcs1_pem.to_string(), public_key_der)
        }
        KeyAlgorithm::EcdsaP256 => {
            let key = SecretKey::random(&mut rng);
            let public_key_der = key
                .public_key()
                .to_public_key_der()
                .map_err(|e| CamoError::generation(GenerationStep::Marshal, e))?;
            let pkcs8_pem = key
                .to_pkcs8_pem(LineEnding::LF)
                .map_err(|e| CamoError::generation(GenerationStep::Encoding, e))?;
            let private_key_pem = pkcs8_pem.to_string();
            (pkcs8_pem, private_key_pem, public_key_der)
        }
    };

    let signing_key = KeyPair::from_pem_and_sign_algo(&pkcs8_pem, algorithm.signature_algorithm())
        .map_err(|e| CamoError::generation(GenerationStep::KeyGeneration, e))?;

    Ok(KeyMaterial {
        signing_key,
        public_key_der: public_key_der.as_bytes().to_vec(),
        private_key_pem,
    })
}
