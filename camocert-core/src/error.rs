use std::fmt;

use thiserror::Error;

/// The generation step that failed, carried inside [`CamoError::Generation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStep {
    RandomSource,
    KeyGeneration,
    Validity,
    Marshal,
    Signing,
    Encoding,
}

impl fmt::Display for GenerationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationStep::RandomSource => "random source",
            GenerationStep::KeyGeneration => "key generation",
            GenerationStep::Validity => "validity window",
            GenerationStep::Marshal => "public key marshaling",
            GenerationStep::Signing => "certificate signing",
            GenerationStep::Encoding => "PEM encoding",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum CamoError {
    #[error("Generation failed during {step}: {reason}")]
    Generation { step: GenerationStep, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

impl CamoError {
    pub fn generation(step: GenerationStep, reason: impl fmt::Display) -> Self {
        CamoError::Generation {
            step,
            reason: reason.to_string(),
        }
    }

    /// The failing step, if this is a generation error.
    pub fn step(&self) -> Option<GenerationStep> {
        match self {
            CamoError::Generation { step, .. } => Some(*step),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CamoError>;
