//! Encoder registry
//!
//! Maps algorithm codes to names and names to encoders. A registry is built
//! once and never mutated; `EncoderRegistry::shared()` hands out the
//! process-wide instance.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::domain::password::{
    AlgorithmSelector, PasswordAlgorithm, PasswordEncoder, PasswordEncodingError, TaggedPassword,
};

use super::{BcryptEncoder, NoOpEncoder, Pbkdf2Encoder, ScryptEncoder, Sha256Encoder};

static SHARED: Lazy<Arc<EncoderRegistry>> = Lazy::new(|| {
    debug!("Building shared password encoder registry");
    Arc::new(EncoderRegistry::with_defaults())
});

/// Immutable catalogue of the registered password encoders
#[derive(Debug)]
pub struct EncoderRegistry {
    /// Covers every `PasswordAlgorithm`
    encoders: HashMap<&'static str, Box<dyn PasswordEncoder>>,
}

impl EncoderRegistry {
    /// The process-wide registry with default encoder parameters
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// A fresh registry with default encoder parameters
    pub fn with_defaults() -> Self {
        let encoders: Vec<Box<dyn PasswordEncoder>> = vec![
            Box::new(NoOpEncoder::new()),
            Box::new(BcryptEncoder::new()),
            Box::new(Pbkdf2Encoder::new()),
            Box::new(ScryptEncoder::new()),
            Box::new(Sha256Encoder::new()),
        ];

        let encoders = encoders
            .into_iter()
            .map(|encoder| (encoder.algorithm().name(), encoder))
            .collect();

        Self { encoders }
    }

    /// Build a registry from custom encoders. Every algorithm must be covered
    /// exactly once.
    pub fn from_encoders(
        encoders: Vec<Box<dyn PasswordEncoder>>,
    ) -> Result<Self, PasswordEncodingError> {
        let mut by_name: HashMap<&'static str, Box<dyn PasswordEncoder>> = HashMap::new();

        for encoder in encoders {
            let name = encoder.algorithm().name();
            if by_name.insert(name, encoder).is_some() {
                return Err(PasswordEncodingError::DuplicateEncoder {
                    name: name.to_string(),
                });
            }
        }

        if let Some(missing) = PasswordAlgorithm::ALL
            .iter()
            .find(|algorithm| !by_name.contains_key(algorithm.name()))
        {
            return Err(PasswordEncodingError::IncompleteRegistry {
                name: missing.name().to_string(),
            });
        }

        Ok(Self { encoders: by_name })
    }

    /// Number of registered algorithm codes
    pub fn len(&self) -> usize {
        PasswordAlgorithm::COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    pub fn algorithm_for_code(&self, code: usize) -> Result<PasswordAlgorithm, PasswordEncodingError> {
        PasswordAlgorithm::from_code(code)
    }

    pub fn algorithm_name_for_code(&self, code: usize) -> Result<&'static str, PasswordEncodingError> {
        self.algorithm_for_code(code).map(|algorithm| algorithm.name())
    }

    /// Hash with the named algorithm
    pub fn hash(&self, algorithm_name: &str, plaintext: &str) -> Result<String, PasswordEncodingError> {
        self.encoder(algorithm_name)?.hash(plaintext)
    }

    /// Check a plaintext against a hash of the named algorithm. Unknown
    /// names never match.
    pub fn verify(&self, algorithm_name: &str, plaintext: &str, hashed: &str) -> bool {
        match self.encoder(algorithm_name) {
            Ok(encoder) => encoder.verify(plaintext, hashed),
            Err(e) => {
                warn!(error = %e, "Password verification against unregistered algorithm");
                false
            }
        }
    }

    /// Hash with `algorithm` and tag the result
    pub fn encode(
        &self,
        algorithm: PasswordAlgorithm,
        plaintext: &str,
    ) -> Result<TaggedPassword, PasswordEncodingError> {
        let hashed = self.hash(algorithm.name(), plaintext)?;
        TaggedPassword::new(algorithm, hashed)
    }

    /// Draw an algorithm from `selector`, then hash and tag `plaintext`
    pub fn encode_with(
        &self,
        selector: &dyn AlgorithmSelector,
        plaintext: &str,
    ) -> Result<TaggedPassword, PasswordEncodingError> {
        let code = selector.next_code(self.len());
        let algorithm = self.algorithm_for_code(code)?;
        self.encode(algorithm, plaintext)
    }

    /// Verify `plaintext` with the algorithm named by the tag
    pub fn matches(&self, plaintext: &str, tagged: &TaggedPassword) -> bool {
        self.verify(tagged.algorithm().name(), plaintext, tagged.hashed())
    }

    fn encoder(&self, algorithm_name: &str) -> Result<&dyn PasswordEncoder, PasswordEncodingError> {
        self.encoders
            .get(algorithm_name)
            .map(|encoder| encoder.as_ref())
            .ok_or_else(|| PasswordEncodingError::UnknownAlgorithm {
                name: algorithm_name.to_string(),
            })
    }
}
