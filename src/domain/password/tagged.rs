//! Tagged stored-password format: `{algorithm}hashedValue`

use std::fmt;
use std::str::FromStr;

use super::algorithm::PasswordAlgorithm;
use super::error::PasswordEncodingError;

const TAG_OPEN: char = '{';
const TAG_CLOSE: char = '}';

/// A hashed password together with the algorithm that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedPassword {
    algorithm: PasswordAlgorithm,
    hashed: String,
}

impl TaggedPassword {
    /// Tag a hash. The hash must be non-empty.
    pub fn new(
        algorithm: PasswordAlgorithm,
        hashed: impl Into<String>,
    ) -> Result<Self, PasswordEncodingError> {
        let hashed = hashed.into();

        if hashed.is_empty() {
            return Err(PasswordEncodingError::malformed(format!(
                "{} produced an empty hash",
                algorithm
            )));
        }

        Ok(Self { algorithm, hashed })
    }

    /// Parse a stored value of the form `{algorithm}hashedValue`
    pub fn parse(stored: &str) -> Result<Self, PasswordEncodingError> {
        let rest = stored
            .strip_prefix(TAG_OPEN)
            .ok_or_else(|| PasswordEncodingError::malformed("missing leading '{'"))?;

        let (name, hashed) = rest
            .split_once(TAG_CLOSE)
            .ok_or_else(|| PasswordEncodingError::malformed("missing closing '}'"))?;

        let algorithm = PasswordAlgorithm::from_name(name)?;

        Self::new(algorithm, hashed)
    }

    pub fn algorithm(&self) -> PasswordAlgorithm {
        self.algorithm
    }

    pub fn hashed(&self) -> &str {
        &self.hashed
    }
}

impl FromStr for TaggedPassword {
    type Err = PasswordEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TaggedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", TAG_OPEN, self.algorithm.name(), TAG_CLOSE, self.hashed)
    }
}

impl From<TaggedPassword> for String {
    fn from(tagged: TaggedPassword) -> Self {
        tagged.to_string()
    }
}
