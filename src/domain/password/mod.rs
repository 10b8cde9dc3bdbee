//! Password encoding domain
//!
//! Algorithm catalogue, the tagged stored-password format, and the traits
//! that concrete encoders and algorithm selectors implement.

mod algorithm;
mod encoder;
mod error;
mod selector;
mod tagged;

pub use algorithm::PasswordAlgorithm;
pub use encoder::PasswordEncoder;
pub use error::PasswordEncodingError;
pub use selector::AlgorithmSelector;
pub use tagged::TaggedPassword;

#[cfg(test)]
pub use selector::MockAlgorithmSelector;
