//! Algorithm selection

#[cfg(test)]
use mockall::automock;

/// Source of algorithm codes for new registrations
#[cfg_attr(test, automock)]
pub trait AlgorithmSelector: Send + Sync {
    /// Draw a code uniformly from `0..bound`
    fn next_code(&self, bound: usize) -> usize;
}
