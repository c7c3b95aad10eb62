//! Error types shared by every codec in the crate.

use thiserror::Error;

/// Errors reported by the Hamming(7,4) codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input that cannot be interpreted, such as a nibble value above 15
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Stream length is not a whole number of blocks
    #[error("Input length {length} is not a multiple of the {block}-bit block size")]
    MalformedLength { length: usize, block: usize },

    /// Caller-supplied output buffer cannot hold the result
    #[error("Output buffer too small: need {needed} bits, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::MalformedLength {
            length: 9,
            block: 4,
        };
        assert_eq!(
            err.to_string(),
            "Input length 9 is not a multiple of the 4-bit block size"
        );

        let err = Error::BufferTooSmall {
            needed: 14,
            actual: 7,
        };
        assert_eq!(
            err.to_string(),
            "Output buffer too small: need 14 bits, got 7"
        );

        let err = Error::InvalidInput("bad nibble".to_string());
        assert_eq!(err.to_string(), "Invalid input: bad nibble");
    }
}
