//! Hamming(7,4) error correction.
//!
//! The code places parity bits at the codeword positions whose 1-based index is
//! a power of two (1, 2, 4) and the data bits everywhere else (3, 5, 6, 7).
//! Parity bit `p` covers every position whose 1-based index has bit `p` set,
//! so the failing checks spell out the 1-based position of a single error.
//!
//! ```text
//! 1-based position:  1   2   3   4   5   6   7
//! role:              p0  p1  d0  p2  d1  d2  d3
//! ```
//!
//! # Modules
//!
//! - [`parity`]: even-parity check over one parity group
//! - [`syndrome`]: combined parity checks and error location
//! - [`block`]: nibble encoder and decoder
//! - [`stream`]: bit and byte stream drivers
//! - [`hamming`]: packed byte codec

use crate::error::Error;

/// Result type for error correction operations
pub type Result<T> = std::result::Result<T, Error>;

/// A single binary digit.
pub type Bit = bool;

/// Trait for error correction code implementations
pub trait ErrorCorrection {
    /// Encode data with error correction symbols
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decode data and correct errors if possible
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>>;
}

pub mod block;
pub mod hamming;
pub mod parity;
pub mod stream;
pub mod syndrome;

pub use block::{
    decode_nibble, decode_nibble_with_correction, encode_nibble, Codeword, Correction, Nibble,
    CODEWORD_BITS, DATA_BITS, DATA_POSITIONS, PARITY_BITS,
};
pub use parity::parity_check;
pub use stream::{decode_bits, decode_bytes, encode_bits, encode_bytes, DecodeStats};
pub use syndrome::{syndrome, Syndrome};
