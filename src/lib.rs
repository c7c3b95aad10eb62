//! Hamming(7,4) single-error-correcting code.
//!
//! Every 4-bit nibble is expanded into a 7-bit codeword carrying 3 even-parity
//! bits. On decode the parity checks are combined into a syndrome that names the
//! position of a single flipped bit, which is corrected before the payload is
//! extracted. Two or more flips within one codeword are not detected.
//!
//! The crate is layered the same way the code is built up:
//! - [`ecc::parity`] and [`ecc::syndrome`] hold the length-generic bit algebra
//! - [`ecc::block`] specializes it to single nibbles and codewords
//! - [`ecc::stream`] drives the block codec over bit and byte streams
//! - [`ecc::hamming`] packs coded bits into bytes for byte-oriented callers
//!
//! # Examples
//!
//! ```
//! use hamming74::ecc::block::{decode_nibble, encode_nibble, Nibble};
//!
//! let nibble = Nibble::from_value(0b1011).unwrap();
//! let mut codeword = encode_nibble(nibble);
//!
//! // Corrupt one bit in transit
//! codeword.flip(0);
//! assert_eq!(codeword.syndrome().value(), 1);
//!
//! assert_eq!(decode_nibble(codeword), nibble);
//! ```
//!
//! Byte buffers can go through the packed codec directly:
//!
//! ```
//! use hamming74::{hamming_decode, hamming_encode};
//!
//! let mut encoded = hamming_encode(b"flash page");
//! encoded[3] ^= 0x10;
//! assert_eq!(hamming_decode(&encoded).unwrap(), b"flash page");
//! ```

pub mod ecc;
pub mod error;

pub use ecc::hamming::{create_hamming_7_4, hamming_decode, hamming_encode, HammingCode};
pub use ecc::ErrorCorrection;
pub use error::{Error, Result};
