//! Syndrome computation and single-error location.
//!
//! The syndrome collects one bit per parity check: bit `p` is set when the
//! group selected by exponent `p` has odd parity. Under the single-error
//! assumption a nonzero syndrome is the 1-based position of the flipped bit.

use crate::ecc::block::{Codeword, CODEWORD_BITS};
use crate::ecc::parity::{parity_bit_count, parity_check, parity_position};
use crate::ecc::Bit;
use std::fmt;

/// Computes the syndrome of a bit sequence of any length.
///
/// Every exponent `p` with `2^p <= len` is checked, stopping early should the
/// check bit position `2^p - 1` fall outside the sequence. For a 7-bit
/// codeword exactly three checks run and the result lies in `0..=7`.
pub fn syndrome(bits: &[Bit]) -> usize {
    let mut syndrome = 0;

    for exponent in 0..parity_bit_count(bits.len()) {
        match parity_position(exponent) {
            Some(position) if position < bits.len() => {}
            _ => break,
        }

        if parity_check(bits, exponent) {
            syndrome |= 1 << exponent;
        }
    }

    syndrome
}

/// Maps a syndrome to the 0-based index it blames inside a `len`-bit block.
///
/// Returns `None` for a clean syndrome and for one pointing past the end of
/// the block, which can happen for lengths that are not `2^r - 1`.
pub fn error_index(syndrome: usize, len: usize) -> Option<usize> {
    syndrome.checked_sub(1).filter(|&index| index < len)
}

/// Flips the bit named by the syndrome of `bits`, if it lies inside the block.
///
/// Returns the corrected index. An out-of-range syndrome leaves `bits` untouched.
pub fn correct_single_error(bits: &mut [Bit]) -> Option<usize> {
    let index = error_index(syndrome(bits), bits.len())?;
    bits[index] = !bits[index];
    Some(index)
}

/// Syndrome of a single Hamming(7,4) codeword, always in `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Syndrome(u8);

impl Syndrome {
    /// Computes the syndrome of a codeword
    pub fn of(codeword: &Codeword) -> Self {
        // Three parity checks fit in the low three bits
        Syndrome(syndrome(codeword.bits()) as u8)
    }

    /// Raw syndrome value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// True when every parity check passes
    pub fn is_clean(&self) -> bool {
        self.0 == 0
    }

    /// 0-based index of the bit to flip, if any
    pub fn error_index(&self) -> Option<usize> {
        error_index(usize::from(self.0), CODEWORD_BITS)
    }
}

impl fmt::Display for Syndrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03b}", self.0)
    }
}
