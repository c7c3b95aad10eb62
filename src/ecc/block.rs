//! Single-block Hamming(7,4) encoder and decoder.
//!
//! A [`Nibble`] carries 4 payload bits and a [`Codeword`] the 7 coded bits.
//! The payload always occupies codeword indices 2, 4, 5 and 6 and the parity
//! bits indices 0, 1 and 3; both the encoder and decoder depend on that layout.

use crate::ecc::parity::parity_check;
use crate::ecc::syndrome::Syndrome;
use crate::ecc::{Bit, Result};
use crate::error::Error;
use log::trace;

/// Payload bits per block
pub const DATA_BITS: usize = 4;

/// Parity bits per block
pub const PARITY_BITS: usize = 3;

/// Coded bits per block
pub const CODEWORD_BITS: usize = DATA_BITS + PARITY_BITS;

/// 0-based codeword indices holding the payload, in payload order
pub const DATA_POSITIONS: [usize; DATA_BITS] = [2, 4, 5, 6];

/// Four payload bits, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nibble([Bit; DATA_BITS]);

impl Nibble {
    /// Creates a nibble from its bits
    pub const fn new(bits: [Bit; DATA_BITS]) -> Self {
        Nibble(bits)
    }

    /// Creates a nibble from a value in `0..=15`.
    ///
    /// Bit 3 of the value becomes the first payload bit.
    pub fn from_value(value: u8) -> Result<Self> {
        if value > 0x0F {
            return Err(Error::InvalidInput(format!(
                "Nibble value {:#04x} does not fit in 4 bits",
                value
            )));
        }

        Ok(Self::from_low_bits(value))
    }

    /// High nibble of a byte (bits 7..4)
    pub fn high(byte: u8) -> Self {
        Self::from_low_bits(byte >> 4)
    }

    /// Low nibble of a byte (bits 3..0)
    pub fn low(byte: u8) -> Self {
        Self::from_low_bits(byte & 0x0F)
    }

    /// Reassembles a byte from its high and low nibbles
    pub fn join(high: Nibble, low: Nibble) -> u8 {
        (high.value() << 4) | low.value()
    }

    fn from_low_bits(value: u8) -> Self {
        Nibble([
            value & 0b1000 != 0,
            value & 0b0100 != 0,
            value & 0b0010 != 0,
            value & 0b0001 != 0,
        ])
    }

    /// Numeric value in `0..=15`
    pub fn value(&self) -> u8 {
        self.0
            .iter()
            .fold(0, |value, &bit| (value << 1) | u8::from(bit))
    }

    pub fn bits(&self) -> [Bit; DATA_BITS] {
        self.0
    }

    /// Encodes this nibble into a codeword
    pub fn encode(self) -> Codeword {
        encode_nibble(self)
    }
}

impl From<[Bit; DATA_BITS]> for Nibble {
    fn from(bits: [Bit; DATA_BITS]) -> Self {
        Nibble(bits)
    }
}

impl TryFrom<&[Bit]> for Nibble {
    type Error = Error;

    fn try_from(bits: &[Bit]) -> Result<Self> {
        let array: [Bit; DATA_BITS] = bits.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "Nibble needs {} bits, got {}",
                DATA_BITS,
                bits.len()
            ))
        })?;
        Ok(Nibble(array))
    }
}

/// Seven coded bits: parity at indices 0, 1, 3 and payload at 2, 4, 5, 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Codeword([Bit; CODEWORD_BITS]);

impl Codeword {
    /// Wraps raw coded bits, which may or may not be valid
    pub const fn new(bits: [Bit; CODEWORD_BITS]) -> Self {
        Codeword(bits)
    }

    pub fn bits(&self) -> &[Bit; CODEWORD_BITS] {
        &self.0
    }

    pub fn into_bits(self) -> [Bit; CODEWORD_BITS] {
        self.0
    }

    /// Syndrome of the codeword as it stands
    pub fn syndrome(&self) -> Syndrome {
        Syndrome::of(self)
    }

    /// True when all three parity groups have even parity
    pub fn is_valid(&self) -> bool {
        self.syndrome().is_clean()
    }

    /// Inverts the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`.
    pub fn flip(&mut self, index: usize) {
        self.0[index] = !self.0[index];
    }

    /// Copy of the codeword with the bit at `index` inverted.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`.
    pub fn flipped(mut self, index: usize) -> Self {
        self.flip(index);
        self
    }

    /// Corrects at most one bit in place, as named by the syndrome.
    pub fn correct(&mut self) -> Correction {
        match self.syndrome().error_index() {
            Some(index) => {
                self.flip(index);
                trace!("Corrected single-bit error at codeword index {}", index);
                Correction::Corrected { index }
            }
            None => Correction::Clean,
        }
    }

    /// Payload bits as stored, without correction
    pub fn data(&self) -> Nibble {
        Nibble(DATA_POSITIONS.map(|position| self.0[position]))
    }

    /// Corrects and extracts the payload
    pub fn decode(self) -> Nibble {
        decode_nibble(self)
    }
}

impl From<[Bit; CODEWORD_BITS]> for Codeword {
    fn from(bits: [Bit; CODEWORD_BITS]) -> Self {
        Codeword(bits)
    }
}

impl TryFrom<&[Bit]> for Codeword {
    type Error = Error;

    fn try_from(bits: &[Bit]) -> Result<Self> {
        let array: [Bit; CODEWORD_BITS] = bits.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "Codeword needs {} bits, got {}",
                CODEWORD_BITS,
                bits.len()
            ))
        })?;
        Ok(Codeword(array))
    }
}

/// Outcome of correcting one codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// All parity checks passed
    Clean,
    /// The bit at `index` was flipped back
    Corrected { index: usize },
}

impl Correction {
    pub fn is_corrected(&self) -> bool {
        matches!(self, Correction::Corrected { .. })
    }
}

/// Encodes 4 payload bits into a 7-bit codeword.
///
/// The payload is placed at the data positions first, then each parity bit is
/// computed over the partially filled word. A check bit belongs to no group
/// but its own, so the fill order of the parity bits does not matter.
pub fn encode_nibble(nibble: Nibble) -> Codeword {
    let mut bits = [false; CODEWORD_BITS];

    for (&position, &bit) in DATA_POSITIONS.iter().zip(nibble.0.iter()) {
        bits[position] = bit;
    }

    for exponent in 0..PARITY_BITS as u32 {
        let position = (1 << exponent) - 1;
        bits[position] = parity_check(&bits, exponent);
    }

    Codeword(bits)
}

/// Decodes a codeword, correcting a single flipped bit if present.
///
/// Two or more flipped bits are mistaken for a single error elsewhere and the
/// returned payload may silently differ from what was encoded.
pub fn decode_nibble(codeword: Codeword) -> Nibble {
    decode_nibble_with_correction(codeword).0
}

/// Like [`decode_nibble`], also reporting which bit was corrected.
pub fn decode_nibble_with_correction(mut codeword: Codeword) -> (Nibble, Correction) {
    let correction = codeword.correct();
    (codeword.data(), correction)
}
