//! Packed byte codec for Hamming(7,4).
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in 1950.
//! The (7,4) code encodes 4 data bits into 7 bits by adding 3 parity bits, correcting any single
//! flipped bit per codeword. Two flipped bits in one codeword are mistaken for a single error at a
//! third position and go unnoticed.
//!
//! [`HammingCode`] works on plain byte buffers: every input byte becomes two codewords (high
//! nibble first), and the resulting 14 bits per byte are packed most-significant-bit first into
//! output bytes, zero padding the last one.
//!
//! # Applications
//!
//! - Computer memory (ECC RAM)
//! - Flash page metadata
//! - Low-rate radio and serial links

use crate::ecc::block::{CODEWORD_BITS, DATA_BITS, PARITY_BITS};
use crate::ecc::stream::{self, BYTE_CODE_BITS};
use crate::ecc::{Bit, ErrorCorrection, Result};
use crate::error::Error;
use bitvec::prelude::*;
use log::debug;
use rayon::prelude::*;

/// Block count from which encoding and decoding switch to the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Byte-oriented Hamming(7,4) codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HammingCode {
    /// Minimum number of codewords processed in parallel, `None` to stay sequential
    parallel_threshold: Option<usize>,
}

impl Default for HammingCode {
    fn default() -> Self {
        Self::new()
    }
}

impl HammingCode {
    /// Creates a codec with the default parallel threshold
    pub fn new() -> Self {
        HammingCode {
            parallel_threshold: Some(DEFAULT_PARALLEL_THRESHOLD),
        }
    }

    /// Creates a standard (7,4) Hamming code
    pub fn standard_7_4() -> Self {
        Self::new()
    }

    /// Sets the number of codewords from which work is spread over rayon.
    ///
    /// `None` keeps every call on the calling thread. Output is identical either way.
    pub fn with_parallel_threshold(mut self, threshold: Option<usize>) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn parallel_threshold(&self) -> Option<usize> {
        self.parallel_threshold
    }

    /// Number of data bits per block
    pub fn data_bits(&self) -> usize {
        DATA_BITS
    }

    /// Number of parity bits per block
    pub fn parity_bits(&self) -> usize {
        PARITY_BITS
    }

    /// Gets the total code word length (data bits + parity bits)
    pub fn total_bits(&self) -> usize {
        CODEWORD_BITS
    }

    /// Gets the number of encoded bytes needed for a given number of input bytes
    pub fn encoded_bytes_needed(&self, input_bytes: usize) -> usize {
        (input_bytes * BYTE_CODE_BITS).div_ceil(8)
    }

    fn use_parallel(&self, blocks: usize) -> bool {
        let parallel = matches!(self.parallel_threshold, Some(threshold) if blocks >= threshold);
        if parallel {
            debug!("Processing {} codewords in parallel", blocks);
        }
        parallel
    }

    /// Encodes a byte slice, returning the packed coded bits
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        if data.is_empty() {
            return Vec::new();
        }

        let mut coded = vec![false; data.len() * BYTE_CODE_BITS];
        if self.use_parallel(data.len() * 2) {
            data.par_iter()
                .zip(coded.par_chunks_exact_mut(BYTE_CODE_BITS))
                .for_each(|(&byte, dst)| stream::encode_byte(byte, dst));
        } else {
            data.iter()
                .zip(coded.chunks_exact_mut(BYTE_CODE_BITS))
                .for_each(|(&byte, dst)| stream::encode_byte(byte, dst));
        }

        pack(&coded)
    }

    /// Decodes packed Hamming-encoded data, correcting single-bit errors
    ///
    /// # Arguments
    ///
    /// * `encoded` - Output of [`HammingCode::encode`], possibly corrupted
    ///
    /// # Returns
    ///
    /// The decoded bytes, or an error if the input does not hold a whole
    /// number of encoded bytes
    pub fn decode(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        if encoded.is_empty() {
            return Ok(Vec::new());
        }

        let encoded_bits = encoded.view_bits::<Msb0>();

        // Padding in the last byte is always shorter than a codeword
        let blocks = encoded_bits.len() / CODEWORD_BITS;
        if blocks % 2 != 0 {
            return Err(Error::MalformedLength {
                length: encoded_bits.len(),
                block: BYTE_CODE_BITS,
            });
        }

        let code: Vec<Bit> = encoded_bits[..blocks * CODEWORD_BITS]
            .iter()
            .by_vals()
            .collect();
        let mut decoded = vec![false; stream::decoded_len(code.len())];

        if self.use_parallel(blocks) {
            stream::par_decode_bits_into(&code, &mut decoded)?;
        } else {
            stream::decode_bits_into(&code, &mut decoded)?;
        }

        Ok(pack(&decoded))
    }
}

impl ErrorCorrection for HammingCode {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(HammingCode::encode(self, data))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        HammingCode::decode(self, data)
    }
}

/// Packs bits MSB first, zero padding the last byte
fn pack(bits: &[Bit]) -> Vec<u8> {
    let mut packed = bitvec![u8, Msb0; 0; bits.len()];
    for (i, &bit) in bits.iter().enumerate() {
        packed.set(i, bit);
    }
    packed.into_vec()
}

/// Creates a standard (7,4) Hamming code
pub fn create_hamming_7_4() -> HammingCode {
    HammingCode::standard_7_4()
}

/// Encodes data using standard (7,4) Hamming code
pub fn hamming_encode(data: &[u8]) -> Vec<u8> {
    let hamming = create_hamming_7_4();
    hamming.encode(data)
}

/// Decodes data using standard (7,4) Hamming code
pub fn hamming_decode(encoded: &[u8]) -> Result<Vec<u8>> {
    let hamming = create_hamming_7_4();
    hamming.decode(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_hamming_creation() {
        let hamming = HammingCode::standard_7_4();
        assert_eq!(hamming.data_bits(), 4);
        assert_eq!(hamming.parity_bits(), 3);
        assert_eq!(hamming.total_bits(), 7);
        assert_eq!(hamming.parallel_threshold(), Some(DEFAULT_PARALLEL_THRESHOLD));
        assert_eq!(hamming, HammingCode::default());

        let hamming = hamming.with_parallel_threshold(None);
        assert_eq!(hamming.parallel_threshold(), None);
    }

    #[test]
    fn test_encoded_bytes_needed() {
        let hamming = create_hamming_7_4();
        assert_eq!(hamming.encoded_bytes_needed(0), 0);
        assert_eq!(hamming.encoded_bytes_needed(1), 2);
        assert_eq!(hamming.encoded_bytes_needed(3), 6);
        assert_eq!(hamming.encoded_bytes_needed(4), 7);

        for len in 0..40 {
            let data = vec![0x5Au8; len];
            assert_eq!(hamming.encode(&data).len(), hamming.encoded_bytes_needed(len));
        }
    }

    #[test]
    fn test_packed_layout() {
        // 0xAB -> 1011010 (high nibble) 0110011 (low nibble), padded with 00
        let encoded = hamming_encode(&[0xAB]);
        assert_eq!(encoded, vec![0b1011_0100, 0b1100_1100]);
    }

    #[test]
    fn test_hamming_encode_decode_no_errors() {
        let data = b"Test data for Hamming code";
        let hamming = create_hamming_7_4();

        let encoded = hamming.encode(data);
        let decoded = hamming.decode(&encoded).unwrap();

        assert_eq!(decoded, data);
    }

    #[test]
    fn test_hamming_error_correction() {
        let data = b"Test";
        let hamming = create_hamming_7_4();

        let mut encoded = hamming.encode(data);

        // Introduce a single bit error in the first byte
        encoded[0] ^= 0x40; // Flip the second bit

        let decoded = hamming.decode(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_one_error_per_codeword() {
        let mut rng = StdRng::seed_from_u64(99);
        let data: Vec<u8> = (0..200).map(|_| rng.gen()).collect();
        let hamming = create_hamming_7_4();

        let mut encoded = hamming.encode(&data);
        let codewords = data.len() * 2;
        for block in 0..codewords {
            let bit = block * CODEWORD_BITS + rng.gen_range(0..CODEWORD_BITS);
            encoded[bit / 8] ^= 0x80 >> (bit % 8);
        }

        assert_eq!(hamming.decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_padding_is_ignored() {
        let hamming = create_hamming_7_4();
        let mut encoded = hamming.encode(&[0x12]);

        // 14 coded bits leave 2 padding bits in the second byte
        encoded[1] |= 0b11;
        assert_eq!(hamming.decode(&encoded).unwrap(), vec![0x12]);
    }

    #[test]
    fn test_malformed_length() {
        let hamming = create_hamming_7_4();

        // One byte holds a single codeword, half of an encoded byte
        let result = hamming.decode(&[0xFF]);
        assert!(matches!(
            result,
            Err(Error::MalformedLength {
                length: 8,
                block: 14
            })
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(5);
        let data: Vec<u8> = (0..5000).map(|_| rng.gen()).collect();

        let sequential = create_hamming_7_4().with_parallel_threshold(None);
        let parallel = create_hamming_7_4().with_parallel_threshold(Some(1));

        let encoded = sequential.encode(&data);
        assert_eq!(parallel.encode(&data), encoded);

        let mut corrupted = encoded.clone();
        corrupted[10] ^= 0x01;
        corrupted[500] ^= 0x20;
        assert_eq!(parallel.decode(&corrupted).unwrap(), data);
        assert_eq!(sequential.decode(&corrupted).unwrap(), data);
    }

    #[test]
    fn test_error_correction_trait() {
        let codec: &dyn ErrorCorrection = &create_hamming_7_4();
        let data = b"trait object";

        let encoded = codec.encode(data).unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_empty_input() {
        let hamming = create_hamming_7_4();

        let encoded = hamming.encode(&[]);
        assert!(encoded.is_empty());

        let decoded = hamming.decode(&[]).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_helper_functions() {
        let data = b"Test";

        let encoded = hamming_encode(data);
        let decoded = hamming_decode(&encoded).unwrap();
        assert_eq!(decoded, data);
    }
}
