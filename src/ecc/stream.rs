//! Stream drivers for the Hamming(7,4) block codec.
//!
//! Bit streams are cut into 4-bit groups for encoding and 7-bit groups for
//! decoding. A stream whose length is not a whole number of groups is
//! rejected with [`Error::MalformedLength`] before anything is written; no
//! trailing bits are dropped silently.
//!
//! The `_into` functions write into a caller-owned buffer and never allocate.
//! The buffer must hold at least [`encoded_len`] / [`decoded_len`] bits or the
//! call fails with [`Error::BufferTooSmall`]; any extra space is left as is.
//!
//! Each block is independent, so the `par_` variants spread blocks over the
//! rayon thread pool and produce exactly the same output as the sequential
//! ones.

use crate::ecc::block::{
    decode_nibble_with_correction, encode_nibble, Codeword, Nibble, CODEWORD_BITS, DATA_BITS,
};
use crate::ecc::{Bit, Result};
use crate::error::Error;
use log::debug;
use rayon::prelude::*;

/// Coded bits produced by one byte (two nibbles)
pub const BYTE_CODE_BITS: usize = 2 * CODEWORD_BITS;

/// Counters collected while decoding a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeStats {
    /// Codewords decoded
    pub blocks: usize,
    /// Codewords in which a bit was corrected
    pub corrected: usize,
}

/// Coded length for `data_bits` payload bits: `7 * (data_bits / 4)`
pub fn encoded_len(data_bits: usize) -> usize {
    data_bits / DATA_BITS * CODEWORD_BITS
}

/// Payload length for `code_bits` coded bits: `4 * (code_bits / 7)`
pub fn decoded_len(code_bits: usize) -> usize {
    code_bits / CODEWORD_BITS * DATA_BITS
}

/// Number of whole blocks, or an error if `length` leaves a remainder
fn block_count(length: usize, block: usize) -> Result<usize> {
    if length % block != 0 {
        return Err(Error::MalformedLength { length, block });
    }
    Ok(length / block)
}

fn check_capacity(needed: usize, out: &[Bit]) -> Result<()> {
    if out.len() < needed {
        return Err(Error::BufferTooSmall {
            needed,
            actual: out.len(),
        });
    }
    Ok(())
}

fn nibble_from_chunk(chunk: &[Bit]) -> Nibble {
    let mut bits = [false; DATA_BITS];
    bits.copy_from_slice(chunk);
    Nibble::new(bits)
}

fn codeword_from_chunk(chunk: &[Bit]) -> Codeword {
    let mut bits = [false; CODEWORD_BITS];
    bits.copy_from_slice(chunk);
    Codeword::new(bits)
}

fn encode_chunk(chunk: &[Bit], out: &mut [Bit]) {
    out.copy_from_slice(encode_nibble(nibble_from_chunk(chunk)).bits());
}

/// Decodes one 7-bit chunk into `out`, returning whether a bit was corrected
fn decode_chunk(chunk: &[Bit], out: &mut [Bit]) -> bool {
    let (nibble, correction) = decode_nibble_with_correction(codeword_from_chunk(chunk));
    out.copy_from_slice(&nibble.bits());
    correction.is_corrected()
}

/// Writes the 14 coded bits of one byte, high nibble first
pub(crate) fn encode_byte(byte: u8, out: &mut [Bit]) {
    let (high, low) = out.split_at_mut(CODEWORD_BITS);
    high.copy_from_slice(encode_nibble(Nibble::high(byte)).bits());
    low.copy_from_slice(encode_nibble(Nibble::low(byte)).bits());
}

fn log_stats(stats: &DecodeStats) {
    if stats.corrected > 0 {
        debug!(
            "Corrected {} of {} codewords",
            stats.corrected, stats.blocks
        );
    }
}

/// Encodes a bit stream whose length is a multiple of 4 into `out`.
///
/// Returns the number of coded bits written.
pub fn encode_bits_into(bits: &[Bit], out: &mut [Bit]) -> Result<usize> {
    let blocks = block_count(bits.len(), DATA_BITS)?;
    let needed = blocks * CODEWORD_BITS;
    check_capacity(needed, out)?;

    for (chunk, dst) in bits
        .chunks_exact(DATA_BITS)
        .zip(out.chunks_exact_mut(CODEWORD_BITS))
    {
        encode_chunk(chunk, dst);
    }

    Ok(needed)
}

/// Encodes a bit stream whose length is a multiple of 4.
pub fn encode_bits(bits: &[Bit]) -> Result<Vec<Bit>> {
    let mut out = vec![false; encoded_len(bits.len())];
    encode_bits_into(bits, &mut out)?;
    Ok(out)
}

/// Decodes a coded stream whose length is a multiple of 7 into `out`.
///
/// Each codeword has at most one bit corrected. The first `decoded_len` bits
/// of `out` receive the payload.
pub fn decode_bits_into(code: &[Bit], out: &mut [Bit]) -> Result<DecodeStats> {
    let blocks = block_count(code.len(), CODEWORD_BITS)?;
    check_capacity(blocks * DATA_BITS, out)?;

    let mut stats = DecodeStats {
        blocks,
        corrected: 0,
    };
    for (chunk, dst) in code
        .chunks_exact(CODEWORD_BITS)
        .zip(out.chunks_exact_mut(DATA_BITS))
    {
        if decode_chunk(chunk, dst) {
            stats.corrected += 1;
        }
    }

    log_stats(&stats);
    Ok(stats)
}

/// Decodes a coded stream whose length is a multiple of 7.
pub fn decode_bits(code: &[Bit]) -> Result<Vec<Bit>> {
    decode_bits_with_stats(code).map(|(bits, _)| bits)
}

/// Decodes a coded stream and reports how many codewords needed correcting.
pub fn decode_bits_with_stats(code: &[Bit]) -> Result<(Vec<Bit>, DecodeStats)> {
    let mut out = vec![false; decoded_len(code.len())];
    let stats = decode_bits_into(code, &mut out)?;
    Ok((out, stats))
}

/// Encodes bytes into `out`, 14 coded bits per byte, high nibble first.
///
/// Returns the number of coded bits written.
pub fn encode_bytes_into(bytes: &[u8], out: &mut [Bit]) -> Result<usize> {
    let needed = bytes.len() * BYTE_CODE_BITS;
    check_capacity(needed, out)?;

    for (&byte, dst) in bytes.iter().zip(out.chunks_exact_mut(BYTE_CODE_BITS)) {
        encode_byte(byte, dst);
    }

    Ok(needed)
}

/// Encodes bytes, 14 coded bits per byte, high nibble first.
pub fn encode_bytes(bytes: &[u8]) -> Vec<Bit> {
    let mut out = vec![false; bytes.len() * BYTE_CODE_BITS];
    for (&byte, dst) in bytes.iter().zip(out.chunks_exact_mut(BYTE_CODE_BITS)) {
        encode_byte(byte, dst);
    }
    out
}

/// Decodes a stream produced by [`encode_bytes`] back into bytes.
///
/// The length must be a multiple of 14 so every byte gets both nibbles.
pub fn decode_bytes(code: &[Bit]) -> Result<Vec<u8>> {
    block_count(code.len(), BYTE_CODE_BITS)?;

    let mut stats = DecodeStats::default();
    let mut decode = |chunk: &[Bit]| {
        let (nibble, correction) = decode_nibble_with_correction(codeword_from_chunk(chunk));
        stats.blocks += 1;
        if correction.is_corrected() {
            stats.corrected += 1;
        }
        nibble
    };

    let bytes = code
        .chunks_exact(BYTE_CODE_BITS)
        .map(|pair| {
            let (high, low) = pair.split_at(CODEWORD_BITS);
            let high = decode(high);
            Nibble::join(high, decode(low))
        })
        .collect();

    log_stats(&stats);
    Ok(bytes)
}

/// Parallel [`encode_bits_into`].
pub fn par_encode_bits_into(bits: &[Bit], out: &mut [Bit]) -> Result<usize> {
    let blocks = block_count(bits.len(), DATA_BITS)?;
    let needed = blocks * CODEWORD_BITS;
    check_capacity(needed, out)?;

    bits.par_chunks_exact(DATA_BITS)
        .zip(out[..needed].par_chunks_exact_mut(CODEWORD_BITS))
        .for_each(|(chunk, dst)| encode_chunk(chunk, dst));

    Ok(needed)
}

/// Parallel [`decode_bits_into`].
pub fn par_decode_bits_into(code: &[Bit], out: &mut [Bit]) -> Result<DecodeStats> {
    let blocks = block_count(code.len(), CODEWORD_BITS)?;
    let needed = blocks * DATA_BITS;
    check_capacity(needed, out)?;

    let corrected = code
        .par_chunks_exact(CODEWORD_BITS)
        .zip(out[..needed].par_chunks_exact_mut(DATA_BITS))
        .map(|(chunk, dst)| decode_chunk(chunk, dst))
        .filter(|&corrected| corrected)
        .count();

    let stats = DecodeStats { blocks, corrected };
    log_stats(&stats);
    Ok(stats)
}

/// Parallel [`encode_bytes_into`].
pub fn par_encode_bytes_into(bytes: &[u8], out: &mut [Bit]) -> Result<usize> {
    let needed = bytes.len() * BYTE_CODE_BITS;
    check_capacity(needed, out)?;

    bytes
        .par_iter()
        .zip(out[..needed].par_chunks_exact_mut(BYTE_CODE_BITS))
        .for_each(|(&byte, dst)| encode_byte(byte, dst));

    Ok(needed)
}
