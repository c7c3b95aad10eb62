//! Even-parity checks over Hamming parity groups.
//!
//! Parity exponent `p` selects the group of bits whose 1-based position has
//! bit `p` set. Its check bit lives at 0-based index `2^p - 1`, the first
//! member of the group. The helpers here work on bit sequences of any length;
//! the fixed 7-bit layout is built on top of them in [`crate::ecc::block`].

use crate::ecc::Bit;

/// Computes the even parity of the group selected by `exponent`.
///
/// The result is the XOR of every bit at 0-based index `i >= 2^p - 1` with
/// `(i + 1) & 2^p != 0`. For a valid codeword the result is `false` for every
/// exponent.
///
/// A sequence shorter than `2^p` selects no bits and yields `false`, as does an
/// exponent too large to form a mask.
pub fn parity_check(bits: &[Bit], exponent: u32) -> Bit {
    let Some(mask) = 1usize.checked_shl(exponent) else {
        return false;
    };

    (mask - 1..bits.len())
        .filter(|i| (i + 1) & mask != 0)
        .fold(false, |parity, i| parity ^ bits[i])
}

/// 0-based index of the check bit for `exponent`, or `None` if it overflows.
pub fn parity_position(exponent: u32) -> Option<usize> {
    1usize.checked_shl(exponent).map(|mask| mask - 1)
}

/// Whether a 0-based index holds a parity bit (its 1-based position is a power of two).
pub fn is_parity_position(index: usize) -> bool {
    (index + 1).is_power_of_two()
}

/// Number of parity exponents `p` with `2^p <= len`.
pub fn parity_bit_count(len: usize) -> u32 {
    if len == 0 {
        0
    } else {
        len.ilog2() + 1
    }
}

/// Non-parity indices of a `len`-bit block, in ascending order.
pub fn data_positions(len: usize) -> impl Iterator<Item = usize> {
    (0..len).filter(|&i| !is_parity_position(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits<const N: usize>(values: [u8; N]) -> [Bit; N] {
        values.map(|v| v == 1)
    }

    #[test]
    fn test_parity_groups_for_seven_bits() {
        // A single set bit at index i is seen by exactly the groups that
        // contain position i + 1
        for index in 0..7 {
            let mut word = [false; 7];
            word[index] = true;

            for exponent in 0..3 {
                let expected = (index + 1) & (1 << exponent) != 0;
                assert_eq!(parity_check(&word, exponent), expected);
            }
        }
    }

    #[test]
    fn test_parity_of_known_codeword() {
        let codeword = bits([0, 1, 1, 0, 0, 1, 1]);
        assert!(!parity_check(&codeword, 0));
        assert!(!parity_check(&codeword, 1));
        assert!(!parity_check(&codeword, 2));

        let corrupted = bits([0, 1, 1, 0, 1, 1, 1]);
        // Position 5 = 0b101 belongs to groups 0 and 2
        assert!(parity_check(&corrupted, 0));
        assert!(!parity_check(&corrupted, 1));
        assert!(parity_check(&corrupted, 2));
    }

    #[test]
    fn test_short_sequence_selects_nothing() {
        let word = bits([1, 1, 1]);
        assert!(!parity_check(&word, 2));
        assert!(!parity_check(&word, 63));
        assert!(!parity_check(&word, 200));
        assert!(!parity_check(&[], 0));
    }

    #[test]
    fn test_parity_positions() {
        assert_eq!(parity_position(0), Some(0));
        assert_eq!(parity_position(1), Some(1));
        assert_eq!(parity_position(2), Some(3));
        assert_eq!(parity_position(3), Some(7));
        assert_eq!(parity_position(usize::BITS), None);

        let parity: Vec<usize> = (0..15).filter(|&i| is_parity_position(i)).collect();
        assert_eq!(parity, vec![0, 1, 3, 7]);
    }

    #[test]
    fn test_parity_bit_count() {
        assert_eq!(parity_bit_count(0), 0);
        assert_eq!(parity_bit_count(1), 1);
        assert_eq!(parity_bit_count(3), 2);
        assert_eq!(parity_bit_count(7), 3);
        assert_eq!(parity_bit_count(8), 4);
        assert_eq!(parity_bit_count(15), 4);
    }

    #[test]
    fn test_data_positions() {
        assert_eq!(data_positions(7).collect::<Vec<_>>(), vec![2, 4, 5, 6]);
        assert_eq!(
            data_positions(15).collect::<Vec<_>>(),
            vec![2, 4, 5, 6, 8, 9, 10, 11, 12, 13, 14]
        );
    }
}
