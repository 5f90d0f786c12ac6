//! Decimal string parsing (spec §4.2): digits separated by `_`, processed in
//! chunks of [`crate::consts::DECIMAL_CHUNK_DIGITS`] to bound the number of
//! bignum-scale multiplications.

use itertools::Itertools;

use crate::consts::{DECIMAL_CHUNK_DIGITS, LOG10_2_OVER_32};
use crate::error::ValueError;

use super::Int;

/// Multiplies the little-endian magnitude `limbs` by `mul` and adds `add`,
/// growing `limbs` as needed. Used to fold one decimal chunk into the
/// running accumulator without allocating an intermediate [`Int`].
fn mul_add_u64(limbs: &mut Vec<u32>, mul: u64, add: u64) {
    let mut carry: u128 = add as u128;
    for limb in limbs.iter_mut() {
        let v = *limb as u128 * mul as u128 + carry;
        *limb = v as u32;
        carry = v >> 32;
    }
    while carry != 0 {
        limbs.push(carry as u32);
        carry >>= 32;
    }
}

/// Parses a run of `0-9` digits separated by (but not starting, ending, or
/// doubling on) `_` from the front of `bytes`.
///
/// Returns `(value, consumed_bytes, digit_count)`; `consumed_bytes` includes
/// any accepted separators, `digit_count` counts digits only.
pub fn int_from_decstr(bytes: &[u8]) -> Result<(Int, usize, usize), ValueError> {
    let mut digits: Vec<u8> = Vec::new();
    let mut consumed = 0usize;
    let mut last_was_digit = false;

    for &b in bytes {
        if b.is_ascii_digit() {
            digits.push(b - b'0');
            consumed += 1;
            last_was_digit = true;
        } else if b == b'_' && last_was_digit {
            consumed += 1;
            last_was_digit = false;
        } else {
            break;
        }
    }
    // A trailing separator with no digit after it was not really part of
    // the number; back it out.
    if consumed > 0 && bytes[consumed - 1] == b'_' {
        consumed -= 1;
    }

    if digits.is_empty() {
        return Err(ValueError::EmptyString);
    }

    let digit_count = digits.len();
    let chunk = DECIMAL_CHUNK_DIGITS as usize;

    let estimated_limbs = (digit_count as f64 * LOG10_2_OVER_32).ceil() as usize + 1;
    let mut limbs: Vec<u32> = Vec::with_capacity(estimated_limbs);

    // Chunk from the least-significant digit so a short leading group (when
    // digit_count isn't a multiple of `chunk`) falls out naturally as the
    // last group produced, then fold groups back most-significant-first.
    let groups: Vec<Vec<u8>> = digits
        .iter()
        .rev()
        .copied()
        .chunks(chunk)
        .into_iter()
        .map(|g| g.collect::<Vec<u8>>())
        .collect();
    for group in groups.into_iter().rev() {
        let mut value: u64 = 0;
        for &d in group.iter().rev() {
            value = value * 10 + d as u64;
        }
        let multiplier = 10u64.pow(group.len() as u32);
        mul_add_u64(&mut limbs, multiplier, value);
    }

    Ok((Int::normalize(1, limbs), consumed, digit_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_small_decimal() {
        let (v, consumed, digits) = int_from_decstr(b"12345rest").unwrap();
        assert_eq!(v, Int::from_i64(12345));
        assert_eq!(consumed, 5);
        assert_eq!(digits, 5);
    }

    #[test]
    fn accepts_underscore_separators() {
        let (v, consumed, digits) = int_from_decstr(b"1_000_000").unwrap();
        assert_eq!(v, Int::from_i64(1_000_000));
        assert_eq!(consumed, 9);
        assert_eq!(digits, 7);
    }

    #[test]
    fn trailing_underscore_not_consumed() {
        let (v, consumed, _) = int_from_decstr(b"42_").unwrap();
        assert_eq!(v, Int::from_i64(42));
        assert_eq!(consumed, 2);
    }

    #[test]
    fn empty_input_errors() {
        assert_eq!(int_from_decstr(b"abc"), Err(ValueError::EmptyString));
    }

    #[test]
    fn parses_number_spanning_many_chunks() {
        let s = "123456789012345678901234567890";
        let (v, consumed, digits) = int_from_decstr(s.as_bytes()).unwrap();
        assert_eq!(consumed, s.len());
        assert_eq!(digits, s.len());
        assert_eq!(v.to_string(), s);
    }
}
