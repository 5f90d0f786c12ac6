//! Explicit-width bit vectors with inversion (spec §3/§4.3).
//!
//! Layout mirrors [`crate::integer::Int`]: a little-endian limb buffer, small
//! values inline. The inversion flag (the sign of `len`) means "the stored
//! limbs are the low-order portion of a value whose bits above `width` are
//! all ones" — `~x` and unary minus on a `Bits` are metadata flips, not limb
//! rewrites, whenever the operand's low bits allow it.

mod parse;
mod repr;
mod shift;
mod slice;

use std::cmp::Ordering;
use std::rc::Rc;

use crate::consts::INLINE_LIMBS;
use crate::error::ValueError;
use crate::integer::Int;

pub use parse::{bits_from_binstr, bits_from_bytes, bits_from_hexstr};
pub use slice::SliceArgs;

#[derive(Debug, Clone)]
enum Store {
    Inline([u32; INLINE_LIMBS]),
    Heap(Rc<[u32]>),
}

/// An explicit-width unsigned bit vector, optionally inverted.
#[derive(Debug, Clone)]
pub struct Bits {
    width: u32,
    /// Sign encodes inversion (negative = inverted); magnitude is the
    /// significant limb count. Zero significant limbs with width 0 are the
    /// two canonical empty singletons.
    len: i32,
    store: Store,
}

impl Bits {
    /// The canonical empty vector: width 0, not inverted.
    pub fn empty() -> Self {
        Self {
            width: 0,
            len: 0,
            store: Store::Inline([0; INLINE_LIMBS]),
        }
    }

    /// The canonical empty-inverted vector: width 0, inverted.
    pub fn empty_inverted() -> Self {
        Self {
            width: 0,
            len: i32::MIN, // distinguished "zero limbs, inverted" marker
            store: Store::Inline([0; INLINE_LIMBS]),
        }
    }

    /// Builds a normalized `Bits` from an explicit width, an inversion flag
    /// and magnitude limbs, truncating to `width` bits and stripping
    /// high zero limbs.
    pub(crate) fn normalize(width: u32, inverted: bool, mut limbs: Vec<u32>) -> Self {
        truncate_to_width(&mut limbs, width);
        while limbs.last() == Some(&0) {
            limbs.pop();
        }
        let count = limbs.len() as i32;
        let len = if count == 0 {
            if inverted {
                i32::MIN
            } else {
                0
            }
        } else if inverted {
            -count
        } else {
            count
        };
        let store = if limbs.len() <= INLINE_LIMBS {
            let mut inline = [0u32; INLINE_LIMBS];
            inline[..limbs.len()].copy_from_slice(&limbs);
            Store::Inline(inline)
        } else {
            Store::Heap(Rc::from(limbs.into_boxed_slice()))
        };
        Self { width, len, store }
    }

    fn significant_len(&self) -> usize {
        if self.len == i32::MIN {
            0
        } else {
            self.len.unsigned_abs() as usize
        }
    }

    /// `true` if this value's bits above the stored limbs are an infinite
    /// run of ones rather than zeros.
    pub const fn is_inverted(&self) -> bool {
        self.len < 0
    }

    /// The explicit bit width.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Significant magnitude limbs, little-endian.
    pub fn limbs(&self) -> &[u32] {
        let n = self.significant_len();
        match &self.store {
            Store::Inline(arr) => &arr[..n],
            Store::Heap(rc) => &rc[..n],
        }
    }

    /// Reads bit `i` (0 = least significant). Both in-range bits beyond the
    /// stored limbs and out-of-range bits beyond `width` read as the
    /// inversion fill: 0 when not inverted, 1 when inverted (spec §4.3).
    pub fn bit(&self, i: u32) -> bool {
        if i >= self.width {
            return self.is_inverted();
        }
        let limbs = self.limbs();
        let word = (i / 32) as usize;
        let stored = if word < limbs.len() {
            (limbs[word] >> (i % 32)) & 1 == 1
        } else {
            false
        };
        stored ^ self.is_inverted()
    }

    /// Bitwise complement: metadata flip, O(1).
    pub fn not(&self) -> Bits {
        Bits {
            width: self.width,
            len: if self.len == i32::MIN {
                0
            } else if self.len == 0 {
                i32::MIN
            } else {
                -self.len
            },
            store: self.store.clone(),
        }
    }

    fn combine(a: &Bits, b: &Bits, result_width: u32, f: impl Fn(u32, u32) -> u32) -> Bits {
        let n = ((result_width + 31) / 32) as usize;
        let mut out = vec![0u32; n];
        for i in 0..n {
            let av = a.fill_limb(i);
            let bv = b.fill_limb(i);
            out[i] = f(av, bv);
        }
        let inverted = f(fill_word(a.is_inverted()), fill_word(b.is_inverted())) != 0;
        Bits::normalize(result_width, inverted, out)
    }

    fn fill_limb(&self, word: usize) -> u32 {
        let limbs = self.limbs();
        let raw = limbs.get(word).copied().unwrap_or(0);
        if self.is_inverted() {
            !raw
        } else {
            raw
        }
    }

    /// `AND`: width rule is `max` when the narrower operand is inverted
    /// (its 1-fill lets the wider operand's extra bits survive), else
    /// `min` (spec §4.3).
    pub fn bitand(&self, other: &Bits) -> Bits {
        let width = and_or_width(self, other, true);
        Bits::combine(self, other, width, |a, b| a & b)
    }

    /// `OR`: mirror of `AND` — `max` when the narrower operand is *not*
    /// inverted (its 0-fill lets the wider operand's extra bits survive),
    /// `min` when it is (its 1-fill forces those bits to one regardless).
    pub fn bitor(&self, other: &Bits) -> Bits {
        let width = and_or_width(self, other, false);
        Bits::combine(self, other, width, |a, b| a | b)
    }

    /// `XOR`: always `max(W1, W2)`.
    pub fn bitxor(&self, other: &Bits) -> Bits {
        let width = self.width.max(other.width);
        Bits::combine(self, other, width, |a, b| a ^ b)
    }

    /// Concatenation: `self` occupies the high bits, `other` the low
    /// `other.width` bits. Width is the sum of both widths.
    pub fn concat(&self, other: &Bits) -> Bits {
        let width = self.width + other.width;
        if width == 0 {
            return Bits::empty();
        }
        let n = ((width + 31) / 32) as usize;
        let mut out = vec![0u32; n];
        for i in 0..other.width {
            if other.bit(i) {
                out[(i / 32) as usize] |= 1 << (i % 32);
            }
        }
        for i in 0..self.width {
            let bit_pos = other.width + i;
            if self.bit(i) {
                out[(bit_pos / 32) as usize] |= 1 << (bit_pos % 32);
            }
        }
        Bits::normalize(width, self.is_inverted(), out)
    }

    /// Equality of logical content (width and every bit, including fill).
    pub fn same(&self, other: &Bits) -> bool {
        self.width == other.width
            && self.is_inverted() == other.is_inverted()
            && self.limbs() == other.limbs()
    }

    /// Converts to an [`Int`], honoring inversion. The stored limbs are
    /// never complemented in memory (`not` is an O(1) flag flip, spec
    /// §4.3); an inverted value's limbs hold `|v| - 1` directly, so the
    /// logical value is `-(limbs_as_magnitude + 1)`.
    pub fn to_int(&self) -> Int {
        let magnitude = int_from_limbs(1, self.limbs());
        if self.is_inverted() {
            magnitude.add(&Int::from_i64(1)).neg()
        } else {
            magnitude
        }
    }

    /// Builds a `Bits` from an [`Int`], truncated to the minimum width
    /// containing the top nonzero bit; negative values store `|v| - 1`
    /// with the inversion flag set, uncomplemented, matching [`Bits::not`]'s
    /// representation (spec §4.3 `bits_from_int`).
    pub fn from_int(v: &Int) -> Bits {
        if v.is_zero() {
            return Bits::empty();
        }
        if v.signum() > 0 {
            let limbs = int_magnitude_limbs(v);
            let width = top_bit_width(&limbs);
            Bits::normalize(width, false, limbs)
        } else {
            let magnitude_minus_one = v.neg().sub(&Int::from_i64(1));
            let limbs = int_magnitude_limbs(&magnitude_minus_one);
            let width = top_bit_width(&limbs);
            Bits::normalize(width, true, limbs)
        }
    }

    /// Bit-granularity repetition: width becomes `self.width * n`.
    pub fn repeat(&self, n: u32) -> Bits {
        if n == 0 || self.width == 0 {
            return Bits::empty();
        }
        let width = self.width * n;
        let word_count = ((width + 31) / 32) as usize;
        let mut out = vec![0u32; word_count];
        for rep in 0..n {
            let base = rep * self.width;
            for i in 0..self.width {
                if self.bit(i) {
                    let pos = base + i;
                    out[(pos / 32) as usize] |= 1 << (pos % 32);
                }
            }
        }
        Bits::normalize(width, false, out)
    }

    /// Slices according to [`SliceArgs`] (spec §4.3).
    pub fn slice(&self, args: &SliceArgs) -> Result<Bits, ValueError> {
        slice::slice(self, args)
    }

    /// Non-negative integer hash, upper bit cleared, consistent with
    /// [`Int::hash`]-equivalent numeric coercion (spec §4.1, Open Question c).
    ///
    /// An inverted value hashes as `!sum(limbs)` rather than a per-limb
    /// complement: `!x == -1 - x` (mod 2^32), which is what an inverted
    /// value's logical magnitude (`stored limbs + 1`, negated) requires
    /// regardless of how many limbs it spans.
    pub fn hash(&self) -> u32 {
        let mut h: u32 = 0;
        for &limb in self.limbs() {
            h = h.wrapping_add(limb);
        }
        if self.is_inverted() {
            h = !h;
        }
        h & 0x7FFF_FFFF
    }

    /// Textual representation (spec §4.3): `$HEX` when `width % 4 == 0`,
    /// else `%BIN`; inverted values are `~`-prefixed.
    pub fn repr(&self) -> String {
        repr::bits_repr(self)
    }
}

fn fill_word(inverted: bool) -> u32 {
    if inverted {
        u32::MAX
    } else {
        0
    }
}

fn and_or_width(a: &Bits, b: &Bits, is_and: bool) -> u32 {
    if a.width == b.width {
        return a.width;
    }
    let narrower_inverted = if a.width > b.width { b.is_inverted() } else { a.is_inverted() };
    let pick_max = if is_and { narrower_inverted } else { !narrower_inverted };
    if pick_max {
        a.width.max(b.width)
    } else {
        a.width.min(b.width)
    }
}

fn truncate_to_width(limbs: &mut Vec<u32>, width: u32) {
    let word_count = ((width + 31) / 32) as usize;
    limbs.truncate(word_count);
    if width % 32 != 0 {
        if let Some(top) = limbs.last_mut() {
            let mask = (1u32 << (width % 32)) - 1;
            *top &= mask;
        }
    }
}

fn int_magnitude_limbs(v: &Int) -> Vec<u32> {
    // Int doesn't expose its limbs publicly; round-trip through decimal
    // only as a last resort would be far too slow, so route through the
    // shift/bitops it does expose instead: extract 32 bits at a time.
    let mut out = Vec::new();
    let mut remaining = v.abs();
    let chunk_mask = Int::from_u64(0xFFFF_FFFF);
    while !remaining.is_zero() {
        let low = remaining.bitand(&chunk_mask);
        out.push(low.uval(32).unwrap_or(0) as u32);
        remaining = remaining.shr(32);
    }
    out
}

fn int_from_limbs(sign: i8, limbs: &[u32]) -> Int {
    let mut acc = Int::zero();
    for (i, &limb) in limbs.iter().enumerate().rev() {
        acc = acc.shl(32).add(&Int::from_u64(limb as u64));
        let _ = i;
    }
    if sign < 0 {
        acc.neg()
    } else {
        acc
    }
}

fn top_bit_width(limbs: &[u32]) -> u32 {
    if limbs.is_empty() {
        return 0;
    }
    let top = limbs.len() - 1;
    32 * top as u32 + (32 - limbs[top].leading_zeros())
}


impl PartialEq for Bits {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}
impl Eq for Bits {}

impl Ord for Bits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_int().cmp(&other.to_int())
    }
}
impl PartialOrd for Bits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_flips_inversion_flag() {
        let b = bits_from_hexstr(b"a5").unwrap().0;
        let inv = b.not();
        assert_eq!(inv.width(), b.width());
        assert!(inv.is_inverted());
        assert_eq!(inv.not(), b);
    }

    #[test]
    fn concat_matches_scenario_s2() {
        let (hi, _, _) = bits_from_hexstr(b"a5").unwrap();
        let (lo, _, _) = bits_from_binstr(b"1100").unwrap();
        let cat = hi.concat(&lo);
        assert_eq!(cat.width(), 12);
        assert_eq!(cat.repr(), "$a5c");
    }

    #[test]
    fn from_int_round_trips_through_to_int() {
        for v in [0i64, 1, 5, -6, 255, -256, 1 << 20] {
            let b = Bits::from_int(&Int::from_i64(v));
            assert_eq!(b.to_int(), Int::from_i64(v), "v={v}");
        }
    }

    #[test]
    fn scenario_s3_inversion_round_trip() {
        let five = Bits::from_int(&Int::from_i64(5));
        assert_eq!(five.width(), 3);
        let inv = five.not();
        assert!(inv.is_inverted());
        let minus_six = Bits::from_int(&Int::from_i64(-6));
        assert_eq!(inv.to_int(), Int::from_i64(-6));
        assert_eq!(inv, minus_six);
    }

    #[test]
    fn scenario_s6_bitwise_width_rules() {
        let (ff, _, _) = bits_from_hexstr(b"ff").unwrap();
        let zero_inv = Bits::empty().not();
        let anded = ff.bitand(&zero_inv);
        assert_eq!(anded.width(), 8);
        assert_eq!(anded.repr(), "$ff");
    }

    #[test]
    fn or_collapses_to_narrower_width_when_it_is_inverted() {
        // ORing with an inverted (all-ones-filled) narrower operand forces
        // every bit to one, so the result collapses to the narrower width.
        let (ff, _, _) = bits_from_hexstr(b"ff").unwrap();
        let zero_inv = Bits::empty().not();
        let ored = ff.bitor(&zero_inv);
        assert_eq!(ored.width(), 0);
        assert!(ored.is_inverted());
    }

    #[test]
    fn or_extends_to_wider_width_when_narrower_is_not_inverted() {
        let (ff, _, _) = bits_from_hexstr(b"0f").unwrap();
        let (wide, _, _) = bits_from_hexstr(b"f000").unwrap();
        let ored = ff.bitor(&wide);
        assert_eq!(ored.width(), 16);
        assert_eq!(ored.repr(), "$f00f");
    }
}
