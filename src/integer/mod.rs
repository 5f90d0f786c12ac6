//! Arbitrary-precision sign-magnitude integers over a 32-bit limb.
//!
//! Representation follows spec §3/§4.2: a sign (`-1`, `0`, `1`), a count of
//! significant limbs, and the limbs themselves in little-endian order. Small
//! values live inline in the header; larger ones spill to a heap buffer.

mod bitwise;
mod div;
mod parse;
mod pow;
mod repr;
mod shift;

use std::cmp::Ordering;
use std::rc::Rc;

use crate::consts::INLINE_LIMBS;
use crate::error::ValueError;

pub use div::DivMode;
pub use parse::int_from_decstr;

/// Backing storage for an [`Int`]'s magnitude limbs.
#[derive(Debug, Clone)]
enum Store {
    Inline([u32; INLINE_LIMBS]),
    Heap(Rc<[u32]>),
}

/// An arbitrary-precision signed integer.
#[derive(Debug, Clone)]
pub struct Int {
    /// `-1`, `0` or `1`. `0` iff `len == 0`.
    sign: i8,
    /// Number of significant limbs. The top limb (`limbs()[len-1]`) is never
    /// zero when `len != 0`.
    len: usize,
    store: Store,
}

impl Int {
    /// The value zero.
    pub fn zero() -> Self {
        Self {
            sign: 0,
            len: 0,
            store: Store::Inline([0; INLINE_LIMBS]),
        }
    }

    /// Construct from a magnitude limb vector and an explicit sign,
    /// normalizing away high zero limbs and collapsing to inline storage
    /// when possible. `sign` is ignored (forced to zero) when the resulting
    /// magnitude is empty.
    fn normalize(sign: i8, mut limbs: Vec<u32>) -> Self {
        while limbs.last() == Some(&0) {
            limbs.pop();
        }
        if limbs.is_empty() {
            return Self::zero();
        }
        let len = limbs.len();
        let store = if len <= INLINE_LIMBS {
            let mut inline = [0u32; INLINE_LIMBS];
            inline[..len].copy_from_slice(&limbs);
            Store::Inline(inline)
        } else {
            Store::Heap(Rc::from(limbs.into_boxed_slice()))
        };
        Self { sign, len, store }
    }

    /// Significant magnitude limbs, little-endian, length `self.len`.
    fn limbs(&self) -> &[u32] {
        match &self.store {
            Store::Inline(arr) => &arr[..self.len],
            Store::Heap(rc) => &rc[..self.len],
        }
    }

    /// `true` if this value is exactly zero.
    pub const fn is_zero(&self) -> bool {
        self.len == 0
    }

    /// `-1`, `0` or `1`, matching the mathematical sign.
    pub const fn signum(&self) -> i32 {
        self.sign as i32
    }

    /// Construct from a host `i64`.
    pub fn from_i64(v: i64) -> Self {
        if v == 0 {
            return Self::zero();
        }
        let sign = if v < 0 { -1 } else { 1 };
        // i64::MIN.unsigned_abs() avoids overflow on negation.
        let mag = v.unsigned_abs();
        Self::from_u64_magnitude(sign, mag)
    }

    /// Construct from a host `u64`.
    pub fn from_u64(v: u64) -> Self {
        if v == 0 {
            return Self::zero();
        }
        Self::from_u64_magnitude(1, v)
    }

    fn from_u64_magnitude(sign: i8, mag: u64) -> Self {
        let lo = (mag & 0xFFFF_FFFF) as u32;
        let hi = (mag >> 32) as u32;
        let limbs = if hi == 0 { vec![lo] } else { vec![lo, hi] };
        Self::normalize(sign, limbs)
    }

    /// Narrow this value to a signed integer that must fit in `bits` bits
    /// (two's complement range `[-2^(bits-1), 2^(bits-1)-1]`).
    pub fn ival(&self, bits: u32) -> Result<i64, ValueError> {
        if bits == 0 || bits > 64 {
            return Err(ValueError::CantIval { bits });
        }
        let min = if bits == 64 { i64::MIN } else { -(1i64 << (bits - 1)) };
        let max = if bits == 64 {
            i64::MAX
        } else {
            (1i64 << (bits - 1)) - 1
        };
        let v = self.to_i128().ok_or(ValueError::CantIval { bits })?;
        if v < min as i128 || v > max as i128 {
            return Err(ValueError::CantIval { bits });
        }
        Ok(v as i64)
    }

    /// Narrow this value to an unsigned integer that must fit in `bits`
    /// bits.
    pub fn uval(&self, bits: u32) -> Result<u64, ValueError> {
        if bits == 0 || bits > 64 || self.sign < 0 {
            return Err(ValueError::CantUval { bits });
        }
        let max: u128 = if bits == 64 { u128::from(u64::MAX) } else { (1u128 << bits) - 1 };
        let v = self.to_i128().ok_or(ValueError::CantUval { bits })?;
        if v < 0 || v as u128 > max {
            return Err(ValueError::CantUval { bits });
        }
        Ok(v as u64)
    }

    fn to_i128(&self) -> Option<i128> {
        if self.len > 4 {
            return None;
        }
        let mut mag: u128 = 0;
        for (i, limb) in self.limbs().iter().enumerate() {
            mag |= (*limb as u128) << (32 * i);
        }
        let v = mag as i128;
        Some(if self.sign < 0 { -v } else { v })
    }

    fn magnitude_cmp(a: &Int, b: &Int) -> Ordering {
        a.len.cmp(&b.len).then_with(|| {
            for i in (0..a.len).rev() {
                let cmp = a.limbs()[i].cmp(&b.limbs()[i]);
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            Ordering::Equal
        })
    }

    /// Magnitude-only addition: `|a| + |b|`.
    fn add_magnitude(a: &[u32], b: &[u32]) -> Vec<u32> {
        let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
        let mut out = Vec::with_capacity(long.len() + 1);
        let mut carry = 0u64;
        for i in 0..long.len() {
            let x = long[i] as u64 + short.get(i).copied().unwrap_or(0) as u64 + carry;
            out.push(x as u32);
            carry = x >> 32;
        }
        if carry != 0 {
            out.push(carry as u32);
        }
        out
    }

    /// Magnitude-only subtraction, requires `|a| >= |b|`.
    fn sub_magnitude(a: &[u32], b: &[u32]) -> Vec<u32> {
        let mut out = Vec::with_capacity(a.len());
        let mut borrow = 0i64;
        for i in 0..a.len() {
            let x = a[i] as i64 - b.get(i).copied().unwrap_or(0) as i64 - borrow;
            if x < 0 {
                out.push((x + (1i64 << 32)) as u32);
                borrow = 1;
            } else {
                out.push(x as u32);
                borrow = 0;
            }
        }
        out
    }

    /// Addition.
    pub fn add(&self, other: &Int) -> Int {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        if self.sign == other.sign {
            Int::normalize(self.sign, Self::add_magnitude(self.limbs(), other.limbs()))
        } else {
            match Self::magnitude_cmp(self, other) {
                Ordering::Equal => Int::zero(),
                Ordering::Greater => Int::normalize(self.sign, Self::sub_magnitude(self.limbs(), other.limbs())),
                Ordering::Less => Int::normalize(other.sign, Self::sub_magnitude(other.limbs(), self.limbs())),
            }
        }
    }

    /// Negation.
    pub fn neg(&self) -> Int {
        if self.is_zero() {
            self.clone()
        } else {
            Int {
                sign: -self.sign,
                len: self.len,
                store: self.store.clone(),
            }
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> Int {
        if self.sign < 0 {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// Subtraction.
    pub fn sub(&self, other: &Int) -> Int {
        self.add(&other.neg())
    }

    /// Multiplication, schoolbook O(m·n) with a fast path for single-limb
    /// operands.
    pub fn mul(&self, other: &Int) -> Int {
        if self.is_zero() || other.is_zero() {
            return Int::zero();
        }
        let a = self.limbs();
        let b = other.limbs();
        if a.len() == 1 && b.len() == 1 {
            let prod = a[0] as u64 * b[0] as u64;
            let limbs = if (prod >> 32) == 0 {
                vec![prod as u32]
            } else {
                vec![prod as u32, (prod >> 32) as u32]
            };
            return Int::normalize(self.sign * other.sign, limbs);
        }
        let mut out = vec![0u32; a.len() + b.len()];
        for (i, &av) in a.iter().enumerate() {
            let mut carry = 0u64;
            for (j, &bv) in b.iter().enumerate() {
                let idx = i + j;
                let x = out[idx] as u64 + av as u64 * bv as u64 + carry;
                out[idx] = x as u32;
                carry = x >> 32;
            }
            let mut idx = i + b.len();
            while carry != 0 {
                let x = out[idx] as u64 + carry;
                out[idx] = x as u32;
                carry = x >> 32;
                idx += 1;
            }
        }
        Int::normalize(self.sign * other.sign, out)
    }
}

impl PartialEq for Int {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.len == other.len && self.limbs() == other.limbs()
    }
}
impl Eq for Int {}

impl PartialOrd for Int {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Int {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal if self.sign >= 0 => Self::magnitude_cmp(self, other),
            Ordering::Equal => Self::magnitude_cmp(other, self),
            other_order => other_order,
        }
    }
}

impl Default for Int {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Int {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&repr::int_repr(self))
    }
}

impl From<i64> for Int {
    fn from(v: i64) -> Self {
        Int::from_i64(v)
    }
}

impl From<u64> for Int {
    fn from(v: u64) -> Self {
        Int::from_u64(v)
    }
}
