//! Bitwise AND/OR/XOR over signed sign-magnitude integers, simulating
//! two's-complement arithmetic (spec §4.2).

use super::Int;

/// `|x| - 1`, used to derive the infinite two's-complement limb stream of a
/// negative operand without materializing it.
pub(super) fn sub_one(magnitude: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(magnitude.len());
    let mut borrow = 1i64;
    for &limb in magnitude {
        let x = limb as i64 - borrow;
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

/// `|x| + 1`, the inverse of [`sub_one`], used when re-encoding a negative
/// two's-complement result back to sign-magnitude.
fn add_one(magnitude: &mut Vec<u32>) {
    let mut carry = 1u64;
    for limb in magnitude.iter_mut() {
        if carry == 0 {
            break;
        }
        let x = *limb as u64 + carry;
        *limb = x as u32;
        carry = x >> 32;
    }
    if carry != 0 {
        magnitude.push(carry as u32);
    }
}

/// Limb `i` of the conceptual infinite two's-complement stream for a value
/// with the given sign, magnitude, and (for negative values) precomputed
/// `magnitude - 1`.
fn twos_limb(sign: i8, magnitude: &[u32], magnitude_m1: Option<&[u32]>, i: usize) -> u32 {
    if sign >= 0 {
        magnitude.get(i).copied().unwrap_or(0)
    } else {
        !magnitude_m1.unwrap().get(i).copied().unwrap_or(0)
    }
}

fn combine(a: &Int, b: &Int, f: impl Fn(u32, u32) -> u32) -> Int {
    let a_m1 = (a.sign < 0).then(|| sub_one(a.limbs()));
    let b_m1 = (b.sign < 0).then(|| sub_one(b.limbs()));
    let n = a.len.max(b.len);

    let fill_a: u32 = if a.sign < 0 { u32::MAX } else { 0 };
    let fill_b: u32 = if b.sign < 0 { u32::MAX } else { 0 };
    let fill_result = f(fill_a, fill_b);

    let mut limbs = Vec::with_capacity(n + 1);
    for i in 0..n {
        let la = twos_limb(a.sign, a.limbs(), a_m1.as_deref(), i);
        let lb = twos_limb(b.sign, b.limbs(), b_m1.as_deref(), i);
        limbs.push(f(la, lb));
    }

    if fill_result == 0 {
        Int::normalize(1, limbs)
    } else {
        let mut magnitude: Vec<u32> = limbs.iter().map(|x| !x).collect();
        add_one(&mut magnitude);
        Int::normalize(-1, magnitude)
    }
}

impl Int {
    /// Bitwise AND, two's-complement semantics.
    pub fn bitand(&self, other: &Int) -> Int {
        combine(self, other, |a, b| a & b)
    }

    /// Bitwise OR, two's-complement semantics.
    pub fn bitor(&self, other: &Int) -> Int {
        combine(self, other, |a, b| a | b)
    }

    /// Bitwise XOR, two's-complement semantics.
    pub fn bitxor(&self, other: &Int) -> Int {
        combine(self, other, |a, b| a ^ b)
    }

    /// Bitwise complement (`!x == -x - 1`).
    pub fn not(&self) -> Int {
        self.neg().sub(&Int::from_i64(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_of_positives() {
        assert_eq!(Int::from_i64(0b1100).bitand(&Int::from_i64(0b1010)), Int::from_i64(0b1000));
    }

    #[test]
    fn or_xor_of_positives() {
        assert_eq!(Int::from_i64(0b1100).bitor(&Int::from_i64(0b1010)), Int::from_i64(0b1110));
        assert_eq!(Int::from_i64(0b1100).bitxor(&Int::from_i64(0b1010)), Int::from_i64(0b0110));
    }

    #[test]
    fn not_matches_arithmetic_identity() {
        for v in [-5i64, -1, 0, 1, 5, 1000] {
            assert_eq!(Int::from_i64(v).not(), Int::from_i64(!v));
        }
    }

    #[test]
    fn bitwise_ops_on_negative_operands_match_host_i64() {
        let cases: &[(i64, i64)] = &[(-1, -1), (-1, 5), (5, -1), (-12, 7), (-200, -17), (0, -3)];
        for &(x, y) in cases {
            let (ix, iy) = (Int::from_i64(x), Int::from_i64(y));
            assert_eq!(ix.bitand(&iy), Int::from_i64(x & y), "and({x},{y})");
            assert_eq!(ix.bitor(&iy), Int::from_i64(x | y), "or({x},{y})");
            assert_eq!(ix.bitxor(&iy), Int::from_i64(x ^ y), "xor({x},{y})");
        }
    }
}
