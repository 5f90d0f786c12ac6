//! Exponentiation (spec §4.2): left-to-right binary exponentiation for a
//! non-negative integer exponent. A negative exponent has no `Int` result;
//! [`crate::object::calc2`]'s `Pow` dispatch checks for one before calling
//! this and promotes both operands to `f64` instead (spec: "negative
//! exponent promotes both sides to double").

use super::Int;
use crate::error::ValueError;

impl Int {
    /// `self.pow(exponent)`. A negative exponent is not representable as an
    /// `Int` result; callers going through [`crate::object::calc2`] never
    /// hit this error, since that dispatch routes a negative exponent to
    /// the float power operator before calling here.
    pub fn pow(&self, exponent: &Int) -> Result<Int, ValueError> {
        if exponent.signum() < 0 {
            return Err(ValueError::ConversionNotAvailable {
                from: crate::object::TypeTag::Int,
                to: crate::object::TypeTag::Float,
            });
        }
        if exponent.is_zero() {
            return Ok(Int::from_i64(1));
        }
        if self.is_zero() {
            return Ok(Int::zero());
        }

        // Binary exponentiation, left to right over the bits of the
        // exponent's magnitude, from the most significant set bit down.
        let bits = bit_positions_msb_first(exponent.limbs());
        let mut acc = Int::from_i64(1);
        for bit in bits {
            acc = acc.mul(&acc);
            if bit {
                acc = acc.mul(self);
            }
        }
        Ok(acc)
    }
}

/// Yields the bits of a little-endian limb magnitude from the most
/// significant set bit down to bit 0, inclusive.
fn bit_positions_msb_first(limbs: &[u32]) -> Vec<bool> {
    if limbs.is_empty() {
        return Vec::new();
    }
    let top = limbs.len() - 1;
    let top_bits = 32 - limbs[top].leading_zeros();
    let mut out = Vec::with_capacity(top_bits as usize + 32 * top);
    for b in (0..top_bits).rev() {
        out.push((limbs[top] >> b) & 1 == 1);
    }
    for limb in limbs[..top].iter().rev() {
        for b in (0..32).rev() {
            out.push((limb >> b) & 1 == 1);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_powers() {
        assert_eq!(Int::from_i64(2).pow(&Int::from_i64(10)).unwrap(), Int::from_i64(1024));
        assert_eq!(Int::from_i64(3).pow(&Int::from_i64(0)).unwrap(), Int::from_i64(1));
        assert_eq!(Int::from_i64(0).pow(&Int::from_i64(5)).unwrap(), Int::zero());
        assert_eq!(Int::from_i64(-2).pow(&Int::from_i64(3)).unwrap(), Int::from_i64(-8));
    }

    #[test]
    fn negative_exponent_errors() {
        assert!(Int::from_i64(2).pow(&Int::from_i64(-1)).is_err());
    }

    #[test]
    fn power_grows_beyond_one_limb() {
        // 2^40 doesn't fit in a single 32-bit limb.
        let got = Int::from_i64(2).pow(&Int::from_i64(40)).unwrap();
        assert_eq!(got, Int::from_u64(1u64 << 40));
    }
}
