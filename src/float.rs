//! Float value kind (spec §3 "Supplemented value kinds: Float"): a thin
//! `f64` wrapper with no arbitrary-precision support (Non-goal).

use crate::error::ValueError;
use crate::integer::Int;
use crate::object::TypeTag;

/// Truncates `v` toward zero into an arbitrary-precision [`Int`], erroring
/// on non-finite input (spec §4.2 `int_from_float`).
pub fn int_from_float(v: f64) -> Result<Int, ValueError> {
    if !v.is_finite() {
        return Err(ValueError::ConversionNotAvailable { from: TypeTag::Float, to: TypeTag::Int });
    }
    if v == 0.0 {
        return Ok(Int::zero());
    }

    let bits = v.to_bits();
    let sign_negative = bits >> 63 == 1;
    let raw_exponent = ((bits >> 52) & 0x7FF) as i64;
    let raw_mantissa = bits & 0x000F_FFFF_FFFF_FFFF;
    let (mantissa, exponent) = if raw_exponent == 0 {
        (raw_mantissa, -1074i64) // subnormal
    } else {
        (raw_mantissa | (1 << 52), raw_exponent - 1075)
    };

    let mut result = Int::from_u64(mantissa);
    if exponent > 0 {
        result = result.shl(exponent as u32);
    } else if exponent < 0 {
        // shr on a non-negative Int floors, which is truncation toward
        // zero for a positive magnitude; the sign is applied afterward.
        result = result.shr((-exponent) as u32);
    }
    Ok(if sign_negative { result.neg() } else { result })
}

/// Float exponentiation, used when [`Int::pow`] rejects a negative
/// exponent (spec §4.2: "negative exponent promotes both sides to
/// double").
pub fn pow(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

/// Rust's shortest round-trippable `f64` formatting (spec §3 Float repr).
pub fn repr(v: f64) -> String {
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(int_from_float(3.9).unwrap(), Int::from_i64(3));
        assert_eq!(int_from_float(-3.9).unwrap(), Int::from_i64(-3));
        assert_eq!(int_from_float(0.0).unwrap(), Int::zero());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(int_from_float(f64::NAN).is_err());
        assert!(int_from_float(f64::INFINITY).is_err());
    }

    #[test]
    fn large_integral_float_round_trips() {
        let v = 1.0e20;
        let got = int_from_float(v).unwrap();
        assert_eq!(got.to_string(), "100000000000000000000");
    }
}
