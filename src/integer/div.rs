//! Division and remainder via Knuth's Algorithm D (TAOCP vol. 2, 4.3.1),
//! with a specialized single-limb divisor path, and floor-division sign
//! adjustment on top of the magnitude-only, truncating core (spec §4.2).

use super::shift::{shift_left_magnitude, shift_right_magnitude};
use super::Int;
use crate::error::ValueError;

/// Selects which half of a division result [`Int::div_or_rem`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivMode {
    /// The quotient.
    Quotient,
    /// The remainder.
    Remainder,
}

pub(super) fn div_mod_single(u: &[u32], divisor: u32) -> (Vec<u32>, Vec<u32>) {
    let mut quotient = vec![0u32; u.len()];
    let mut rem: u64 = 0;
    for i in (0..u.len()).rev() {
        let cur = (rem << 32) | u[i] as u64;
        quotient[i] = (cur / divisor as u64) as u32;
        rem = cur % divisor as u64;
    }
    let remainder = if rem == 0 { Vec::new() } else { vec![rem as u32] };
    (quotient, remainder)
}

/// Divides magnitude `u` by magnitude `v` (`v` non-empty, i.e. divisor
/// non-zero), truncating. Returns `(quotient, remainder)` magnitudes with
/// `0 <= remainder < v`.
fn div_mod_magnitude(u: &[u32], v: &[u32]) -> (Vec<u32>, Vec<u32>) {
    let m = v.len();
    if m == 1 {
        return div_mod_single(u, v[0]);
    }
    let n = u.len();
    if n < m {
        return (Vec::new(), u.to_vec());
    }

    // Normalize so the divisor's top limb has its high bit set; this bounds
    // the per-step quotient-digit estimate to within 2 of the true value.
    let shift = v[m - 1].leading_zeros();
    let mut v_norm = shift_left_magnitude(v, shift);
    v_norm.truncate(m);
    let mut u_norm = shift_left_magnitude(u, shift);
    u_norm.resize(n + 1, 0);

    let mut quotient = vec![0u32; n - m + 1];

    for j in (0..=(n - m)).rev() {
        let top = ((u_norm[j + m] as u64) << 32) | u_norm[j + m - 1] as u64;
        let mut qhat = top / v_norm[m - 1] as u64;
        let mut rhat = top % v_norm[m - 1] as u64;

        while qhat >= 1u64 << 32
            || qhat * v_norm[m - 2] as u64 > (rhat << 32) + u_norm[j + m - 2] as u64
        {
            qhat -= 1;
            rhat += v_norm[m - 1] as u64;
            if rhat >= 1u64 << 32 {
                break;
            }
        }

        // Multiply-and-subtract qhat * v_norm from the current window.
        let mut borrow = 0i64;
        let mut carry = 0u64;
        for i in 0..m {
            let p = qhat * v_norm[i] as u64 + carry;
            carry = p >> 32;
            let sub = u_norm[j + i] as i64 - (p as u32) as i64 - borrow;
            if sub < 0 {
                u_norm[j + i] = (sub + (1i64 << 32)) as u32;
                borrow = 1;
            } else {
                u_norm[j + i] = sub as u32;
                borrow = 0;
            }
        }
        let top_sub = u_norm[j + m] as i64 - carry as i64 - borrow;
        let went_negative = top_sub < 0;
        u_norm[j + m] = top_sub.rem_euclid(1i64 << 32) as u32;

        if went_negative {
            // qhat was one too large; add the divisor back once.
            qhat -= 1;
            let mut carry2 = 0u64;
            for i in 0..m {
                let s = u_norm[j + i] as u64 + v_norm[i] as u64 + carry2;
                u_norm[j + i] = s as u32;
                carry2 = s >> 32;
            }
            u_norm[j + m] = (u_norm[j + m] as u64 + carry2) as u32;
        }

        quotient[j] = qhat as u32;
    }

    let remainder = shift_right_magnitude(&u_norm[0..m], shift);
    (quotient, remainder)
}

impl Int {
    /// Floor division and matching-sign remainder in one pass: `(q, r)`
    /// such that `self == q * other + r`, `0 <= |r| < |other|`, and `r` has
    /// the sign of `other` (or is zero).
    pub fn divmod(&self, other: &Int) -> Result<(Int, Int), ValueError> {
        if other.is_zero() {
            return Err(ValueError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok((Int::zero(), Int::zero()));
        }

        let (q_mag, r_mag) = div_mod_magnitude(self.limbs(), other.limbs());
        let trunc_q = Int::normalize(self.sign * other.sign, q_mag);
        let trunc_r = Int::normalize(self.sign, r_mag);

        if trunc_r.is_zero() || self.sign == other.sign {
            Ok((trunc_q, trunc_r))
        } else {
            let floor_q = trunc_q.sub(&Int::from_i64(1));
            let floor_r = trunc_r.add(other);
            Ok((floor_q, floor_r))
        }
    }

    /// Floor-division quotient.
    pub fn div_floor(&self, other: &Int) -> Result<Int, ValueError> {
        self.divmod(other).map(|(q, _)| q)
    }

    /// Floor-division (divisor-signed) remainder.
    pub fn rem_floor(&self, other: &Int) -> Result<Int, ValueError> {
        self.divmod(other).map(|(_, r)| r)
    }

    /// Returns the quotient or remainder, per `mode`, from a single
    /// division (spec: "the public operation returns either quotient or
    /// remainder by request").
    pub fn div_or_rem(&self, other: &Int, mode: DivMode) -> Result<Int, ValueError> {
        let (q, r) = self.divmod(other)?;
        Ok(match mode {
            DivMode::Quotient => q,
            DivMode::Remainder => r,
        })
    }
}
