//! Base-10 textual representation (spec §4.2): repeated division by
//! [`crate::consts::DECIMAL_CHUNK_BASE`], lowest chunk first, then the
//! chunks are printed back out most significant first.

use crate::consts::DECIMAL_CHUNK_DIGITS;

use super::div::div_mod_single;
use super::Int;

/// Renders `v` in base 10, sign-prefixed for negative values.
pub fn int_repr(v: &Int) -> String {
    if v.is_zero() {
        return "0".to_string();
    }

    let mut chunks: Vec<u32> = Vec::new();
    let mut mag = v.limbs().to_vec();
    while !mag.is_empty() {
        let (mut q, r) = div_mod_single(&mag, 1_000_000_000);
        chunks.push(r.first().copied().unwrap_or(0));
        while q.last() == Some(&0) {
            q.pop();
        }
        mag = q;
    }

    let mut out = String::new();
    if v.signum() < 0 {
        out.push('-');
    }
    let mut first = true;
    for chunk in chunks.iter().rev() {
        if first {
            out.push_str(&chunk.to_string());
            first = false;
        } else {
            out.push_str(&format!("{:0width$}", chunk, width = DECIMAL_CHUNK_DIGITS as usize));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integer::parse::int_from_decstr;

    #[test]
    fn zero_reprs_as_zero() {
        assert_eq!(int_repr(&Int::zero()), "0");
    }

    #[test]
    fn small_values_match_host_display() {
        for v in [1i64, -1, 42, -42, 1_000_000_000, -1_000_000_000] {
            assert_eq!(int_repr(&Int::from_i64(v)), v.to_string());
        }
    }

    #[test]
    fn round_trips_through_decstr_parser() {
        let s = "123456789012345678901234567890";
        let (v, _, _) = int_from_decstr(s.as_bytes()).unwrap();
        assert_eq!(int_repr(&v), s);
    }

    #[test]
    fn pads_internal_chunks_to_nine_digits() {
        // Exercises a middle chunk that needs leading zeros, e.g.
        // 1_000000001_000000000.
        let s = "1000000001000000000";
        let (v, _, _) = int_from_decstr(s.as_bytes()).unwrap();
        assert_eq!(int_repr(&v), s);
    }
}
