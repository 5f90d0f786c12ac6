//! Slicing (spec §4.3): index list, Python-style `[start:end:step]`, or a
//! single index.

use crate::error::ValueError;

use super::Bits;

/// Arguments to [`Bits::slice`].
#[derive(Debug, Clone)]
pub enum SliceArgs {
    /// Gather an explicit, ordered list of source bit indices.
    Indices(Vec<i64>),
    /// A Python-style slice: `start`, `end` (exclusive), `step` (nonzero).
    /// `None` endpoints follow Python's defaulting rule for the sign of
    /// `step`.
    Range {
        start: Option<i64>,
        end: Option<i64>,
        step: i64,
    },
    /// A single index, returning a width-1 `Bits`.
    Index(i64),
}

fn normalize_index(i: i64, width: u32) -> i64 {
    if i < 0 {
        i + width as i64
    } else {
        i
    }
}

pub(super) fn slice(src: &Bits, args: &SliceArgs) -> Result<Bits, ValueError> {
    match args {
        SliceArgs::Index(i) => {
            let idx = normalize_index(*i, src.width());
            if idx < 0 || idx >= src.width() as i64 {
                return Err(ValueError::NotUval { bits: 1 });
            }
            Ok(bit_to_bits(src.bit(idx as u32)))
        }
        SliceArgs::Indices(indices) => {
            let mut out = Vec::with_capacity(indices.len());
            for &i in indices {
                let idx = normalize_index(i, src.width());
                // An index outside [0, width) still reads the inversion
                // fill rather than a hard 0 (spec §4.3).
                let bit = if idx >= 0 && idx < src.width() as i64 {
                    src.bit(idx as u32)
                } else {
                    src.is_inverted()
                };
                out.push(bit);
            }
            Ok(gather(&out))
        }
        SliceArgs::Range { start, end, step } => {
            if *step == 0 {
                return Err(ValueError::NotUval { bits: 0 });
            }
            let w = src.width() as i64;
            let (default_start, default_end) = if *step > 0 { (0, w) } else { (w - 1, -1) };
            let start = start.map(|s| normalize_index(s, src.width())).unwrap_or(default_start);
            let end = end.map(|e| normalize_index(e, src.width())).unwrap_or(default_end);

            // Step-1, full-width, non-inverted slices return the original
            // reference per Open Question (a).
            if *step == 1 && start == 0 && end >= w && !src.is_inverted() {
                return Ok(src.clone());
            }

            let mut bits = Vec::new();
            let mut i = start;
            while (*step > 0 && i < end) || (*step < 0 && i > end) {
                // An in-range index reads its bit; one that falls outside
                // [0, width) still reads the inversion fill (spec §4.3).
                let bit = if i >= 0 && i < w { src.bit(i as u32) } else { src.is_inverted() };
                bits.push(bit);
                i += step;
            }
            Ok(gather(&bits))
        }
    }
}

fn bit_to_bits(b: bool) -> Bits {
    Bits::normalize(1, false, vec![b as u32])
}

fn gather(bits: &[bool]) -> Bits {
    let width = bits.len() as u32;
    let word_count = ((width + 31) / 32) as usize;
    let mut out = vec![0u32; word_count];
    for (i, &b) in bits.iter().enumerate() {
        if b {
            out[i / 32] |= 1 << (i % 32);
        }
    }
    Bits::normalize(width, false, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::parse::{bits_from_binstr, bits_from_hexstr};

    #[test]
    fn scenario_s2_slice_low_and_high_nibble() {
        let (hi, _, _) = bits_from_hexstr(b"a5").unwrap();
        let (lo, _, _) = bits_from_binstr(b"1100").unwrap();
        let cat = hi.concat(&lo);
        let low_nibble = cat.slice(&SliceArgs::Range { start: Some(0), end: Some(4), step: 1 }).unwrap();
        assert_eq!(low_nibble.repr(), "%1100");
        let high = cat.slice(&SliceArgs::Range { start: Some(8), end: Some(12), step: 1 }).unwrap();
        assert_eq!(high.repr(), "%1010");
    }

    #[test]
    fn full_width_step_one_returns_original() {
        let (b, _, _) = bits_from_hexstr(b"a5").unwrap();
        let sliced = b.slice(&SliceArgs::Range { start: None, end: None, step: 1 }).unwrap();
        assert_eq!(sliced, b);
    }

    #[test]
    fn single_index_returns_width_one() {
        let (b, _, _) = bits_from_hexstr(b"a5").unwrap();
        let bit0 = b.slice(&SliceArgs::Index(0)).unwrap();
        assert_eq!(bit0.width(), 1);
        assert!(!bit0.bit(0));
    }

    #[test]
    fn out_of_range_bits_of_an_inverted_value_read_as_one() {
        use crate::integer::Int;
        let five = crate::bits::Bits::from_int(&Int::from_i64(5));
        assert_eq!(five.width(), 3);
        let inv = five.not();
        assert!(inv.is_inverted());
        // Extending into 5 bits: the low 3 bits are unchanged, the top two
        // (beyond the stored width) read as the inversion fill, 1.
        let wide = inv.slice(&SliceArgs::Range { start: Some(0), end: Some(5), step: 1 }).unwrap();
        assert!(wide.bit(3));
        assert!(wide.bit(4));
    }
}
