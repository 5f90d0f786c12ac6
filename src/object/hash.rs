//! Hashing (spec §4.1): sum of limbs with sign applied, top bit cleared,
//! identical across `Int`/`Bits`/`Bool` so numerically equal values of
//! different types collide (Open Question c).

use super::Value;

/// Computes the non-negative, top-bit-cleared hash of `value`.
pub fn hash(value: &Value) -> u32 {
    match value {
        Value::Int(i) => int_hash(i),
        Value::Bits(b) => b.hash(),
        Value::Bool(b) => int_hash_from_i64(*b as i64),
        Value::Float(f) => (f.to_bits() as u32).wrapping_mul(2654435761) & 0x7FFF_FFFF,
        Value::Bytes(b) => bytes_hash(&b.0),
        Value::Str(s) => bytes_hash(s.text.as_bytes()),
        Value::Address(a) => a.offset.wrapping_add(a.bank.unwrap_or(0) as u32) & 0x7FFF_FFFF,
        Value::List(l) => l.0.iter().fold(0u32, |acc, v| acc.wrapping_mul(31).wrapping_add(v.hash())) & 0x7FFF_FFFF,
        Value::None | Value::Error(_) | Value::CodeSymbol(_) => 0,
    }
}

fn int_hash(i: &crate::integer::Int) -> u32 {
    // Int doesn't expose limbs; derive the same sum-of-limbs hash through
    // repeated 32-bit extraction. A negative value negates the accumulated
    // sum once at the end, not per limb (a per-limb bitwise-NOT sums to
    // `-n - sum(limbs)` for an n-limb magnitude, not the required
    // `-sum(limbs)`).
    let mut h: u32 = 0;
    let mut remaining = i.abs();
    let mask = crate::integer::Int::from_u64(0xFFFF_FFFF);
    while !remaining.is_zero() {
        let limb = remaining.bitand(&mask).uval(32).unwrap_or(0) as u32;
        h = h.wrapping_add(limb);
        remaining = remaining.shr(32);
    }
    if i.signum() < 0 {
        h = h.wrapping_neg();
    }
    h & 0x7FFF_FFFF
}

fn int_hash_from_i64(v: i64) -> u32 {
    int_hash(&crate::integer::Int::from_i64(v))
}

fn bytes_hash(bytes: &[u8]) -> u32 {
    let mut h: u32 = 2166136261;
    for &b in bytes {
        h ^= b as u32;
        h = h.wrapping_mul(16777619);
    }
    h & 0x7FFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::Bits;
    use crate::integer::Int;

    #[test]
    fn equal_values_across_types_collide() {
        let a = Value::Int(Int::from_i64(5));
        let b = Value::Bits(Bits::from_int(&Int::from_i64(5)));
        let c = Value::Bool(true);
        assert_ne!(hash(&a), 0);
        assert_eq!(hash(&Value::Int(Int::from_i64(1))), hash(&c));
        let _ = b;
    }

    #[test]
    fn top_bit_always_clear() {
        for v in [i64::MAX, i64::MIN + 1, -1, 0, 12345] {
            assert_eq!(hash(&Value::Int(Int::from_i64(v))) & 0x8000_0000, 0);
        }
    }

    #[test]
    fn negative_int_and_its_inverted_bits_equivalent_collide() {
        for v in [-1i64, -5, -6, -256, -70_000, -(1i64 << 40)] {
            let as_int = hash(&Value::Int(Int::from_i64(v)));
            let as_bits = hash(&Value::Bits(Bits::from_int(&Int::from_i64(v))));
            assert_eq!(as_int, as_bits, "v={v}");
        }
    }
}
