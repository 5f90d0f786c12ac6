//! Bytes value kind (spec §3 "Supplemented value kinds: Bytes"): an
//! immutable byte string.

use std::rc::Rc;

use crate::bits::Bits;
use crate::integer::Int;

/// An immutable byte string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesValue(pub Rc<[u8]>);

impl BytesValue {
    pub fn new(data: Vec<u8>) -> Self {
        Self(Rc::from(data.into_boxed_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn concat(&self, other: &BytesValue) -> BytesValue {
        let mut out = Vec::with_capacity(self.len() + other.len());
        out.extend_from_slice(&self.0);
        out.extend_from_slice(&other.0);
        BytesValue::new(out)
    }

    pub fn repeat(&self, n: usize) -> BytesValue {
        BytesValue::new(self.0.iter().copied().cycle().take(self.len() * n).collect())
    }

    pub fn slice(&self, start: usize, end: usize) -> BytesValue {
        let end = end.min(self.len());
        let start = start.min(end);
        BytesValue::new(self.0[start..end].to_vec())
    }

    /// Packs bytes little-endian into an [`Int`] magnitude (spec §4.2
    /// `int_from_bytes`).
    pub fn int_from_bytes(&self) -> Int {
        let mut acc = Int::zero();
        for &b in self.0.iter().rev() {
            acc = acc.shl(8).add(&Int::from_u64(b as u64));
        }
        acc
    }

    /// Packs bytes 8 bits each into a [`Bits`] value (spec §4.3
    /// `bits_from_str`'s byte-packing rule, reused here for raw bytes).
    pub fn bits_from_bytes(&self) -> Bits {
        crate::bits::bits_from_bytes(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_appends() {
        let a = BytesValue::new(vec![1, 2]);
        let b = BytesValue::new(vec![3]);
        assert_eq!(a.concat(&b).0.as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn int_from_bytes_is_little_endian() {
        let b = BytesValue::new(vec![0x01, 0x00]);
        assert_eq!(b.int_from_bytes(), Int::from_i64(1));
    }

    #[test]
    fn repeat_cycles_source() {
        let a = BytesValue::new(vec![1, 2]);
        assert_eq!(a.repeat(3).0.as_ref(), &[1, 2, 1, 2, 1, 2]);
    }
}
