//! Address value kind (spec §3 "Supplemented value kinds: Address"): a
//! resolved or unresolved machine address that still participates in
//! arithmetic before the code generator (out of scope) finalizes it.

/// A bank/segment tag plus a 32-bit offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    /// `None` before the enclosing segment has been resolved.
    pub bank: Option<i32>,
    pub offset: u32,
}

impl Address {
    pub const fn new(bank: Option<i32>, offset: u32) -> Self {
        Self { bank, offset }
    }

    /// `label + delta`: the bank is unaffected, the offset wraps at 32
    /// bits like the target machine's address space.
    pub fn add_offset(&self, delta: i64) -> Address {
        Address { bank: self.bank, offset: (self.offset as i64).wrapping_add(delta) as u32 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_offset_preserves_bank() {
        let a = Address::new(Some(1), 0x8000);
        assert_eq!(a.add_offset(1), Address::new(Some(1), 0x8001));
    }

    #[test]
    fn add_offset_wraps() {
        let a = Address::new(None, u32::MAX);
        assert_eq!(a.add_offset(1), Address::new(None, 0));
    }
}
