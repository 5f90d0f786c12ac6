//! Str value kind (spec §3 "Supplemented value kinds: Str"): source text
//! tagged with the encoding it translates through.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bits::Bits;
use crate::bytes::BytesValue;
use crate::encoding::{encode_strict, Encoding};
use crate::error::ValueError;
use crate::integer::Int;

/// A source text string, carrying the [`Encoding`] used to translate it to
/// bytes/int/bits on demand.
#[derive(Clone)]
pub struct StrValue {
    pub text: Rc<str>,
    pub encoding: Rc<RefCell<Encoding>>,
}

impl std::fmt::Debug for StrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrValue").field("text", &self.text).finish()
    }
}

impl PartialEq for StrValue {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}
impl Eq for StrValue {}

impl StrValue {
    pub fn new(text: &str, encoding: Rc<RefCell<Encoding>>) -> Self {
        Self { text: Rc::from(text), encoding }
    }

    fn encode(&self) -> Result<BytesValue, ValueError> {
        let bytes = encode_strict(&mut self.encoding.borrow_mut(), &self.text)?;
        Ok(BytesValue::new(bytes))
    }

    /// `int_from_str` (spec §4.2): encode, then pack little-endian.
    pub fn int_from_str(&self) -> Result<Int, ValueError> {
        Ok(self.encode()?.int_from_bytes())
    }

    /// `bits_from_str` (spec §4.3): encode, then pack 8 bits per byte.
    pub fn bits_from_str(&self) -> Result<Bits, ValueError> {
        Ok(self.encode()?.bits_from_bytes())
    }

    pub fn concat(&self, other: &StrValue) -> StrValue {
        let mut s = String::with_capacity(self.text.len() + other.text.len());
        s.push_str(&self.text);
        s.push_str(&other.text);
        StrValue { text: Rc::from(s), encoding: self.encoding.clone() }
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
