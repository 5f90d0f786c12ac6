//! The polymorphic value runtime (spec §3, §4.1): a tagged union standing
//! in for the source's per-type vtables (§9 "sum types vs. vtables").

pub mod gc;
pub mod hash;
mod ops;
pub mod singletons;
mod truth;

use std::rc::Rc;

use strum::{Display, EnumIter};

use crate::address::Address;
use crate::bits::Bits;
use crate::bytes::BytesValue;
use crate::code_symbol::CodeSymbol;
use crate::error::ValueError;
use crate::integer::Int;
use crate::list::ListValue;
use crate::text::StrValue;

pub use ops::{calc1, calc2, Operator};
pub use truth::{truth, TruthMode};

/// Shared-ownership handle to a runtime value (spec §3: `Rc<Value>` stands
/// in for the source's manual reference count).
pub type Obj = Rc<Value>;

/// The runtime type of a [`Value`], used in diagnostics and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeTag {
    Int,
    Bits,
    Float,
    Bytes,
    Str,
    Address,
    CodeSymbol,
    List,
    Bool,
    None,
    Error,
}

/// Every first-class value in the assembler's expression language.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(Int),
    Bits(Bits),
    Float(f64),
    Bytes(BytesValue),
    Str(StrValue),
    Address(Address),
    CodeSymbol(CodeSymbol),
    List(ListValue),
    Bool(bool),
    /// "Not yet resolved" propagation value (spec §7).
    None,
    /// Errors are ordinary values, routed through the same references as
    /// data (spec §7).
    Error(ValueError),
}

impl Value {
    pub const fn type_tag(&self) -> TypeTag {
        match self {
            Value::Int(_) => TypeTag::Int,
            Value::Bits(_) => TypeTag::Bits,
            Value::Float(_) => TypeTag::Float,
            Value::Bytes(_) => TypeTag::Bytes,
            Value::Str(_) => TypeTag::Str,
            Value::Address(_) => TypeTag::Address,
            Value::CodeSymbol(_) => TypeTag::CodeSymbol,
            Value::List(_) => TypeTag::List,
            Value::Bool(_) => TypeTag::Bool,
            Value::None => TypeTag::None,
            Value::Error(_) => TypeTag::Error,
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Coerces `bool -> bits -> int` as far as numeric operators need
    /// (spec §4.1 "type coercion for numerics").
    pub fn coerce_to_int(&self) -> Option<Int> {
        match self {
            Value::Int(i) => Some(i.clone()),
            Value::Bits(b) => Some(b.to_int()),
            Value::Bool(b) => Some(Int::from_i64(*b as i64)),
            _ => None,
        }
    }

    pub fn coerce_to_bits(&self) -> Option<Bits> {
        match self {
            Value::Bits(b) => Some(b.clone()),
            Value::Bool(b) => Some(Bits::from_int(&Int::from_i64(*b as i64))),
            _ => None,
        }
    }

    /// Non-negative hash with the top bit cleared (spec §4.1), identical
    /// across `Int`/`Bits`/`Bool` for numerically equal values (Open
    /// Question c).
    pub fn hash(&self) -> u32 {
        hash::hash(self)
    }

    /// Truthiness under the given mode (spec §4.1).
    pub fn truth(&self, mode: TruthMode) -> bool {
        truth::truth(self, mode)
    }

    /// Structural equality matching each type's `same` operation (spec
    /// §3's "Ownership" note and §4.5 "Equality").
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(_), Value::Bits(_)) | (Value::Bits(_), Value::Int(_)) => {
                self.coerce_to_int() == other.coerce_to_int()
            }
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bits(a), Value::Bits(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Address(a), Value::Address(b)) => a == b,
            (Value::CodeSymbol(a), Value::CodeSymbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.0.len() == b.0.len() && a.0.iter().zip(&b.0).all(|(x, y)| x.same(y)),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::None, Value::None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tag_matches_variant() {
        assert_eq!(Value::Int(Int::zero()).type_tag(), TypeTag::Int);
        assert_eq!(Value::None.type_tag(), TypeTag::None);
    }

    #[test]
    fn same_coerces_bool_and_int() {
        let one = Value::Int(Int::from_i64(1));
        let t = Value::Bool(true);
        assert!(one.same(&t));
    }
}
