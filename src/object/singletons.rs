//! Process-wide interned singletons (spec §3 "Singletons", §5 "Shared
//! resources"): `0`, `1` and `-1` as `Int`s, the two canonical empty `Bits`
//! (plain and inverted) and the width-1 zero/one `Bits`, each built once
//! and handed out as a cheap `Rc` clone rather than reconstructed on every
//! call — the same role the source's static `int_value`/`minus1_value`/
//! `null_bits`/`inv_bits`/`bits_value` globals play.
//!
//! [`Value`] is `Rc`-based and therefore `!Sync`, so these live behind
//! thread-local storage rather than a `Sync`-bound global static.

use std::rc::Rc;

use once_cell::unsync::Lazy;

use crate::bits::Bits;
use crate::integer::Int;

use super::{Obj, Value};

thread_local! {
    static INT_ZERO: Lazy<Obj> = Lazy::new(|| Rc::new(Value::Int(Int::zero())));
    static INT_ONE: Lazy<Obj> = Lazy::new(|| Rc::new(Value::Int(Int::from_i64(1))));
    static INT_MINUS_ONE: Lazy<Obj> = Lazy::new(|| Rc::new(Value::Int(Int::from_i64(-1))));
    static BITS_NULL: Lazy<Obj> = Lazy::new(|| Rc::new(Value::Bits(Bits::empty())));
    static BITS_INV: Lazy<Obj> = Lazy::new(|| Rc::new(Value::Bits(Bits::empty_inverted())));
    static BITS_ZERO: Lazy<Obj> = Lazy::new(|| Rc::new(Value::Bits(Bits::normalize(1, false, vec![0]))));
    static BITS_ONE: Lazy<Obj> = Lazy::new(|| Rc::new(Value::Bits(Bits::normalize(1, false, vec![1]))));
}

/// The interned `Int` value `0` (source: `int_value[0]`).
pub fn int_zero() -> Obj {
    INT_ZERO.with(|v| (**v).clone())
}

/// The interned `Int` value `1` (source: `int_value[1]`).
pub fn int_one() -> Obj {
    INT_ONE.with(|v| (**v).clone())
}

/// The interned `Int` value `-1` (source: `minus1_value`).
pub fn int_minus_one() -> Obj {
    INT_MINUS_ONE.with(|v| (**v).clone())
}

/// The interned canonical empty `Bits`: width 0, not inverted (source:
/// `null_bits`).
pub fn bits_null() -> Obj {
    BITS_NULL.with(|v| (**v).clone())
}

/// The interned canonical empty-inverted `Bits`: width 0, inverted
/// (source: `inv_bits`).
pub fn bits_inv() -> Obj {
    BITS_INV.with(|v| (**v).clone())
}

/// The interned width-1 `Bits` holding bit value `b` (source:
/// `bits_value[0]`/`bits_value[1]`).
pub fn bits_value(b: bool) -> Obj {
    if b {
        BITS_ONE.with(|v| (**v).clone())
    } else {
        BITS_ZERO.with(|v| (**v).clone())
    }
}
