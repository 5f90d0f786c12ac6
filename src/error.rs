//! Error taxonomy for the value system.
//!
//! Errors are ordinary values in the host assembler: they are constructed
//! here, returned from fallible operations, and the evaluator decides
//! whether to propagate or downgrade them to a diagnostic plus a `None`.
//! Only [`ValueError::OutOfMemory`] is meant to be treated as fatal by
//! callers; everything else is recoverable (see spec §7).

use std::fmt;

use thiserror::Error;

use crate::object::{Operator, TypeTag};

/// A recoverable or fatal error produced by a value operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// An `Int` could not be narrowed to a signed value of the requested bit
    /// width.
    #[error("cannot convert to a signed {bits}-bit value")]
    CantIval {
        /// The bit width that was requested.
        bits: u32,
    },

    /// An `Int` could not be narrowed to an unsigned value of the requested
    /// bit width.
    #[error("cannot convert to an unsigned {bits}-bit value")]
    CantUval {
        /// The bit width that was requested.
        bits: u32,
    },

    /// A `Bits` value does not fit in the requested unsigned width.
    #[error("value does not fit in {bits} bits")]
    NotUval {
        /// The bit width that was requested.
        bits: u32,
    },

    /// Division or remainder by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A string-to-number conversion overflowed the implementation's
    /// supported magnitude.
    #[error("string too big to convert")]
    BigStringCo,

    /// An operation required a non-empty string and got an empty one.
    #[error("empty string")]
    EmptyString,

    /// An operation required exactly one character and got a different
    /// count.
    #[error("expected exactly one character")]
    NotOneChar,

    /// No operator implementation handles this pair of operand types.
    #[error("invalid operator {op:?} for {left:?} and {right:?}")]
    InvalidOperator {
        /// The operator that was attempted.
        op: Operator,
        /// The left operand's type.
        left: TypeTag,
        /// The right operand's type.
        right: TypeTag,
    },

    /// A type conversion was requested that this value kind does not
    /// support.
    #[error("conversion from {from:?} to {to:?} is not available")]
    ConversionNotAvailable {
        /// Source type.
        from: TypeTag,
        /// Requested target type.
        to: TypeTag,
    },

    /// An identifier could not be resolved in a namespace that has already
    /// reached its fixed point.
    #[error("'{name}' is not defined")]
    NotDefined {
        /// The identifier that failed to resolve.
        name: String,
        /// Whether the lookup was a backward (`true`) or forward (`false`)
        /// anonymous-label search; `None` for ordinary named lookups.
        backward: Option<bool>,
    },

    /// A code point had no translation in the active encoding.
    #[error("unknown character {codepoint:?} in encoding '{encoding}'")]
    UnknownChar {
        /// The untranslatable source character.
        codepoint: char,
        /// Display name of the encoding that rejected it.
        encoding: String,
    },

    /// An encoding has no mappings at all (neither ranges nor escapes).
    #[error("encoding '{0}' is empty")]
    EmptyEncoding(String),

    /// Assembly did not converge within the maximum pass count.
    #[error("pass {pass} exceeds the maximum of {max_pass}; assembly did not converge")]
    PassLimitExceeded {
        /// The pass number that exceeded the limit.
        pass: u32,
        /// The configured maximum pass count.
        max_pass: u32,
    },

    /// Allocation failure. Fatal; see module docs.
    #[error("out of memory")]
    OutOfMemory,
}

impl ValueError {
    /// Returns `true` for the one error kind the spec treats as fatal.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::OutOfMemory)
    }
}

/// A non-fatal diagnostic emitted alongside (not instead of) normal
/// evaluation. These never abort a pass; they are surfaced on a side channel
/// (see spec §7 and §10.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A non-boolean value was tested for truth in strict-boolean mode.
    StrictBool {
        /// The type that was tested.
        ty: TypeTag,
    },
    /// Two distinct identifiers folded to the same canonical name.
    CaseFoldCollision {
        /// The identifier as written.
        name: String,
        /// The identifier it collides with after folding.
        other: String,
    },
    /// A shift operation used a deprecated negative-amount reversal.
    DeprecatedShift,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrictBool { ty } => write!(f, "expected a boolean, found {ty:?}"),
            Self::CaseFoldCollision { name, other } => {
                write!(f, "'{name}' and '{other}' fold to the same name")
            }
            Self::DeprecatedShift => write!(f, "shift by a negative amount is deprecated"),
        }
    }
}
