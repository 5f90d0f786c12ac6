//! A polymorphic value system for a multi-pass 6502-family assembler.
//!
//! This crate implements the dynamic value layer an assembler's expression
//! evaluator sits on top of: arbitrary-precision [`integer::Int`], explicit-
//! width invertible [`bits::Bits`] vectors, a pluggable [`encoding::Encoding`]
//! for target character sets, a hash-addressed multi-pass [`namespace::Namespace`]
//! of symbols, and the [`object::Value`] sum type tying them together with
//! operator dispatch ([`object::calc1`], [`object::calc2`]), a cycle-aware
//! collector ([`object::gc`]), and interned process-wide constants
//! ([`object::singletons`]).
//!
//! The crate has no opinion on assembly syntax, instruction encoding, or
//! file I/O; [`config::Config`] is the entire embedding surface.

pub mod address;
pub mod bits;
pub mod bytes;
pub mod code_symbol;
pub mod config;
pub mod consts;
pub mod encoding;
pub mod error;
pub mod float;
pub mod integer;
pub mod list;
pub mod namespace;
pub mod object;
pub mod text;

pub use address::Address;
pub use bits::Bits;
pub use bytes::BytesValue;
pub use code_symbol::CodeSymbol;
pub use config::Config;
pub use error::{Diagnostic, ValueError};
pub use integer::Int;
pub use list::ListValue;
pub use namespace::Namespace;
pub use object::{Obj, Operator, TruthMode, TypeTag, Value};
pub use text::StrValue;
