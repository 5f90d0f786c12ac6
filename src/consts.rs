//! Shared numeric constants for the value system.

/// Bit width of a single limb of an [`crate::integer::Int`] or
/// [`crate::bits::Bits`].
pub const LIMB_BITS: u32 = 32;

/// Number of limbs that live inline in the header before a value spills to a
/// heap-allocated limb buffer.
pub const INLINE_LIMBS: usize = 2;

/// `log10(2)`, used to size decimal conversion buffers without overallocating.
pub const LOG10_2: f64 = 0.301_029_995_663_981_2;

/// `log10(2) / LIMB_BITS`, the number of decimal digits one limb can hold on
/// average; used to preallocate limb counts when parsing decimal strings.
pub const LOG10_2_OVER_32: f64 = LOG10_2 / LIMB_BITS as f64;

/// Number of decimal digits consumed per chunk in [`crate::integer::parse`].
pub const DECIMAL_CHUNK_DIGITS: u32 = 9;

/// `10^DECIMAL_CHUNK_DIGITS`, the per-chunk multiplier used by the decimal
/// parser and by `repr`.
pub const DECIMAL_CHUNK_BASE: u64 = 1_000_000_000;

/// Default initial capacity of a freshly created [`crate::namespace::Namespace`].
///
/// Must be a power of two (or zero).
pub const NAMESPACE_INITIAL_CAPACITY: usize = 8;

/// Maximum load factor before a [`crate::namespace::Namespace`] rebuilds into
/// a table of double the capacity.
pub const NAMESPACE_MAX_LOAD_FACTOR: f64 = 0.75;

/// Number of ASCII code points covered by the encoder's fast-path cache.
pub const ENCODING_ASCII_CACHE_SIZE: usize = 128;

/// Error byte sentinel base: values `>= ENCODING_ERROR_SENTINEL` returned from
/// `encode_string` denote an untranslatable code point, carrying `'?'` as the
/// fallback payload in the low byte.
pub const ENCODING_ERROR_SENTINEL: u32 = 256;
