//! Configuration surface for embedding the value system into an assembler.
//!
//! The core itself has no file or environment parsing (out of scope); the
//! embedding assembler populates a [`Config`] and passes it to whichever
//! constructors need it.

/// Tunables the embedding assembler may set before driving a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// When `true`, [`crate::encoding::init_builtin_encodings`] loads PETSCII
    /// translation tables and the brace-escape table; when `false`, it loads
    /// identity tables only.
    pub to_ascii: bool,

    /// Initial bucket count of a freshly created namespace. Must be a power
    /// of two.
    pub namespace_initial_capacity: usize,

    /// Maximum assembly pass number; exceeding it without reaching a fixed
    /// point is reported via [`crate::error::ValueError::PassLimitExceeded`].
    pub max_pass: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            to_ascii: true,
            namespace_initial_capacity: crate::consts::NAMESPACE_INITIAL_CAPACITY,
            max_pass: 20,
        }
    }
}
