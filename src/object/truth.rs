//! Truthiness modes (spec §4.1): default ("non-zero"), `ANY`, `ALL`.

use super::Value;

/// Selects how a value's truthiness is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruthMode {
    /// "Is non-zero" under the value's numeric coercion.
    Default,
    /// Any bit set within the explicit width.
    Any,
    /// All bits set within the explicit width.
    All,
}

pub(super) fn truth(value: &Value, mode: TruthMode) -> bool {
    match mode {
        TruthMode::Default => match value {
            Value::Int(i) => !i.is_zero(),
            Value::Bits(b) => b.width() > 0 && (0..b.width()).any(|i| b.bit(i)),
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
            Value::Bytes(b) => !b.is_empty(),
            Value::Str(s) => !s.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::None | Value::Error(_) => false,
            Value::Address(a) => a.offset != 0,
            Value::CodeSymbol(_) => true,
        },
        TruthMode::Any => match value {
            Value::Bits(b) => (0..b.width()).any(|i| b.bit(i)),
            other => truth(other, TruthMode::Default),
        },
        TruthMode::All => match value {
            Value::Bits(b) => b.width() > 0 && (0..b.width()).all(|i| b.bit(i)),
            other => truth(other, TruthMode::Default),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::bits_from_hexstr;
    use crate::integer::Int;

    #[test]
    fn default_mode_is_nonzero() {
        assert!(!truth(&Value::Int(Int::zero()), TruthMode::Default));
        assert!(truth(&Value::Int(Int::from_i64(1)), TruthMode::Default));
    }

    #[test]
    fn any_and_all_over_explicit_width() {
        let (b, _, _) = bits_from_hexstr(b"f0").unwrap();
        assert!(truth(&Value::Bits(b.clone()), TruthMode::Any));
        assert!(!truth(&Value::Bits(b), TruthMode::All));

        let (full, _, _) = bits_from_hexstr(b"ff").unwrap();
        assert!(truth(&Value::Bits(full), TruthMode::All));
    }
}
