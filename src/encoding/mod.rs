//! Pluggable character encoding (spec §3 "Encoding", §4.4).
//!
//! Translates source UTF-8 text into a target byte stream for one named
//! encoding, via a range table (bulk translation) plus a ternary-tree
//! escape matcher (named multi-character sequences), with a small ASCII
//! memoization cache in front of both.

pub mod builtin;
mod escapes;
mod ranges;

use tracing::debug;

use crate::consts::{ENCODING_ASCII_CACHE_SIZE, ENCODING_ERROR_SENTINEL};
use crate::error::ValueError;

pub use escapes::EscapeTarget;
use escapes::EscapeTree;
use ranges::RangeTable;

/// A sentinel "error byte" emitted for an untranslatable code point
/// (spec §4.4 rule 5): outside the 0..=255 byte range, recognized by
/// callers as a failure marker.
pub const ERROR_BYTE: u32 = ENCODING_ERROR_SENTINEL as u32;

/// A named character-translation context.
pub struct Encoding {
    display_name: String,
    canonical_name: String,
    ranges: RangeTable,
    escapes: EscapeTree,
    table: [u32; ENCODING_ASCII_CACHE_SIZE],
    table_use: u128,
    failed: std::cell::Cell<bool>,
}

impl std::fmt::Debug for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoding").field("name", &self.display_name).finish()
    }
}

impl Encoding {
    /// Creates a new, empty named encoding.
    pub fn new(name: &str) -> Self {
        Self {
            display_name: name.to_string(),
            canonical_name: name.to_ascii_lowercase(),
            ranges: RangeTable::new(),
            escapes: EscapeTree::new(),
            table: [0; ENCODING_ASCII_CACHE_SIZE],
            table_use: 0,
            failed: std::cell::Cell::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.display_name
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// `true` if neither ranges nor escapes have been registered.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty() && self.escapes.is_empty()
    }

    fn cache_bit(c: u32) -> Option<u32> {
        (c < ENCODING_ASCII_CACHE_SIZE as u32).then_some(c)
    }

    fn cache_get(&self, c: u32) -> Option<u32> {
        let bit = Self::cache_bit(c)?;
        ((self.table_use >> bit) & 1 == 1).then(|| self.table[bit as usize])
    }

    fn cache_set(&mut self, c: u32, value: u32) {
        if let Some(bit) = Self::cache_bit(c) {
            self.table[bit as usize] = value;
            self.table_use |= 1 << bit;
        }
    }

    /// Clears cache entries that a newly registered range/escape could
    /// shadow (Open Question b: no silent stale cache).
    fn invalidate_cache_for_ascii_range(&mut self, start: u32, end: u32) {
        let lo = start.min(ENCODING_ASCII_CACHE_SIZE as u32);
        let hi = (end + 1).min(ENCODING_ASCII_CACHE_SIZE as u32);
        if lo >= hi {
            return;
        }
        let mask: u128 = ((1u128 << (hi - lo)) - 1) << lo;
        if self.table_use & mask != 0 {
            debug!(encoding = %self.display_name, lo, hi, "cache invalidated by new mapping");
        }
        self.table_use &= !mask;
    }

    /// Registers a source range `[start..end]` translating with `offset`.
    pub fn add_range(&mut self, start: u32, end: u32, offset: i32) {
        self.invalidate_cache_for_ascii_range(start, end);
        self.ranges.insert(start, end, offset);
    }

    /// Registers an escape sequence `key -> target`.
    pub fn add_escape(&mut self, key: &[u8], target: EscapeTarget) {
        if key.len() == 1 {
            self.invalidate_cache_for_ascii_range(key[0] as u32, key[0] as u32);
        }
        self.escapes.insert(key, target);
    }

    /// Translates `source` into a target byte stream (spec §4.4 state
    /// machine). Untranslatable code points are reported once per call via
    /// `on_unknown` and the error-sentinel byte is emitted in their place.
    pub fn encode_string(&mut self, source: &str, mut on_unknown: impl FnMut(char)) -> Vec<u32> {
        let mut out = Vec::with_capacity(source.len());
        let bytes = source.as_bytes();
        let mut byte_pos = 0usize;
        let mut reported = false;

        while byte_pos < bytes.len() {
            let remaining = &bytes[byte_pos..];

            if !self.escapes.is_empty() && remaining.len() >= self.escapes.min_len() {
                if let Some((matched_len, target)) = self.escapes.longest_match(remaining) {
                    for &b in target.bytes() {
                        out.push(b as u32);
                    }
                    byte_pos += matched_len;
                    continue;
                }
            }

            let ch = source[byte_pos..].chars().next().unwrap();
            let code = ch as u32;
            let ch_len = ch.len_utf8();

            if let Some(cached) = self.cache_get(code) {
                out.push(cached);
                byte_pos += ch_len;
                continue;
            }

            match self.ranges.lookup(code) {
                Some(translated) if (0..=255).contains(&translated) => {
                    let byte = translated as u32;
                    self.cache_set(code, byte);
                    out.push(byte);
                }
                _ => {
                    out.push(ERROR_BYTE);
                    if !reported {
                        on_unknown(ch);
                        reported = true;
                        self.failed.set(true);
                        debug!(encoding = %self.display_name, codepoint = ?ch, "unknown character");
                    }
                }
            }
            byte_pos += ch_len;
        }

        out
    }

    /// `true` if a prior call to [`Encoding::encode_string`] reported an
    /// untranslatable code point.
    pub fn failed(&self) -> bool {
        self.failed.get()
    }
}

/// Builds the `none` and `screen` encodings every host assembler starts
/// with, per `config.to_ascii` (spec §4.4 "Initialization").
pub fn init_builtin_encodings(config: &crate::config::Config) -> (Encoding, Encoding) {
    (builtin::none_encoding(config.to_ascii), builtin::screen_encoding(config.to_ascii))
}

/// Convenience wrapper returning an error if the encoding has no mappings
/// at all, and surfacing the first unknown character as a `ValueError`.
pub fn encode_strict(enc: &mut Encoding, source: &str) -> Result<Vec<u8>, ValueError> {
    if enc.is_empty() {
        return Err(ValueError::EmptyEncoding(enc.name().to_string()));
    }
    let mut first_unknown = None;
    let out = enc.encode_string(source, |c| first_unknown = first_unknown.or(Some(c)));
    if let Some(c) = first_unknown {
        return Err(ValueError::UnknownChar { codepoint: c, encoding: enc.name().to_string() });
    }
    Ok(out.into_iter().map(|b| b as u8).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_encoding_is_empty() {
        let enc = Encoding::new("test");
        assert!(enc.is_empty());
    }

    #[test]
    fn ascii_identity_range_round_trips() {
        let mut enc = Encoding::new("identity");
        enc.add_range(0, 255, 0);
        let out = enc.encode_string("AB", |_| panic!("no unknown expected"));
        assert_eq!(out, vec![b'A' as u32, b'B' as u32]);
    }

    #[test]
    fn ascii_cache_populated_after_first_lookup() {
        let mut enc = Encoding::new("identity");
        enc.add_range(0, 255, 0);
        let _ = enc.encode_string("A", |_| {});
        assert_eq!(enc.cache_get('A' as u32), Some('A' as u32));
    }

    #[test]
    fn unknown_char_reported_once_per_call() {
        let mut enc = Encoding::new("ascii-only");
        enc.add_range(0, 127, 0);
        let mut reports = 0;
        let out = enc.encode_string("π π", |_| reports += 1);
        assert_eq!(reports, 1);
        assert_eq!(out[0], ERROR_BYTE);
    }

    #[test]
    fn escape_takes_priority_over_range() {
        let mut enc = Encoding::new("petscii-ish");
        enc.add_range(0, 255, 0);
        enc.add_escape(b"{cr}", EscapeTarget::Byte(0x0d));
        let out = enc.encode_string("{cr}", |_| panic!("no unknown expected"));
        assert_eq!(out, vec![0x0d]);
    }

    #[test]
    fn encoding_empty_errors_via_encode_strict() {
        let mut enc = Encoding::new("empty");
        assert_eq!(
            encode_strict(&mut enc, "x"),
            Err(ValueError::EmptyEncoding("empty".to_string()))
        );
    }
}
