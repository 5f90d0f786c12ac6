//! Built-in encodings always available to the host assembler (spec §4.4
//! "Initialization"): `none` (identity, or PETSCII in ASCII mode) and
//! `screen` (PETSCII screen codes).

use super::{EscapeTarget, Encoding};

const PI: u32 = '\u{3c0}' as u32;

fn load_identity(enc: &mut Encoding) {
    enc.add_range(0, 255, 0);
}

fn load_petscii_escapes(enc: &mut Encoding) {
    enc.add_escape(b"{cr}", EscapeTarget::Byte(0x0d));
    enc.add_escape(b"{clr}", EscapeTarget::Byte(0x93));
    enc.add_escape(b"{clear}", EscapeTarget::Byte(0x93));
    enc.add_escape(b"{cbm-a}", EscapeTarget::Byte(0xb0));
}

fn load_petscii_none(enc: &mut Encoding) {
    // Unshifted PETSCII: letters land at 0xc1.. instead of ASCII's 0x41..,
    // digits and punctuation are unchanged. `add_range`'s offset is added
    // to `c - start`, so a range starting at `start` with offset `k` maps
    // its first code point to `k`.
    enc.add_range(0x00, 0x40, 0);
    enc.add_range(0x41, 0x5a, 0xc1); // 'A'..'Z' -> 0xc1..0xda
    enc.add_range(0x5b, 0x60, 0);
    enc.add_range(0x61, 0x7a, 0x41); // 'a'..'z' -> 0x41..0x5a
    enc.add_range(0x7b, 0xff, 0);
    enc.add_range(PI, PI, 0xff);
    load_petscii_escapes(enc);
}

fn load_petscii_screen(enc: &mut Encoding) {
    // Screen codes: '@'..'_' map to 0x00..0x1f, 'a'..'z' to 0x01..0x1a,
    // digits/punctuation below '@' are unchanged, everything else passes
    // through.
    enc.add_range(0x20, 0x3f, 0x20);
    enc.add_range(0x40, 0x5f, 0x00);
    enc.add_range(0x61, 0x7a, 0x01);
    enc.add_range(PI, PI, 0x5e);
    load_petscii_escapes(enc);
}

/// Builds the `none` encoding: PETSCII translation when `to_ascii` is set,
/// identity passthrough otherwise (spec §4.4 "Initialization": "when the
/// host assembler is in 'ASCII' mode, PETSCII translation tables … are
/// loaded; otherwise identity tables are loaded").
pub fn none_encoding(to_ascii: bool) -> Encoding {
    let mut enc = Encoding::new("none");
    if to_ascii {
        load_petscii_none(&mut enc);
    } else {
        load_identity(&mut enc);
    }
    enc
}

/// Builds the `screen` encoding (PETSCII screen codes) when `to_ascii` is
/// set, identity otherwise.
pub fn screen_encoding(to_ascii: bool) -> Encoding {
    let mut enc = Encoding::new("screen");
    if to_ascii {
        load_petscii_screen(&mut enc);
    } else {
        load_identity(&mut enc);
    }
    enc
}
