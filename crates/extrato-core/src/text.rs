//! Diacritic stripping for accented statement text.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::EncodingError;

/// Target single-byte encoding for [`normalize_diacritics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// ISO-8859-1, the encoding the bank emits. The only supported target.
    Latin1,
    /// Windows-1252. Not implemented.
    Cp1252,
    /// UTF-8. Not a single-byte encoding, never supported.
    Utf8,
}

/// Replace accented characters with their unaccented base letter.
///
/// Decomposes to NFKD, drops every combining mark, then drops any character
/// the target encoding cannot represent. Case is left untouched: `ã` becomes
/// `a`, `È` becomes `E`. Callers that need case folding apply it before or
/// after, independently.
///
/// Only [`Encoding::Latin1`] is implemented; requesting any other encoding
/// is an error with no partial result.
pub fn normalize_diacritics(text: &str, encoding: Encoding) -> Result<String, EncodingError> {
    if encoding != Encoding::Latin1 {
        return Err(EncodingError::Unsupported(encoding));
    }

    Ok(text
        .nfkd()
        .filter(|&c| !is_combining_mark(c))
        .filter(|&c| (c as u32) <= 0xFF)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_accents_keeping_case() {
        assert_eq!(
            normalize_diacritics("áÊïÕùç", Encoding::Latin1).unwrap(),
            "aEiOuc"
        );
    }

    #[test]
    fn idempotent_on_unaccented_text() {
        let plain = "SALDO ATUAL = 1.334,56";
        assert_eq!(normalize_diacritics(plain, Encoding::Latin1).unwrap(), plain);
        let stripped = normalize_diacritics("aplicações", Encoding::Latin1).unwrap();
        assert_eq!(
            normalize_diacritics(&stripped, Encoding::Latin1).unwrap(),
            stripped
        );
    }

    #[test]
    fn drops_characters_outside_latin1() {
        assert_eq!(
            normalize_diacritics("saldo € 10", Encoding::Latin1).unwrap(),
            "saldo  10"
        );
    }

    #[test]
    fn rejects_other_encodings() {
        assert_eq!(
            normalize_diacritics("abc", Encoding::Utf8),
            Err(EncodingError::Unsupported(Encoding::Utf8))
        );
        assert_eq!(
            normalize_diacritics("abc", Encoding::Cp1252),
            Err(EncodingError::Unsupported(Encoding::Cp1252))
        );
    }
}
