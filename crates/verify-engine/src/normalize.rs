//! Canonicalization of raw DL/RC numbers from OCR or manual entry

use checkpoint_types::DocumentKind;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Fixed 15-character DL shape: 2 letters, 2 digits, 11 digits.
    static ref DL_SHAPE: Regex = Regex::new(r"^[A-Z]{2}[0-9]{2}[0-9]{11}$").unwrap();
}

/// Strip all whitespace and hyphens and uppercase the rest. This is the
/// cleaning applied to every identifier, manual or OCR-derived.
pub fn canonicalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Normalize a raw document number into its canonical identifier.
///
/// DL numbers additionally get the common OCR confusions corrected
/// (I/L read as 1, O/Q read as 0, over the whole string) and must match
/// the 15-character DL shape afterwards; a mismatch yields `None` rather
/// than an error. RC numbers are only cleaned, the RC recognition service
/// is trusted to return an already-validated value.
pub fn normalize(raw: &str, kind: DocumentKind) -> Option<String> {
    let cleaned = canonicalize(raw);
    if cleaned.is_empty() {
        return None;
    }
    match kind {
        DocumentKind::Rc => Some(cleaned),
        DocumentKind::Dl => {
            let corrected = correct_dl_confusions(&cleaned);
            DL_SHAPE.is_match(&corrected).then_some(corrected)
        }
    }
}

fn correct_dl_confusions(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'I' | 'L' => '1',
            'O' | 'Q' => '0',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonicalize_strips_whitespace_and_hyphens() {
        assert_eq!(canonicalize(" mh-12 ab 1234 "), "MH12AB1234");
        assert_eq!(canonicalize("ka\t01\nxy-9999"), "KA01XY9999");
    }

    #[test]
    fn dl_confusions_are_corrected_before_validation() {
        // OCR read "O" for zero and "I" for one inside the digit runs.
        assert_eq!(
            normalize("MH-I2 O000000000I", DocumentKind::Dl).as_deref(),
            Some("MH1200000000001")
        );
        // L and Q variants of the same confusions.
        assert_eq!(
            normalize("KA L4 Q123456789Q", DocumentKind::Dl).as_deref(),
            Some("KA1401234567890")
        );
    }

    #[test]
    fn dl_shape_mismatch_returns_none() {
        assert_eq!(normalize("MH12", DocumentKind::Dl), None);
        // 15 chars but letters in the digit positions.
        assert_eq!(normalize("MH12AB345678901", DocumentKind::Dl), None);
        assert_eq!(normalize("", DocumentKind::Dl), None);
    }

    #[test]
    fn valid_dl_passes_unchanged() {
        assert_eq!(
            normalize("mh12 1234567 8901", DocumentKind::Dl).as_deref(),
            Some("MH1212345678901")
        );
    }

    #[test]
    fn rc_is_cleaned_but_not_shape_checked() {
        assert_eq!(
            normalize(" as-01 by 1051", DocumentKind::Rc).as_deref(),
            Some("AS01BY1051")
        );
        // Even an odd-shaped value passes through for RC.
        assert_eq!(normalize("x", DocumentKind::Rc).as_deref(), Some("X"));
        assert_eq!(normalize("  ", DocumentKind::Rc), None);
    }
}
