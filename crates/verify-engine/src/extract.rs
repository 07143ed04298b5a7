//! Candidate identifier extraction from raw OCR engine output

use checkpoint_types::DocumentKind;
use lazy_static::lazy_static;
use regex::Regex;

use crate::normalize::normalize;

lazy_static! {
    /// Loose DL match over noisy OCR text; separators tolerated between the
    /// state code, RTO code, and serial.
    static ref DL_CANDIDATE: Regex =
        Regex::new(r"(?i)[A-Z]{2}[-\s]?[0-9]{2}[-\s]?[0-9]{11}").unwrap();

    /// Plate-sized alphanumeric runs pulled out of cleaned OCR text.
    static ref RC_CANDIDATE: Regex = Regex::new(r"[A-Z0-9]{9,11}").unwrap();

    /// Plate structure: state code, RTO code, series, vehicle number.
    static ref RC_STRUCTURE: Regex =
        Regex::new(r"^([A-Z]{2})([0-9]{2})([A-Z0-9]{1,3})([0-9]{4})$").unwrap();
}

/// OCR misreads corrected when reconstructing an RC number. These are only
/// tried as a second pass, so plates whose legitimate letters appear in this
/// table (an "S" state code, say) still validate uncorrected.
const RC_CONFUSIONS: &[(char, char)] = &[
    ('O', '0'),
    ('Q', '0'),
    ('D', '0'),
    ('U', '0'),
    ('C', '0'),
    ('I', '1'),
    ('L', '1'),
    ('J', '1'),
    ('T', '1'),
    ('Z', '2'),
    ('V', '4'),
    ('S', '5'),
    ('G', '6'),
    ('R', '8'),
    ('B', '8'),
];

/// Find a DL number in raw OCR text. The first loose match is cleaned,
/// confusion-corrected, and shape-validated; anything short of a full
/// 15-character DL yields `None`.
pub fn extract_dl_candidate(ocr_text: &str) -> Option<String> {
    let candidate = DL_CANDIDATE.find(ocr_text)?;
    normalize(candidate.as_str(), DocumentKind::Dl)
}

/// Reconstruct the best RC number from one or more raw OCR readings.
///
/// Each reading is cleaned to bare alphanumerics, scanned for plate-sized
/// candidates both as-is and with OCR confusions corrected, and every
/// candidate matching the plate structure is collected. The shortest valid
/// reconstruction wins (less OCR noise), ties broken lexically.
pub fn extract_rc_candidate<S: AsRef<str>>(readings: &[S]) -> Option<String> {
    let mut raw_valid: Vec<String> = Vec::new();
    let mut corrected_valid: Vec<String> = Vec::new();

    for reading in readings {
        let cleaned: String = reading
            .as_ref()
            .to_uppercase()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();

        collect_structured(&cleaned, &mut raw_valid);
        collect_structured(&correct_rc_confusions(&cleaned), &mut corrected_valid);
    }

    // A reading that validates without correction is trusted over one that
    // only validates after rewriting characters.
    for mut candidates in [raw_valid, corrected_valid] {
        candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        if let Some(best) = candidates.into_iter().next() {
            return Some(best);
        }
    }
    None
}

fn collect_structured(cleaned: &str, out: &mut Vec<String>) {
    for candidate in RC_CANDIDATE.find_iter(cleaned) {
        if let Some(caps) = RC_STRUCTURE.captures(candidate.as_str()) {
            out.push(format!("{}{}{}{}", &caps[1], &caps[2], &caps[3], &caps[4]));
        }
    }
}

fn correct_rc_confusions(s: &str) -> String {
    s.chars()
        .map(|c| {
            RC_CONFUSIONS
                .iter()
                .find(|(wrong, _)| *wrong == c)
                .map(|(_, right)| *right)
                .unwrap_or(c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dl_found_in_noisy_text() {
        let text = "GOVT OF INDIA\nDL No: mh-12 12345678901 valid till 2030";
        assert_eq!(
            extract_dl_candidate(text).as_deref(),
            Some("MH1212345678901")
        );
    }

    #[test]
    fn dl_separator_variants_are_tolerated() {
        assert_eq!(
            extract_dl_candidate("DL: MH-12-12345678901").as_deref(),
            Some("MH1212345678901")
        );
        assert_eq!(
            extract_dl_candidate("MH1212345678901 extra").as_deref(),
            Some("MH1212345678901")
        );
    }

    #[test]
    fn dl_absent_or_truncated_yields_none() {
        assert_eq!(extract_dl_candidate("no numbers here"), None);
        assert_eq!(extract_dl_candidate("MH12 12345"), None);
    }

    #[test]
    fn rc_reconstructed_from_spaced_reading() {
        let readings = ["AS 01BY 1051"];
        assert_eq!(extract_rc_candidate(&readings).as_deref(), Some("AS01BY1051"));
    }

    #[test]
    fn rc_confusions_corrected_when_raw_fails() {
        // "I" misread in the series position only validates after correction.
        let readings = ["KA01XYI234".to_string()];
        assert_eq!(extract_rc_candidate(&readings).as_deref(), Some("KA01XY1234"));
    }

    #[test]
    fn rc_prefers_shortest_valid_candidate() {
        let readings = ["AP40D6150", "AP40DD61500"];
        assert_eq!(extract_rc_candidate(&readings).as_deref(), Some("AP40D6150"));
    }

    #[test]
    fn rc_garbage_yields_none() {
        let readings = ["@@@@", "12", ""];
        assert_eq!(extract_rc_candidate(&readings), None);
        assert_eq!(extract_rc_candidate::<&str>(&[]), None);
    }
}
