//! Property-based tests for checkpoint-api
//!
//! Tests the API models and identifier handling using proptest.

use proptest::prelude::*;

use checkpoint_api::models::{PageParams, Paginated, VerifyRequest};
use checkpoint_types::DocumentKind;
use verify_engine::{canonicalize, normalize};

/// Shape-valid DL numbers: two letters, two digits, eleven digits. The
/// letters avoid I/L/O/Q, which the normalizer rewrites as digits.
fn valid_dl_number() -> impl Strategy<Value = String> {
    "[A-HJKMNPR-Z]{2}[0-9]{2}[0-9]{11}"
}

/// Raw operator entry: a valid DL obscured by separators and case.
fn noisy_dl_entry() -> impl Strategy<Value = (String, String)> {
    (valid_dl_number(), prop_oneof![Just(' '), Just('-')]).prop_map(|(dl, sep)| {
        let noisy = format!(
            "{}{}{}{}{}",
            &dl[..2].to_lowercase(),
            sep,
            &dl[2..4],
            sep,
            &dl[4..]
        );
        (dl, noisy)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Identifier Handling
    // ============================================================

    #[test]
    fn noisy_manual_dl_entry_canonicalizes_to_its_clean_form((dl, noisy) in noisy_dl_entry()) {
        prop_assert_eq!(canonicalize(&noisy), dl);
    }

    #[test]
    fn shape_valid_dl_numbers_survive_normalization(dl in valid_dl_number()) {
        let normalized = normalize(&dl, DocumentKind::Dl);
        prop_assert_eq!(normalized.as_deref(), Some(dl.as_str()));
    }

    #[test]
    fn normalized_dl_is_always_15_uppercase_alphanumerics(raw in ".{0,40}") {
        if let Some(dl) = normalize(&raw, DocumentKind::Dl) {
            prop_assert_eq!(dl.len(), 15);
            prop_assert!(dl.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn rc_normalization_never_invents_separators(raw in "[a-zA-Z0-9 -]{1,20}") {
        if let Some(rc) = normalize(&raw, DocumentKind::Rc) {
            prop_assert!(!rc.contains(' '));
            prop_assert!(!rc.contains('-'));
            prop_assert!(rc.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    // ============================================================
    // Verification Request Validation
    // ============================================================

    #[test]
    fn any_single_document_field_satisfies_the_input_check(
        field in prop_oneof![
            Just("dl_image_base64"),
            Just("rc_image_base64"),
            Just("dl_number"),
            Just("rc_number"),
        ],
        value in "[A-Za-z0-9]{1,30}"
    ) {
        let body = serde_json::json!({ field: value });
        let req: VerifyRequest = serde_json::from_value(body).unwrap();
        prop_assert!(req.has_document_input());
    }

    #[test]
    fn whitespace_only_fields_never_satisfy_the_input_check(blank in "[ \t]{0,10}") {
        let body = serde_json::json!({
            "dl_number": blank,
            "rc_number": blank,
            "location": "NH-44",
            "tollgate": "TG-01",
        });
        let req: VerifyRequest = serde_json::from_value(body).unwrap();
        prop_assert!(!req.has_document_input());
    }

    // ============================================================
    // Pagination Math
    // ============================================================

    #[test]
    fn offset_never_goes_negative(page in -10i64..1000, limit in 1i64..200) {
        let params: PageParams =
            serde_json::from_value(serde_json::json!({ "page": page, "limit": limit })).unwrap();
        prop_assert!(params.offset() >= 0);
    }

    #[test]
    fn page_count_covers_every_row(total in 0i64..10_000, limit in 1i64..200) {
        let params: PageParams =
            serde_json::from_value(serde_json::json!({ "page": 1, "limit": limit })).unwrap();
        let listing = Paginated::new(Vec::<()>::new(), total, params);
        prop_assert!(listing.pages * limit >= total);
        prop_assert!((listing.pages - 1) * limit < total || total == 0);
    }
}
