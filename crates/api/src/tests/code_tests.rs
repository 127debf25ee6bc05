// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for voucher code generation.

use voucher_domain::validate_voucher_code;

use crate::code::generate_voucher_code;

#[test]
fn test_generated_code_uses_default_prefix() {
    let code = generate_voucher_code(None);
    assert!(code.starts_with("VOUCHER-"));
    assert_eq!(code.len(), "VOUCHER-".len() + 6);
}

#[test]
fn test_prefix_is_uppercased_and_sanitized() {
    let code = generate_voucher_code(Some("summer sale!"));
    assert!(code.starts_with("SUMMERSALE-"));
}

#[test]
fn test_prefix_is_truncated_to_ten_characters() {
    let code = generate_voucher_code(Some("EXTRAORDINARILY"));
    assert!(code.starts_with("EXTRAORDIN-"));
    assert_eq!(code.len(), 10 + 1 + 6);
}

#[test]
fn test_empty_prefix_falls_back_to_default() {
    let code = generate_voucher_code(Some("!!!"));
    assert!(code.starts_with("VOUCHER-"));
}

#[test]
fn test_generated_codes_satisfy_code_format() {
    for prefix in [None, Some("summer"), Some("a"), Some("  spaced  ")] {
        let code = generate_voucher_code(prefix);
        assert_eq!(validate_voucher_code(&code).unwrap(), code);
    }
}

#[test]
fn test_suffix_draws_from_uppercase_alphanumerics() {
    let code = generate_voucher_code(None);
    let suffix = code.rsplit('-').next().unwrap();
    assert_eq!(suffix.len(), 6);
    assert!(
        suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    );
}
