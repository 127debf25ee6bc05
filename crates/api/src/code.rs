// Copyright (C) 2026 Meridian Commerce
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Voucher code generation.

use rand::RngExt;

/// Characters used for the random code suffix.
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Prefix used when the caller supplies none, or when sanitizing
/// removes every character of the supplied prefix.
const DEFAULT_PREFIX: &str = "VOUCHER";

/// Maximum length of the sanitized prefix.
const MAX_PREFIX_LEN: usize = 10;

/// Length of the random suffix.
const SUFFIX_LEN: usize = 6;

/// Generates a voucher code of the form `PREFIX-XXXXXX`.
///
/// The prefix is uppercased and stripped of non-alphanumeric
/// characters, then truncated to ten characters; an empty result falls
/// back to `VOUCHER`. The suffix is six random characters from
/// `[A-Z0-9]`.
///
/// Generated codes always satisfy the voucher code format, so they can
/// be handed straight to creation. Collisions with existing codes are
/// not retried here; the creation path reports them as duplicates like
/// any caller-supplied code.
///
/// # Arguments
///
/// * `prefix` - An optional prefix, typically an organization or
///   campaign name
#[must_use]
pub fn generate_voucher_code(prefix: Option<&str>) -> String {
    let sanitized: String = prefix
        .unwrap_or_default()
        .to_uppercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_PREFIX_LEN)
        .collect();

    let prefix: &str = if sanitized.is_empty() {
        DEFAULT_PREFIX
    } else {
        &sanitized
    };

    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
        .collect();

    format!("{prefix}-{suffix}")
}
