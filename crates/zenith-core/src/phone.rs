// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Phone number canonicalization for the messaging provider.
//!
//! The Cloud API wants bare international digits with no `+`, spaces, or
//! leading zeros. Numbers in the client table arrive in whatever shape an
//! operator typed them.

/// Canonicalize a raw phone string into best-effort E.164 digits.
///
/// Rules, in order:
/// 1. every non-digit character is stripped;
/// 2. a 10-digit number starting with `0` is a Moroccan local subscriber
///    number: the leading `0` becomes country code `212`;
/// 3. a 13-digit number starting with `2120` has a stray zero after the
///    country code, which is dropped;
/// 4. anything else passes through unchanged.
///
/// Never fails; empty input yields an empty string. Callers must tolerate
/// provider-side rejection of numbers this function cannot repair.
pub fn normalize(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 10 && digits.starts_with('0') {
        return format!("212{}", &digits[1..]);
    }

    if digits.len() == 13 && digits.starts_with("2120") {
        return format!("212{}", &digits[4..]);
    }

    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_moroccan_number_gains_country_code() {
        assert_eq!(normalize("0612345678"), "212612345678");
        assert_eq!(normalize("0712-34-56-78"), "212712345678");
    }

    #[test]
    fn international_digits_pass_through() {
        assert_eq!(normalize("212600000001"), "212600000001");
        assert_eq!(normalize("+212 600 000 001"), "212600000001");
        assert_eq!(normalize("661234567"), "661234567");
    }

    #[test]
    fn stray_zero_after_country_code_is_dropped() {
        assert_eq!(normalize("2120612345678"), "212612345678");
    }

    #[test]
    fn non_digits_are_stripped() {
        assert_eq!(normalize("(06) 12.34.56.78"), "212612345678");
        assert_eq!(normalize("wa.me/212612345678"), "212612345678");
    }

    #[test]
    fn empty_and_garbage_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("no digits here"), "");
    }

    #[test]
    fn ten_digit_rule_yields_twelve_digits() {
        for n in ["0600000000", "0799999999", "0655443322"] {
            let out = normalize(n);
            assert_eq!(out.len(), 12);
            assert!(out.starts_with("212"));
        }
    }
}
