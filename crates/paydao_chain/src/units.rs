//! Ether <-> wei conversion for user-entered amounts.

use crate::error::GatewayError;

/// Decimals of the native currency.
pub const ETHER_DECIMALS: usize = 18;
const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Parse a decimal ether amount such as `"1.5"` into wei.
///
/// Rejects signs, exponents, more than 18 fractional digits and values that
/// overflow `u128`.
pub fn parse_ether(amount: &str) -> Result<u128, GatewayError> {
    let invalid = || GatewayError::InvalidAmount(amount.to_string());
    let text = amount.trim();

    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, f),
        None => (text, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(frac) || frac.len() > ETHER_DECIMALS {
        return Err(invalid());
    }

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .ok()
            .and_then(|w| w.checked_mul(WEI_PER_ETHER))
            .ok_or_else(invalid)?
    };

    let frac_wei = if frac.is_empty() {
        0
    } else {
        let padded = format!("{frac:0<width$}", width = ETHER_DECIMALS);
        padded.parse::<u128>().map_err(|_| invalid())?
    };

    whole_wei.checked_add(frac_wei).ok_or_else(invalid)
}

/// Render wei as a decimal ether string without trailing zeros (`"1.5"`,
/// `"2"`, `"0"`).
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let frac = wei % WEI_PER_ETHER;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_text = format!("{frac:0>width$}", width = ETHER_DECIMALS);
    format!("{whole}.{}", frac_text.trim_end_matches('0'))
}
