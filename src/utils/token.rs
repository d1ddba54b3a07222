//! Utility functions for converting between human-readable token amounts and
//! base units.
//!
//! Amounts are handled as integers throughout; a decimal string is never
//! routed through floating point.

use crate::models::TransactionError;

/// Largest number of decimals whose scale factor fits in a u64.
const MAX_DECIMALS: u8 = 19;

fn scale_factor(decimals: u8) -> Result<u64, TransactionError> {
    if decimals > MAX_DECIMALS {
        return Err(TransactionError::InvalidAmount(format!(
            "{decimals} decimals exceed the supported maximum of {MAX_DECIMALS}"
        )));
    }
    Ok(10u64.pow(decimals as u32))
}

/// Formats a base-unit amount with the specified number of decimal places.
///
/// # Example
/// ```
/// use sol_sender::utils::format_token_amount;
/// assert_eq!(format_token_amount(1_500_000_000, 9), "1.500000000");
/// ```
pub fn format_token_amount(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let digits = format!("{:0>width$}", amount, width = decimals as usize + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals as usize);
    format!("{whole}.{fraction}")
}

/// Scales a whole-token amount to base units (`amount * 10^decimals`).
///
/// # Errors
///
/// `TransactionError::InvalidAmount` when the result does not fit in a u64.
pub fn scale_amount(amount: u64, decimals: u8) -> Result<u64, TransactionError> {
    amount.checked_mul(scale_factor(decimals)?).ok_or_else(|| {
        TransactionError::InvalidAmount(format!(
            "{amount} with {decimals} decimals overflows 64 bits"
        ))
    })
}

/// Parses a human-readable amount such as `"1.5"` into base units.
///
/// # Errors
///
/// `TransactionError::InvalidAmount` when the input is empty, negative, not a
/// plain decimal number, has more fractional digits than `decimals`, or
/// overflows a u64.
pub fn parse_ui_amount(input: &str, decimals: u8) -> Result<u64, TransactionError> {
    let trimmed = input.trim();
    let invalid = |reason: &str| TransactionError::InvalidAmount(format!("{trimmed:?}: {reason}"));

    if trimmed.is_empty() {
        return Err(invalid("amount is empty"));
    }
    if trimmed.starts_with('-') {
        return Err(invalid("amount is negative"));
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("amount has no digits"));
    }
    let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) {
        return Err(invalid("amount is not a decimal number"));
    }
    if fraction.len() > decimals as usize {
        return Err(invalid(&format!("more than {decimals} fractional digits")));
    }

    // rejects decimals whose scale factor overflows before any padding
    scale_factor(decimals)?;
    let whole_units = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .map_err(|_| invalid("amount overflows 64 bits"))?
    };
    let fraction_units = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<width$}", width = decimals as usize);
        padded
            .parse::<u64>()
            .map_err(|_| invalid("amount overflows 64 bits"))?
    };

    scale_amount(whole_units, decimals)?
        .checked_add(fraction_units)
        .ok_or_else(|| invalid("amount overflows 64 bits"))
}
