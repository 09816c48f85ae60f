//! Exact decimal-string arithmetic
//!
//! Amounts cross the wire as decimal strings in human units and must be
//! converted to integer smallest-unit strings without floating point. All
//! math here runs on `BigInt` mantissa/scale pairs, so inputs with up to 18
//! fractional digits scale exactly.

use num_bigint::BigInt;
use thiserror::Error;

/// Rounding applied when a conversion discards fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Truncate toward zero
    Down,
    /// Round away from zero
    Up,
}

/// Errors from decimal parsing and arithmetic
#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Empty amount string")]
    Empty,

    #[error("Invalid decimal amount: {0:?}")]
    InvalidNumber(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// Parse a decimal string into (mantissa, fractional digit count).
///
/// Accepts an optional leading `-`, digits, and at most one `.`.
fn parse_parts(amount: &str) -> Result<(BigInt, u32), AmountError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::InvalidNumber(amount.to_string()));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(AmountError::InvalidNumber(amount.to_string()));
    }

    let joined = format!("{}{}", int_part, frac_part);
    let mantissa = BigInt::parse_bytes(joined.as_bytes(), 10)
        .ok_or_else(|| AmountError::InvalidNumber(amount.to_string()))?;

    let mantissa = if negative { -mantissa } else { mantissa };
    Ok((mantissa, frac_part.len() as u32))
}

fn pow10(exp: u32) -> BigInt {
    let mut n = BigInt::from(1);
    for _ in 0..exp {
        n *= 10;
    }
    n
}

/// Render a scaled integer back into a decimal string, trimming trailing
/// fractional zeros the way the quote layer expects ("3.300000" -> "3.3").
fn format_scaled(units: &BigInt, scale: u32) -> String {
    let zero = BigInt::from(0);
    let negative = units < &zero;
    let abs = if negative { -units.clone() } else { units.clone() };
    let digits = abs.to_string();
    let scale = scale as usize;

    let (int_part, frac_part) = if digits.len() > scale {
        let split = digits.len() - scale;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = scale))
    };

    let frac = frac_part.trim_end_matches('0');
    let mut out = if frac.is_empty() {
        int_part
    } else {
        format!("{}.{}", int_part, frac)
    };
    if negative && out != "0" {
        out = format!("-{}", out);
    }
    out
}

/// Convert a human-unit decimal string into an integer smallest-unit string
/// by multiplying with `10^decimals`.
///
/// Digits beyond `decimals` are discarded per `rounding`; everything else is
/// exact.
pub fn to_base_units(amount: &str, decimals: u32, rounding: Rounding) -> Result<String, AmountError> {
    let (mantissa, scale) = parse_parts(amount)?;

    let units = if decimals >= scale {
        mantissa * pow10(decimals - scale)
    } else {
        let divisor = pow10(scale - decimals);
        let quotient = &mantissa / &divisor;
        let remainder = &mantissa % &divisor;
        if remainder == BigInt::from(0) {
            quotient
        } else {
            match rounding {
                Rounding::Down => quotient,
                Rounding::Up => {
                    if mantissa < BigInt::from(0) {
                        quotient - 1
                    } else {
                        quotient + 1
                    }
                }
            }
        }
    };

    Ok(units.to_string())
}

/// Divide two decimal strings, rounding toward zero at `scale` fractional
/// digits. Trailing zeros are trimmed from the result.
pub fn div_floor(numerator: &str, denominator: &str, scale: u32) -> Result<String, AmountError> {
    let (num_mantissa, num_scale) = parse_parts(numerator)?;
    let (den_mantissa, den_scale) = parse_parts(denominator)?;

    if den_mantissa == BigInt::from(0) {
        return Err(AmountError::DivisionByZero);
    }

    let scaled = num_mantissa * pow10(den_scale + scale);
    let divisor = den_mantissa * pow10(num_scale);
    let quotient = scaled / divisor;

    Ok(format_scaled(&quotient, scale))
}

/// Multiply a decimal string by a small integer factor, exactly.
pub fn mul_small(amount: &str, factor: u32) -> Result<String, AmountError> {
    let (mantissa, scale) = parse_parts(amount)?;
    Ok(format_scaled(&(mantissa * factor), scale))
}

/// Re-render a decimal string in normalized form (no leading/trailing
/// zero padding, no dangling point).
pub fn normalize(amount: &str) -> Result<String, AmountError> {
    let (mantissa, scale) = parse_parts(amount)?;
    Ok(format_scaled(&mantissa, scale))
}

/// Whether the string parses as a strictly positive decimal.
pub fn is_positive(amount: &str) -> bool {
    match parse_parts(amount) {
        Ok((mantissa, _)) => mantissa > BigInt::from(0),
        Err(_) => false,
    }
}
