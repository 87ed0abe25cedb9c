use crate::error::ConversionError;
use alloy_primitives::U256;

pub const GWEI_DECIMALS: usize = 9;
pub const ETH_DECIMALS: usize = 18;

/// Strips a `0x`/`0X` prefix, returning the digits that follow.
pub(crate) fn strip_hex_prefix(hex: &str) -> Option<&str> {
    hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X"))
}

/// Parses a `0x`-prefixed hex numeral into an exact 256-bit integer.
pub fn hex_to_decimal(hex: &str) -> Result<U256, ConversionError> {
    let digits =
        strip_hex_prefix(hex).ok_or_else(|| ConversionError::MalformedHex(hex.to_string()))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConversionError::MalformedHex(hex.to_string()));
    }

    // Digits are already validated, so the only way parsing fails is a value wider than 256 bits.
    U256::from_str_radix(digits, 16)
        .map_err(|_| ConversionError::ArithmeticOverflow("hex numeral exceeds 256 bits"))
}

/// Renders `amount / 10^decimals` as a fixed-point string with exactly `precision` fractional
/// digits. Digits past `precision` are truncated, never rounded.
pub fn scale(amount: U256, decimals: usize, precision: usize) -> String {
    let (integer, remainder) = match U256::from(10u64).checked_pow(U256::from(decimals)) {
        Some(divisor) => (amount / divisor, amount % divisor),
        // 10^decimals is wider than any U256, so the whole amount is fractional.
        None => (U256::ZERO, amount),
    };

    if precision == 0 {
        return integer.to_string();
    }

    let mut fraction = if decimals == 0 {
        String::new()
    } else {
        format!("{:0>width$}", remainder.to_string(), width = decimals)
    };
    if precision < decimals {
        fraction.truncate(precision);
    } else {
        fraction.extend(std::iter::repeat_n('0', precision - decimals));
    }

    format!("{integer}.{fraction}")
}

pub fn wei_to_gwei(wei: U256) -> String {
    scale(wei, GWEI_DECIMALS, GWEI_DECIMALS)
}

pub fn wei_to_eth(wei: U256) -> String {
    scale(wei, ETH_DECIMALS, ETH_DECIMALS)
}

/// Transaction fee in wei: `gas_used * gas_price_wei`.
pub fn compute_fee(gas_used: U256, gas_price_wei: U256) -> Result<U256, ConversionError> {
    gas_used
        .checked_mul(gas_price_wei)
        .ok_or(ConversionError::ArithmeticOverflow("gas used * gas price exceeds 256 bits"))
}
