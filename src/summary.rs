use crate::calldata::{DecodedTransfer, decode_erc20_transfer};
use crate::error::ConversionError;
use crate::models::{TransactionData, TransactionReceipt};
use crate::units::{compute_fee, hex_to_decimal, wei_to_eth, wei_to_gwei};
use tracing::warn;

/// Decimal rendering of one transaction and its receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSummary {
    pub hash: String,
    pub from: String,
    pub to: Option<String>,
    pub value_wei: String,
    pub value_eth: String,
    pub block_hash: Option<String>,
    pub block_number: Option<String>,
    pub gas: String,
    pub gas_price_wei: String,
    pub gas_price_gwei: String,
    pub nonce: String,
    pub transaction_index: Option<String>,
    pub gas_used: String,
    pub fee_wei: String,
    pub fee_eth: String,
    pub status: Option<String>,
    pub input: String,
    pub transfer: Option<DecodedTransfer>,
}

fn decimal(hex: &str) -> Result<String, ConversionError> {
    Ok(hex_to_decimal(hex)?.to_string())
}

fn optional_decimal(hex: Option<&str>) -> Result<Option<String>, ConversionError> {
    hex.map(decimal).transpose()
}

/// Recoverable decode failures are logged and reported as "no transfer".
/// A record without input data carries no call.
pub fn decode_transfer_lenient(input: &str) -> Result<Option<DecodedTransfer>, ConversionError> {
    if input.is_empty() {
        return Ok(None);
    }

    match decode_erc20_transfer(input) {
        Ok(decoded) => Ok(decoded),
        Err(e) if e.is_recoverable() => {
            warn!("No transfer decoded from input data: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub fn summarize(
    tx: &TransactionData,
    receipt: &TransactionReceipt,
) -> Result<TransactionSummary, ConversionError> {
    let value = hex_to_decimal(&tx.value)?;
    let gas_price = hex_to_decimal(&tx.gas_price)?;
    let gas_used = hex_to_decimal(&receipt.gas_used)?;
    let fee = compute_fee(gas_used, gas_price)?;

    let status = match receipt.status.as_deref() {
        Some("0x1") => Some("success".to_string()),
        Some("0x0") => Some("failed".to_string()),
        Some(other) => Some(other.to_string()),
        None => None,
    };

    Ok(TransactionSummary {
        hash: tx.hash.clone(),
        from: tx.from.clone(),
        to: tx.to.clone(),
        value_wei: value.to_string(),
        value_eth: wei_to_eth(value),
        block_hash: tx.block_hash.clone(),
        block_number: optional_decimal(tx.block_number.as_deref())?,
        gas: decimal(&tx.gas)?,
        gas_price_wei: gas_price.to_string(),
        gas_price_gwei: wei_to_gwei(gas_price),
        nonce: decimal(&tx.nonce)?,
        transaction_index: optional_decimal(tx.transaction_index.as_deref())?,
        gas_used: gas_used.to_string(),
        fee_wei: fee.to_string(),
        fee_eth: wei_to_eth(fee),
        status,
        input: tx.input.clone(),
        transfer: decode_transfer_lenient(&tx.input)?,
    })
}
