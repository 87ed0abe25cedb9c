use crate::error::ConversionError;
use crate::units::strip_hex_prefix;
use alloy::sol;
use alloy::sol_types::SolCall;
use alloy_primitives::{Address, U256, hex};

sol! {
    function transfer(address recipient, uint256 amount) external returns (bool);
}

/// `0xa9059cbb`, the selector of `transfer(address,uint256)`.
pub const TRANSFER_SELECTOR: [u8; 4] = transferCall::SELECTOR;

const SELECTOR_HEX_LEN: usize = 8;
const WORD_HEX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTransfer {
    pub selector: [u8; 4],
    pub recipient: Address,
    pub amount: U256,
}

impl DecodedTransfer {
    pub fn is_transfer_selector(&self) -> bool {
        self.selector == TRANSFER_SELECTOR
    }

    pub fn selector_hex(&self) -> String {
        hex::encode_prefixed(self.selector)
    }
}

/// Decodes `input` as `transfer(address,uint256)` call data by byte layout alone.
///
/// Returns `Ok(None)` when the input holds nothing past the selector. The selector itself is
/// not checked against `transfer`; see [`DecodedTransfer::is_transfer_selector`].
pub fn decode_erc20_transfer(input: &str) -> Result<Option<DecodedTransfer>, ConversionError> {
    let digits =
        strip_hex_prefix(input).ok_or_else(|| ConversionError::MalformedHex(input.to_string()))?;

    if digits.len() <= SELECTOR_HEX_LEN {
        return Ok(None);
    }

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConversionError::MalformedHex(input.to_string()));
    }

    let (selector_hex, params) = digits.split_at(SELECTOR_HEX_LEN);

    if params.len() < 2 * WORD_HEX_LEN {
        return Err(ConversionError::TruncatedCallData { len: params.len() });
    }
    if params.len() % WORD_HEX_LEN != 0 {
        return Err(ConversionError::MisalignedCallData { len: params.len() });
    }

    let mut selector = [0u8; 4];
    hex::decode_to_slice(selector_hex, &mut selector)
        .map_err(|_| ConversionError::MalformedHex(input.to_string()))?;

    let words = hex::decode(&params[..2 * WORD_HEX_LEN])
        .map_err(|_| ConversionError::MalformedHex(input.to_string()))?;

    // Word one is a left-padded address; the padding bytes are not validated.
    let recipient = Address::from_slice(&words[12..32]);
    let amount = U256::from_be_slice(&words[32..64]);

    Ok(Some(DecodedTransfer {
        selector,
        recipient,
        amount,
    }))
}
