use thiserror::Error;

/// Failures of the pure conversion and decoding functions.
///
/// `TruncatedCallData` and `MisalignedCallData` mean "no transfer could be decoded" and are
/// safe to recover from. The other two make the record they came from unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("malformed hex numeral: {0:?}")]
    MalformedHex(String),

    #[error("call data too short: {len} hex chars after selector, need at least 128")]
    TruncatedCallData { len: usize },

    #[error("call data is not a whole number of 32-byte words: {len} hex chars after selector")]
    MisalignedCallData { len: usize },

    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),
}

impl ConversionError {
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ConversionError::TruncatedCallData { .. } | ConversionError::MisalignedCallData { .. }
        )
    }
}
