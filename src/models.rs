use serde::Deserialize;

/// Transaction object as returned by `eth_getTransactionByHash`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub block_hash: Option<String>,
    pub block_number: Option<String>,
    pub from: String,
    pub gas: String,
    pub gas_price: String,
    pub hash: String,
    pub nonce: String,
    pub to: Option<String>,
    pub transaction_index: Option<String>,
    pub value: String,
    #[serde(default)]
    pub input: String,
}

/// The part of `eth_getTransactionReceipt` used for fee computation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub gas_used: String,
    pub status: Option<String>,
}
