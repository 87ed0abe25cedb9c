use crate::models::{TransactionData, TransactionReceipt};
use anyhow::{Context, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

static TX_HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[xX][0-9a-fA-F]{64}$").expect("valid tx hash regex"));

pub fn validate_tx_hash(hash: &str) -> Result<()> {
    if !TX_HASH_RE.is_match(hash) {
        anyhow::bail!("Invalid transaction hash: {}", hash);
    }
    Ok(())
}

/// Extracts `result` from an explorer proxy response.
///
/// Etherscan reports failures either as a JSON-RPC `error` object or as
/// `{"status":"0","message":"NOTOK","result":"<reason>"}`.
pub fn parse_proxy_response<T: DeserializeOwned>(body: &str, action: &str) -> Result<T> {
    let response: Value = serde_json::from_str(body)
        .with_context(|| format!("Error unmarshalling {action} response"))?;

    if let Some(error) = response.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        anyhow::bail!("{} failed: {}", action, message);
    }

    match response.get("result") {
        None => anyhow::bail!("{} response has no result field", action),
        Some(Value::Null) => anyhow::bail!("{}: transaction not found", action),
        Some(Value::String(reason)) => {
            let message = response
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("error");
            anyhow::bail!("{} failed: {}: {}", action, message, reason)
        }
        Some(result) => T::deserialize(result)
            .with_context(|| format!("Unexpected {action} result shape")),
    }
}

pub struct ExplorerClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    request_timeout: Duration,
}

impl ExplorerClient {
    pub fn new(base_url: &str, api_key: &str, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(ExplorerClient {
            http,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            request_timeout,
        })
    }

    async fn proxy_call<T: DeserializeOwned>(&self, action: &str, tx_hash: &str) -> Result<T> {
        validate_tx_hash(tx_hash)?;

        debug!(
            "GET {}?module=proxy&action={}&txhash={}&apikey=<redacted>",
            self.base_url, action, tx_hash
        );

        let request = self
            .http
            .get(&self.base_url)
            .query(&[
                ("module", "proxy"),
                ("action", action),
                ("txhash", tx_hash),
                ("apikey", self.api_key.as_str()),
            ])
            .send();

        let response = match timeout(self.request_timeout, request).await {
            Ok(response) => response.with_context(|| format!("Error fetching {action}"))?,
            Err(_) => {
                warn!(
                    "Request timeout after {} seconds on {}",
                    self.request_timeout.as_secs(),
                    self.base_url
                );
                anyhow::bail!(
                    "Request timeout after {} seconds",
                    self.request_timeout.as_secs()
                );
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Error reading {action} response body"))?;

        if !status.is_success() {
            anyhow::bail!("{} returned HTTP {}", action, status);
        }

        parse_proxy_response(&body, action)
    }

    pub async fn get_transaction(&self, tx_hash: &str) -> Result<TransactionData> {
        info!("Fetching transaction {}", tx_hash);
        self.proxy_call("eth_getTransactionByHash", tx_hash).await
    }

    pub async fn get_receipt(&self, tx_hash: &str) -> Result<TransactionReceipt> {
        info!("Fetching receipt for {}", tx_hash);
        self.proxy_call("eth_getTransactionReceipt", tx_hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validates_tx_hashes() {
        let hash = format!("0x{}", "ab".repeat(32));
        assert!(validate_tx_hash(&hash).is_ok());
        assert!(validate_tx_hash("0x1234").is_err());
        assert!(validate_tx_hash(&"ab".repeat(32)).is_err());
        assert!(validate_tx_hash(&format!("0x{}", "zz".repeat(32))).is_err());
    }

    #[test]
    fn parses_receipt_result() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "gasUsed": "0x5208", "status": "0x1", "logs": [] }
        })
        .to_string();

        let receipt: TransactionReceipt =
            parse_proxy_response(&body, "eth_getTransactionReceipt").unwrap();
        assert_eq!(receipt.gas_used, "0x5208");
        assert_eq!(receipt.status.as_deref(), Some("0x1"));
    }

    #[test]
    fn reports_missing_transaction() {
        let body = json!({ "jsonrpc": "2.0", "id": 1, "result": null }).to_string();
        let err = parse_proxy_response::<TransactionData>(&body, "eth_getTransactionByHash")
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn reports_explorer_error_string() {
        let body = json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Invalid API Key"
        })
        .to_string();
        let err = parse_proxy_response::<TransactionData>(&body, "eth_getTransactionByHash")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "eth_getTransactionByHash failed: NOTOK: Invalid API Key"
        );
    }

    #[test]
    fn reports_json_rpc_error() {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "invalid argument 0" }
        })
        .to_string();
        let err = parse_proxy_response::<TransactionReceipt>(&body, "eth_getTransactionReceipt")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "eth_getTransactionReceipt failed: invalid argument 0"
        );
    }

    #[test]
    fn rejects_non_json_body() {
        assert!(parse_proxy_response::<TransactionReceipt>("<html>", "eth_getTransactionReceipt")
            .is_err());
    }
}
