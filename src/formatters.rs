use crate::calldata::DecodedTransfer;
use crate::summary::TransactionSummary;
use comfy_table::{Cell, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use csv::Writer;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            _ => OutputFormat::Table,
        }
    }
}

/// One output row: table label, machine-readable key, value.
struct Field {
    label: &'static str,
    key: &'static str,
    value: String,
}

fn field(label: &'static str, key: &'static str, value: impl Into<String>) -> Field {
    Field {
        label,
        key,
        value: value.into(),
    }
}

fn or_na(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "N/A".to_string())
}

fn transfer_fields(transfer: &DecodedTransfer) -> Vec<Field> {
    vec![
        field("Selector", "selector", transfer.selector_hex()),
        field(
            "ERC-20 transfer",
            "is_transfer_selector",
            transfer.is_transfer_selector().to_string(),
        ),
        field(
            "Recipient Address",
            "recipient",
            transfer.recipient.to_checksum(None),
        ),
        field("Amount", "amount", transfer.amount.to_string()),
    ]
}

fn summary_fields(summary: &TransactionSummary) -> Vec<Field> {
    let mut fields = vec![
        field("Hash", "hash", summary.hash.as_str()),
        field("From", "from", summary.from.as_str()),
        field("To", "to", or_na(&summary.to)),
        field("Value (Wei)", "value_wei", summary.value_wei.as_str()),
        field("Value (ETH)", "value_eth", summary.value_eth.as_str()),
        field("Block Hash", "block_hash", or_na(&summary.block_hash)),
        field("Block Number", "block_number", or_na(&summary.block_number)),
        field("Gas", "gas", summary.gas.as_str()),
        field("Gas Price (Wei)", "gas_price_wei", summary.gas_price_wei.as_str()),
        field("Gas Price (Gwei)", "gas_price_gwei", summary.gas_price_gwei.as_str()),
        field("Nonce", "nonce", summary.nonce.as_str()),
        field(
            "Transaction Index",
            "transaction_index",
            or_na(&summary.transaction_index),
        ),
        field("Gas Used", "gas_used", summary.gas_used.as_str()),
        field("Transaction Fee (Wei)", "fee_wei", summary.fee_wei.as_str()),
        field("Transaction Fee (ETH)", "fee_eth", summary.fee_eth.as_str()),
        field("Status", "status", or_na(&summary.status)),
        field("Input Data (Raw)", "input", summary.input.as_str()),
    ];

    if let Some(transfer) = &summary.transfer {
        fields.extend(transfer_fields(transfer));
    }

    fields
}

fn render(fields: &[Field], format: &OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec!["Field", "Value"]);

            for f in fields {
                table.add_row(vec![Cell::new(f.label), Cell::new(&f.value)]);
            }

            table.to_string()
        }
        OutputFormat::Json => {
            let object: Map<String, Value> = fields
                .iter()
                .map(|f| (f.key.to_string(), Value::String(f.value.clone())))
                .collect();
            serde_json::to_string_pretty(&Value::Object(object))
                .unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Csv => {
            let mut wtr = Writer::from_writer(vec![]);
            let _ = wtr.write_record(["field", "value"]);
            for f in fields {
                let _ = wtr.write_record([f.key, f.value.as_str()]);
            }
            String::from_utf8(wtr.into_inner().unwrap_or_default()).unwrap_or_default()
        }
    }
}

pub fn format_summary(summary: &TransactionSummary, format: &OutputFormat) -> String {
    render(&summary_fields(summary), format)
}

pub fn format_decoded_input(transfer: Option<&DecodedTransfer>, format: &OutputFormat) -> String {
    match transfer {
        Some(transfer) => render(&transfer_fields(transfer), format),
        None => match format {
            OutputFormat::Table => "No transfer encoded in input data.".to_string(),
            OutputFormat::Json => json!(null).to_string(),
            OutputFormat::Csv => "field,value\n".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, address};

    fn summary(transfer: Option<DecodedTransfer>) -> TransactionSummary {
        TransactionSummary {
            hash: "0xfeed".to_string(),
            from: "0x1111111111111111111111111111111111111111".to_string(),
            to: None,
            value_wei: "0".to_string(),
            value_eth: "0.000000000000000000".to_string(),
            block_hash: None,
            block_number: Some("16".to_string()),
            gas: "21000".to_string(),
            gas_price_wei: "1500000000".to_string(),
            gas_price_gwei: "1.500000000".to_string(),
            nonce: "2".to_string(),
            transaction_index: Some("0".to_string()),
            gas_used: "21000".to_string(),
            fee_wei: "31500000000000".to_string(),
            fee_eth: "0.000031500000000000".to_string(),
            status: Some("success".to_string()),
            input: "0x".to_string(),
            transfer,
        }
    }

    fn transfer() -> DecodedTransfer {
        DecodedTransfer {
            selector: [0xa9, 0x05, 0x9c, 0xbb],
            recipient: address!("d8da6bf26964af9d7eed9e03e53415d37aa96045"),
            amount: U256::from(1000u64),
        }
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("csv"), OutputFormat::Csv);
        assert_eq!(OutputFormat::from("anything"), OutputFormat::Table);
    }

    #[test]
    fn json_output_has_decimal_fields() {
        let out = format_summary(&summary(Some(transfer())), &OutputFormat::Json);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["gas_price_gwei"], "1.500000000");
        assert_eq!(value["fee_eth"], "0.000031500000000000");
        assert_eq!(value["to"], "N/A");
        assert_eq!(value["block_hash"], "N/A");
        assert_eq!(value["recipient"], "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        assert_eq!(value["amount"], "1000");
        assert_eq!(value["is_transfer_selector"], "true");
    }

    #[test]
    fn json_output_omits_transfer_when_absent() {
        let out = format_summary(&summary(None), &OutputFormat::Json);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert!(value.get("recipient").is_none());
    }

    #[test]
    fn csv_output_is_field_value_pairs() {
        let out = format_summary(&summary(None), &OutputFormat::Csv);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("field,value"));
        assert!(out.contains("gas_price_gwei,1.500000000\n"));
        assert!(out.contains("fee_wei,31500000000000\n"));
    }

    #[test]
    fn table_output_lists_labels() {
        let out = format_summary(&summary(Some(transfer())), &OutputFormat::Table);
        assert!(out.contains("Gas Price (Gwei)"));
        assert!(out.contains("Recipient Address"));
        assert!(out.contains("0.000031500000000000"));
    }

    #[test]
    fn decoded_input_without_transfer() {
        assert_eq!(
            format_decoded_input(None, &OutputFormat::Table),
            "No transfer encoded in input data."
        );
        assert_eq!(format_decoded_input(None, &OutputFormat::Json), "null");
    }
}
