pub mod calldata;
pub mod config;
pub mod error;
pub mod explorer;
pub mod formatters;
pub mod models;
pub mod summary;
pub mod units;

pub use calldata::{DecodedTransfer, decode_erc20_transfer};
pub use error::ConversionError;
pub use summary::{TransactionSummary, summarize};
pub use units::{compute_fee, hex_to_decimal, scale};
