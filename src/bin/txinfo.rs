use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tx_inspector::config::Config;
use tx_inspector::explorer::ExplorerClient;
use tx_inspector::formatters::{OutputFormat, format_decoded_input, format_summary};
use tx_inspector::summary::{decode_transfer_lenient, summarize};

const DEFAULT_TX_HASH: &str = "0x783e170e1dda8c8a7b2a88026b5a68686f80ffccff6f5d029ef9f70166a4c27c";

#[derive(Parser)]
#[command(name = "txinfo")]
#[command(about = "Inspect an Ethereum transaction and decode ERC20 transfer input", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a transaction and its receipt from the block explorer
    Show {
        #[arg(default_value = DEFAULT_TX_HASH)]
        tx_hash: String,

        #[arg(long)]
        api_url: Option<String>,
    },
    /// Decode raw transfer call data without network access
    Decode { input: String },
}

async fn show(tx_hash: &str, api_url: Option<String>, format: &OutputFormat) -> Result<()> {
    let config = Config::from_env()?;
    let base_url = api_url.unwrap_or(config.explorer_api_url);
    info!("Using explorer API at {}", base_url);

    let client = ExplorerClient::new(&base_url, &config.api_key, config.request_timeout)?;

    let tx = client.get_transaction(tx_hash).await?;
    let receipt = client.get_receipt(tx_hash).await?;

    let summary = summarize(&tx, &receipt)
        .with_context(|| format!("Transaction {tx_hash} has unusable fields"))?;
    info!("Transaction fee: {} ETH", summary.fee_eth);

    println!("{}", format_summary(&summary, format));
    Ok(())
}

fn decode(input: &str, format: &OutputFormat) -> Result<()> {
    let transfer = decode_transfer_lenient(input).context("Failed to decode input data")?;
    println!("{}", format_decoded_input(transfer.as_ref(), format));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from(cli.format.as_str());

    let result = match cli.command {
        Commands::Show { tx_hash, api_url } => show(&tx_hash, api_url, &format).await,
        Commands::Decode { input } => decode(&input, &format),
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }

    result
}
