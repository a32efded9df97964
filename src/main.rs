use anyhow::Context;
use clap::{Parser, Subcommand};
use exchange_core::*;
use serde::Serialize;
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "exchange-cli")]
#[command(about = "Exchange Core CLI - fixed-point asset amounts and ledger wallets")]
#[command(version)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a natural amount and show its parts
    Natural {
        /// Decimal amount, e.g. 14.0003
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Asset symbol
        #[arg(short, long)]
        symbol: String,
    },

    /// Add two amounts of the same asset and precision
    Add {
        #[arg(long, allow_hyphen_values = true)]
        left: String,

        #[arg(long, allow_hyphen_values = true)]
        right: String,

        #[arg(short, long)]
        symbol: String,
    },

    /// Subtract the right amount from the left one
    Sub {
        #[arg(long, allow_hyphen_values = true)]
        left: String,

        #[arg(long, allow_hyphen_values = true)]
        right: String,

        #[arg(short, long)]
        symbol: String,
    },

    /// Multiply an amount by an integer
    Mul {
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Integer multiplier
        #[arg(long, allow_negative_numbers = true)]
        by: i64,

        #[arg(short, long)]
        symbol: String,
    },

    /// Generate a new wallet from a fresh mnemonic
    GenerateWallet,

    /// Derive a wallet from an existing mnemonic
    RestoreWallet {
        /// BIP39 mnemonic phrase
        #[arg(short, long)]
        mnemonic: String,
    },

    /// Show the ledger provider configuration and the status it yields
    Config {
        #[arg(long, env = "MINTER_NODE_URL")]
        node_url: Option<String>,

        #[arg(long, env = "MINTER_CHAIN_ID")]
        chain_id: Option<String>,
    },
}

#[derive(Serialize)]
struct AssetReport {
    significand: String,
    precision: u32,
    symbol: String,
    natural: String,
}

impl From<&Asset> for AssetReport {
    fn from(asset: &Asset) -> Self {
        Self {
            significand: asset.significand().to_string(),
            precision: asset.precision(),
            symbol: asset.symbol().to_string(),
            natural: asset.natural(),
        }
    }
}

#[derive(Serialize)]
struct WalletReport<'a> {
    address: &'a str,
    public_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mnemonic: Option<&'a str>,
}

#[derive(Serialize)]
struct ConfigReport<'a> {
    config: &'a ProviderConfig,
    status: ProviderStatus,
    status_message: &'static str,
}

fn main() {
    // Before logging and argument parsing: RUST_LOG and MINTER_* may come from .env.
    load_env_file(None);
    init_logging();
    let cli = Cli::parse();
    let json = cli.json;

    let result = match cli.command {
        Commands::Natural { amount, symbol } => handle_natural(&amount, &symbol, json),
        Commands::Add { left, right, symbol } => {
            handle_binary(&left, &right, &symbol, json, Asset::checked_add)
        }
        Commands::Sub { left, right, symbol } => {
            handle_binary(&left, &right, &symbol, json, Asset::checked_sub)
        }
        Commands::Mul { amount, by, symbol } => handle_mul(&amount, by, &symbol, json),
        Commands::GenerateWallet => handle_generate_wallet(json),
        Commands::RestoreWallet { mnemonic } => handle_restore_wallet(&mnemonic, json),
        Commands::Config { node_url, chain_id } => {
            handle_config(ProviderConfig::new(node_url, chain_id), json)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries results. `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

fn print_asset(asset: &Asset, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&AssetReport::from(asset))?);
    } else {
        println!("Natural: {}", asset.natural());
        println!("Significand: {}", asset.significand());
        println!("Precision: {}", asset.precision());
        println!("Symbol: {}", asset.symbol());
    }

    Ok(())
}

fn handle_natural(amount: &str, symbol: &str, json: bool) -> anyhow::Result<()> {
    let asset = Asset::from_natural(amount, symbol)
        .with_context(|| format!("cannot parse amount \"{}\"", amount))?;
    print_asset(&asset, json)
}

fn handle_binary(
    left: &str,
    right: &str,
    symbol: &str,
    json: bool,
    op: fn(&Asset, &Asset) -> std::result::Result<Asset, AssetError>,
) -> anyhow::Result<()> {
    let left = Asset::from_natural(left, symbol).context("invalid left operand")?;
    let right = Asset::from_natural(right, symbol).context("invalid right operand")?;
    let result = op(&left, &right)?;
    print_asset(&result, json)
}

fn handle_mul(amount: &str, by: i64, symbol: &str, json: bool) -> anyhow::Result<()> {
    let asset = Asset::from_natural(amount, symbol)
        .with_context(|| format!("cannot parse amount \"{}\"", amount))?;
    print_asset(&asset.checked_mul(by)?, json)
}

fn print_wallet(wallet: &Wallet, with_secrets: bool, json: bool) -> anyhow::Result<()> {
    let report = WalletReport {
        address: wallet.addr(),
        public_key: wallet.pub_key(),
        private_key: with_secrets.then(|| wallet.priv_key()),
        mnemonic: with_secrets.then(|| wallet.mnemonic()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Address: {}", report.address);
        println!("Public Key: {}", report.public_key);
        if let Some(private_key) = report.private_key {
            println!("Private Key: {}", private_key);
        }
        if let Some(mnemonic) = report.mnemonic {
            println!("Mnemonic: {}", mnemonic);
        }
    }

    Ok(())
}

fn handle_generate_wallet(json: bool) -> anyhow::Result<()> {
    let wallet = generate_wallet()?;
    print_wallet(&wallet, true, json)
}

fn handle_restore_wallet(mnemonic: &str, json: bool) -> anyhow::Result<()> {
    let wallet = derive_wallet(mnemonic)?;
    print_wallet(&wallet, false, json)
}

fn handle_config(config: ProviderConfig, json: bool) -> anyhow::Result<()> {
    let provider = Provider::new(&config, StaticLedger::new());
    let status = provider.status();

    if json {
        let report = ConfigReport {
            config: &config,
            status,
            status_message: status.message(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Node URL: {}", config.node_url.as_deref().unwrap_or("<unset>"));
        println!("Chain ID: {}", config.chain_id.as_deref().unwrap_or("<unset>"));
        println!("Base Coin: {}", provider.base_coin());
        println!("Status: {}", status);
    }

    Ok(())
}
