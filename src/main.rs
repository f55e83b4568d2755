use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::{Result, WrapErr};
use passport_gate::telemetry::init_tracing;
use passport_gate::{
    LocalWalletProvider, MissingWallet, PassportConfig, ScoreView, WalletConfig, WalletProvider,
};
use tracing::{info, warn};

/// Connect a wallet, check its Gitcoin Passport score and reveal the secret
/// message when the score clears the threshold.
#[derive(Debug, Parser)]
#[command(name = "passport-gate", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the view as it looks after mounting
    Status,
    /// Ask the wallet for account access and load the score
    Connect,
    /// Sign the scorer's challenge and resubmit the passport
    Submit,
    /// Fetch the score again
    Check {
        /// Address to check instead of the connected one. Needs a connected wallet.
        #[arg(long)]
        address: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = PassportConfig::from_env()?;
    let wallet = build_wallet(&WalletConfig::from_env())?;

    info!(scorer_id = %config.scorer_id, "Starting passport gate");

    let mut view = ScoreView::new(config, wallet)?;
    view.mount().await;

    match cli.command.unwrap_or(Command::Status) {
        Command::Status => {}
        Command::Connect => view.connect().await,
        Command::Submit => view.submit_passport().await,
        Command::Check { address: None } => view.check_passport(None).await,
        Command::Check {
            address: Some(address),
        } => view
            .check_address(&address)
            .await
            .wrap_err("checking another address needs a connected wallet")?,
    }

    println!("{}", view.render());
    Ok(())
}

fn build_wallet(config: &WalletConfig) -> Result<Box<dyn WalletProvider>> {
    match LocalWalletProvider::from_config(config)? {
        Some(provider) => Ok(Box::new(provider)),
        None => {
            warn!("WALLET_PRIVATE_KEY not set, running without a wallet");
            Ok(Box::new(MissingWallet))
        }
    }
}
