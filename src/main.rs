//! sol-sender command line.
//!
//! Reads its configuration from the environment (and `.env`), loads the
//! wallet keypair from `WALLET_KEYPAIR_PATH` and runs one action:
//!
//!   sol-sender balance
//!   sol-sender send-sol --to <ADDRESS> --amount 0.5
//!   sol-sender send-token --mint <MINT> --to <ADDRESS> --amount 3 --decimals 9
//!   sol-sender unpack --mint <MINT> --collector <ADDRESS>

use std::{str::FromStr, sync::Arc};

use clap::{Parser, Subcommand};
use color_eyre::{
    eyre::WrapErr,
    Result,
};
use dotenvy::dotenv;
use solana_sdk::signature::Signature;
use tracing::info;

use sol_sender::{
    config::SenderConfig,
    constants::SOL_DECIMALS,
    domain::{SessionContext, SolanaToken, SplToken, Token2022},
    logging::setup_logging,
    models::{
        TokenLeg, TokenRoute, TransactionError, TransferOutcome, TransferRequest, UnpackRequest,
    },
    services::{HttpCollectorNotifier, LocalSigner, SolanaProvider},
    utils::{format_token_amount, parse_ui_amount},
};

type Session = SessionContext<SolanaProvider, LocalSigner, HttpCollectorNotifier>;

#[derive(Parser)]
#[command(name = "sol-sender")]
#[command(about = "Send SOL and tokens from a local wallet and wait for confirmation")]
struct Cli {
    /// JSON keypair file of the wallet
    #[arg(long, env = "WALLET_KEYPAIR_PATH")]
    keypair: Option<String>,

    /// Use the Token-2022 program instead of the original token program
    #[arg(long)]
    token_2022: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the wallet balance in SOL
    Balance,

    /// Transfer SOL
    SendSol {
        #[arg(long)]
        to: String,
        /// Amount in SOL, e.g. 0.25
        #[arg(long)]
        amount: String,
    },

    /// Transfer a fungible token, creating the recipient's account if needed
    SendToken {
        #[arg(long)]
        mint: String,
        #[arg(long)]
        to: String,
        /// Amount in whole tokens, scaled by --decimals
        #[arg(long)]
        amount: String,
        #[arg(long)]
        decimals: u8,
        /// Route the transfer through this program instead of the token program
        #[arg(long)]
        program: Option<String>,
    },

    /// Hand a token to the collector and report the wallet to the collector service
    Unpack {
        #[arg(long)]
        mint: String,
        #[arg(long)]
        collector: String,
        /// Base units to hand in
        #[arg(long, default_value_t = 1)]
        amount: u64,
        #[arg(long, default_value_t = 0)]
        decimals: u8,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    setup_logging();

    let cli = Cli::parse();
    let config = SenderConfig::from_env();
    info!(network = %config.network, rpc_url = %config.rpc_url, "starting sol-sender");

    let provider = SolanaProvider::new(&config.rpc_url, config.rpc_timeout_seconds)
        .wrap_err("Failed to create Solana provider")?;
    let wallet = cli
        .keypair
        .as_deref()
        .map(LocalSigner::from_file)
        .transpose()
        .wrap_err("Failed to load wallet keypair")?;
    let notifier = HttpCollectorNotifier::new(config.collector_url.clone())
        .wrap_err("Failed to create collector notifier")?;

    let token: Arc<dyn SolanaToken> = if cli.token_2022 {
        Arc::new(Token2022)
    } else {
        Arc::new(SplToken)
    };
    let session = SessionContext::new(
        &config,
        Arc::new(provider),
        wallet.map(Arc::new),
        Arc::new(notifier),
    )
    .with_token_program(token);

    match cli.command {
        Command::Balance => {
            let lamports = session.balance().await?;
            println!("{} SOL", format_token_amount(lamports, SOL_DECIMALS));
            Ok(())
        }
        Command::SendSol { to, amount } => {
            let lamports = parse_ui_amount(&amount, SOL_DECIMALS)?;
            let result = session.transfer(&TransferRequest::native(to, lamports)).await;
            report(&session, result)
        }
        Command::SendToken {
            mint,
            to,
            amount,
            decimals,
            program,
        } => {
            let leg = TokenLeg {
                mint,
                recipient: to,
                amount: parse_ui_amount(&amount, decimals)?,
                decimals,
                route: program.map(TokenRoute::Program).unwrap_or_default(),
            };
            let result = session.transfer(&TransferRequest::token(leg)).await;
            report(&session, result)
        }
        Command::Unpack {
            mint,
            collector,
            amount,
            decimals,
        } => {
            let request = UnpackRequest {
                mint,
                collector,
                amount,
                decimals,
            };
            let result = session.unpack(&request).await;
            report(&session, result)
        }
    }
}

fn report(session: &Session, result: Result<TransferOutcome, TransactionError>) -> Result<()> {
    let error = match result {
        Ok(outcome) => {
            println!("{}: {}", outcome.status, outcome.explorer_link);
            for account in &outcome.created_accounts {
                println!("created token account {account}");
            }
            return Ok(());
        }
        Err(error) => error,
    };

    if let Some(signature) = error.signature() {
        let link = Signature::from_str(signature)
            .map(|sig| session.explorer_link(&sig))
            .unwrap_or_else(|_| signature.to_string());
        if error.is_ambiguous() {
            println!("unconfirmed, check the explorer: {link}");
        } else {
            println!("failed: {link}");
        }
    }
    Err(error.into())
}
