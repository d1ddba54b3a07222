//! Session context and the end-to-end transfer pipeline.
//!
//! A [`SessionContext`] owns the network handle, the connected wallet, the
//! collector notifier and the busy flag. Every transfer attempt runs
//! resolve → build → assemble → sign → submit → confirm while holding the flag,
//! so at most one attempt per session is in flight.

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Signature};
use tracing::{debug, error, info, warn};

use super::{
    assemble, build_native_transfer, build_program_token_transfer, build_token_transfer,
    sign_and_submit, AccountResolver, ConfirmationPoller, SolanaToken, SplToken,
};
use crate::{
    config::SenderConfig,
    models::{
        encode_address, parse_address, ConfirmationStatus, SolanaNetwork, TokenLeg, TokenRoute,
        TransactionError, TransferOutcome, TransferRequest, UnpackRequest,
    },
    services::{CollectorNotifier, NotificationError, SolanaProviderTrait, SolanaSignTrait},
    utils::explorer_transaction_link,
};

/// Holds the busy flag for the lifetime of one attempt.
///
/// The flag is cleared on drop, so every exit path (success, error or a
/// dropped future) releases it.
#[derive(Debug)]
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, TransactionError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| TransactionError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

fn log_attempt_failure(error: &TransactionError) {
    if error.is_validation() {
        debug!(error = %error, "request rejected before any network call");
    } else if error.is_ambiguous() {
        warn!(error = %error, "transfer outcome unknown");
    } else {
        warn!(error = %error, "transfer attempt failed");
    }
}

/// Token leg with every address already parsed.
struct ParsedTokenLeg {
    mint: Pubkey,
    recipient: Pubkey,
    amount: u64,
    decimals: u8,
    program: Option<Pubkey>,
}

pub struct SessionContext<P, S, N>
where
    P: SolanaProviderTrait,
    S: SolanaSignTrait,
    N: CollectorNotifier,
{
    provider: Arc<P>,
    wallet: Option<Arc<S>>,
    notifier: Arc<N>,
    token: Arc<dyn SolanaToken>,
    poller: ConfirmationPoller,
    network: SolanaNetwork,
    explorer_base_url: String,
    busy: AtomicBool,
}

impl<P, S, N> SessionContext<P, S, N>
where
    P: SolanaProviderTrait,
    S: SolanaSignTrait,
    N: CollectorNotifier,
{
    /// Creates a session using the original SPL token program.
    pub fn new(
        config: &SenderConfig,
        provider: Arc<P>,
        wallet: Option<Arc<S>>,
        notifier: Arc<N>,
    ) -> Self {
        Self {
            provider,
            wallet,
            notifier,
            token: Arc::new(SplToken),
            poller: ConfirmationPoller::from_config(config),
            network: config.network,
            explorer_base_url: config.explorer_base_url.clone(),
            busy: AtomicBool::new(false),
        }
    }

    /// Replaces the token program policy used for account derivation and transfers.
    pub fn with_token_program(mut self, token: Arc<dyn SolanaToken>) -> Self {
        self.token = token;
        self
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn network(&self) -> SolanaNetwork {
        self.network
    }

    pub fn explorer_link(&self, signature: &Signature) -> String {
        explorer_transaction_link(&self.explorer_base_url, signature, self.network)
    }

    /// Lamport balance of the connected wallet.
    ///
    /// Runs independently of any transfer in flight.
    pub async fn balance(&self) -> Result<u64, TransactionError> {
        let wallet = self
            .wallet
            .as_deref()
            .ok_or(TransactionError::WalletNotConnected)?;
        let address = wallet.pubkey().await?;

        self.provider
            .get_balance(&address)
            .await
            .map_err(|e| TransactionError::AccountLookupFailed(format!("{address}: {e}")))
    }

    /// Executes `request` as one atomic transaction and waits for it to settle.
    ///
    /// # Errors
    ///
    /// * `TransactionError::Busy` when another attempt holds the session.
    /// * Validation errors before any network call.
    /// * `TransactionError::ConfirmationFailed` when the transaction executed
    ///   and failed, `TransactionError::ConfirmationTimedOut` when its outcome
    ///   is unknown at the deadline.
    pub async fn transfer(
        &self,
        request: &TransferRequest,
    ) -> Result<TransferOutcome, TransactionError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        self.execute(request).await.inspect_err(log_attempt_failure)
    }

    /// Hands `request.amount` units of `request.mint` to the collector and,
    /// once the transfer settles, reports the wallet address to the collector
    /// service.
    ///
    /// A failed notification is logged and does not fail the call; the
    /// transfer has already settled.
    pub async fn unpack(
        &self,
        request: &UnpackRequest,
    ) -> Result<TransferOutcome, TransactionError> {
        let outcome = {
            let _guard = BusyGuard::acquire(&self.busy)?;
            let transfer = TransferRequest::token(TokenLeg {
                mint: request.mint.clone(),
                recipient: request.collector.clone(),
                amount: request.amount,
                decimals: request.decimals,
                route: TokenRoute::TokenProgram,
            });
            self.execute(&transfer)
                .await
                .inspect_err(log_attempt_failure)?
        };

        let wallet = self
            .wallet
            .as_deref()
            .ok_or(TransactionError::WalletNotConnected)?;
        let address = encode_address(&wallet.pubkey().await?);

        match self.notifier.notify(&address).await {
            Ok(()) => info!(address = %address, "collector notified"),
            Err(NotificationError::NotConfigured) => {
                warn!(
                    address = %address,
                    "collector endpoint not configured, skipping notification"
                )
            }
            Err(e) => {
                let error = TransactionError::SideEffectNotifyFailed(e.to_string());
                error!(
                    address = %address,
                    signature = %outcome.signature,
                    error = %error,
                    "collector notification failed after settled transfer"
                );
            }
        }

        Ok(outcome)
    }

    async fn execute(
        &self,
        request: &TransferRequest,
    ) -> Result<TransferOutcome, TransactionError> {
        if request.is_empty() {
            return Err(TransactionError::EmptyTransaction);
        }

        let mut native_legs = Vec::with_capacity(request.native.len());
        for leg in &request.native {
            if leg.lamports == 0 {
                return Err(TransactionError::InvalidAmount(
                    "native transfer of 0 lamports".to_string(),
                ));
            }
            native_legs.push((parse_address(&leg.recipient)?, leg.lamports));
        }

        let mut token_legs = Vec::with_capacity(request.tokens.len());
        for leg in &request.tokens {
            if leg.amount == 0 {
                return Err(TransactionError::InvalidAmount(format!(
                    "token transfer of 0 units of {}",
                    leg.mint
                )));
            }
            let program = match &leg.route {
                TokenRoute::TokenProgram => None,
                TokenRoute::Program(program_id) => Some(parse_address(program_id)?),
            };
            token_legs.push(ParsedTokenLeg {
                mint: parse_address(&leg.mint)?,
                recipient: parse_address(&leg.recipient)?,
                amount: leg.amount,
                decimals: leg.decimals,
                program,
            });
        }

        let wallet = self
            .wallet
            .as_deref()
            .ok_or(TransactionError::WalletNotConnected)?;
        let payer = wallet.pubkey().await?;

        let (instructions, created_accounts) =
            self.build_instructions(&payer, &native_legs, &token_legs).await?;

        let blockhash = self
            .provider
            .get_latest_blockhash()
            .await
            .map_err(|e| TransactionError::BlockhashUnavailable(e.to_string()))?;

        let transaction = assemble(&instructions, &payer, blockhash)?;
        info!(
            fee_payer = %payer,
            instructions = instructions.len(),
            created_accounts = created_accounts.len(),
            "transaction assembled"
        );

        let signature = sign_and_submit(self.provider.as_ref(), wallet, transaction).await?;
        let explorer_link = self.explorer_link(&signature);
        info!(signature = %signature, explorer = %explorer_link, "awaiting confirmation");

        let status = self.poller.confirm(self.provider.as_ref(), &signature).await;
        match status {
            ConfirmationStatus::Confirmed | ConfirmationStatus::Finalized => Ok(TransferOutcome {
                signature,
                status,
                explorer_link,
                created_accounts,
            }),
            ConfirmationStatus::Failed => Err(TransactionError::ConfirmationFailed {
                signature: signature.to_string(),
            }),
            _ => Err(TransactionError::ConfirmationTimedOut {
                signature: signature.to_string(),
            }),
        }
    }

    /// Native legs first, in request order. Each token leg then contributes
    /// creation instructions for its missing accounts followed by its transfer.
    async fn build_instructions(
        &self,
        payer: &Pubkey,
        native_legs: &[(Pubkey, u64)],
        token_legs: &[ParsedTokenLeg],
    ) -> Result<(Vec<Instruction>, Vec<Pubkey>), TransactionError> {
        let mut instructions: Vec<Instruction> = native_legs
            .iter()
            .map(|(recipient, lamports)| build_native_transfer(payer, recipient, *lamports))
            .collect();
        let mut created_accounts = Vec::new();

        // Accounts known to exist or already scheduled for creation in this call.
        let mut known: HashSet<Pubkey> = HashSet::new();
        let resolver = AccountResolver::new(self.provider.as_ref(), self.token.as_ref());

        for leg in token_legs {
            let mut addresses = [Pubkey::default(); 2];
            for (slot, owner) in [payer, &leg.recipient].into_iter().enumerate() {
                let derived = resolver.derive(owner, &leg.mint);
                if known.contains(&derived) {
                    debug!(address = %derived, "account already resolved in this transaction");
                    addresses[slot] = derived;
                    continue;
                }

                let resolved = resolver.resolve(payer, owner, &leg.mint).await?;
                if let Some(creation) = resolved.creation_instruction {
                    instructions.push(creation);
                    created_accounts.push(resolved.account.address);
                }
                known.insert(resolved.account.address);
                addresses[slot] = resolved.account.address;
            }
            let [source, destination] = addresses;

            let transfer = match leg.program {
                None => build_token_transfer(
                    self.token.as_ref(),
                    &source,
                    &leg.mint,
                    &destination,
                    payer,
                    leg.amount,
                    leg.decimals,
                )?,
                Some(program_id) => build_program_token_transfer(
                    program_id,
                    &source,
                    &destination,
                    payer,
                    &self.token.program_id(),
                    leg.amount,
                ),
            };
            instructions.push(transfer);
        }

        Ok((instructions, created_accounts))
    }
}
