//! Associated token accounts.
//!
//! The derivation rule and the creation instruction depend on the token
//! program, so both live behind [`SolanaToken`]. [`AccountResolver`] combines
//! a derivation policy with an existence check against the network.

use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use spl_associated_token_account::{
    get_associated_token_address_with_program_id, instruction::create_associated_token_account,
};
use tracing::debug;

use crate::{
    models::{ResolvedAccount, TokenAccount, TransactionError},
    services::SolanaProviderTrait,
};

/// Derivation and instruction policy of a token program.
pub trait SolanaToken: Send + Sync {
    /// Token program that owns the accounts.
    fn program_id(&self) -> Pubkey;

    /// Associated token address of `wallet` for `mint`.
    fn get_associated_token_address(&self, wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
        get_associated_token_address_with_program_id(wallet, mint, &self.program_id())
    }

    /// Instruction creating the associated account of `wallet` for `mint`,
    /// funded by `payer`.
    fn create_associated_token_account(
        &self,
        payer: &Pubkey,
        wallet: &Pubkey,
        mint: &Pubkey,
    ) -> Instruction {
        create_associated_token_account(payer, wallet, mint, &self.program_id())
    }

    /// `TransferChecked` instruction; the program verifies `decimals` against the mint.
    fn create_transfer_checked_instruction(
        &self,
        source: &Pubkey,
        mint: &Pubkey,
        destination: &Pubkey,
        authority: &Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<Instruction, TransactionError>;
}

/// The original SPL token program.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplToken;

impl SolanaToken for SplToken {
    fn program_id(&self) -> Pubkey {
        spl_token::id()
    }

    fn create_transfer_checked_instruction(
        &self,
        source: &Pubkey,
        mint: &Pubkey,
        destination: &Pubkey,
        authority: &Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<Instruction, TransactionError> {
        spl_token::instruction::transfer_checked(
            &self.program_id(),
            source,
            mint,
            destination,
            authority,
            &[],
            amount,
            decimals,
        )
        .map_err(|e| TransactionError::InvalidAmount(e.to_string()))
    }
}

/// Token-2022. Same derivation rule, different program id, so derived
/// addresses differ from [`SplToken`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Token2022;

impl SolanaToken for Token2022 {
    fn program_id(&self) -> Pubkey {
        spl_token_2022::id()
    }

    fn create_transfer_checked_instruction(
        &self,
        source: &Pubkey,
        mint: &Pubkey,
        destination: &Pubkey,
        authority: &Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<Instruction, TransactionError> {
        #[allow(deprecated)]
        spl_token_2022::instruction::transfer_checked(
            &self.program_id(),
            source,
            mint,
            destination,
            authority,
            &[],
            amount,
            decimals,
        )
        .map_err(|e| TransactionError::InvalidAmount(e.to_string()))
    }
}

/// Finds the associated account of an owner and emits a creation
/// instruction when it does not exist yet.
///
/// Existence is always read from the network; nothing is cached between calls.
pub struct AccountResolver<'a, P: ?Sized, T: ?Sized> {
    provider: &'a P,
    token: &'a T,
}

impl<'a, P, T> AccountResolver<'a, P, T>
where
    P: SolanaProviderTrait + ?Sized,
    T: SolanaToken + ?Sized,
{
    pub fn new(provider: &'a P, token: &'a T) -> Self {
        Self { provider, token }
    }

    /// Derives the account address without touching the network.
    pub fn derive(&self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        self.token.get_associated_token_address(owner, mint)
    }

    /// Resolves the associated account of `owner` for `mint`.
    ///
    /// `payer` funds the creation when the account is missing.
    ///
    /// # Errors
    ///
    /// `TransactionError::AccountLookupFailed` when the existence check itself
    /// fails. A missing account is not an error.
    pub async fn resolve(
        &self,
        payer: &Pubkey,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> Result<ResolvedAccount, TransactionError> {
        let address = self.derive(owner, mint);

        let account_info = self
            .provider
            .get_account_info(&address)
            .await
            .map_err(|e| TransactionError::AccountLookupFailed(format!("{address}: {e}")))?;

        let exists = account_info.is_some();
        let creation_instruction = if exists {
            None
        } else {
            Some(self.token.create_associated_token_account(payer, owner, mint))
        };

        debug!(
            owner = %owner,
            mint = %mint,
            address = %address,
            exists,
            "resolved associated token account"
        );

        Ok(ResolvedAccount {
            account: TokenAccount {
                owner: *owner,
                mint: *mint,
                address,
                exists,
            },
            creation_instruction,
        })
    }
}
