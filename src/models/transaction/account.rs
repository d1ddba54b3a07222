use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

/// Associated token account of `owner` for `mint`.
///
/// `address` is always derived from `(owner, mint, token program)`, never chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccount {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub address: Pubkey,
    pub exists: bool,
}

/// Result of resolving an associated token account.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAccount {
    pub account: TokenAccount,
    /// Present only when the account does not exist yet. Must be placed before
    /// any instruction that reads or writes the account.
    pub creation_instruction: Option<Instruction>,
}

impl ResolvedAccount {
    pub fn address(&self) -> Pubkey {
        self.account.address
    }

    pub fn needs_creation(&self) -> bool {
        self.creation_instruction.is_some()
    }
}
