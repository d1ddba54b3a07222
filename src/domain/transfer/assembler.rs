use solana_sdk::{
    hash::Hash, instruction::Instruction, message::Message, pubkey::Pubkey,
    transaction::Transaction,
};

use crate::models::TransactionError;

/// Combines instructions into a single unsigned transaction.
///
/// Instruction order is preserved exactly; account deduplication and
/// signer ordering are left to [`Message`]. The fee payer is always the first
/// account and the first required signer.
///
/// # Errors
///
/// `TransactionError::EmptyTransaction` when `instructions` is empty.
pub fn assemble(
    instructions: &[Instruction],
    fee_payer: &Pubkey,
    recent_blockhash: Hash,
) -> Result<Transaction, TransactionError> {
    if instructions.is_empty() {
        return Err(TransactionError::EmptyTransaction);
    }

    let message = Message::new_with_blockhash(instructions, Some(fee_payer), &recent_blockhash);
    Ok(Transaction::new_unsigned(message))
}
