//! Instruction builders.
//!
//! Pure functions: nothing here reads the network or mutates state, so the
//! same inputs always produce byte-identical instructions.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::SolanaToken;
use crate::models::TransactionError;

/// Width of the amount argument of a custom-program call.
pub const AMOUNT_BYTES: usize = 8;

/// Serializes an amount the way on-chain programs read a `u64` argument.
pub fn encode_amount(amount: u64) -> [u8; AMOUNT_BYTES] {
    amount.to_le_bytes()
}

/// Reads back an amount produced by [`encode_amount`].
///
/// # Errors
///
/// `TransactionError::InvalidAmount` unless `data` is exactly 8 bytes.
pub fn decode_amount(data: &[u8]) -> Result<u64, TransactionError> {
    let bytes: [u8; AMOUNT_BYTES] = data.try_into().map_err(|_| {
        TransactionError::InvalidAmount(format!(
            "amount must be {AMOUNT_BYTES} bytes, got {}",
            data.len()
        ))
    })?;
    Ok(u64::from_le_bytes(bytes))
}

/// Argument layout of a custom-program call.
pub trait AmountEncoding {
    fn encode(&self, amount: u64) -> Vec<u8>;
}

/// 8 little-endian bytes, no discriminator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeU64Encoding;

impl AmountEncoding for LeU64Encoding {
    fn encode(&self, amount: u64) -> Vec<u8> {
        encode_amount(amount).to_vec()
    }
}

/// System-program transfer of `lamports` from `from` to `to`.
pub fn build_native_transfer(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    solana_system_interface::instruction::transfer(from, to, lamports)
}

/// Token-program transfer between two associated accounts, signed by `authority`.
///
/// # Errors
///
/// `TransactionError::InvalidAmount` when the token program rejects the arguments.
pub fn build_token_transfer<T: SolanaToken + ?Sized>(
    token: &T,
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
    decimals: u8,
) -> Result<Instruction, TransactionError> {
    token.create_transfer_checked_instruction(
        source,
        mint,
        destination,
        authority,
        amount,
        decimals,
    )
}

/// Call into a program whose argument layout is known only by convention.
///
/// Account metas are passed through in order, untouched.
pub fn build_opaque_call<E: AmountEncoding + ?Sized>(
    program_id: Pubkey,
    accounts: Vec<AccountMeta>,
    encoding: &E,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id,
        accounts,
        data: encoding.encode(amount),
    }
}

/// Token transfer routed through a custom program.
///
/// Accounts are `[source (w), destination (w), authority (signer, w), token program]`.
pub fn build_program_token_transfer(
    program_id: Pubkey,
    source: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    token_program: &Pubkey,
    amount: u64,
) -> Instruction {
    build_opaque_call(
        program_id,
        vec![
            AccountMeta::new(*source, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(*token_program, false),
        ],
        &LeU64Encoding,
        amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SplToken;
    use proptest::prelude::*;

    #[test]
    fn test_encode_amount_little_endian() {
        assert_eq!(encode_amount(1), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encode_amount(0x0102), [2, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(encode_amount(u64::MAX), [0xff; 8]);
    }

    #[test]
    fn test_decode_amount_rejects_wrong_length() {
        assert!(matches!(
            decode_amount(&[1, 2, 3]),
            Err(TransactionError::InvalidAmount(_))
        ));
        assert!(matches!(
            decode_amount(&[0; 9]),
            Err(TransactionError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_native_transfer_layout() {
        let from = Pubkey::new_unique();
        let to = Pubkey::new_unique();
        let instruction = build_native_transfer(&from, &to, 1_000_000);

        assert_eq!(instruction.program_id, solana_system_interface::program::id());
        assert_eq!(instruction.accounts.len(), 2);
        assert_eq!(instruction.accounts[0].pubkey, from);
        assert!(instruction.accounts[0].is_signer);
        assert!(instruction.accounts[0].is_writable);
        assert_eq!(instruction.accounts[1].pubkey, to);
        assert!(!instruction.accounts[1].is_signer);
        assert!(instruction.accounts[1].is_writable);
        // u32 variant tag 2 followed by the lamports
        assert_eq!(&instruction.data[0..4], &[2, 0, 0, 0]);
        assert_eq!(&instruction.data[4..12], &1_000_000u64.to_le_bytes());
    }

    #[test]
    fn test_builders_are_deterministic() {
        let from = Pubkey::new_unique();
        let to = Pubkey::new_unique();
        assert_eq!(
            build_native_transfer(&from, &to, 42),
            build_native_transfer(&from, &to, 42)
        );

        let mint = Pubkey::new_unique();
        let first = build_token_transfer(&SplToken, &from, &mint, &to, &from, 7, 6).unwrap();
        let second = build_token_transfer(&SplToken, &from, &mint, &to, &from, 7, 6).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_token_transfer_accounts() {
        let source = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let destination = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        let instruction =
            build_token_transfer(&SplToken, &source, &mint, &destination, &authority, 5, 0)
                .unwrap();

        let keys: Vec<Pubkey> = instruction.accounts.iter().map(|a| a.pubkey).collect();
        assert_eq!(keys, vec![source, mint, destination, authority]);
        assert!(instruction.accounts[3].is_signer);
    }

    #[test]
    fn test_program_token_transfer_layout() {
        let program_id = Pubkey::new_unique();
        let source = Pubkey::new_unique();
        let destination = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let token_program = spl_token::id();

        let instruction = build_program_token_transfer(
            program_id,
            &source,
            &destination,
            &authority,
            &token_program,
            1,
        );

        assert_eq!(instruction.program_id, program_id);
        assert_eq!(
            instruction.accounts,
            vec![
                AccountMeta::new(source, false),
                AccountMeta::new(destination, false),
                AccountMeta::new(authority, true),
                AccountMeta::new_readonly(token_program, false),
            ]
        );
        assert_eq!(instruction.data, vec![1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_opaque_call_preserves_account_order() {
        let metas: Vec<AccountMeta> = (0..5)
            .map(|i| {
                if i % 2 == 0 {
                    AccountMeta::new(Pubkey::new_unique(), false)
                } else {
                    AccountMeta::new_readonly(Pubkey::new_unique(), false)
                }
            })
            .collect();

        let instruction = build_opaque_call(Pubkey::new_unique(), metas.clone(), &LeU64Encoding, 0);
        assert_eq!(instruction.accounts, metas);
        assert_eq!(instruction.data, vec![0; 8]);
    }

    proptest! {
        #[test]
        fn prop_amount_round_trip(amount in any::<u64>()) {
            prop_assert_eq!(decode_amount(&encode_amount(amount)).unwrap(), amount);
        }
    }
}
