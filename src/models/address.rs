//! Address parsing and display.
//!
//! Addresses arrive from the user as base58 strings. They are parsed into
//! [`Pubkey`] values before anything touches the network, so malformed input
//! never costs an RPC call.

use solana_sdk::pubkey::Pubkey;

use super::TransactionError;

/// Size of a decoded address.
pub const ADDRESS_BYTES: usize = 32;

/// Longest base58 string that can encode 32 bytes.
const MAX_BASE58_LEN: usize = 44;

/// Parses a base58 encoded address.
///
/// # Errors
///
/// Returns `TransactionError::InvalidAddress` when the input is empty, contains
/// characters outside the base58 alphabet, or does not decode to exactly
/// 32 bytes.
pub fn parse_address(input: &str) -> Result<Pubkey, TransactionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TransactionError::InvalidAddress(
            "address is empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_BASE58_LEN {
        return Err(TransactionError::InvalidAddress(format!(
            "address {trimmed} is longer than {MAX_BASE58_LEN} characters"
        )));
    }

    let bytes = bs58::decode(trimmed)
        .into_vec()
        .map_err(|e| TransactionError::InvalidAddress(format!("{trimmed}: {e}")))?;

    let bytes: [u8; ADDRESS_BYTES] = bytes.try_into().map_err(|bytes: Vec<u8>| {
        TransactionError::InvalidAddress(format!(
            "{trimmed} decodes to {} bytes, expected {ADDRESS_BYTES}",
            bytes.len()
        ))
    })?;

    Ok(Pubkey::new_from_array(bytes))
}

/// Encodes an address as base58, the inverse of [`parse_address`].
pub fn encode_address(address: &Pubkey) -> String {
    bs58::encode(address.as_ref()).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_known_address() {
        let parsed = parse_address("11111111111111111111111111111111").unwrap();
        assert_eq!(parsed, Pubkey::default());

        let token_program = parse_address("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").unwrap();
        assert_eq!(token_program, spl_token::id());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let key = Pubkey::new_unique();
        let padded = format!("  {key}\n");
        assert_eq!(parse_address(&padded).unwrap(), key);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(parse_address(""), Err(TransactionError::InvalidAddress(_))));
        assert!(matches!(
            parse_address("   "),
            Err(TransactionError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_alphabet() {
        // '0', 'O', 'I' and 'l' are not part of the base58 alphabet
        for input in ["0OIl", "B4myR9PeyU6p1pgppEQPkHEfaMjw6MuKFFwQueXy590", "not-an-address"] {
            assert!(
                matches!(parse_address(input), Err(TransactionError::InvalidAddress(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let short = bs58::encode([7u8; 31]).into_string();
        let long = bs58::encode([7u8; 33]).into_string();
        assert!(matches!(
            parse_address(&short),
            Err(TransactionError::InvalidAddress(_))
        ));
        assert!(matches!(
            parse_address(&long),
            Err(TransactionError::InvalidAddress(_))
        ));
        assert!(matches!(
            parse_address(&"1".repeat(45)),
            Err(TransactionError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_encode_matches_pubkey_display() {
        let key = Pubkey::new_unique();
        assert_eq!(encode_address(&key), key.to_string());
    }

    proptest! {
        #[test]
        fn prop_parse_is_left_inverse_of_encode(bytes in any::<[u8; 32]>()) {
            let address = Pubkey::new_from_array(bytes);
            prop_assert_eq!(parse_address(&encode_address(&address)).unwrap(), address);
        }
    }
}
