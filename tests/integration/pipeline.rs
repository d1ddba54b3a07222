//! Building and signing a transaction through the public API, without a network.

use sol_sender::{
    domain::{
        assemble, build_native_transfer, build_token_transfer, decode_amount, encode_amount,
        SolanaToken, SplToken,
    },
    models::{encode_address, parse_address, TransactionError},
    services::{sign_transaction, LocalSigner},
    utils::parse_ui_amount,
};
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signer::{keypair::Keypair, Signer},
};

#[tokio::test]
async fn test_build_assemble_and_sign_combined_transfer() {
    let keypair = Keypair::new();
    let payer = keypair.pubkey();
    let recipient = parse_address(&encode_address(&Pubkey::new_unique())).unwrap();
    let mint = Pubkey::new_unique();

    let source = SplToken.get_associated_token_address(&payer, &mint);
    let destination = SplToken.get_associated_token_address(&recipient, &mint);
    let amount = parse_ui_amount("3", 9).unwrap();
    assert_eq!(amount, 3_000_000_000);

    let instructions = vec![
        build_native_transfer(&payer, &recipient, parse_ui_amount("0.01", 9).unwrap()),
        SplToken.create_associated_token_account(&payer, &recipient, &mint),
        build_token_transfer(&SplToken, &source, &mint, &destination, &payer, amount, 9).unwrap(),
    ];

    let unsigned = assemble(&instructions, &payer, Hash::new_unique()).unwrap();
    assert_eq!(unsigned.message.instructions.len(), 3);

    let signer = LocalSigner::new(keypair);
    let (signed, signature) = sign_transaction(&signer, unsigned).await.unwrap();

    assert_eq!(signed.signatures, vec![signature]);
    assert!(signed.verify().is_ok());
}

#[test]
fn test_malformed_input_is_rejected_locally() {
    assert!(matches!(
        parse_address("0x1234"),
        Err(TransactionError::InvalidAddress(_))
    ));
    assert!(matches!(
        parse_ui_amount("-1", 9),
        Err(TransactionError::InvalidAmount(_))
    ));
    assert!(matches!(
        decode_amount(&[0; 4]),
        Err(TransactionError::InvalidAmount(_))
    ));
    assert_eq!(
        assemble(&[], &Pubkey::new_unique(), Hash::new_unique()).unwrap_err(),
        TransactionError::EmptyTransaction
    );
}

#[test]
fn test_amount_encoding_is_little_endian() {
    let encoded = encode_amount(3_000_000_000);
    assert_eq!(encoded, [0x00, 0x5e, 0xd0, 0xb2, 0, 0, 0, 0]);
    assert_eq!(decode_amount(&encoded).unwrap(), 3_000_000_000);
}
