//! Keypair-backed wallet, used by the command line binary and in tests.
use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature, Signer},
};
use std::path::Path;

use super::SolanaSignTrait;
use crate::services::signer::SignerError;

pub struct LocalSigner {
    keypair: Keypair,
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("pubkey", &self.keypair.pubkey())
            .finish()
    }
}

impl LocalSigner {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Loads a keypair from a JSON file holding the 64 secret key bytes.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SignerError> {
        let path = path.as_ref();
        let keypair = read_keypair_file(path).map_err(|e| {
            SignerError::KeyError(format!("Failed to read keypair {}: {e}", path.display()))
        })?;
        Ok(Self::new(keypair))
    }
}

#[async_trait]
impl SolanaSignTrait for LocalSigner {
    async fn pubkey(&self) -> Result<Pubkey, SignerError> {
        Ok(self.keypair.pubkey())
    }

    async fn sign(&self, message: &[u8]) -> Result<Signature, SignerError> {
        self.keypair
            .try_sign_message(message)
            .map_err(|e| SignerError::SigningError(e.to_string()))
    }
}
