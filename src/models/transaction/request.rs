use serde::{Deserialize, Serialize};

/// Native SOL transfer to `recipient`, amount in lamports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeLeg {
    pub recipient: String,
    pub lamports: u64,
}

/// Which program moves the tokens of a [`TokenLeg`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "program_id", rename_all = "snake_case")]
pub enum TokenRoute {
    /// `TransferChecked` on the token program itself.
    #[default]
    TokenProgram,
    /// A custom program taking `[source, destination, authority, token program]`
    /// and the amount as 8 little-endian bytes.
    Program(String),
}

/// Fungible token transfer from the wallet's associated account to the
/// associated account of `recipient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLeg {
    pub mint: String,
    pub recipient: String,
    /// Base units, already scaled by `10^decimals`.
    pub amount: u64,
    pub decimals: u8,
    #[serde(default)]
    pub route: TokenRoute,
}

/// A single atomic transfer. Native legs execute first, in order, then token
/// legs in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TransferRequest {
    #[serde(default)]
    pub native: Vec<NativeLeg>,
    #[serde(default)]
    pub tokens: Vec<TokenLeg>,
}

impl TransferRequest {
    pub fn native(recipient: impl Into<String>, lamports: u64) -> Self {
        Self {
            native: vec![NativeLeg {
                recipient: recipient.into(),
                lamports,
            }],
            tokens: vec![],
        }
    }

    pub fn token(leg: TokenLeg) -> Self {
        Self {
            native: vec![],
            tokens: vec![leg],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.native.is_empty() && self.tokens.is_empty()
    }
}

/// Hands `amount` units of `mint` to the collector and, once settled, reports
/// the wallet address to the collector service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpackRequest {
    pub mint: String,
    pub collector: String,
    #[serde(default = "default_unpack_amount")]
    pub amount: u64,
    /// Decimals of `mint`; unit tokens have none.
    #[serde(default)]
    pub decimals: u8,
}

fn default_unpack_amount() -> u64 {
    1
}

impl UnpackRequest {
    pub fn new(mint: impl Into<String>, collector: impl Into<String>) -> Self {
        Self {
            mint: mint.into(),
            collector: collector.into(),
            amount: default_unpack_amount(),
            decimals: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_leg_route_defaults_to_token_program() {
        let leg: TokenLeg = serde_json::from_value(serde_json::json!({
            "mint": "mint",
            "recipient": "recipient",
            "amount": 5,
            "decimals": 9
        }))
        .unwrap();
        assert_eq!(leg.route, TokenRoute::TokenProgram);
    }

    #[test]
    fn test_program_route_deserialization() {
        let route: TokenRoute = serde_json::from_value(serde_json::json!({
            "type": "program",
            "program_id": "5vbb1QDU9hUYke68ma2nsF7FcozTPHJJMNQMyACUTWcE"
        }))
        .unwrap();
        assert_eq!(
            route,
            TokenRoute::Program("5vbb1QDU9hUYke68ma2nsF7FcozTPHJJMNQMyACUTWcE".to_string())
        );
    }

    #[test]
    fn test_unpack_request_defaults_to_one_unit() {
        let request: UnpackRequest = serde_json::from_value(serde_json::json!({
            "mint": "mint",
            "collector": "collector"
        }))
        .unwrap();
        assert_eq!(request.amount, 1);
        assert_eq!(request.decimals, 0);
        assert_eq!(UnpackRequest::new("m", "c").amount, 1);
    }

    #[test]
    fn test_transfer_request_constructors() {
        assert!(TransferRequest::default().is_empty());
        let request = TransferRequest::native("recipient", 10);
        assert_eq!(request.native.len(), 1);
        assert!(request.tokens.is_empty());
    }
}
