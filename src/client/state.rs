//! Typed views of marketplace state

use serde_json::{json, Value};
use solana_pubkey::Pubkey;

use crate::errors::{ConsistencyError, DecodingError};

/// How a purchase is paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Native lamports
    Sol,
    /// An SPL token transfer
    SplToken { token_mint: Pubkey, amount: u64 },
}

impl PaymentMethod {
    /// The tagged JSON value the encoder expects for this payment method.
    pub fn to_value(&self) -> Value {
        match self {
            PaymentMethod::Sol => json!({ "kind": "SOL" }),
            PaymentMethod::SplToken { token_mint, amount } => json!({
                "kind": "SPLToken",
                "tokenMint": token_mint.to_string(),
                "amount": amount,
            }),
        }
    }
}

/// Decoded `nftMetadata` account.
///
/// `sale_price` is present if and only if the asset is currently listed;
/// the program clears it and updates `owner` in the same transaction, so
/// neither is ever observed to change without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftMetadata {
    pub uri: String,
    pub owner: Pubkey,
    pub sale_price: Option<u64>,
}

impl NftMetadata {
    /// Build the typed view from a decoded `nftMetadata` value.
    pub fn from_value(value: &Value) -> Result<Self, DecodingError> {
        let mismatch = |reason: &str| DecodingError::LayoutMismatch {
            layout: "nftMetadata".to_string(),
            reason: reason.to_string(),
        };

        let uri = value
            .get("uri")
            .and_then(Value::as_str)
            .ok_or_else(|| mismatch("missing `uri` string"))?
            .to_string();
        let owner = value
            .get("owner")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| mismatch("missing or malformed `owner` key"))?;
        let sale_price = match value.get("salePrice") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                v.as_u64()
                    .ok_or_else(|| mismatch("malformed `salePrice`"))?,
            ),
        };

        Ok(Self {
            uri,
            owner,
            sale_price,
        })
    }

    /// Is the asset currently listed for sale?
    pub fn is_listed(&self) -> bool {
        self.sale_price.is_some()
    }
}

/// The two observable outcomes of a purchase-style operation.
///
/// `Listed` and `Sold` are mutually exclusive; a fetch showing any other
/// combination of price and ownership is surfaced as a
/// [`ConsistencyError`], never reconciled silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleState {
    /// Listed at this price; ownership unchanged
    Listed(u64),
    /// Sold to the buyer; listing cleared
    Sold,
}

/// Classify fetched metadata relative to a prospective buyer.
pub fn classify_sale(
    account: &Pubkey,
    metadata: &NftMetadata,
    buyer: &Pubkey,
) -> Result<SaleState, ConsistencyError> {
    match (metadata.sale_price, metadata.owner == *buyer) {
        (Some(price), false) => Ok(SaleState::Listed(price)),
        (None, true) => Ok(SaleState::Sold),
        (Some(price), true) => Err(ConsistencyError {
            account: *account,
            details: format!(
                "owner changed to buyer but salePrice {} is still present",
                price
            ),
        }),
        (None, false) => Err(ConsistencyError {
            account: *account,
            details: "salePrice cleared but ownership did not change".to_string(),
        }),
    }
}
