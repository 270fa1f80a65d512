//! A schema-driven client for a Solana NFT marketplace program
//!
//! This crate holds a typed description of the marketplace program's
//! interface (instructions, accounts, argument encodings) and the
//! marshaling that turns high-level calls (mint, list, transfer,
//! purchase, batch-mint) into well-formed remote invocations. The
//! program's business logic runs on-chain; everything here is request
//! construction, response decoding and typed error surfacing.

pub mod client;
pub mod constants;
pub mod encoder;
pub mod errors;
pub mod request;
pub mod schema;
pub mod utils;

use solana_pubkey::Pubkey;

pub use client::{
    MarketplaceClient, NftAccounts, NftMetadata, PaymentMethod, PurchaseConfirmation, RpcTransport,
    SaleState, Transport,
};
pub use errors::{ClientError, ClientResult};
pub use request::{AccountRef, CallDescriptor, RequestBuilder};
pub use schema::{Schema, SchemaRegistry};

/// Connect to a marketplace program over an RPC endpoint, using the
/// built-in schema.
pub async fn connect(
    rpc_url: &str,
    program_id: Pubkey,
) -> ClientResult<MarketplaceClient<RpcTransport>> {
    connect_with_schema(rpc_url, program_id, SchemaRegistry::builtin()).await
}

/// Connect with an explicitly loaded schema registry.
pub async fn connect_with_schema(
    rpc_url: &str,
    program_id: Pubkey,
    registry: SchemaRegistry,
) -> ClientResult<MarketplaceClient<RpcTransport>> {
    let transport = RpcTransport::new(rpc_url);
    Ok(MarketplaceClient::new(transport, registry, program_id))
}

/// Version of the marketplace client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
