//! Remote client for the marketplace program
//!
//! [`MarketplaceClient`] owns the read-only schema registry and a
//! transport handle, and exposes one typed operation per program
//! instruction. Each operation is a single request/response round trip
//! with one suspension point; the client holds no mutable state across
//! operations, never retries and never caches fetched accounts. Callers
//! needing ordering (list then purchase) sequence the calls themselves.

pub mod decode;
pub mod state;
pub mod transport;


use std::collections::HashMap;

use serde_json::{Map, Value};
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_sdk_ids::system_program;
use solana_signature::Signature;
use solana_signer::Signer;

use crate::constants::TOKEN_PROGRAM_ID;
use crate::errors::{ClientError, ClientResult, ConsistencyError, RequestError};
use crate::request::{AccountRef, CallDescriptor, RequestBuilder};
use crate::schema::SchemaRegistry;

pub use self::state::{classify_sale, NftMetadata, PaymentMethod, SaleState};
pub use self::transport::{RpcTransport, Transport};

/// The accounts backing one NFT: its mint, the holding token account and
/// the metadata account the marketplace program owns.
#[derive(Debug, Clone, Copy)]
pub struct NftAccounts {
    pub mint: Pubkey,
    pub token_account: Pubkey,
    pub nft_metadata: Pubkey,
}

/// A confirmed purchase: the transaction signature and the metadata
/// observed immediately after confirmation.
#[derive(Debug)]
pub struct PurchaseConfirmation {
    pub signature: Signature,
    pub metadata: NftMetadata,
}

/// Client for one marketplace program over one transport.
pub struct MarketplaceClient<T: Transport> {
    registry: SchemaRegistry,
    transport: T,
    program_id: Pubkey,
}

fn account_map(entries: &[(&str, AccountRef)]) -> HashMap<String, AccountRef> {
    entries
        .iter()
        .map(|(name, r)| (name.to_string(), *r))
        .collect()
}

impl<T: Transport> MarketplaceClient<T> {
    /// Create a client over an already-constructed transport.
    pub fn new(transport: T, registry: SchemaRegistry, program_id: Pubkey) -> Self {
        Self {
            registry,
            transport,
            program_id,
        }
    }

    /// The schema registry this client validates against.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The target program.
    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    fn builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.registry, self.program_id)
    }

    /// Submit a built call descriptor.
    ///
    /// Every identity the descriptor requires must appear among `signers`;
    /// the call fails with [`RequestError::MissingSigner`] otherwise.
    pub async fn submit(
        &self,
        call: &CallDescriptor,
        signers: &[&Keypair],
    ) -> ClientResult<Signature> {
        for required in &call.signers {
            if !signers.iter().any(|k| k.pubkey() == *required) {
                return Err(RequestError::MissingSigner(required.to_string()).into());
            }
        }
        log::info!("Submitting `{}`", call.instruction);
        Ok(self.transport.submit(call, signers).await?)
    }

    /// Fetch the account at `address` and decode it through the named
    /// layout. Reflects remote state at call time; no caching.
    pub async fn fetch_account(&self, address: &Pubkey, layout_name: &str) -> ClientResult<Value> {
        let layout = self.registry.lookup_account_layout(layout_name)?;
        let raw = self.transport.fetch_raw(address).await?;
        Ok(decode::decode_account(layout, &raw)?)
    }

    /// Fetch and decode an `nftMetadata` account.
    pub async fn fetch_metadata(&self, address: &Pubkey) -> ClientResult<NftMetadata> {
        let value = self.fetch_account(address, "nftMetadata").await?;
        Ok(NftMetadata::from_value(&value)?)
    }

    /// Initialize the marketplace for `authority`.
    pub async fn initialize(&self, authority: &Keypair) -> ClientResult<Signature> {
        let accounts = account_map(&[("authority", AccountRef::signing(authority.pubkey()))]);
        let call = self.builder().build("initialize", &accounts, &Map::new())?;
        self.submit(&call, &[authority]).await
    }

    /// Mint an NFT with the given metadata URI.
    pub async fn mint_nft(
        &self,
        nft: &NftAccounts,
        authority: &Keypair,
        uri: &str,
    ) -> ClientResult<Signature> {
        let accounts = account_map(&[
            ("mint", AccountRef::new(nft.mint)),
            ("tokenAccount", AccountRef::new(nft.token_account)),
            ("authority", AccountRef::signing(authority.pubkey())),
            ("nftMetadata", AccountRef::new(nft.nft_metadata)),
            ("systemProgram", AccountRef::new(system_program::id())),
            ("tokenProgram", AccountRef::new(TOKEN_PROGRAM_ID)),
        ]);
        let args = Map::from_iter([("uri".to_string(), Value::String(uri.to_string()))]);
        let call = self.builder().build("mintNft", &accounts, &args)?;
        self.submit(&call, &[authority]).await
    }

    /// Mint a batch of NFTs in one call. The program applies the URIs in
    /// order to the metadata account.
    pub async fn batch_mint_nfts(
        &self,
        nft: &NftAccounts,
        authority: &Keypair,
        uris: &[String],
    ) -> ClientResult<Signature> {
        let accounts = account_map(&[
            ("mint", AccountRef::new(nft.mint)),
            ("tokenAccount", AccountRef::new(nft.token_account)),
            ("authority", AccountRef::signing(authority.pubkey())),
            ("nftMetadata", AccountRef::new(nft.nft_metadata)),
            ("tokenProgram", AccountRef::new(TOKEN_PROGRAM_ID)),
        ]);
        let uris = uris.iter().cloned().map(Value::String).collect();
        let args = Map::from_iter([("uris".to_string(), Value::Array(uris))]);
        let call = self.builder().build("batchMintNfts", &accounts, &args)?;
        self.submit(&call, &[authority]).await
    }

    /// Replace the metadata URI.
    pub async fn update_metadata(
        &self,
        nft_metadata: &Pubkey,
        authority: &Keypair,
        uri: &str,
    ) -> ClientResult<Signature> {
        let accounts = account_map(&[
            ("nftMetadata", AccountRef::new(*nft_metadata)),
            ("authority", AccountRef::signing(authority.pubkey())),
        ]);
        let args = Map::from_iter([("uri".to_string(), Value::String(uri.to_string()))]);
        let call = self.builder().build("updateMetadata", &accounts, &args)?;
        self.submit(&call, &[authority]).await
    }

    /// Transfer ownership to `new_owner`.
    pub async fn transfer_nft(
        &self,
        nft_metadata: &Pubkey,
        authority: &Keypair,
        new_owner: &Pubkey,
    ) -> ClientResult<Signature> {
        let accounts = account_map(&[
            ("nftMetadata", AccountRef::new(*nft_metadata)),
            ("authority", AccountRef::signing(authority.pubkey())),
        ]);
        let args = Map::from_iter([(
            "newOwner".to_string(),
            Value::String(new_owner.to_string()),
        )]);
        let call = self.builder().build("transferNft", &accounts, &args)?;
        self.submit(&call, &[authority]).await
    }

    /// Burn the NFT and zero its metadata.
    pub async fn burn_nft(&self, nft: &NftAccounts, authority: &Keypair) -> ClientResult<Signature> {
        let accounts = account_map(&[
            ("nftMetadata", AccountRef::new(nft.nft_metadata)),
            ("mint", AccountRef::new(nft.mint)),
            ("tokenAccount", AccountRef::new(nft.token_account)),
            ("authority", AccountRef::signing(authority.pubkey())),
            ("tokenProgram", AccountRef::new(TOKEN_PROGRAM_ID)),
        ]);
        let call = self.builder().build("burnNft", &accounts, &Map::new())?;
        self.submit(&call, &[authority]).await
    }

    /// List the NFT for sale at `sale_price` lamports.
    pub async fn list_nft_for_sale(
        &self,
        nft_metadata: &Pubkey,
        authority: &Keypair,
        sale_price: u64,
    ) -> ClientResult<Signature> {
        let accounts = account_map(&[
            ("nftMetadata", AccountRef::new(*nft_metadata)),
            ("authority", AccountRef::signing(authority.pubkey())),
        ]);
        let args = Map::from_iter([("salePrice".to_string(), Value::from(sale_price))]);
        let call = self.builder().build("listNftForSale", &accounts, &args)?;
        self.submit(&call, &[authority]).await
    }

    /// Purchase a listed NFT, then fetch the metadata and verify the sale
    /// actually settled: ownership moved to the buyer and the listing was
    /// cleared together. Any other observed combination is surfaced as a
    /// [`ConsistencyError`].
    pub async fn purchase_nft(
        &self,
        nft_metadata: &Pubkey,
        buyer: &Keypair,
        seller: &Pubkey,
        payment_method: &PaymentMethod,
    ) -> ClientResult<PurchaseConfirmation> {
        let accounts = account_map(&[
            ("nftMetadata", AccountRef::new(*nft_metadata)),
            ("buyer", AccountRef::signing(buyer.pubkey())),
            ("seller", AccountRef::new(*seller)),
            ("systemProgram", AccountRef::new(system_program::id())),
        ]);
        let args = Map::from_iter([("paymentMethod".to_string(), payment_method.to_value())]);
        let call = self.builder().build("purchaseNft", &accounts, &args)?;

        let signature = self.submit(&call, &[buyer]).await?;
        let metadata = self.fetch_metadata(nft_metadata).await?;
        match classify_sale(nft_metadata, &metadata, &buyer.pubkey())? {
            SaleState::Sold => Ok(PurchaseConfirmation {
                signature,
                metadata,
            }),
            SaleState::Listed(price) => Err(ClientError::Consistency(ConsistencyError {
                account: *nft_metadata,
                details: format!("purchase confirmed but asset is still listed at {}", price),
            })),
        }
    }
}
