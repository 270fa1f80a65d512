//! Built-in schema of the NFT marketplace program

use once_cell::sync::Lazy;

use crate::schema::account::AccountLayout;
use crate::schema::instruction::InstructionSpec;
use crate::schema::registry::Schema;
use crate::schema::types::{EnumVariant, TypeDescriptor};

static MARKETPLACE: Lazy<Schema> = Lazy::new(build);

/// The marketplace program's schema. Built once per process.
pub fn schema() -> Schema {
    MARKETPLACE.clone()
}

fn payment_method() -> TypeDescriptor {
    let mut spl = EnumVariant {
        name: "SPLToken".to_string(),
        fields: Vec::new(),
    };
    spl.fields.push(crate::schema::instruction::ArgSpec {
        name: "tokenMint".to_string(),
        ty: TypeDescriptor::PublicKey,
    });
    spl.fields.push(crate::schema::instruction::ArgSpec {
        name: "amount".to_string(),
        ty: TypeDescriptor::U64,
    });

    TypeDescriptor::Enum(vec![
        EnumVariant {
            name: "SOL".to_string(),
            fields: Vec::new(),
        },
        spl,
    ])
}

fn build() -> Schema {
    let mut instructions = Vec::new();

    let mut initialize = InstructionSpec::new("initialize");
    initialize.add_account("authority", true, true);
    instructions.push(initialize);

    let mut mint_nft = InstructionSpec::new("mintNft");
    mint_nft.add_account("mint", true, false);
    mint_nft.add_account("tokenAccount", true, false);
    mint_nft.add_account("authority", true, true);
    mint_nft.add_account("nftMetadata", true, false);
    mint_nft.add_account("systemProgram", false, false);
    mint_nft.add_account("tokenProgram", false, false);
    mint_nft.add_arg("uri", TypeDescriptor::String);
    instructions.push(mint_nft);

    let mut update_metadata = InstructionSpec::new("updateMetadata");
    update_metadata.add_account("nftMetadata", true, false);
    update_metadata.add_account("authority", true, true);
    update_metadata.add_arg("uri", TypeDescriptor::String);
    instructions.push(update_metadata);

    let mut transfer_nft = InstructionSpec::new("transferNft");
    transfer_nft.add_account("nftMetadata", true, false);
    transfer_nft.add_account("authority", true, true);
    transfer_nft.add_arg("newOwner", TypeDescriptor::PublicKey);
    instructions.push(transfer_nft);

    let mut burn_nft = InstructionSpec::new("burnNft");
    burn_nft.add_account("nftMetadata", true, false);
    burn_nft.add_account("mint", true, false);
    burn_nft.add_account("tokenAccount", true, false);
    burn_nft.add_account("authority", true, true);
    burn_nft.add_account("tokenProgram", false, false);
    instructions.push(burn_nft);

    let mut list_nft_for_sale = InstructionSpec::new("listNftForSale");
    list_nft_for_sale.add_account("nftMetadata", true, false);
    list_nft_for_sale.add_account("authority", true, true);
    list_nft_for_sale.add_arg("salePrice", TypeDescriptor::U64);
    instructions.push(list_nft_for_sale);

    let mut purchase_nft = InstructionSpec::new("purchaseNft");
    purchase_nft.add_account("nftMetadata", true, false);
    purchase_nft.add_account("buyer", true, true);
    purchase_nft.add_account("seller", true, false);
    purchase_nft.add_account("systemProgram", false, false);
    purchase_nft.add_arg("paymentMethod", payment_method());
    instructions.push(purchase_nft);

    let mut batch_mint_nfts = InstructionSpec::new("batchMintNfts");
    batch_mint_nfts.add_account("mint", true, false);
    batch_mint_nfts.add_account("tokenAccount", true, false);
    batch_mint_nfts.add_account("authority", true, true);
    batch_mint_nfts.add_account("nftMetadata", true, false);
    batch_mint_nfts.add_account("tokenProgram", false, false);
    batch_mint_nfts.add_arg(
        "uris",
        TypeDescriptor::Vector(Box::new(TypeDescriptor::String)),
    );
    instructions.push(batch_mint_nfts);

    let mut nft_metadata = AccountLayout::new("nftMetadata");
    nft_metadata.add_field("uri", TypeDescriptor::String);
    nft_metadata.add_field("owner", TypeDescriptor::PublicKey);
    nft_metadata.add_field(
        "salePrice",
        TypeDescriptor::Option(Box::new(TypeDescriptor::U64)),
    );

    Schema {
        name: "nft_marketplace".to_string(),
        version: "0.1.0".to_string(),
        instructions,
        accounts: vec![nft_metadata],
        metadata: None,
    }
}
