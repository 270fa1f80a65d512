use std::collections::HashMap;

use serde_json::{json, Map, Value};
use solana_pubkey::Pubkey;
use solana_sdk_ids::system_program;

use crate::constants::TOKEN_PROGRAM_ID;
use crate::errors::{ClientError, EncodingError, RequestError};
use crate::request::{AccountRef, RequestBuilder};
use crate::schema::SchemaRegistry;
use crate::utils::hash::instruction_discriminator;

fn values(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

struct Fixture {
    registry: SchemaRegistry,
    program_id: Pubkey,
    authority: Pubkey,
    accounts: HashMap<String, AccountRef>,
}

fn mint_fixture() -> Fixture {
    let authority = Pubkey::new_unique();
    let mut accounts = HashMap::new();
    accounts.insert("mint".to_string(), AccountRef::new(Pubkey::new_unique()));
    accounts.insert(
        "tokenAccount".to_string(),
        AccountRef::new(Pubkey::new_unique()),
    );
    accounts.insert("authority".to_string(), AccountRef::signing(authority));
    accounts.insert(
        "nftMetadata".to_string(),
        AccountRef::new(Pubkey::new_unique()),
    );
    accounts.insert(
        "systemProgram".to_string(),
        AccountRef::new(system_program::id()),
    );
    accounts.insert(
        "tokenProgram".to_string(),
        AccountRef::new(TOKEN_PROGRAM_ID),
    );
    Fixture {
        registry: SchemaRegistry::builtin(),
        program_id: Pubkey::new_unique(),
        authority,
        accounts,
    }
}

#[test]
fn descriptor_orders_accounts_as_declared() {
    let fx = mint_fixture();
    let builder = RequestBuilder::new(&fx.registry, fx.program_id);
    let call = builder
        .build("mintNft", &fx.accounts, &values(json!({ "uri": "u" })))
        .unwrap();

    assert_eq!(call.instruction, "mintNft");
    assert_eq!(call.accounts.len(), 6);
    assert_eq!(call.accounts[0].pubkey, fx.accounts["mint"].pubkey);
    assert_eq!(call.accounts[2].pubkey, fx.authority);
    assert!(call.accounts[2].is_signer);
    assert!(call.accounts[2].is_writable);
    assert_eq!(call.accounts[4].pubkey, system_program::id());
    assert!(!call.accounts[4].is_writable);
    assert_eq!(call.signers, vec![fx.authority]);
}

#[test]
fn payload_is_discriminator_then_args() {
    let fx = mint_fixture();
    let builder = RequestBuilder::new(&fx.registry, fx.program_id);
    let call = builder
        .build("mintNft", &fx.accounts, &values(json!({ "uri": "u" })))
        .unwrap();

    assert_eq!(&call.data[..8], instruction_discriminator("mintNft"));
    assert_eq!(&call.data[8..], call.args[0].data.as_slice());

    let instruction = call.to_instruction();
    assert_eq!(instruction.program_id, fx.program_id);
    assert_eq!(instruction.data, call.data);
}

#[test]
fn missing_account_slot_is_rejected() {
    let mut fx = mint_fixture();
    fx.accounts.remove("tokenAccount");
    let builder = RequestBuilder::new(&fx.registry, fx.program_id);

    match builder.build("mintNft", &fx.accounts, &values(json!({ "uri": "u" }))) {
        Err(ClientError::Request(RequestError::MissingAccount(name))) => {
            assert_eq!(name, "tokenAccount")
        }
        other => panic!("expected MissingAccount, got {other:?}"),
    }
}

#[test]
fn signer_slot_without_signing_capability_is_rejected() {
    let mut fx = mint_fixture();
    fx.accounts
        .insert("authority".to_string(), AccountRef::new(fx.authority));
    let builder = RequestBuilder::new(&fx.registry, fx.program_id);

    match builder.build("mintNft", &fx.accounts, &values(json!({ "uri": "u" }))) {
        Err(ClientError::Request(RequestError::MissingSigner(name))) => {
            assert_eq!(name, "authority")
        }
        other => panic!("expected MissingSigner, got {other:?}"),
    }
}

#[test]
fn encoder_failures_propagate_unchanged() {
    let fx = mint_fixture();
    let builder = RequestBuilder::new(&fx.registry, fx.program_id);

    match builder.build("mintNft", &fx.accounts, &values(json!({}))) {
        Err(ClientError::Encoding(EncodingError::MissingArgument(arg))) => {
            assert_eq!(arg, "uri")
        }
        other => panic!("expected MissingArgument, got {other:?}"),
    }
}

#[test]
fn unknown_instruction_is_a_schema_error() {
    let fx = mint_fixture();
    let builder = RequestBuilder::new(&fx.registry, fx.program_id);

    match builder.build("stakeNft", &fx.accounts, &Map::new()) {
        Err(ClientError::Schema(_)) => {}
        other => panic!("expected SchemaError, got {other:?}"),
    }
}
