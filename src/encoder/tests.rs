use serde_json::{json, Map, Value};
use solana_pubkey::Pubkey;

use crate::encoder::encode_args;
use crate::errors::EncodingError;
use crate::schema::SchemaRegistry;

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn encode(instruction: &str, values: Value) -> Result<Vec<crate::encoder::EncodedArg>, EncodingError> {
    let registry = SchemaRegistry::builtin();
    let spec = registry.lookup_instruction(instruction).unwrap();
    encode_args(spec, &args(values))
}

#[test]
fn output_matches_declared_order_and_length() {
    let encoded = encode("mintNft", json!({ "uri": "https://example.com/metadata" })).unwrap();
    assert_eq!(encoded.len(), 1);
    assert_eq!(encoded[0].name, "uri");

    let uri = "https://example.com/metadata";
    let mut expected = (uri.len() as u32).to_le_bytes().to_vec();
    expected.extend_from_slice(uri.as_bytes());
    assert_eq!(encoded[0].data, expected);
}

#[test]
fn u64_encodes_little_endian() {
    let encoded = encode("listNftForSale", json!({ "salePrice": 1_000_000u64 })).unwrap();
    assert_eq!(encoded[0].data, 1_000_000u64.to_le_bytes());
}

#[test]
fn u64_rejects_negative_and_fractional() {
    for bad in [json!({ "salePrice": -5 }), json!({ "salePrice": 1.5 })] {
        match encode("listNftForSale", bad) {
            Err(EncodingError::OutOfRange(arg)) => assert_eq!(arg, "salePrice"),
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }
}

#[test]
fn u64_rejects_non_numbers() {
    match encode("listNftForSale", json!({ "salePrice": "1000000" })) {
        Err(EncodingError::TypeMismatch { arg, expected }) => {
            assert_eq!(arg, "salePrice");
            assert_eq!(expected, "u64");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn missing_argument_is_reported_by_name() {
    match encode("mintNft", json!({})) {
        Err(EncodingError::MissingArgument(arg)) => assert_eq!(arg, "uri"),
        other => panic!("expected MissingArgument, got {other:?}"),
    }
}

#[test]
fn public_key_round_trips_base58() {
    let owner = Pubkey::new_unique();
    let encoded = encode("transferNft", json!({ "newOwner": owner.to_string() })).unwrap();
    assert_eq!(encoded[0].data, owner.to_bytes());
}

#[test]
fn malformed_keys_are_rejected() {
    for bad in ["not-base58-0OIl", "abc"] {
        match encode("transferNft", json!({ "newOwner": bad })) {
            Err(EncodingError::InvalidKey(arg)) => assert_eq!(arg, "newOwner"),
            other => panic!("expected InvalidKey, got {other:?}"),
        }
    }
}

#[test]
fn unit_variant_encodes_as_bare_index() {
    let encoded = encode("purchaseNft", json!({ "paymentMethod": { "kind": "SOL" } })).unwrap();
    assert_eq!(encoded[0].data, [0u8]);
}

#[test]
fn field_variant_encodes_index_then_fields() {
    let mint = Pubkey::new_unique();
    let encoded = encode(
        "purchaseNft",
        json!({ "paymentMethod": {
            "kind": "SPLToken",
            "tokenMint": mint.to_string(),
            "amount": 42u64,
        }}),
    )
    .unwrap();

    let mut expected = vec![1u8];
    expected.extend_from_slice(&mint.to_bytes());
    expected.extend_from_slice(&42u64.to_le_bytes());
    assert_eq!(encoded[0].data, expected);
}

#[test]
fn unknown_variant_tag_is_rejected() {
    match encode("purchaseNft", json!({ "paymentMethod": { "kind": "BTC" } })) {
        Err(EncodingError::InvalidVariant { variant, .. }) => assert_eq!(variant, "BTC"),
        other => panic!("expected InvalidVariant, got {other:?}"),
    }
}

#[test]
fn missing_variant_tag_is_rejected() {
    match encode("purchaseNft", json!({ "paymentMethod": {} })) {
        Err(EncodingError::InvalidVariant { .. }) => {}
        other => panic!("expected InvalidVariant, got {other:?}"),
    }
}

#[test]
fn missing_variant_field_is_reported_with_path() {
    match encode(
        "purchaseNft",
        json!({ "paymentMethod": { "kind": "SPLToken", "amount": 1u64 } }),
    ) {
        Err(EncodingError::MissingArgument(arg)) => assert_eq!(arg, "paymentMethod.tokenMint"),
        other => panic!("expected MissingArgument, got {other:?}"),
    }
}

#[test]
fn vector_encodes_count_then_elements() {
    let encoded = encode("batchMintNfts", json!({ "uris": ["a", "bc"] })).unwrap();

    let mut expected = 2u32.to_le_bytes().to_vec();
    expected.extend_from_slice(&1u32.to_le_bytes());
    expected.extend_from_slice(b"a");
    expected.extend_from_slice(&2u32.to_le_bytes());
    expected.extend_from_slice(b"bc");
    assert_eq!(encoded[0].data, expected);
}

#[test]
fn vector_element_errors_carry_their_index() {
    match encode("batchMintNfts", json!({ "uris": ["ok", 3] })) {
        Err(EncodingError::TypeMismatch { arg, .. }) => assert_eq!(arg, "uris[1]"),
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}
