//! Utility functions and helpers

pub mod hash;

/// Convert a camelCase schema name to the snake_case form used in the
/// instruction discriminator namespace (`mintNft` -> `mint_nft`).
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Convert a camelCase schema name to the PascalCase form used in the
/// account discriminator namespace (`nftMetadata` -> `NftMetadata`).
pub fn to_pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
