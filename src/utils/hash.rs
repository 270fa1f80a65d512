//! Hashing utilities

use sha2::{Digest, Sha256};

use crate::constants::discriminators::{ACCOUNT_NAMESPACE, INSTRUCTION_NAMESPACE};
use crate::utils::{to_pascal_case, to_snake_case};

fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{}:{}", namespace, name);
    let mut hasher = Sha256::new();
    hasher.update(preimage.as_bytes());
    let hash = hasher.finalize();

    let mut result = [0u8; 8];
    result.copy_from_slice(&hash[..8]);
    result
}

/// Discriminator prefixed to instruction data. The namespace uses the
/// snake_case method name, regardless of how the schema spells it.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    discriminator(INSTRUCTION_NAMESPACE, &to_snake_case(name))
}

/// Discriminator stored in the first 8 bytes of account data. The namespace
/// uses the PascalCase struct name.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    discriminator(ACCOUNT_NAMESPACE, &to_pascal_case(name))
}
