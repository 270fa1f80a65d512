//! Constants used throughout the client

pub mod marketplace;

use solana_pubkey::Pubkey;

/// Discriminator namespaces (Anchor convention)
pub mod discriminators {
    /// Namespace for instruction discriminators
    pub const INSTRUCTION_NAMESPACE: &str = "global";
    /// Namespace for account discriminators
    pub const ACCOUNT_NAMESPACE: &str = "account";
}

/// SPL token program, referenced by the mint/burn instructions
pub const TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
