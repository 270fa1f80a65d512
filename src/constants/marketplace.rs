//! Marketplace-program-specific constants

use std::collections::HashMap;

/// Known error codes of the marketplace program.
///
/// Custom program errors start at 6000 (Anchor convention); the table maps
/// each code to its name and message so rejection reasons can be annotated
/// for display.
pub fn error_codes() -> HashMap<u32, (&'static str, &'static str)> {
    let mut codes = HashMap::new();

    codes.insert(
        6000,
        ("InvalidMetadataUri", "The provided metadata URI is invalid."),
    );
    codes.insert(6001, ("InvalidPrice", "The provided price is invalid."));
    codes.insert(
        6002,
        ("InvalidBatchSize", "Batch size must be between 1 and 10."),
    );
    codes.insert(6003, ("NotForSale", "This NFT is not for sale."));
    codes.insert(
        6004,
        (
            "OwnershipError",
            "The operation could not be completed due to ownership issues.",
        ),
    );

    codes
}

/// Annotate a rejection reason with the name and message of any known
/// program error code it mentions (`custom program error: 0x1772` style).
/// Returns `None` when the reason carries no recognizable code.
pub fn explain_rejection(reason: &str) -> Option<String> {
    let hex = reason.split("0x").nth(1)?;
    let digits: String = hex.chars().take_while(|c| c.is_ascii_hexdigit()).collect();
    let code = u32::from_str_radix(&digits, 16).ok()?;
    let codes = error_codes();
    let (name, msg) = codes.get(&code)?;
    Some(format!("{}: {}", name, msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explains_known_codes() {
        let explained = explain_rejection("custom program error: 0x1773").unwrap();
        assert!(explained.starts_with("NotForSale"));
    }

    #[test]
    fn ignores_unknown_codes_and_plain_reasons() {
        assert!(explain_rejection("custom program error: 0xffff").is_none());
        assert!(explain_rejection("insufficient funds").is_none());
    }
}
