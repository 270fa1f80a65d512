use anyhow::{anyhow, Context, Result};
use env_logger::Builder;
use log::LevelFilter;
use solana_keypair::{read_keypair_file, Keypair};
use solana_marketplace_client::constants::marketplace::explain_rejection;
use solana_marketplace_client::errors::{ClientError, TransportError};
use solana_marketplace_client::schema::{loader, marketplace, SchemaRegistry};
use solana_marketplace_client::{
    connect_with_schema, ClientResult, NftAccounts, PaymentMethod, VERSION,
};
use solana_pubkey::Pubkey;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

// Simple CLI without clap
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap()
                    .as_secs(),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        println!("Solana Marketplace Client v{}", VERSION);
        return Ok(());
    }

    if args.len() < 2 {
        print_usage(&args[0]);
        return Ok(());
    }

    let command = args[1].clone();

    // Parse options and positional arguments after the command
    let mut cluster = std::env::var("MARKETPLACE_RPC_URL")
        .unwrap_or_else(|_| "https://api.devnet.solana.com".to_string());
    let mut program: Option<String> = std::env::var("MARKETPLACE_PROGRAM_ID").ok();
    let mut keypair_path: Option<PathBuf> = std::env::var("SOLANA_KEYPAIR").ok().map(PathBuf::from);
    let mut schema_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut token_mint: Option<String> = None;
    let mut amount: Option<u64> = None;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--cluster" | "-c" => {
                cluster = option_value(&args, i, "--cluster")?;
                i += 2;
            }
            "--program" | "-p" => {
                program = Some(option_value(&args, i, "--program")?);
                i += 2;
            }
            "--keypair" | "-k" => {
                keypair_path = Some(PathBuf::from(option_value(&args, i, "--keypair")?));
                i += 2;
            }
            "--schema" => {
                schema_path = Some(PathBuf::from(option_value(&args, i, "--schema")?));
                i += 2;
            }
            "--output" | "-o" => {
                output_path = Some(PathBuf::from(option_value(&args, i, "--output")?));
                i += 2;
            }
            "--token-mint" => {
                token_mint = Some(option_value(&args, i, "--token-mint")?);
                i += 2;
            }
            "--amount" => {
                let raw = option_value(&args, i, "--amount")?;
                amount = Some(raw.parse().with_context(|| format!("invalid amount: {raw}"))?);
                i += 2;
            }
            other if other.starts_with('-') => {
                println!("Unknown option: {}", other);
                i += 1;
            }
            _ => {
                positional.push(args[i].clone());
                i += 1;
            }
        }
    }

    let schema = match &schema_path {
        Some(path) => loader::load_schema(path)?,
        None => marketplace::schema(),
    };

    // The schema command needs no connection
    if command == "schema" {
        if let Some(path) = output_path {
            loader::save_schema(&schema, &path)?;
            println!("Saved schema to: {}", path.display());
        } else {
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        return Ok(());
    }

    let program_id = program
        .or_else(|| schema.metadata.as_ref().map(|m| m.address.clone()))
        .ok_or_else(|| anyhow!("no program id: pass --program or set MARKETPLACE_PROGRAM_ID"))?;
    let program_id = Pubkey::from_str(&program_id)
        .with_context(|| format!("invalid program id: {program_id}"))?;

    let registry = SchemaRegistry::new(schema);
    let client = connect_with_schema(&cluster, program_id, registry)
        .await
        .map_err(|e| anyhow!(e.to_string()))?;

    let outcome = match command.as_str() {
        "fetch" => {
            let address = pubkey_arg(&positional, 0, "METADATA")?;
            match client.fetch_account(&address, "nftMetadata").await {
                Ok(value) => {
                    println!("{}", serde_json::to_string_pretty(&value)?);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        "initialize" => {
            let authority = load_keypair(keypair_path)?;
            report(client.initialize(&authority).await)
        }
        "mint" => {
            let nft = nft_accounts(&positional)?;
            let uri = positional_arg(&positional, 3, "URI")?;
            let authority = load_keypair(keypair_path)?;
            report(client.mint_nft(&nft, &authority, &uri).await)
        }
        "batch-mint" => {
            let nft = nft_accounts(&positional)?;
            if positional.len() < 4 {
                return Err(anyhow!("batch-mint needs at least one URI"));
            }
            let uris: Vec<String> = positional[3..].to_vec();
            let authority = load_keypair(keypair_path)?;
            report(client.batch_mint_nfts(&nft, &authority, &uris).await)
        }
        "update" => {
            let metadata = pubkey_arg(&positional, 0, "METADATA")?;
            let uri = positional_arg(&positional, 1, "URI")?;
            let authority = load_keypair(keypair_path)?;
            report(client.update_metadata(&metadata, &authority, &uri).await)
        }
        "transfer" => {
            let metadata = pubkey_arg(&positional, 0, "METADATA")?;
            let new_owner = pubkey_arg(&positional, 1, "NEW_OWNER")?;
            let authority = load_keypair(keypair_path)?;
            report(client.transfer_nft(&metadata, &authority, &new_owner).await)
        }
        "burn" => {
            let nft = nft_accounts(&positional)?;
            let authority = load_keypair(keypair_path)?;
            report(client.burn_nft(&nft, &authority).await)
        }
        "list" => {
            let metadata = pubkey_arg(&positional, 0, "METADATA")?;
            let price: u64 = positional_arg(&positional, 1, "PRICE")?
                .parse()
                .context("invalid price")?;
            let authority = load_keypair(keypair_path)?;
            report(client.list_nft_for_sale(&metadata, &authority, price).await)
        }
        "purchase" => {
            let metadata = pubkey_arg(&positional, 0, "METADATA")?;
            let seller = pubkey_arg(&positional, 1, "SELLER")?;
            let payment = match (token_mint, amount) {
                (None, None) => PaymentMethod::Sol,
                (Some(mint), Some(amount)) => PaymentMethod::SplToken {
                    token_mint: Pubkey::from_str(&mint).context("invalid token mint")?,
                    amount,
                },
                _ => return Err(anyhow!("--token-mint and --amount must be given together")),
            };
            let buyer = load_keypair(keypair_path)?;
            match client.purchase_nft(&metadata, &buyer, &seller, &payment).await {
                Ok(confirmation) => {
                    println!("Purchase confirmed: {}", confirmation.signature);
                    println!("New owner: {}", confirmation.metadata.owner);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        other => {
            println!("Unknown command: {}", other);
            print_usage(&args[0]);
            return Ok(());
        }
    };

    if let Err(e) = outcome {
        render_error(&e);
        return Err(anyhow!("{} failed", command));
    }

    Ok(())
}

fn print_usage(binary: &str) {
    println!("Solana Marketplace Client v{}", VERSION);
    println!("\nUsage:");
    println!("  {} <COMMAND> [ARGS] [OPTIONS]", binary);
    println!("\nCommands:");
    println!("  schema [--output PATH]                     Print or save the schema document");
    println!("  fetch <METADATA>                           Fetch and decode an NFT metadata account");
    println!("  initialize                                 Initialize the marketplace");
    println!("  mint <MINT> <TOKEN_ACCOUNT> <METADATA> <URI>");
    println!("  batch-mint <MINT> <TOKEN_ACCOUNT> <METADATA> <URI>...");
    println!("  update <METADATA> <URI>                    Replace the metadata URI");
    println!("  transfer <METADATA> <NEW_OWNER>            Transfer ownership");
    println!("  burn <MINT> <TOKEN_ACCOUNT> <METADATA>     Burn the NFT");
    println!("  list <METADATA> <PRICE>                    List for sale (price in lamports)");
    println!("  purchase <METADATA> <SELLER> [--token-mint MINT --amount N]");
    println!("\nOptions:");
    println!("  --cluster, -c URL    RPC endpoint (default: devnet, or MARKETPLACE_RPC_URL)");
    println!("  --program, -p ID     Program id (or MARKETPLACE_PROGRAM_ID / schema metadata)");
    println!("  --keypair, -k PATH   Signing keypair (default: ~/.config/solana/id.json)");
    println!("  --schema PATH        Load a schema document instead of the built-in one");
    println!("  --version, -v        Show version information");
}

fn option_value(args: &[String], i: usize, name: &str) -> Result<String> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| anyhow!("Missing value for {}", name))
}

fn positional_arg(positional: &[String], index: usize, name: &str) -> Result<String> {
    positional
        .get(index)
        .cloned()
        .ok_or_else(|| anyhow!("Missing argument: {}", name))
}

fn pubkey_arg(positional: &[String], index: usize, name: &str) -> Result<Pubkey> {
    let raw = positional_arg(positional, index, name)?;
    Pubkey::from_str(&raw).with_context(|| format!("invalid {}: {}", name, raw))
}

fn nft_accounts(positional: &[String]) -> Result<NftAccounts> {
    Ok(NftAccounts {
        mint: pubkey_arg(positional, 0, "MINT")?,
        token_account: pubkey_arg(positional, 1, "TOKEN_ACCOUNT")?,
        nft_metadata: pubkey_arg(positional, 2, "METADATA")?,
    })
}

fn load_keypair(path: Option<PathBuf>) -> Result<Keypair> {
    let path = match path {
        Some(path) => path,
        None => dirs::home_dir()
            .ok_or_else(|| anyhow!("could not determine home directory"))?
            .join(".config")
            .join("solana")
            .join("id.json"),
    };
    read_keypair_file(&path)
        .map_err(|e| anyhow!("Failed to read keypair {}: {}", path.display(), e))
}

fn report(result: ClientResult<solana_signature::Signature>) -> ClientResult<()> {
    let signature = result?;
    println!("Confirmed: {}", signature);
    Ok(())
}

fn render_error(error: &ClientError) {
    match error {
        ClientError::Transport(TransportError::Rejected(reason)) => {
            println!("Rejected by program: {}", reason);
            if let Some(explained) = explain_rejection(reason) {
                println!("  ({})", explained);
            }
        }
        other => println!("Error: {}", other),
    }
}
