use std::str::FromStr;

use clap::Parser;
use eyre::{eyre, Context, Result};
use solana_sdk::{
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, help = "Solana cluster URL")]
    pub cluster: Option<String>,
    #[arg(long, help = "Base58 private key of the fee payer")]
    pub private_key: Option<String>,
    #[arg(long, help = "Address of the deployed counter program")]
    pub program_id: Option<String>,
    #[arg(long, help = "Minimum payer balance to top up to via airdrop")]
    pub airdrop_lamports: Option<u64>,
}

/// Resolved harness settings. Environment variables take precedence over flags.
pub struct Config {
    pub cluster: String,
    pub payer: Keypair,
    pub program_id: Pubkey,
    pub airdrop_lamports: u64,
}

impl Config {
    pub fn resolve(args: Args) -> Result<Self> {
        let payer = parse_keypair(&get_private_key(args.private_key))?;
        Ok(Self {
            cluster: get_solana_cluster(args.cluster),
            payer,
            program_id: get_program_id(args.program_id)?,
            airdrop_lamports: get_airdrop_lamports(args.airdrop_lamports)?,
        })
    }
}

pub fn get_solana_cluster(cli_cluster: Option<String>) -> String {
    std::env::var("SOLANA_CLUSTER")
        .ok()
        .or(cli_cluster)
        .unwrap_or_else(|| "http://127.0.0.1:8899".to_string())
}

pub fn get_private_key(cli_key: Option<String>) -> String {
    std::env::var("COUNTER_PRIVATE_KEY")
        .ok()
        .or(cli_key)
        .unwrap_or_else(|| Keypair::new().to_base58_string())
}

pub fn get_program_id(cli_program_id: Option<String>) -> Result<Pubkey> {
    let program_id = std::env::var("COUNTER_PROGRAM_ID")
        .ok()
        .or(cli_program_id)
        .ok_or_else(|| {
            eyre!("COUNTER_PROGRAM_ID environment variable or --program-id argument must be provided")
        })?;
    Pubkey::from_str(program_id.trim())
        .wrap_err_with(|| format!("invalid program id {program_id:?}"))
}

pub fn get_airdrop_lamports(cli_lamports: Option<u64>) -> Result<u64> {
    match std::env::var("COUNTER_AIRDROP_LAMPORTS") {
        Ok(value) => value
            .trim()
            .parse()
            .wrap_err("COUNTER_AIRDROP_LAMPORTS must be an unsigned integer"),
        Err(_) => Ok(cli_lamports.unwrap_or(LAMPORTS_PER_SOL)),
    }
}

pub fn parse_keypair(private_key: &str) -> Result<Keypair> {
    let bytes = bs58::decode(private_key.trim())
        .into_vec()
        .wrap_err("private key is not valid base58")?;
    let payer = Keypair::from_bytes(&bytes).map_err(|e| eyre!("invalid private key: {e}"))?;
    tracing::debug!(payer = %payer.pubkey(), "Loaded payer keypair");
    Ok(payer)
}
