use clap::Parser;
use counter_harness::{
    args::{Args, Config},
    scenario::check_counter,
    CounterLedger, RpcLedger, Scenario,
};
use eyre::{Context, Result};
use solana_sdk::signature::{Keypair, Signer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::resolve(Args::parse())?;
    info!(
        payer = %config.payer.pubkey(),
        cluster = %config.cluster,
        program_id = %config.program_id,
        "Harness configured"
    );

    let mut ledger = RpcLedger::new(&config.cluster, config.payer, config.program_id);
    ledger
        .ensure_funded(config.airdrop_lamports)
        .await
        .wrap_err("funding payer")?;

    let counter = Keypair::new();
    ledger
        .create_counter(&counter)
        .await
        .wrap_err("creating counter account")?;
    let counter = counter.pubkey();
    check_counter(&mut ledger, &counter, 0)
        .await
        .wrap_err("checking fresh counter")?;

    let mut expected = 0;
    for scenario in [Scenario::smoke(), Scenario::sequential()] {
        expected = scenario
            .run(&mut ledger, &counter, expected)
            .await
            .wrap_err_with(|| format!("scenario {}", scenario.name))?;
    }

    info!(%counter, count = expected, "All scenarios passed");
    Ok(())
}
