use std::time::Duration;

use async_trait::async_trait;
use counter_program::{instruction, CounterInstruction, CounterAccount};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use tracing::{debug, info};

use crate::error::HarnessError;

const AIRDROP_POLL_INTERVAL: Duration = Duration::from_millis(500);
const AIRDROP_MAX_POLLS: usize = 60;

/// Raw view of an account as the ledger reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub data: Vec<u8>,
    pub owner: Pubkey,
    pub lamports: u64,
}

/// The request/response surface the harness needs from a ledger.
///
/// Every call completes (or fails) before returning; callers serialize
/// their steps so each counter has a single writer.
#[async_trait]
pub trait CounterLedger: Send {
    fn program_id(&self) -> Pubkey;

    /// Allocate a zeroed, program-owned counter account at `counter`'s address.
    async fn create_counter(&mut self, counter: &Keypair) -> Result<(), HarnessError>;

    async fn submit(
        &mut self,
        counter: &Pubkey,
        instruction: CounterInstruction,
    ) -> Result<(), HarnessError>;

    async fn read_account(&mut self, account: &Pubkey) -> Result<AccountSnapshot, HarnessError>;
}

pub struct RpcLedger {
    client: RpcClient,
    payer: Keypair,
    program_id: Pubkey,
}

impl RpcLedger {
    pub fn new(cluster_url: &str, payer: Keypair, program_id: Pubkey) -> Self {
        let client =
            RpcClient::new_with_commitment(cluster_url.to_string(), CommitmentConfig::confirmed());
        Self {
            client,
            payer,
            program_id,
        }
    }

    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// Top the payer up to `min_lamports` with an airdrop and wait until it lands.
    pub async fn ensure_funded(&self, min_lamports: u64) -> Result<u64, HarnessError> {
        let payer = self.payer.pubkey();
        let balance = self.client.get_balance(&payer).await?;
        if balance >= min_lamports {
            debug!(%payer, balance, "Payer already funded");
            return Ok(balance);
        }

        let signature = self
            .client
            .request_airdrop(&payer, min_lamports - balance)
            .await?;
        info!(%payer, %signature, lamports = min_lamports - balance, "Airdrop requested");

        for _ in 0..AIRDROP_MAX_POLLS {
            if self.client.confirm_transaction(&signature).await? {
                let balance = self.client.get_balance(&payer).await?;
                if balance >= min_lamports {
                    info!(%payer, balance, "Payer funded");
                    return Ok(balance);
                }
            }
            tokio::time::sleep(AIRDROP_POLL_INTERVAL).await;
        }

        Err(HarnessError::Funding {
            payer,
            balance: self.client.get_balance(&payer).await?,
            required: min_lamports,
        })
    }

    async fn send(
        &self,
        instructions: &[Instruction],
        extra_signer: Option<&Keypair>,
    ) -> Result<Signature, HarnessError> {
        let blockhash = self.client.get_latest_blockhash().await?;
        let mut signers = vec![&self.payer];
        signers.extend(extra_signer);
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.payer.pubkey()),
            signers.as_slice(),
            blockhash,
        );
        self.client
            .send_and_confirm_transaction(&tx)
            .await
            .map_err(HarnessError::from_client)
    }
}

#[async_trait]
impl CounterLedger for RpcLedger {
    fn program_id(&self) -> Pubkey {
        self.program_id
    }

    async fn create_counter(&mut self, counter: &Keypair) -> Result<(), HarnessError> {
        let lamports = self
            .client
            .get_minimum_balance_for_rent_exemption(CounterAccount::LEN)
            .await?;
        let ix = instruction::create_counter_account(
            &self.payer.pubkey(),
            &counter.pubkey(),
            lamports,
            &self.program_id,
        );
        let signature = self.send(&[ix], Some(counter)).await?;
        info!(counter = %counter.pubkey(), %signature, lamports, "Counter account created");
        Ok(())
    }

    async fn submit(
        &mut self,
        counter: &Pubkey,
        instruction: CounterInstruction,
    ) -> Result<(), HarnessError> {
        let ix = instruction::counter_instruction(&self.program_id, counter, instruction);
        let signature = self.send(&[ix], None).await?;
        debug!(%counter, ?instruction, %signature, "Instruction confirmed");
        Ok(())
    }

    async fn read_account(&mut self, account: &Pubkey) -> Result<AccountSnapshot, HarnessError> {
        let response = self
            .client
            .get_account_with_commitment(account, self.client.commitment())
            .await?;
        let account_data = response
            .value
            .ok_or(HarnessError::AccountNotFound(*account))?;
        Ok(AccountSnapshot {
            data: account_data.data,
            owner: account_data.owner,
            lamports: account_data.lamports,
        })
    }
}
