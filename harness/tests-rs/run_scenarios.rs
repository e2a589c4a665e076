use async_trait::async_trait;
use counter_harness::{
    scenario::check_counter, AccountSnapshot, CounterLedger, HarnessError, Scenario,
};
use counter_program::{instruction, CounterAccount, CounterInstruction};
use solana_program_test::{
    processor, tokio, BanksClientError, ProgramTest, ProgramTestContext,
};
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};

/// `CounterLedger` backed by an in-process bank.
struct BanksLedger {
    context: ProgramTestContext,
}

impl BanksLedger {
    async fn start() -> Self {
        let mut program_test = ProgramTest::new(
            "counter_program",
            counter_program::ID,
            processor!(counter_program::entrypoint::process_instruction),
        );
        program_test.prefer_bpf(false);
        Self {
            context: program_test.start_with_context().await,
        }
    }

    async fn send(
        &mut self,
        instructions: &[Instruction],
        extra_signer: Option<&Keypair>,
    ) -> Result<(), HarnessError> {
        let blockhash = self
            .context
            .get_new_latest_blockhash()
            .await
            .expect("blockhash");
        let mut signers = vec![&self.context.payer];
        signers.extend(extra_signer);
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.context.payer.pubkey()),
            signers.as_slice(),
            blockhash,
        );
        self.context
            .banks_client
            .process_transaction(tx)
            .await
            .map_err(rejected)
    }
}

fn rejected(err: BanksClientError) -> HarnessError {
    HarnessError::Rejected(err.unwrap())
}

#[async_trait]
impl CounterLedger for BanksLedger {
    fn program_id(&self) -> Pubkey {
        counter_program::ID
    }

    async fn create_counter(&mut self, counter: &Keypair) -> Result<(), HarnessError> {
        let rent = self.context.banks_client.get_rent().await.expect("rent");
        let ix = instruction::create_counter_account(
            &self.context.payer.pubkey(),
            &counter.pubkey(),
            rent.minimum_balance(CounterAccount::LEN),
            &counter_program::ID,
        );
        self.send(&[ix], Some(counter)).await
    }

    async fn submit(
        &mut self,
        counter: &Pubkey,
        instruction: CounterInstruction,
    ) -> Result<(), HarnessError> {
        let ix = instruction::counter_instruction(&counter_program::ID, counter, instruction);
        self.send(&[ix], None).await
    }

    async fn read_account(&mut self, account: &Pubkey) -> Result<AccountSnapshot, HarnessError> {
        let account_data = self
            .context
            .banks_client
            .get_account(*account)
            .await
            .expect("banks client")
            .ok_or(HarnessError::AccountNotFound(*account))?;
        Ok(AccountSnapshot {
            data: account_data.data,
            owner: account_data.owner,
            lamports: account_data.lamports,
        })
    }
}

#[tokio::test]
async fn scenarios_run_against_program() {
    let mut ledger = BanksLedger::start().await;
    let counter = Keypair::new();
    ledger.create_counter(&counter).await.unwrap();
    let counter = counter.pubkey();

    let snapshot = ledger.read_account(&counter).await.unwrap();
    assert_eq!(snapshot.data.len(), CounterAccount::LEN);
    assert!(snapshot.lamports > 0);
    check_counter(&mut ledger, &counter, 0).await.unwrap();

    let after_smoke = Scenario::smoke().run(&mut ledger, &counter, 0).await.unwrap();
    assert_eq!(after_smoke, 1_000_002);

    let after_sequential = Scenario::sequential()
        .run(&mut ledger, &counter, after_smoke)
        .await
        .unwrap();
    assert_eq!(after_sequential, 1_000_112);
}

#[tokio::test]
async fn wrong_start_value_is_reported() {
    let mut ledger = BanksLedger::start().await;
    let counter = Keypair::new();
    ledger.create_counter(&counter).await.unwrap();

    let err = Scenario::sequential()
        .run(&mut ledger, &counter.pubkey(), 7)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HarnessError::Mismatch {
            expected: 107,
            actual: 100,
            ..
        }
    ));
}

#[tokio::test]
async fn missing_counter_is_reported() {
    let mut ledger = BanksLedger::start().await;
    let counter = Pubkey::new_unique();

    let err = check_counter(&mut ledger, &counter, 0).await.unwrap_err();
    assert!(matches!(err, HarnessError::AccountNotFound(key) if key == counter));
}

#[tokio::test]
async fn uncreated_counter_is_rejected_by_program() {
    let mut ledger = BanksLedger::start().await;
    let counter = Pubkey::new_unique();

    // An address with no account is system-owned with no data, so the owner check fails first.
    let err = ledger
        .submit(&counter, CounterInstruction::Increment(1))
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::Rejected(_)));
    assert_eq!(err.custom_code(), None);
}
