#![allow(dead_code)]

use counter_program::state::CounterAccount;
use solana_program_test::{processor, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};

pub const PROGRAM: Pubkey = counter_program::ID;

pub fn program_test() -> ProgramTest {
    let mut program_test = ProgramTest::new(
        "counter_program",
        PROGRAM,
        processor!(counter_program::entrypoint::process_instruction),
    );
    program_test.prefer_bpf(false);
    program_test
}

pub async fn start() -> ProgramTestContext {
    program_test().start_with_context().await
}

/// Create a fresh, rent-exempt counter account owned by the program.
pub async fn create_counter(context: &mut ProgramTestContext) -> Keypair {
    let counter = Keypair::new();
    let rent = context.banks_client.get_rent().await.unwrap();
    let ix = counter_program::instruction::create_counter_account(
        &context.payer.pubkey(),
        &counter.pubkey(),
        rent.minimum_balance(CounterAccount::LEN),
        &PROGRAM,
    );
    let blockhash = context.get_new_latest_blockhash().await.unwrap();
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&context.payer.pubkey()),
        &[&context.payer, &counter],
        blockhash,
    );
    context.banks_client.process_transaction(tx).await.unwrap();
    counter
}

/// Send `ix` signed by the payer only, on a fresh blockhash so repeated
/// identical instructions are not deduplicated.
pub async fn submit(
    context: &mut ProgramTestContext,
    ix: Instruction,
) -> Result<(), BanksClientError> {
    let blockhash = context.get_new_latest_blockhash().await.unwrap();
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&context.payer.pubkey()),
        &[&context.payer],
        blockhash,
    );
    context.banks_client.process_transaction(tx).await
}

pub async fn read_data(context: &mut ProgramTestContext, counter: Pubkey) -> Vec<u8> {
    context
        .banks_client
        .get_account(counter)
        .await
        .unwrap()
        .expect("counter account must exist")
        .data
}

pub async fn read_count(context: &mut ProgramTestContext, counter: Pubkey) -> u32 {
    let data = read_data(context, counter).await;
    CounterAccount::unpack(&data).unwrap().count
}

pub fn custom_error(code: u32) -> TransactionError {
    TransactionError::InstructionError(0, InstructionError::Custom(code))
}
