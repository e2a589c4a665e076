use counter_program::instruction::increment;
use counter_program::CounterError;
use solana_program_test::tokio;
use solana_sdk::{
    account::Account,
    instruction::{AccountMeta, Instruction, InstructionError},
    pubkey::Pubkey,
    signature::Signer,
    system_program,
    transaction::TransactionError,
};

mod utils;

async fn seeded_counter(
    context: &mut solana_program_test::ProgramTestContext,
    count: u32,
) -> Pubkey {
    let counter = utils::create_counter(context).await.pubkey();
    utils::submit(context, increment(&utils::PROGRAM, &counter, count))
        .await
        .unwrap();
    counter
}

#[tokio::test]
async fn short_instruction_is_malformed() {
    let mut context = utils::start().await;
    let counter = seeded_counter(&mut context, 9).await;
    let before = utils::read_data(&mut context, counter).await;

    let ix = Instruction::new_with_bytes(
        utils::PROGRAM,
        &[0, 1, 0],
        vec![AccountMeta::new(counter, false)],
    );
    let err = utils::submit(&mut context, ix).await.unwrap_err().unwrap();

    assert_eq!(
        err,
        utils::custom_error(CounterError::MalformedInstruction { actual: 3 }.code())
    );
    assert_eq!(utils::read_data(&mut context, counter).await, before);
}

#[tokio::test]
async fn unknown_discriminant_is_rejected() {
    let mut context = utils::start().await;
    let counter = seeded_counter(&mut context, 9).await;
    let before = utils::read_data(&mut context, counter).await;

    let ix = Instruction::new_with_bytes(
        utils::PROGRAM,
        &[2, 1, 0, 0, 0],
        vec![AccountMeta::new(counter, false)],
    );
    let err = utils::submit(&mut context, ix).await.unwrap_err().unwrap();

    assert_eq!(
        err,
        utils::custom_error(CounterError::UnknownDiscriminant(2).code())
    );
    assert_eq!(utils::read_data(&mut context, counter).await, before);
}

#[tokio::test]
async fn foreign_account_is_rejected() {
    let foreign = Pubkey::new_unique();
    let mut program_test = utils::program_test();
    program_test.add_account(
        foreign,
        Account {
            lamports: 1_000_000,
            data: vec![0; 4],
            owner: system_program::id(),
            executable: false,
            rent_epoch: 0,
        },
    );
    let mut context = program_test.start_with_context().await;

    let err = utils::submit(&mut context, increment(&utils::PROGRAM, &foreign, 1))
        .await
        .unwrap_err()
        .unwrap();

    assert_eq!(
        err,
        TransactionError::InstructionError(0, InstructionError::IncorrectProgramId)
    );
}

#[tokio::test]
async fn readonly_counter_is_rejected() {
    let mut context = utils::start().await;
    let counter = seeded_counter(&mut context, 9).await;

    let ix = Instruction::new_with_bytes(
        utils::PROGRAM,
        &[0, 1, 0, 0, 0],
        vec![AccountMeta::new_readonly(counter, false)],
    );
    let err = utils::submit(&mut context, ix).await.unwrap_err().unwrap();

    assert_eq!(
        err,
        TransactionError::InstructionError(0, InstructionError::InvalidAccountData)
    );
    assert_eq!(utils::read_count(&mut context, counter).await, 9);
}

#[tokio::test]
async fn missing_counter_account_is_rejected() {
    let mut context = utils::start().await;

    let ix = Instruction::new_with_bytes(utils::PROGRAM, &[0, 1, 0, 0, 0], vec![]);
    let err = utils::submit(&mut context, ix).await.unwrap_err().unwrap();

    assert_eq!(
        err,
        TransactionError::InstructionError(0, InstructionError::NotEnoughAccountKeys)
    );
}
