use counter_program::instruction::increment;
use solana_program_test::tokio;
use solana_sdk::signature::Signer;

mod utils;

#[tokio::test]
async fn create_counter_starts_at_zero() {
    let mut context = utils::start().await;
    let counter = utils::create_counter(&mut context).await.pubkey();

    let account = context
        .banks_client
        .get_account(counter)
        .await
        .unwrap()
        .expect("counter account must exist");

    assert_eq!(account.owner, utils::PROGRAM);
    assert_eq!(account.data, vec![0, 0, 0, 0]);
}

#[tokio::test]
async fn increment_counter() {
    let mut context = utils::start().await;
    let counter = utils::create_counter(&mut context).await.pubkey();

    utils::submit(&mut context, increment(&utils::PROGRAM, &counter, 5))
        .await
        .unwrap();
    assert_eq!(utils::read_count(&mut context, counter).await, 5);

    utils::submit(&mut context, increment(&utils::PROGRAM, &counter, 1_000_000))
        .await
        .unwrap();
    assert_eq!(utils::read_count(&mut context, counter).await, 1_000_005);
}

#[tokio::test]
async fn increment_by_zero_succeeds_without_change() {
    let mut context = utils::start().await;
    let counter = utils::create_counter(&mut context).await.pubkey();

    utils::submit(&mut context, increment(&utils::PROGRAM, &counter, 7))
        .await
        .unwrap();
    utils::submit(&mut context, increment(&utils::PROGRAM, &counter, 0))
        .await
        .unwrap();

    assert_eq!(utils::read_count(&mut context, counter).await, 7);
}

#[tokio::test]
async fn increment_wraps_at_u32_max() {
    let mut context = utils::start().await;
    let counter = utils::create_counter(&mut context).await.pubkey();

    utils::submit(&mut context, increment(&utils::PROGRAM, &counter, u32::MAX))
        .await
        .unwrap();
    utils::submit(&mut context, increment(&utils::PROGRAM, &counter, 2))
        .await
        .unwrap();

    assert_eq!(utils::read_count(&mut context, counter).await, 1);
}
