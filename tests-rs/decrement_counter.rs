use counter_program::instruction::{counter_instruction, decrement, increment};
use counter_program::CounterInstruction::{Decrement, Increment};
use solana_program_test::tokio;
use solana_sdk::signature::Signer;

mod utils;

#[tokio::test]
async fn decrement_counter() {
    let mut context = utils::start().await;
    let counter = utils::create_counter(&mut context).await.pubkey();

    utils::submit(&mut context, increment(&utils::PROGRAM, &counter, 1_000_005))
        .await
        .unwrap();
    utils::submit(&mut context, decrement(&utils::PROGRAM, &counter, 3))
        .await
        .unwrap();

    assert_eq!(utils::read_count(&mut context, counter).await, 1_000_002);
}

#[tokio::test]
async fn sequential_operations() {
    let mut context = utils::start().await;
    let counter = utils::create_counter(&mut context).await.pubkey();

    let start = 40;
    utils::submit(&mut context, increment(&utils::PROGRAM, &counter, start))
        .await
        .unwrap();

    for (ix, expected) in [
        (Increment(100), start + 100),
        (Decrement(25), start + 75),
        (Increment(75), start + 150),
        (Decrement(50), start + 100),
        (Increment(10), start + 110),
    ] {
        utils::submit(&mut context, counter_instruction(&utils::PROGRAM, &counter, ix))
            .await
            .unwrap();
        assert_eq!(
            utils::read_count(&mut context, counter).await,
            expected,
            "after {ix:?}"
        );
    }
}

#[tokio::test]
async fn decrement_below_zero_wraps() {
    let mut context = utils::start().await;
    let counter = utils::create_counter(&mut context).await.pubkey();

    utils::submit(&mut context, decrement(&utils::PROGRAM, &counter, 1))
        .await
        .unwrap();

    assert_eq!(utils::read_count(&mut context, counter).await, u32::MAX);
}
