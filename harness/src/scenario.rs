use counter_program::{
    apply, apply_with, ArithmeticPolicy, CounterAccount, CounterError, CounterInstruction,
};
use solana_sdk::pubkey::Pubkey;
use tracing::{info, warn};

use crate::error::HarnessError;
use crate::ledger::{AccountSnapshot, CounterLedger};

use CounterInstruction::{Decrement, Increment};

/// An ordered list of instructions applied to one counter account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub steps: Vec<CounterInstruction>,
}

impl Scenario {
    /// Small and large increments followed by a decrement, starting from a fresh counter.
    pub fn smoke() -> Self {
        Self {
            name: "smoke",
            steps: vec![Increment(5), Increment(1_000_000), Decrement(3)],
        }
    }

    /// Mixed steps whose running total never drops below the starting value.
    pub fn sequential() -> Self {
        Self {
            name: "sequential",
            steps: vec![
                Increment(100),
                Decrement(25),
                Increment(75),
                Decrement(50),
                Increment(10),
            ],
        }
    }

    pub fn expected_after(&self, start: u32) -> Result<u32, CounterError> {
        self.steps
            .iter()
            .try_fold(start, |count, ix| apply(count, *ix).map_err(CounterError::from))
    }

    /// Submit every step and check the ledger agrees after each one.
    ///
    /// `expected` is the count the account holds before the first step; the
    /// returned value is the count after the last.
    pub async fn run<L>(
        &self,
        ledger: &mut L,
        counter: &Pubkey,
        mut expected: u32,
    ) -> Result<u32, HarnessError>
    where
        L: CounterLedger + ?Sized,
    {
        info!(scenario = self.name, %counter, start = expected, "Running scenario");
        for (step, ix) in self.steps.iter().copied().enumerate() {
            let next = apply(expected, ix).map_err(CounterError::from)?;
            if let Err(fault) = apply_with(ArithmeticPolicy::Checked, expected, ix) {
                warn!(scenario = self.name, step, instruction = ?ix, %fault, "Counter wraps");
            }

            ledger.submit(counter, ix).await?;
            check_counter(ledger, counter, next).await?;

            info!(scenario = self.name, step, instruction = ?ix, count = next, "Step confirmed");
            expected = next;
        }
        Ok(expected)
    }
}

/// Read `counter` back from the ledger and compare it against `expected`.
pub async fn check_counter<L>(
    ledger: &mut L,
    counter: &Pubkey,
    expected: u32,
) -> Result<CounterAccount, HarnessError>
where
    L: CounterLedger + ?Sized,
{
    let snapshot = ledger.read_account(counter).await?;
    verify(counter, &snapshot, &ledger.program_id(), expected)
}

pub fn verify(
    counter: &Pubkey,
    snapshot: &AccountSnapshot,
    program_id: &Pubkey,
    expected: u32,
) -> Result<CounterAccount, HarnessError> {
    if snapshot.owner != *program_id {
        return Err(HarnessError::WrongOwner {
            account: *counter,
            expected: *program_id,
            actual: snapshot.owner,
        });
    }
    let account = CounterAccount::unpack(&snapshot.data)?;
    if account.count != expected {
        return Err(HarnessError::Mismatch {
            account: *counter,
            expected,
            actual: account.count,
        });
    }
    Ok(account)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use counter_program::processor::process_counter_data;
    use solana_sdk::signature::{Keypair, Signer};

    use super::*;

    /// Ledger that runs the program's account transition in memory.
    struct MemoryLedger {
        program_id: Pubkey,
        accounts: HashMap<Pubkey, AccountSnapshot>,
        drop_submissions: bool,
    }

    impl MemoryLedger {
        fn new() -> Self {
            Self {
                program_id: Pubkey::new_unique(),
                accounts: HashMap::new(),
                drop_submissions: false,
            }
        }
    }

    #[async_trait]
    impl CounterLedger for MemoryLedger {
        fn program_id(&self) -> Pubkey {
            self.program_id
        }

        async fn create_counter(&mut self, counter: &Keypair) -> Result<(), HarnessError> {
            self.accounts.insert(
                counter.pubkey(),
                AccountSnapshot {
                    data: vec![0; CounterAccount::LEN],
                    owner: self.program_id,
                    lamports: 1,
                },
            );
            Ok(())
        }

        async fn submit(
            &mut self,
            counter: &Pubkey,
            instruction: CounterInstruction,
        ) -> Result<(), HarnessError> {
            let account = self
                .accounts
                .get_mut(counter)
                .ok_or(HarnessError::AccountNotFound(*counter))?;
            if !self.drop_submissions {
                process_counter_data(&mut account.data, &instruction.pack())?;
            }
            Ok(())
        }

        async fn read_account(
            &mut self,
            account: &Pubkey,
        ) -> Result<AccountSnapshot, HarnessError> {
            self.accounts
                .get(account)
                .cloned()
                .ok_or(HarnessError::AccountNotFound(*account))
        }
    }

    #[test]
    fn expected_values_match_observed_runs() {
        assert_eq!(Scenario::smoke().expected_after(0), Ok(1_000_002));
        assert_eq!(Scenario::sequential().expected_after(1_000_002), Ok(1_000_112));
        assert_eq!(Scenario::sequential().expected_after(0), Ok(110));
    }

    #[tokio::test]
    async fn runs_thread_expected_value() {
        let mut ledger = MemoryLedger::new();
        let counter = Keypair::new();
        ledger.create_counter(&counter).await.unwrap();
        let counter = counter.pubkey();

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
    async fn lost_update_is_reported() {
        let mut ledger = MemoryLedger::new();
        ledger.drop_submissions = true;
        let counter = Keypair::new();
        ledger.create_counter(&counter).await.unwrap();

        let err = Scenario::smoke()
            .run(&mut ledger, &counter.pubkey(), 0)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            HarnessError::Mismatch {
                expected: 5,
                actual: 0,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn wrapping_step_is_expected_not_fatal() {
        let mut ledger = MemoryLedger::new();
        let counter = Keypair::new();
        ledger.create_counter(&counter).await.unwrap();

        let scenario = Scenario {
            name: "underflow",
            steps: vec![Decrement(1), Increment(2)],
        };
        let count = scenario.run(&mut ledger, &counter.pubkey(), 0).await.unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn verify_rejects_foreign_owner() {
        let counter = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();
        let snapshot = AccountSnapshot {
            data: CounterAccount::new(5).pack().to_vec(),
            owner: Pubkey::new_unique(),
            lamports: 1,
        };

        assert!(matches!(
            verify(&counter, &snapshot, &program_id, 5),
            Err(HarnessError::WrongOwner { .. })
        ));
    }

    #[test]
    fn verify_rejects_wrong_layout() {
        let counter = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();
        let snapshot = AccountSnapshot {
            data: vec![5, 0, 0, 0, 0, 0, 0, 0],
            owner: program_id,
            lamports: 1,
        };

        assert!(matches!(
            verify(&counter, &snapshot, &program_id, 5),
            Err(HarnessError::Counter(CounterError::MalformedAccount { actual: 8 }))
        ));
    }

    #[test]
    fn verify_accepts_matching_account() {
        let counter = Pubkey::new_unique();
        let program_id = Pubkey::new_unique();
        let snapshot = AccountSnapshot {
            data: CounterAccount::new(1_000_002).pack().to_vec(),
            owner: program_id,
            lamports: 1,
        };

        assert_eq!(
            verify(&counter, &snapshot, &program_id, 1_000_002).unwrap(),
            CounterAccount::new(1_000_002)
        );
    }
}
