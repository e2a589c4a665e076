// instruction.rs
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_instruction,
};

use crate::error::CounterError;
use crate::state::CounterAccount;

/// A single requested change to a counter account.
///
/// Wire format: one discriminant byte followed by the amount as a little-endian u32.
/// The discriminant order is part of the deployed protocol; do not reorder variants.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterInstruction {
    Increment(u32),
    Decrement(u32),
}

impl CounterInstruction {
    pub const LEN: usize = 5;

    pub const INCREMENT: u8 = 0;
    pub const DECREMENT: u8 = 1;

    pub fn amount(&self) -> u32 {
        match *self {
            Self::Increment(amount) | Self::Decrement(amount) => amount,
        }
    }

    pub fn pack(&self) -> [u8; Self::LEN] {
        let tag = match self {
            Self::Increment(_) => Self::INCREMENT,
            Self::Decrement(_) => Self::DECREMENT,
        };
        let mut data = [0u8; Self::LEN];
        data[0] = tag;
        data[1..].copy_from_slice(&self.amount().to_le_bytes());
        data
    }

    pub fn unpack(input: &[u8]) -> Result<Self, CounterError> {
        let (&tag, rest) = input
            .split_first()
            .ok_or(CounterError::MalformedInstruction { actual: 0 })?;

        // Tag first, then length: an unknown tag is a version mismatch even when short.
        if tag != Self::INCREMENT && tag != Self::DECREMENT {
            return Err(CounterError::UnknownDiscriminant(tag));
        }
        let amount = <[u8; 4]>::try_from(rest)
            .map(u32::from_le_bytes)
            .map_err(|_| CounterError::MalformedInstruction {
                actual: input.len(),
            })?;

        Ok(match tag {
            Self::INCREMENT => Self::Increment(amount),
            _ => Self::Decrement(amount),
        })
    }
}

/// Build an instruction that adds `amount` to `counter`.
pub fn increment(program_id: &Pubkey, counter: &Pubkey, amount: u32) -> Instruction {
    counter_instruction(program_id, counter, CounterInstruction::Increment(amount))
}

/// Build an instruction that subtracts `amount` from `counter`.
pub fn decrement(program_id: &Pubkey, counter: &Pubkey, amount: u32) -> Instruction {
    counter_instruction(program_id, counter, CounterInstruction::Decrement(amount))
}

pub fn counter_instruction(
    program_id: &Pubkey,
    counter: &Pubkey,
    instruction: CounterInstruction,
) -> Instruction {
    Instruction::new_with_bytes(
        *program_id,
        &instruction.pack(),
        vec![AccountMeta::new(*counter, false)],
    )
}

/// Allocate a zeroed counter account owned by `program_id`. Both `payer` and
/// `counter` must sign the transaction carrying this instruction.
pub fn create_counter_account(
    payer: &Pubkey,
    counter: &Pubkey,
    lamports: u64,
    program_id: &Pubkey,
) -> Instruction {
    system_instruction::create_account(
        payer,
        counter,
        lamports,
        CounterAccount::LEN as u64,
        program_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn discriminants_are_pinned() {
        assert_eq!(
            CounterInstruction::Increment(5).pack(),
            [0, 5, 0, 0, 0]
        );
        assert_eq!(
            CounterInstruction::Decrement(3).pack(),
            [1, 3, 0, 0, 0]
        );
        assert_eq!(
            CounterInstruction::Increment(1_000_000).pack(),
            [0, 0x40, 0x42, 0x0f, 0x00]
        );
    }

    #[test]
    fn matches_borsh_layout() {
        for ix in [
            CounterInstruction::Increment(0),
            CounterInstruction::Increment(u32::MAX),
            CounterInstruction::Decrement(25),
        ] {
            assert_eq!(borsh::to_vec(&ix).unwrap(), ix.pack().to_vec());
            assert_eq!(CounterInstruction::try_from_slice(&ix.pack()).unwrap(), ix);
        }
    }

    #[test]
    fn short_buffer_is_malformed() {
        assert_eq!(
            CounterInstruction::unpack(&[0, 1, 2]),
            Err(CounterError::MalformedInstruction { actual: 3 })
        );
        assert_eq!(
            CounterInstruction::unpack(&[]),
            Err(CounterError::MalformedInstruction { actual: 0 })
        );
    }

    #[test]
    fn trailing_bytes_are_malformed() {
        assert_eq!(
            CounterInstruction::unpack(&[1, 1, 0, 0, 0, 0]),
            Err(CounterError::MalformedInstruction { actual: 6 })
        );
    }

    #[test]
    fn unknown_discriminant_is_surfaced() {
        assert_eq!(
            CounterInstruction::unpack(&[2, 0, 0, 0, 0]),
            Err(CounterError::UnknownDiscriminant(2))
        );
        assert_eq!(
            CounterInstruction::unpack(&[0xff]),
            Err(CounterError::UnknownDiscriminant(0xff))
        );
    }

    #[test]
    fn builders_target_counter_only() {
        let program_id = Pubkey::new_unique();
        let counter = Pubkey::new_unique();

        let ix = decrement(&program_id, &counter, 50);
        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.data, vec![1, 50, 0, 0, 0]);
        assert_eq!(ix.accounts, vec![AccountMeta::new(counter, false)]);

        let ix = increment(&program_id, &counter, 10);
        assert_eq!(ix.data, vec![0, 10, 0, 0, 0]);
    }

    proptest! {
        #[test]
        fn unpack_inverts_pack(increment in any::<bool>(), amount in any::<u32>()) {
            let ix = if increment {
                CounterInstruction::Increment(amount)
            } else {
                CounterInstruction::Decrement(amount)
            };
            prop_assert_eq!(CounterInstruction::unpack(&ix.pack()), Ok(ix));
        }

        #[test]
        fn increment_never_decodes_as_decrement(amount in any::<u32>()) {
            let decoded = CounterInstruction::unpack(&CounterInstruction::Increment(amount).pack());
            prop_assert_eq!(decoded, Ok(CounterInstruction::Increment(amount)));
        }

        #[test]
        fn tags_outside_protocol_are_rejected(tag in 2u8.., amount in any::<u32>()) {
            let mut data = CounterInstruction::Increment(amount).pack();
            data[0] = tag;
            prop_assert_eq!(
                CounterInstruction::unpack(&data),
                Err(CounterError::UnknownDiscriminant(tag))
            );
        }
    }
}
