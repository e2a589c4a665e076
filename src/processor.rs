use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::{
    error::{ArithmeticFault, CounterError},
    instruction::CounterInstruction,
    state::CounterAccount,
};

/// How the counter behaves when a step leaves the u32 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticPolicy {
    /// Modular arithmetic: the count is a 32-bit register.
    Wrapping,
    /// Reject the step with an `ArithmeticFault`.
    Checked,
}

impl ArithmeticPolicy {
    /// The policy deployed programs implement. Both directions wrap modulo 2^32.
    pub const PROTOCOL: Self = Self::Wrapping;
}

/// Compute the next count for `instruction` under the protocol policy.
///
/// Never fails under [`ArithmeticPolicy::PROTOCOL`]; the `Result` keeps the
/// signature shared with [`apply_with`].
pub fn apply(state: u32, instruction: CounterInstruction) -> Result<u32, ArithmeticFault> {
    apply_with(ArithmeticPolicy::PROTOCOL, state, instruction)
}

pub fn apply_with(
    policy: ArithmeticPolicy,
    state: u32,
    instruction: CounterInstruction,
) -> Result<u32, ArithmeticFault> {
    match (policy, instruction) {
        (ArithmeticPolicy::Wrapping, CounterInstruction::Increment(n)) => Ok(state.wrapping_add(n)),
        (ArithmeticPolicy::Wrapping, CounterInstruction::Decrement(n)) => Ok(state.wrapping_sub(n)),
        (ArithmeticPolicy::Checked, CounterInstruction::Increment(n)) => {
            state.checked_add(n).ok_or(ArithmeticFault::Overflow)
        }
        (ArithmeticPolicy::Checked, CounterInstruction::Decrement(n)) => {
            state.checked_sub(n).ok_or(ArithmeticFault::Underflow)
        }
    }
}

/// Apply raw instruction bytes to raw counter account bytes.
///
/// `data` is only written once the new count is known, so a rejected
/// instruction leaves the account exactly as it was.
pub fn process_counter_data(data: &mut [u8], instruction_data: &[u8]) -> Result<u32, CounterError> {
    let instruction = CounterInstruction::unpack(instruction_data)?;
    let counter = CounterAccount::unpack(data)?;

    let count = apply(counter.count, instruction)?;
    data.copy_from_slice(&CounterAccount::new(count).pack());

    Ok(count)
}

// program entrypoint's implementation
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let accounts_iter = &mut accounts.iter();
    let counter_account = next_account_info(accounts_iter)?;

    if counter_account.owner != program_id {
        msg!(
            "Counter account {} is owned by {}, expected {}",
            counter_account.key,
            counter_account.owner,
            program_id
        );
        return Err(ProgramError::IncorrectProgramId);
    }
    if !counter_account.is_writable {
        msg!("Counter account {} must be writable", counter_account.key);
        return Err(ProgramError::InvalidAccountData);
    }

    let mut data = counter_account.try_borrow_mut_data()?;
    match process_counter_data(&mut data[..], instruction_data) {
        Ok(count) => {
            msg!("Counter updated to {}", count);
            Ok(())
        }
        Err(err) => {
            msg!("Counter {} rejected instruction: {}", counter_account.key, err);
            Err(err.into())
        }
    }
}
