use solana_program::program_error::ProgramError;
use thiserror::Error;

use crate::instruction::CounterInstruction;
use crate::state::CounterAccount;

/// Failures of the counter arithmetic when a checked policy is in effect.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticFault {
    #[error("counter overflow")]
    Overflow,
    #[error("counter underflow")]
    Underflow,
}

/// Errors raised while decoding or applying a counter instruction.
///
/// Every variant maps to a stable `ProgramError::Custom` code so clients can tell
/// a bad request apart from a transport failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterError {
    #[error("counter account must be {len} bytes, got {actual}", len = CounterAccount::LEN)]
    MalformedAccount { actual: usize },
    #[error("instruction must be {len} bytes, got {actual}", len = CounterInstruction::LEN)]
    MalformedInstruction { actual: usize },
    #[error("unknown instruction discriminant {0}")]
    UnknownDiscriminant(u8),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticFault),
}

impl CounterError {
    pub fn code(&self) -> u32 {
        match self {
            Self::MalformedAccount { .. } => 0,
            Self::MalformedInstruction { .. } => 1,
            Self::UnknownDiscriminant(_) => 2,
            Self::Arithmetic(ArithmeticFault::Overflow) => 3,
            Self::Arithmetic(ArithmeticFault::Underflow) => 4,
        }
    }
}

impl From<CounterError> for ProgramError {
    fn from(err: CounterError) -> Self {
        ProgramError::Custom(err.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            ProgramError::from(CounterError::MalformedAccount { actual: 8 }),
            ProgramError::Custom(0)
        );
        assert_eq!(
            ProgramError::from(CounterError::MalformedInstruction { actual: 3 }),
            ProgramError::Custom(1)
        );
        assert_eq!(
            ProgramError::from(CounterError::UnknownDiscriminant(2)),
            ProgramError::Custom(2)
        );
        assert_eq!(CounterError::from(ArithmeticFault::Overflow).code(), 3);
        assert_eq!(CounterError::from(ArithmeticFault::Underflow).code(), 4);
    }

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            CounterError::MalformedInstruction { actual: 3 }.to_string(),
            "instruction must be 5 bytes, got 3"
        );
        assert_eq!(
            CounterError::MalformedAccount { actual: 8 }.to_string(),
            "counter account must be 4 bytes, got 8"
        );
        assert_eq!(
            CounterError::UnknownDiscriminant(7).to_string(),
            "unknown instruction discriminant 7"
        );
        assert_eq!(
            CounterError::Arithmetic(ArithmeticFault::Underflow).to_string(),
            "counter underflow"
        );
    }
}
