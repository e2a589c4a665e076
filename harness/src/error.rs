use counter_program::CounterError;
use solana_client::client_error::ClientError;
use solana_sdk::{instruction::InstructionError, pubkey::Pubkey, transaction::TransactionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("rpc client error: {0}")]
    Client(#[from] ClientError),
    #[error("transaction rejected: {0}")]
    Rejected(TransactionError),
    #[error("account {0} not found")]
    AccountNotFound(Pubkey),
    #[error("account {account} is owned by {actual}, expected {expected}")]
    WrongOwner {
        account: Pubkey,
        expected: Pubkey,
        actual: Pubkey,
    },
    #[error(transparent)]
    Counter(#[from] CounterError),
    #[error("counter {account} holds {actual}, expected {expected}")]
    Mismatch {
        account: Pubkey,
        expected: u32,
        actual: u32,
    },
    #[error("payer {payer} still holds {balance} lamports after airdrop, needs {required}")]
    Funding {
        payer: Pubkey,
        balance: u64,
        required: u64,
    },
}

impl HarnessError {
    /// Split transaction failures out of generic transport errors.
    pub fn from_client(err: ClientError) -> Self {
        match err.get_transaction_error() {
            Some(tx_err) => Self::Rejected(tx_err),
            None => Self::Client(err),
        }
    }

    /// The program's custom error code, if the ledger rejected the instruction with one.
    pub fn custom_code(&self) -> Option<u32> {
        match self {
            Self::Rejected(TransactionError::InstructionError(_, InstructionError::Custom(code))) => {
                Some(*code)
            }
            _ => None,
        }
    }
}
