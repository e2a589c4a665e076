#![allow(unexpected_cfgs)]

pub mod entrypoint; // where the Solana program process starts
pub mod error; // program errors and their on-chain codes
pub mod instruction; // instruction wire format and client-side builders
pub mod processor; // counter arithmetic and account updates
pub mod state; // on-chain counter account layout

pub use crate::error::{ArithmeticFault, CounterError};
pub use crate::instruction::CounterInstruction;
pub use crate::processor::{apply, apply_with, process_instruction, ArithmeticPolicy};
pub use crate::state::CounterAccount;

solana_program::declare_id!("CntrU32hXkz5vfE8qGQ3Vg2zXJ6mRwNm1xZ4yJ8tPq7D");
