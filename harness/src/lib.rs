pub mod args;
pub mod error;
pub mod ledger;
pub mod scenario;

pub use crate::error::HarnessError;
pub use crate::ledger::{AccountSnapshot, CounterLedger, RpcLedger};
pub use crate::scenario::Scenario;
