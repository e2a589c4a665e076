// state.rs
use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::CounterError;

/// Persisted counter state. The account holds exactly these 4 bytes, little-endian.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterAccount {
    pub count: u32,
}

impl CounterAccount {
    pub const LEN: usize = 4;

    pub fn new(count: u32) -> Self {
        Self { count }
    }

    pub fn pack(&self) -> [u8; Self::LEN] {
        self.count.to_le_bytes()
    }

    pub fn unpack(data: &[u8]) -> Result<Self, CounterError> {
        let bytes: [u8; Self::LEN] = data
            .try_into()
            .map_err(|_| CounterError::MalformedAccount { actual: data.len() })?;
        Ok(Self {
            count: u32::from_le_bytes(bytes),
        })
    }
}
