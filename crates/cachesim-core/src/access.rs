//! The unit of simulator input: one memory reference.

use crate::error::CacheSimError;

/// Kind of memory reference, matching the `.din` trace encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AccessKind {
    ReadData = 0,
    WriteData = 1,
    ReadInst = 2,
}

impl AccessKind {
    pub fn is_write(self) -> bool {
        matches!(self, AccessKind::WriteData)
    }

    pub fn is_instruction(self) -> bool {
        matches!(self, AccessKind::ReadInst)
    }
}

impl std::fmt::Display for AccessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadData => write!(f, "read_data"),
            Self::WriteData => write!(f, "write_data"),
            Self::ReadInst => write!(f, "read_inst"),
        }
    }
}

impl TryFrom<u8> for AccessKind {
    type Error = CacheSimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::ReadData),
            1 => Ok(Self::WriteData),
            2 => Ok(Self::ReadInst),
            other => Err(CacheSimError::InvalidConfig(format!(
                "access kind must be 0, 1, or 2, got {other}"
            ))),
        }
    }
}

/// One memory reference: `(kind, byte address)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessRecord {
    pub kind: AccessKind,
    pub address: u64,
}
