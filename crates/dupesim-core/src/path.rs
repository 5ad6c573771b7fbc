//! Redundant path identity.
//!
//! Each frame travels over two independent LANs. The path a copy arrived on
//! is kept for diagnostics and per-path statistics only; duplicate discard
//! never looks at it.

use std::{fmt, str::FromStr};

use crate::error::PathParseError;

/// One of the two redundant paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathId {
    /// LAN A
    A,
    /// LAN B
    B,
}

impl PathId {
    /// Both paths, in index order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// LAN identifier as carried in a PRP redundancy control trailer.
    pub fn lan_code(self) -> u8 {
        match self {
            Self::A => 0xA,
            Self::B => 0xB,
        }
    }

    /// Dense index for per-path arrays (A = 0, B = 1).
    pub fn index(self) -> usize {
        usize::from(self.lan_code() & 0x1)
    }

    /// The redundant partner of this path.
    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

impl FromStr for PathId {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            other => Err(PathParseError { input: other.to_string() }),
        }
    }
}
