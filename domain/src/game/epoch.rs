//! Request generation tokens

use serde::{Deserialize, Serialize};

/// Generation token attached to every backend request
///
/// The game bumps its epoch whenever it issues a request and whenever it
/// restarts. A response is only applied if it carries the current epoch, so
/// a batch that lands after a restart is dropped instead of leaking into the
/// new game.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Epoch(u64);

impl Epoch {
    pub const fn initial() -> Self {
        Self(0)
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}
