//! End-of-life markers for local variable slots.

use super::Pc;
use serde::{Deserialize, Serialize};

/// Where a local's lifetime ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifetimeEnd {
    /// Alive until the enclosing frame closes
    Frame,

    /// Dead once the instruction at this offset is reached
    Pc(Pc),
}

impl LifetimeEnd {
    /// Whether a local with this end-of-life is still live at `pc`
    pub fn is_live_at(self, pc: Pc) -> bool {
        match self {
            LifetimeEnd::Frame => true,
            LifetimeEnd::Pc(end) => pc < end,
        }
    }
}
