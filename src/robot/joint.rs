//! Joint enumeration and display helpers.
//!
//! Defines the [`Joint`] enum for identifying each joint role of a leg (hip, knee, ankle),
//! and provides display formatting for debugging and logging.
use core::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    Hip = 0,
    Knee = 1,
    Ankle = 2,
}

impl Joint {
    /// Traversal order used by every multi-joint update.
    pub const ALL: [Joint; 3] = [Joint::Hip, Joint::Knee, Joint::Ankle];
}

impl Display for Joint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Joint::Hip => f.write_str("hip"),
            Joint::Knee => f.write_str("knee"),
            Joint::Ankle => f.write_str("ankle"),
        }
    }
}

impl From<usize> for Joint {
    fn from(value: usize) -> Self {
        match value {
            0 => Joint::Hip,
            1 => Joint::Knee,
            2 => Joint::Ankle,
            _ => unreachable!(),
        }
    }
}
