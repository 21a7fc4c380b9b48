//! Command types for gait selection.
//!
//! Produced by the [`Dispatcher`](crate::dispatch::Dispatcher) from sensor readings and run by
//! [`GaitEngine::execute`](crate::gait::engine::GaitEngine::execute).
use core::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaitCommand {
    WalkForward,
    WalkBackward,
    RotateCw,
    RotateCcw,
}

impl Display for GaitCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GaitCommand::WalkForward => f.write_str("walk forward"),
            GaitCommand::WalkBackward => f.write_str("walk backward"),
            GaitCommand::RotateCw => f.write_str("rotate clockwise"),
            GaitCommand::RotateCcw => f.write_str("rotate counterclockwise"),
        }
    }
}
