//! Library root for the quadruped walker.
//!
//! Re-exports all main modules: [`robot`], [`gait`], [`dispatch`] and [`hal`].
//! Used by the firmware binary and by the host-side tests.
#![cfg_attr(not(test), no_std)]

pub mod dispatch;
pub mod error;
pub mod gait;
pub mod hal;
pub mod robot;

pub use error::Error;
