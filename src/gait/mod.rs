//! Stances and gaits.
//!
//! - [`stance`] holds the named leg targets.
//! - [`sequence`] describes walks and rotations as scripts of motions.
//! - [`engine`] owns the legs and executes stances and scripts.
pub mod engine;
pub mod sequence;
pub mod stance;
