//! Core robot types and configuration.
//!
//! This module defines the main types and constants for the walker, including:
//! - [`commands`]: Gait commands chosen by the dispatcher.
//! - [`config`]: Calibration, timing and sensor constants for the robot.
//! - [`leg`]: Leg enumeration and per-leg maps.
//! - [`joint`]: Joint enumeration and display helpers.
//! - [`servo`]: One calibrated actuator channel.
//! - [`assembly`]: The three servos of a leg, moved together.
pub mod assembly;
pub mod commands;
pub mod config;
pub mod joint;
pub mod leg;
pub mod servo;
