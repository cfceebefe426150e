//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the core simulation and the
//! outside world. The training pipeline drives the environment and agent
//! directly; observers plug in behind the `Observer` trait and are never
//! required for correct operation.

pub mod observer;

pub use observer::Observer;
