//! # Adapters Layer
//!
//! `DeterministicDeployer` for the in-process `SimulatedHost`.

pub mod simulated;
