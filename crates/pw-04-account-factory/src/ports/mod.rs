//! # Ports Layer
//!
//! - **Inbound (Driving)**: deployment API
//! - **Outbound (Driven)**: deterministic-allocation substrate

pub mod inbound;
pub mod outbound;

pub use inbound::AccountDeployment;
pub use outbound::DeterministicDeployer;
