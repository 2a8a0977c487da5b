//! # Exploit Simulations
//!
//! Each test plays an attacker against a deployed wallet and asserts the
//! attack is rejected without side effects.

pub mod forgery;
