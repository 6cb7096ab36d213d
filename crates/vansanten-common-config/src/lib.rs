//! Configuration types for the vansanten tools.
//!
//! This crate provides the configuration read from
//! `.vansanten/config.yaml` files and the environment.

pub mod types;
pub mod loader;
pub mod env;

pub use types::*;
pub use loader::*;
pub use env::*;
