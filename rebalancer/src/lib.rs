//! fintilt-rebalancer: command-line front end for the fintilt engine.
//!
//! Loads a target allocation from YAML or TOML, reads current positions from a
//! brokerage CSV export, and prints how far each holding has drifted and how
//! much to buy or sell. Also splits a fresh deposit across the allocation.

pub mod amount;
pub mod commands;
pub mod config;
pub mod error;
pub mod holdings;
pub mod render;
