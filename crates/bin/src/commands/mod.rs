//! Subcommand implementations.

pub mod health;
pub mod serve;
pub mod status;
