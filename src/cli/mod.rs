//! Command line interface for the Prashna question bank.

pub mod args;
pub mod commands;
