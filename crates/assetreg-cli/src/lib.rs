//! # assetreg-cli — Asset Registry Command-Line Host
//!
//! Plays the part of the ledger host for local use: each invocation loads the
//! world state from a snapshot file, runs exactly one transaction handler,
//! and commits the snapshot back when the transaction succeeded.
//!
//! ## Subcommands
//!
//! - `init` — write the seed records
//! - `create` / `read` / `update` / `delete` — single-asset CRUD
//! - `exists` — existence check
//! - `transfer` — change an asset's owner
//! - `list` — every stored value
//! - `digest` — SHA-256 of the whole world state
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; this library holds config
//!   resolution and dispatch so tests can drive it directly.
//! - No business logic here: every subcommand delegates to `AssetRegistry`.

pub mod commands;
pub mod config;

pub use commands::{execute, run_transaction, AssetArgs, TxCommand, TxOutcome};
pub use config::CliConfig;
