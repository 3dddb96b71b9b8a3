//! # Transaction Subcommands
//!
//! Each subcommand maps to one `AssetRegistry` handler. `run_transaction`
//! wraps a handler the way a ledger host would: load state, run, commit on
//! success.
//!
//! ## Exit codes
//!
//! - `0` — the handler succeeded; its result is printed on stdout.
//! - `1` — the handler rejected the transaction (`NotFound`, `AlreadyExists`).
//! - `2` — anything else (store, snapshot or encoding failure).

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use assetreg_core::CanonicalBytes;
use assetreg_registry::{AssetRegistry, RegistryError, Snapshot, WorldState};

use crate::config::CliConfig;

/// Fields of an asset as given on the command line.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AssetArgs {
    /// Asset id (world-state key).
    pub id: String,
    /// Name of the game.
    pub game_name: String,
    /// Current owner.
    pub owner_name: String,
    /// Kind of owner (e.g. "player", "club").
    pub owner_type: String,
    /// Value of the asset.
    #[arg(allow_negative_numbers = true)]
    pub game_value: i64,
}

/// One registry transaction.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TxCommand {
    /// Write the seed records, each tagged docType "asset".
    Init,

    /// Create a new asset. Fails if the id is taken.
    Create(AssetArgs),

    /// Print an asset exactly as stored.
    Read {
        /// Asset id.
        id: String,
    },

    /// Replace an existing asset entirely.
    Update(AssetArgs),

    /// Delete an existing asset.
    Delete {
        /// Asset id.
        id: String,
    },

    /// Print whether an asset exists.
    Exists {
        /// Asset id.
        id: String,
    },

    /// Change an asset's owner and print the previous owner.
    Transfer {
        /// Asset id.
        id: String,
        /// Owner after the transfer.
        new_owner_name: String,
    },

    /// Print every stored value.
    List,

    /// Print the SHA-256 digest of the whole world state.
    Digest,

    /// Print whether the world state hashes to the given digest.
    VerifyDigest {
        /// Expected digest, bare hex or `sha256:<hex>`.
        expected: String,
    },
}

impl TxCommand {
    /// Subcommand name, for log and error context.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Create(_) => "create",
            Self::Read { .. } => "read",
            Self::Update(_) => "update",
            Self::Delete { .. } => "delete",
            Self::Exists { .. } => "exists",
            Self::Transfer { .. } => "transfer",
            Self::List => "list",
            Self::Digest => "digest",
            Self::VerifyDigest { .. } => "verify-digest",
        }
    }

    /// Whether the transaction writes to world state.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Init | Self::Create(_) | Self::Update(_) | Self::Delete { .. } | Self::Transfer { .. }
        )
    }
}

/// Result of a transaction as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    /// The handler succeeded with this output.
    Ok(String),
    /// The handler rejected the transaction with this message.
    Rejected(String),
}

impl TxOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Ok(_) => 0,
            Self::Rejected(_) => 1,
        }
    }
}

/// Run `cmd` against `registry` and render its result as one line of text.
pub async fn execute<S: WorldState>(
    registry: &AssetRegistry<S>,
    cmd: &TxCommand,
) -> Result<String, RegistryError> {
    let out = match cmd {
        TxCommand::Init => {
            let written = registry.init_ledger().await?;
            canonical_line(&serde_json::json!({ "initialized": written }))?
        }
        TxCommand::Create(a) => registry
            .create_asset(&a.id, &a.game_name, &a.owner_name, &a.owner_type, a.game_value)
            .await?
            .to_string(),
        TxCommand::Read { id } => registry.read_asset(id).await?,
        TxCommand::Update(a) => registry
            .update_asset(&a.id, &a.game_name, &a.owner_name, &a.owner_type, a.game_value)
            .await?
            .to_string(),
        TxCommand::Delete { id } => {
            registry.delete_asset(id).await?;
            canonical_line(&serde_json::json!({ "deleted": id }))?
        }
        TxCommand::Exists { id } => registry.asset_exists(id).await?.to_string(),
        TxCommand::Transfer { id, new_owner_name } => {
            let outcome = registry.transfer_asset(id, new_owner_name).await?;
            canonical_line(&outcome)?
        }
        TxCommand::List => canonical_line(&registry.get_all_assets().await?)?,
        TxCommand::Digest => registry.state_digest().await?.to_string(),
        TxCommand::VerifyDigest { expected } => {
            registry.verify_state_digest(expected).await?.to_string()
        }
    };
    Ok(out)
}

/// Load the snapshot, run one transaction, and commit the snapshot.
///
/// Mutating transactions commit only on success, with one exception: a
/// failed `init` still commits the seed records written before the failure,
/// because initialization has no rollback.
pub async fn run_transaction(config: &CliConfig, cmd: &TxCommand) -> Result<TxOutcome> {
    let state = Snapshot::load(&config.state_path)
        .with_context(|| format!("failed to load world state from {}", config.state_path.display()))?;
    let registry = AssetRegistry::new(state);

    tracing::info!(transaction = cmd.name(), "executing transaction");
    let result = execute(&registry, cmd).await;

    let commit = cmd.is_mutating() && (result.is_ok() || matches!(cmd, TxCommand::Init));
    if commit {
        Snapshot::save(&config.state_path, registry.state()).with_context(|| {
            format!("failed to commit world state to {}", config.state_path.display())
        })?;
    }

    match result {
        Ok(out) => Ok(TxOutcome::Ok(out)),
        Err(e) if e.is_existence_failure() => {
            tracing::info!(transaction = cmd.name(), reason = %e, "transaction rejected");
            Ok(TxOutcome::Rejected(e.to_string()))
        }
        Err(e) => Err(e).with_context(|| format!("{} transaction failed", cmd.name())),
    }
}

fn canonical_line(value: &impl serde::Serialize) -> Result<String, RegistryError> {
    Ok(CanonicalBytes::new(value)?.to_string())
}
